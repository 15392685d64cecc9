// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::AlgorithmId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported hash algorithm {0}")]
    UnsupportedAlgorithm(AlgorithmId),
    #[error("operation requires a non-null hash algorithm")]
    InvalidState,
    #[error("{algorithm} digest must be {expected} bytes, got {actual}")]
    DigestLengthMismatch {
        algorithm: AlgorithmId,
        expected: usize,
        actual: usize,
    },
    #[error("invalid hash algorithm name: {0:?}")]
    InvalidAlgorithmName(String),
}
