// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Software model of TPM2 named hash values (TPMT_HA)
//!
//! Provides the PCR extend, event and reset operations bit-compatible with a TPM bank, for
//! precomputing or replaying register values without hardware.

pub mod algorithm;
pub mod engine;
mod error;
mod hasher;
pub mod value;

pub use algorithm::AlgorithmId;
pub use engine::{AwsLc, HashEngine};
pub use error::Error;
pub use value::NamedHashValue;
