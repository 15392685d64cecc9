// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Hash functions behind a named hash value
//!
//! [`NamedHashValue`](crate::NamedHashValue) never computes a digest itself, it asks a
//! [`HashEngine`] for the digest width of its algorithm and for hashes under it.

use crate::hasher::Hasher;
use crate::{AlgorithmId, Error};

pub trait HashEngine {
    /// Digest width in bytes, 0 for the null algorithm
    fn digest_len(&self, algorithm: AlgorithmId) -> Result<usize, Error>;

    fn hash(&self, algorithm: AlgorithmId, data: &[u8]) -> Result<Vec<u8>, Error>;

    /// Hash of the concatenation of `parts`
    fn hash_concat(&self, algorithm: AlgorithmId, parts: &[&[u8]]) -> Result<Vec<u8>, Error> {
        self.hash(algorithm, &parts.concat())
    }
}

/// The default engine, backed by AWS-LC
#[derive(Copy, Clone, Debug, Default)]
pub struct AwsLc;

impl AwsLc {
    fn algorithm(algorithm: AlgorithmId) -> Result<&'static aws_lc_rs::digest::Algorithm, Error> {
        match algorithm {
            AlgorithmId::SHA1 => Ok(&aws_lc_rs::digest::SHA1_FOR_LEGACY_USE_ONLY),
            AlgorithmId::SHA256 => Ok(&aws_lc_rs::digest::SHA256),
            AlgorithmId::SHA384 => Ok(&aws_lc_rs::digest::SHA384),
            AlgorithmId::SHA512 => Ok(&aws_lc_rs::digest::SHA512),
            AlgorithmId::SHA3_256 => Ok(&aws_lc_rs::digest::SHA3_256),
            AlgorithmId::SHA3_384 => Ok(&aws_lc_rs::digest::SHA3_384),
            AlgorithmId::SHA3_512 => Ok(&aws_lc_rs::digest::SHA3_512),
            _ => Err(Error::UnsupportedAlgorithm(algorithm)),
        }
    }
}

impl HashEngine for AwsLc {
    fn digest_len(&self, algorithm: AlgorithmId) -> Result<usize, Error> {
        if algorithm.is_null() {
            return Ok(0);
        }

        Ok(Self::algorithm(algorithm)?.output_len)
    }

    fn hash(&self, algorithm: AlgorithmId, data: &[u8]) -> Result<Vec<u8>, Error> {
        Ok(aws_lc_rs::digest::digest(Self::algorithm(algorithm)?, data)
            .as_ref()
            .to_vec())
    }

    fn hash_concat(&self, algorithm: AlgorithmId, parts: &[&[u8]]) -> Result<Vec<u8>, Error> {
        let mut hasher = Hasher::new(Self::algorithm(algorithm)?);

        for part in parts {
            hasher.update(part);
        }

        Ok(hasher.finalize().as_ref().to_vec())
    }
}
