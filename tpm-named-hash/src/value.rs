// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! A hash algorithm paired with a digest (TPMT_HA) and the PCR operations on it
//!
//! Every non-null value holds exactly one digest width of bytes for its algorithm, a null value
//! holds none. Operations that would break this leave the value untouched and return an error.

use crate::{AlgorithmId, AwsLc, Error, HashEngine};

#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct NamedHashValue {
    algorithm: AlgorithmId,
    digest: Vec<u8>,
}

impl NamedHashValue {
    /// Wrap an existing digest, e.g. a PCR value read back from a TPM
    pub fn from_parts(algorithm: AlgorithmId, digest: Vec<u8>) -> Result<Self, Error> {
        Self::from_parts_with(&AwsLc, algorithm, digest)
    }

    pub fn from_parts_with<Engine: HashEngine + ?Sized>(
        engine: &Engine,
        algorithm: AlgorithmId,
        digest: Vec<u8>,
    ) -> Result<Self, Error> {
        let digest = checked_digest(engine, algorithm, digest)?;

        Ok(Self { algorithm, digest })
    }

    /// Hash of `data` under `algorithm`
    pub fn from_hash_of_data(algorithm: AlgorithmId, data: &[u8]) -> Result<Self, Error> {
        Self::from_hash_of_data_with(&AwsLc, algorithm, data)
    }

    pub fn from_hash_of_data_with<Engine: HashEngine + ?Sized>(
        engine: &Engine,
        algorithm: AlgorithmId,
        data: &[u8],
    ) -> Result<Self, Error> {
        let digest = checked_digest(engine, algorithm, engine.hash(algorithm, data)?)?;

        Ok(Self { algorithm, digest })
    }

    /// Hash of the UTF-8 encoding of `text` under `algorithm`
    pub fn from_hash_of_string(algorithm: AlgorithmId, text: &str) -> Result<Self, Error> {
        Self::from_hash_of_string_with(&AwsLc, algorithm, text)
    }

    pub fn from_hash_of_string_with<Engine: HashEngine + ?Sized>(
        engine: &Engine,
        algorithm: AlgorithmId,
        text: &str,
    ) -> Result<Self, Error> {
        Self::from_hash_of_data_with(engine, algorithm, text.as_bytes())
    }

    /// The all-zero digest a PCR starts from
    pub fn zero(algorithm: AlgorithmId) -> Result<Self, Error> {
        Self::zero_with(&AwsLc, algorithm)
    }

    pub fn zero_with<Engine: HashEngine + ?Sized>(
        engine: &Engine,
        algorithm: AlgorithmId,
    ) -> Result<Self, Error> {
        Ok(Self {
            algorithm,
            digest: zero_digest(engine, algorithm)?,
        })
    }

    /// TPM2_PCR_Extend: `digest := H(digest || data)`
    ///
    /// Unlike a TPM, `data` is not required to be one digest wide, so this also works for hash
    /// chains that are not backed by hardware.
    pub fn extend(&mut self, data: &[u8]) -> Result<&mut Self, Error> {
        self.extend_with(&AwsLc, data)
    }

    pub fn extend_with<Engine: HashEngine + ?Sized>(
        &mut self,
        engine: &Engine,
        data: &[u8],
    ) -> Result<&mut Self, Error> {
        if self.algorithm.is_null() {
            return Err(Error::InvalidState);
        }

        self.digest = checked_digest(
            engine,
            self.algorithm,
            engine.hash_concat(self.algorithm, &[self.digest.as_slice(), data])?,
        )?;

        log::trace!(
            "{}: extended by {} bytes -> {:x}",
            self.algorithm,
            data.len(),
            self
        );

        Ok(self)
    }

    /// TPM2_PCR_Event: `digest := H(digest || H(data))`
    ///
    /// Only the hash of the event data is committed to the register.
    pub fn event(&mut self, data: &[u8]) -> Result<&mut Self, Error> {
        self.event_with(&AwsLc, data)
    }

    pub fn event_with<Engine: HashEngine + ?Sized>(
        &mut self,
        engine: &Engine,
        data: &[u8],
    ) -> Result<&mut Self, Error> {
        if self.algorithm.is_null() {
            return Err(Error::InvalidState);
        }

        let event_digest =
            checked_digest(engine, self.algorithm, engine.hash(self.algorithm, data)?)?;

        self.digest = checked_digest(
            engine,
            self.algorithm,
            engine.hash_concat(
                self.algorithm,
                &[self.digest.as_slice(), event_digest.as_slice()],
            )?,
        )?;

        log::trace!(
            "{}: event of {} bytes -> {:x}",
            self.algorithm,
            data.len(),
            self
        );

        Ok(self)
    }

    /// Zero the digest, keeping the algorithm
    ///
    /// Registers that reset to all ones or to a locality dependent value are not modelled.
    pub fn reset(&mut self) -> Result<&mut Self, Error> {
        self.reset_with(&AwsLc)
    }

    pub fn reset_with<Engine: HashEngine + ?Sized>(
        &mut self,
        engine: &Engine,
    ) -> Result<&mut Self, Error> {
        self.digest = zero_digest(engine, self.algorithm)?;

        log::trace!("{}: reset", self.algorithm);

        Ok(self)
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    pub fn into_digest(self) -> Vec<u8> {
        self.digest
    }
}

fn zero_digest<Engine: HashEngine + ?Sized>(
    engine: &Engine,
    algorithm: AlgorithmId,
) -> Result<Vec<u8>, Error> {
    if algorithm.is_null() {
        return Ok(Vec::new());
    }

    Ok(vec![0u8; engine.digest_len(algorithm)?])
}

/// A digest of the wrong width means a broken engine or caller, it is never truncated or padded
fn checked_digest<Engine: HashEngine + ?Sized>(
    engine: &Engine,
    algorithm: AlgorithmId,
    digest: Vec<u8>,
) -> Result<Vec<u8>, Error> {
    let expected = if algorithm.is_null() {
        0
    } else {
        engine.digest_len(algorithm)?
    };

    if digest.len() != expected {
        return Err(Error::DigestLengthMismatch {
            algorithm,
            expected,
            actual: digest.len(),
        });
    }

    Ok(digest)
}

impl AsRef<[u8]> for NamedHashValue {
    fn as_ref(&self) -> &[u8] {
        &self.digest
    }
}

impl From<NamedHashValue> for Vec<u8> {
    fn from(value: NamedHashValue) -> Self {
        value.digest
    }
}

impl std::fmt::LowerHex for NamedHashValue {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.digest {
            write!(formatter, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl std::fmt::Display for NamedHashValue {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{:x}", self.algorithm, self)
    }
}
