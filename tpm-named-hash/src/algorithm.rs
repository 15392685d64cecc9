// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! TPM2 algorithm identifiers (TPM_ALG_ID)
//!
//! The identifier is kept opaque: any 16-bit value is representable, whether or not a hash
//! engine knows how to compute it.

use crate::Error;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlgorithmId(u16);

impl AlgorithmId {
    pub const SHA1: Self = Self(0x0004);
    pub const SHA256: Self = Self(0x000B);
    pub const SHA384: Self = Self(0x000C);
    pub const SHA512: Self = Self(0x000D);
    /// No hashing, the digest of a value tagged with it is always empty
    pub const NULL: Self = Self(0x0010);
    pub const SM3_256: Self = Self(0x0012);
    pub const SHA3_256: Self = Self(0x0027);
    pub const SHA3_384: Self = Self(0x0028);
    pub const SHA3_512: Self = Self(0x0029);

    const NAMES: [(Self, &'static str); 9] = [
        (Self::SHA1, "sha1"),
        (Self::SHA256, "sha256"),
        (Self::SHA384, "sha384"),
        (Self::SHA512, "sha512"),
        (Self::NULL, "null"),
        (Self::SM3_256, "sm3_256"),
        (Self::SHA3_256, "sha3_256"),
        (Self::SHA3_384, "sha3_384"),
        (Self::SHA3_512, "sha3_512"),
    ];

    pub const fn from_raw(value: u16) -> Self {
        Self(value)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }

    /// Lower-case name of a well-known identifier
    pub fn name(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(algorithm, _)| *algorithm == self)
            .map(|(_, name)| *name)
    }
}

impl Default for AlgorithmId {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<u16> for AlgorithmId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<AlgorithmId> for u16 {
    fn from(algorithm: AlgorithmId) -> Self {
        algorithm.0
    }
}

impl std::fmt::Debug for AlgorithmId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(formatter, "AlgorithmId({name})"),
            None => write!(formatter, "AlgorithmId({:#06x})", self.0),
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => formatter.write_str(name),
            None => write!(formatter, "{:#06x}", self.0),
        }
    }
}

/// Accepts a well-known name (case and `-`/`_` insensitive, e.g. `SHA3-256`) or a number, either
/// decimal or `0x` prefixed hexadecimal
impl std::str::FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let normalized = string.trim().to_ascii_lowercase().replace('-', "_");

        if let Some(hex) = normalized.strip_prefix("0x") {
            return u16::from_str_radix(hex, 16)
                .map(Self)
                .map_err(|_| Error::InvalidAlgorithmName(string.to_string()));
        }

        if let Ok(value) = normalized.parse::<u16>() {
            return Ok(Self(value));
        }

        Self::NAMES
            .iter()
            .find(|(_, name)| *name == normalized)
            .map(|(algorithm, _)| *algorithm)
            .ok_or_else(|| Error::InvalidAlgorithmName(string.to_string()))
    }
}
