// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use tpm_named_hash::{AlgorithmId, NamedHashValue};

/// Replayed PCR bank in the shape of the Nitro Enclave build info output
///
/// `HashAlgorithm` is written first, followed by the PCRs in numeric order.
pub(crate) struct BuildInfo {
    algorithm: AlgorithmId,
    pcrs: std::collections::BTreeMap<u8, NamedHashValue>,
}

impl BuildInfo {
    pub(crate) fn new(algorithm: AlgorithmId) -> Self {
        Self {
            algorithm,
            pcrs: std::collections::BTreeMap::new(),
        }
    }

    pub(crate) fn add_measurement(&mut self, index: u8, pcr: NamedHashValue) {
        self.pcrs.insert(index, pcr);
    }
}

impl serde::Serialize for BuildInfo {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut build_info = serde::Serializer::serialize_struct(serializer, "BuildInfo", 1)?;

        serde::ser::SerializeStruct::serialize_field(
            &mut build_info,
            "Measurements",
            &Measurements(self),
        )?;

        serde::ser::SerializeStruct::end(build_info)
    }
}

struct Measurements<'a>(&'a BuildInfo);

impl serde::Serialize for Measurements<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut measurements =
            serde::Serializer::serialize_map(serializer, Some(self.0.pcrs.len() + 1))?;

        serde::ser::SerializeMap::serialize_entry(
            &mut measurements,
            "HashAlgorithm",
            &self.0.algorithm.to_string(),
        )?;

        for (index, pcr) in &self.0.pcrs {
            serde::ser::SerializeMap::serialize_entry(
                &mut measurements,
                &format!("PCR{index}"),
                &format!("{pcr:x}"),
            )?;
        }

        serde::ser::SerializeMap::end(measurements)
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?;

        formatter.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_measurements() {
        let mut build_info = BuildInfo::new(AlgorithmId::SHA1);

        build_info.add_measurement(
            7,
            NamedHashValue::from_parts(AlgorithmId::SHA1, vec![0x0f; 20]).unwrap(),
        );

        let json: serde_json::Value = serde_json::from_str(&build_info.to_string()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "Measurements": {
                    "HashAlgorithm": "sha1",
                    "PCR7": "0f".repeat(20),
                }
            })
        );
    }

    #[test]
    fn pcrs_are_written_in_numeric_order() {
        let mut build_info = BuildInfo::new(AlgorithmId::SHA256);

        for index in [10, 4, 7] {
            build_info.add_measurement(index, NamedHashValue::zero(AlgorithmId::SHA256).unwrap());
        }

        let output = build_info.to_string();
        let position = |key: &str| output.find(key).unwrap();

        assert!(position("\"HashAlgorithm\"") < position("\"PCR4\""));
        assert!(position("\"PCR4\"") < position("\"PCR7\""));
        assert!(position("\"PCR7\"") < position("\"PCR10\""));
    }
}
