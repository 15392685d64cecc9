// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context as _;
use tpm_named_hash::{AlgorithmId, NamedHashValue};

/// One measurement applied to a PCR
#[derive(serde::Deserialize, Debug, PartialEq)]
pub(crate) struct Entry {
    pub pcr: u8,
    #[serde(flatten)]
    pub operation: Operation,
}

#[derive(serde::Deserialize, Debug, PartialEq)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub(crate) enum Operation {
    /// Extend by the given bytes as-is
    Extend {
        #[serde(deserialize_with = "hex::serde::deserialize")]
        data: Vec<u8>,
    },
    /// Extend by the hash of the given bytes
    Event {
        #[serde(deserialize_with = "hex::serde::deserialize")]
        data: Vec<u8>,
    },
    EventText {
        text: String,
    },
    /// Relative paths are resolved against the directory of the log file
    EventFile {
        path: std::path::PathBuf,
    },
    Reset,
}

pub(crate) fn parse(data: &[u8]) -> anyhow::Result<Vec<Entry>> {
    Ok(serde_json::from_slice(data)?)
}

/// Replay all entries in order, each PCR starts zeroed on first use
pub(crate) fn replay(
    algorithm: AlgorithmId,
    entries: &[Entry],
    base_directory: &std::path::Path,
) -> anyhow::Result<std::collections::BTreeMap<u8, NamedHashValue>> {
    let mut pcrs = std::collections::BTreeMap::new();

    for (number, entry) in entries.iter().enumerate() {
        let pcr = match pcrs.entry(entry.pcr) {
            std::collections::btree_map::Entry::Occupied(occupied) => occupied.into_mut(),
            std::collections::btree_map::Entry::Vacant(vacant) => {
                vacant.insert(NamedHashValue::zero(algorithm)?)
            }
        };

        apply(pcr, &entry.operation, base_directory).with_context(|| {
            format!("Could not replay log entry {number} (PCR{})", entry.pcr)
        })?;

        log::debug!("[PCR{}] {:?}: {pcr:x}", entry.pcr, entry.operation);
    }

    Ok(pcrs)
}

/// PCRs to report: everything touched by the log, or exactly the requested indices, where an
/// index the log never touched reports its zero value
pub(crate) fn select(
    algorithm: AlgorithmId,
    pcrs: std::collections::BTreeMap<u8, NamedHashValue>,
    requested: &[u8],
) -> anyhow::Result<std::collections::BTreeMap<u8, NamedHashValue>> {
    if requested.is_empty() {
        return Ok(pcrs);
    }

    requested
        .iter()
        .map(|index| {
            let pcr = match pcrs.get(index) {
                Some(pcr) => pcr.clone(),
                None => {
                    log::debug!("[PCR{index}] not touched by the log");

                    NamedHashValue::zero(algorithm)?
                }
            };

            Ok::<_, anyhow::Error>((*index, pcr))
        })
        .collect()
}

fn apply(
    pcr: &mut NamedHashValue,
    operation: &Operation,
    base_directory: &std::path::Path,
) -> anyhow::Result<()> {
    match operation {
        Operation::Extend { data } => pcr.extend(data)?,
        Operation::Event { data } => pcr.event(data)?,
        Operation::EventText { text } => pcr.event(text.as_bytes())?,
        Operation::EventFile { path } => {
            let path = base_directory.join(path);
            let data = std::fs::read(&path)
                .with_context(|| format!("Could not read event data from {}", path.display()))?;

            pcr.event(&data)?
        }
        Operation::Reset => pcr.reset()?,
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = r#"[
        {"pcr": 4, "operation": "event_text", "text": "Calling EFI Application from Boot Option"},
        {"pcr": 4, "operation": "event", "data": "00000000"},
        {"pcr": 7, "operation": "extend", "data": "0102"},
        {"pcr": 7, "operation": "reset"},
        {"pcr": 7, "operation": "event_file", "path": "db.esl"}
    ]"#;

    #[test]
    fn parses_all_operations() {
        let entries = parse(LOG.as_bytes()).unwrap();

        assert_eq!(
            entries,
            [
                Entry {
                    pcr: 4,
                    operation: Operation::EventText {
                        text: "Calling EFI Application from Boot Option".to_string(),
                    },
                },
                Entry {
                    pcr: 4,
                    operation: Operation::Event {
                        data: vec![0; 4],
                    },
                },
                Entry {
                    pcr: 7,
                    operation: Operation::Extend {
                        data: vec![1, 2],
                    },
                },
                Entry {
                    pcr: 7,
                    operation: Operation::Reset,
                },
                Entry {
                    pcr: 7,
                    operation: Operation::EventFile {
                        path: "db.esl".into(),
                    },
                },
            ]
        );
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(parse(br#"[{"pcr": 1, "operation": "extend", "data": "xyz"}]"#).is_err());
        assert!(parse(br#"[{"pcr": 1, "operation": "unknown"}]"#).is_err());
        assert!(parse(br#"[{"pcr": 256, "operation": "reset"}]"#).is_err());
    }

    #[test]
    fn replays_log() {
        let directory = tempfile::tempdir().unwrap();

        std::fs::write(directory.path().join("db.esl"), b"signature database").unwrap();

        let entries = parse(LOG.as_bytes()).unwrap();
        let pcrs = replay(AlgorithmId::SHA384, &entries, directory.path()).unwrap();

        let mut pcr4 = NamedHashValue::zero(AlgorithmId::SHA384).unwrap();

        pcr4.event(b"Calling EFI Application from Boot Option")
            .unwrap()
            .event(&[0; 4])
            .unwrap();

        let mut pcr7 = NamedHashValue::zero(AlgorithmId::SHA384).unwrap();

        pcr7.event(b"signature database").unwrap();

        assert_eq!(pcrs.keys().copied().collect::<Vec<_>>(), [4, 7]);
        assert_eq!(pcrs[&4], pcr4);
        assert_eq!(pcrs[&7], pcr7);
    }

    #[test]
    fn missing_event_file_names_the_entry() {
        let directory = tempfile::tempdir().unwrap();
        let entries = parse(LOG.as_bytes()).unwrap();

        let error = replay(AlgorithmId::SHA256, &entries, directory.path()).unwrap_err();

        assert_eq!(error.to_string(), "Could not replay log entry 4 (PCR7)");
    }

    #[test]
    fn select_reports_requested_pcrs() {
        let directory = tempfile::tempdir().unwrap();

        std::fs::write(directory.path().join("db.esl"), b"signature database").unwrap();

        let entries = parse(LOG.as_bytes()).unwrap();
        let pcrs = replay(AlgorithmId::SHA256, &entries, directory.path()).unwrap();
        let pcr4 = pcrs[&4].clone();

        let selected = select(AlgorithmId::SHA256, pcrs.clone(), &[9, 4, 4]).unwrap();

        assert_eq!(selected.keys().copied().collect::<Vec<_>>(), [4, 9]);
        assert_eq!(selected[&4], pcr4);
        assert_eq!(
            selected[&9],
            NamedHashValue::zero(AlgorithmId::SHA256).unwrap()
        );

        assert_eq!(select(AlgorithmId::SHA256, pcrs.clone(), &[]).unwrap(), pcrs);
    }

    #[test]
    fn unsupported_bank_fails() {
        let entries = parse(LOG.as_bytes()).unwrap();

        let error = replay(AlgorithmId::SM3_256, &entries, std::path::Path::new(".")).unwrap_err();

        assert_eq!(
            error.downcast_ref::<tpm_named_hash::Error>(),
            Some(&tpm_named_hash::Error::UnsupportedAlgorithm(
                AlgorithmId::SM3_256
            ))
        );
    }
}
