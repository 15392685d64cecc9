// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

mod build_info;
mod event_log;

use anyhow::Context as _;
use build_info::BuildInfo;

/// Replay a measurement log into software TPM PCRs
#[derive(clap::Parser)]
struct Arguments {
    /// Path of a JSON measurement log
    log: std::path::PathBuf,
    /// PCR bank hash algorithm, by name (e.g. sha256) or TPM_ALG_ID
    #[arg(long, short, default_value = "sha384")]
    algorithm: tpm_named_hash::AlgorithmId,
    /// Only output the given PCR
    ///
    /// Can be repeated; all PCRs touched by the log are output by default. A PCR the log never
    /// touches is output with its reset value.
    #[arg(long, short)]
    pcr: Vec<u8>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let arguments: Arguments = clap::Parser::parse();

    let log_data = std::fs::read(&arguments.log).with_context(|| {
        format!(
            "Could not read measurement log from {}",
            arguments.log.display()
        )
    })?;
    let entries = event_log::parse(&log_data).with_context(|| {
        format!(
            "Could not parse measurement log from {}",
            arguments.log.display()
        )
    })?;
    let base_directory = arguments
        .log
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));

    log::debug!(
        "Replaying {} entries into the {} bank",
        entries.len(),
        arguments.algorithm
    );
    let pcrs = event_log::replay(arguments.algorithm, &entries, base_directory)?;

    let pcrs = event_log::select(arguments.algorithm, pcrs, &arguments.pcr)?;
    let mut build_info = BuildInfo::new(arguments.algorithm);

    for (index, pcr) in pcrs {
        build_info.add_measurement(index, pcr);
    }

    println!("{build_info}");

    Ok(())
}
