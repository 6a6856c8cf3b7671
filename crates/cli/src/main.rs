use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sched_lens_core::analysis::{CompareOptions, analyze_run, compare_runs};
use sched_lens_core::model::ProcessId;
use sched_lens_core::parsers::{DetectionPolicy, SimulationResult, normalize_timeline_with};

mod cli;

use cli::{Cli, Command};

fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(io::stderr)
            .init();
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_result(path: &Path) -> Result<SimulationResult> {
    let data = read_input(path)?;
    sched_lens_core::parsers::parse_result(&data)
        .with_context(|| format!("failed to parse result {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn load_options(path: Option<&Path>) -> Result<CompareOptions> {
    let Some(path) = path else {
        return Ok(CompareOptions::default());
    };
    let data = read_input(path)?;
    serde_json::from_slice(&data)
        .with_context(|| format!("invalid options file {}", path.display()))
}

fn policy(detection: Option<cli::Detection>) -> DetectionPolicy {
    detection.map(DetectionPolicy::from).unwrap_or_default()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Command::Normalize { file, detection } => {
            let data = read_input(&file)?;
            let value: Value = serde_json::from_slice(&data)
                .with_context(|| format!("invalid JSON in {}", file.display()))?;
            let intervals = normalize_timeline_with(&value, policy(detection));
            write_json(&intervals, cli.pretty)
        }
        Command::Analyze { file, detection } => {
            let result = read_result(&file)?;
            write_json(&analyze_run(&result, policy(detection)), cli.pretty)
        }
        Command::Compare {
            baseline,
            compare,
            options,
            process_order,
            detection,
        } => {
            let mut opts = load_options(options.as_deref())?;
            if !process_order.is_empty() {
                opts.process_order = process_order.iter().map(ProcessId::new).collect();
            }
            if let Some(d) = detection {
                opts.detection = d.into();
            }
            debug!(?opts, "comparison options");

            let baseline = read_result(&baseline)?;
            let compare = read_result(&compare)?;
            write_json(&compare_runs(&baseline, &compare, &opts), cli.pretty)
        }
    }
}
