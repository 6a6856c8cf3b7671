//! Command-line arguments for sched-lens

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sched_lens_core::parsers::DetectionPolicy;

/// How mixed timeline lists are read
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Detection {
    /// The first element decides the shape of the whole list (default)
    FirstElement,
    /// Every element is read by its own shape
    PerElement,
}

impl From<Detection> for DetectionPolicy {
    fn from(d: Detection) -> Self {
        match d {
            Detection::FirstElement => DetectionPolicy::FirstElement,
            Detection::PerElement => DetectionPolicy::PerElement,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sched-lens")]
#[command(version)]
#[command(about = "Normalize CPU scheduling timelines and compare simulation runs", long_about = None)]
pub struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize a timeline file into canonical `{pid, start, end}` intervals
    Normalize {
        /// Timeline JSON file, or `-` for stdin
        file: PathBuf,

        #[arg(long, value_enum)]
        detection: Option<Detection>,
    },

    /// Derive intervals, utilization, quanta and context switches from a result
    Analyze {
        /// Simulation result JSON file, or `-` for stdin
        file: PathBuf,

        #[arg(long, value_enum)]
        detection: Option<Detection>,
    },

    /// Compare a baseline result against a second run of the same workload
    Compare {
        baseline: PathBuf,
        compare: PathBuf,

        /// JSON file with comparison options (process order, detection, gantt geometry)
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,

        /// Lane order, overriding the options file (e.g. `P1,P2,P3`)
        #[arg(long, value_delimiter = ',', value_name = "PIDS")]
        process_order: Vec<String>,

        #[arg(long, value_enum)]
        detection: Option<Detection>,
    },
}
