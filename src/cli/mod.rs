//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::catalog::DEFAULT_TYPE;
use crate::config::ENV_HELP;

/// Run the platform test suites in parallel through ParaTest
#[derive(Parser, Debug)]
#[command(name = "dev-tests-run")]
#[command(version)]
#[command(about = "Run platform test suites in parallel through ParaTest")]
#[command(long_about = None)]
#[command(after_help = ENV_HELP)]
pub struct Args {
    /// Type of test to run (see --list)
    #[arg(default_value = DEFAULT_TYPE)]
    pub test_type: String,

    /// Number of ParaTest worker processes [default: 1]
    #[arg(short, long, allow_negative_numbers = true)]
    pub processes: Option<i64>,

    /// ParaTest runner (WrapperRunner recommended) [default: WrapperRunner]
    #[arg(short, long)]
    pub runner: Option<String>,

    /// Additional arguments forwarded verbatim to ParaTest
    #[arg(short = 'c', long = "arguments", allow_hyphen_values = true)]
    pub arguments: Option<String>,

    /// Installation root [default: current directory]
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Vendor directory relative to the installation root
    #[arg(long)]
    pub vendor_dir: Option<String>,

    /// Interpreter used to launch ParaTest [default: php]
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Configuration file (YAML or JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List available test types and exit
    #[arg(short, long)]
    pub list: bool,

    /// Print the commands that would run without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
