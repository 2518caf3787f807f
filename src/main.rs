//! dev-tests-run - parallel test runner for the platform's test suites
//!
//! Replaces the sequential `dev:tests:run` command: a test type selects a
//! list of suites, and each suite is handed to ParaTest, which spreads the
//! tests over its own worker processes.
//!
//! ## Usage
//!
//! ```bash
//! # Run the unit suites with 8 ParaTest workers
//! dev-tests-run unit --processes 8
//!
//! # Forward extra arguments to ParaTest
//! dev-tests-run integration -c "--filter CustomerTest"
//!
//! # Show the commands without running them
//! dev-tests-run static-all --dry-run
//!
//! # List available types
//! dev-tests-run --list
//! ```

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing::{debug, info};

mod catalog;
mod cli;
mod config;
mod error;
mod executor;
mod models;
mod output;
mod utils;

use cli::Args;
use config::{ConfigFile, EnvConfig, Settings};
use executor::{Dispatcher, RunRequest, ShellLauncher, RETURN_SUCCESS};
use utils::{init_logger, LogLevel};

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(LogLevel::from_verbose(args.verbose));

    if args.list {
        list_types();
        return Ok(());
    }

    let exit_code = run_tests(&args)?;
    if exit_code != RETURN_SUCCESS {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn run_tests(args: &Args) -> Result<i32> {
    let env = EnvConfig::load();
    if env.has_any() {
        debug!("Applying DEV_TESTS_RUN_* environment overrides");
    }

    let config_path = args.config.clone().or_else(|| env.config_file.clone());
    let config = ConfigFile::load_or_default(config_path.as_deref())?;
    let settings = Settings::resolve(args, &env, &config.app)?;

    let request = RunRequest {
        test_type: args.test_type.clone(),
        runner: Some(settings.runner),
        processes: settings.processes,
        passthrough: args.arguments.clone(),
        dry_run: args.dry_run,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome =
        Dispatcher::new(settings.paths, ShellLauncher::new()).dispatch(&request, &mut out)?;

    if let (Some(path), Some(report)) = (&args.report, &outcome.report) {
        report.save(path)?;
        info!(
            "Run report written to {} ({}ms)",
            path.display(),
            report.duration_ms()
        );
    }

    Ok(outcome.exit_code)
}

fn list_types() {
    println!("\nAvailable test types\n");
    println!("──────────────────────────────────────────────────────────────────────");

    for entry in catalog::TYPES {
        let suites: Vec<_> = catalog::suites_of(entry).iter().map(|s| s.key).collect();
        println!("  {:16} {}", entry.name, suites.join(", "));
    }

    println!("\nSuites\n");
    println!("──────────────────────────────────────────────────────────────────────");

    for suite in catalog::SUITES {
        if suite.has_extra_args() {
            println!("  {:22} {} [{}]", suite.key, suite.directory, suite.extra_args);
        } else {
            println!("  {:22} {}", suite.key, suite.directory);
        }
    }
    println!();
}
