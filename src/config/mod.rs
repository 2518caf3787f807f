//! Configuration module
//!
//! Settings are layered: command-line flags win over `DEV_TESTS_RUN_*`
//! environment variables, which win over the configuration file, which wins
//! over built-in defaults.

mod env;
mod file;
mod paths;

pub use env::{EnvConfig, ENV_HELP};
pub use file::ConfigFile;
pub use paths::InstallPaths;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::Args;

/// Application configuration as stored in the config file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Installation root; the current directory when unset
    pub base_dir: Option<PathBuf>,

    /// Vendor directory relative to the installation root
    pub vendor_dir: Option<String>,

    /// Interpreter used to launch the runner executable
    pub interpreter: String,

    /// Runner passed to `--runner` when none is given
    pub default_runner: String,

    /// Worker count when none is given
    pub default_processes: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            vendor_dir: None,
            interpreter: "php".to_string(),
            default_runner: String::new(),
            default_processes: 1,
        }
    }
}

/// Fully resolved settings for one run
#[derive(Clone, Debug)]
pub struct Settings {
    pub paths: InstallPaths,
    /// Requested runner; empty means "use the default runner"
    pub runner: String,
    /// Requested worker count, before clamping
    pub processes: i64,
}

impl Settings {
    /// Merge command-line, environment and file configuration
    pub fn resolve(args: &Args, env: &EnvConfig, app: &AppConfig) -> Result<Self> {
        let base_dir = args
            .base_dir
            .clone()
            .or_else(|| env.base_dir.clone())
            .or_else(|| app.base_dir.clone());

        let vendor_dir = first_non_empty([
            args.vendor_dir.as_deref(),
            env.vendor_dir.as_deref(),
            app.vendor_dir.as_deref(),
        ]);

        let interpreter = first_non_empty([
            args.interpreter.as_deref(),
            env.interpreter.as_deref(),
            Some(app.interpreter.as_str()),
        ])
        .unwrap_or_else(|| "php".to_string());

        let runner = first_non_blank([
            args.runner.as_deref(),
            env.runner.as_deref(),
            Some(app.default_runner.as_str()),
        ])
        .unwrap_or_default();

        let processes = args
            .processes
            .or(env.processes)
            .unwrap_or(app.default_processes);

        let paths = InstallPaths::resolve(base_dir, vendor_dir, interpreter)?;
        debug!(
            "Resolved settings: base={} vendor={} interpreter={} runner={:?} processes={}",
            paths.base_dir.display(),
            paths.vendor_dir,
            paths.interpreter,
            runner,
            processes
        );

        Ok(Self {
            paths,
            runner,
            processes,
        })
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<&str>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Like `first_non_empty`, but the winning value is kept verbatim
fn first_non_blank<const N: usize>(candidates: [Option<&str>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .map(str::to_string)
}
