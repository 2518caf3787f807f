//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "DEV_TESTS_RUN";

/// Help text listing the recognised environment variables
pub const ENV_HELP: &str = "\
Environment Variables:
  DEV_TESTS_RUN_BASE_DIR      Installation root (defaults to the current directory)
  DEV_TESTS_RUN_VENDOR_DIR    Vendor directory relative to the installation root
  DEV_TESTS_RUN_INTERPRETER   Interpreter used to launch ParaTest (default: php)
  DEV_TESTS_RUN_RUNNER        ParaTest runner (default: WrapperRunner)
  DEV_TESTS_RUN_PROCESSES     Number of ParaTest worker processes
  DEV_TESTS_RUN_CONFIG        Path to configuration file";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Installation root from DEV_TESTS_RUN_BASE_DIR
    pub base_dir: Option<PathBuf>,
    /// Vendor directory from DEV_TESTS_RUN_VENDOR_DIR
    pub vendor_dir: Option<String>,
    /// Interpreter from DEV_TESTS_RUN_INTERPRETER
    pub interpreter: Option<String>,
    /// Runner from DEV_TESTS_RUN_RUNNER
    pub runner: Option<String>,
    /// Worker count from DEV_TESTS_RUN_PROCESSES
    pub processes: Option<i64>,
    /// Config file from DEV_TESTS_RUN_CONFIG
    pub config_file: Option<PathBuf>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_dir: get_env("BASE_DIR").map(PathBuf::from),
            vendor_dir: get_env("VENDOR_DIR"),
            interpreter: get_env("INTERPRETER"),
            runner: get_env("RUNNER"),
            processes: get_env_parse("PROCESSES"),
            config_file: get_env("CONFIG").map(PathBuf::from),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_dir.is_some()
            || self.vendor_dir.is_some()
            || self.interpreter.is_some()
            || self.runner.is_some()
            || self.processes.is_some()
            || self.config_file.is_some()
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.trim().parse().ok())
}

/// Builder for setting environment variables in tests
#[cfg(test)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

#[cfg(test)]
impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_{name}"), value.into()));
        self
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        for (key, value) in self.vars {
            env::set_var(key, value);
        }

        EnvGuard { previous }
    }
}

/// Guard that restores environment variables on drop
#[cfg(test)]
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}
