//! Runner command construction

use std::path::Path;

use super::DEFAULT_RUNNER;
use crate::config::InstallPaths;
use crate::error::DispatchError;
use crate::models::SuiteEntry;

/// Worker count actually passed to the runner; anything below 1 becomes 1
pub fn effective_processes(requested: i64) -> i64 {
    requested.max(1)
}

/// Runner name actually passed to the runner; blank means the default
///
/// A non-blank name is passed through untouched, surrounding whitespace
/// included.
pub fn effective_runner(requested: Option<&str>) -> &str {
    match requested {
        Some(runner) if !runner.trim().is_empty() => runner,
        _ => DEFAULT_RUNNER,
    }
}

/// Wrap a value in single quotes so the shell reads it as one literal token
pub fn escape_shell_arg(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Builds the shell command for each suite
///
/// Argument order is fixed: runner flags, then the suite's own arguments,
/// then the caller's passthrough arguments.
#[derive(Clone, Debug)]
pub struct CommandBuilder {
    prefix: String,
    passthrough: Option<String>,
}

impl CommandBuilder {
    pub fn new(
        paths: &InstallPaths,
        runner: Option<&str>,
        processes: i64,
        passthrough: Option<&str>,
    ) -> Result<Self, DispatchError> {
        let prefix = format!(
            "{} {} --runner {} --processes {}",
            quote_word(&paths.interpreter)?,
            quote_path(&paths.runner_executable())?,
            escape_shell_arg(effective_runner(runner)),
            effective_processes(processes)
        );

        let passthrough = passthrough
            .filter(|args| !args.trim().is_empty())
            .map(str::to_string);

        Ok(Self {
            prefix,
            passthrough,
        })
    }

    /// Command line for a single suite
    pub fn build(&self, suite: &SuiteEntry) -> String {
        let mut command = self.prefix.clone();

        if suite.has_extra_args() {
            command.push(' ');
            command.push_str(suite.extra_args.trim());
        }

        if let Some(args) = &self.passthrough {
            command.push(' ');
            command.push_str(args);
        }

        command
    }
}

fn quote_word(value: &str) -> Result<String, DispatchError> {
    shlex::try_quote(value)
        .map(|quoted| quoted.into_owned())
        .map_err(|_| DispatchError::Unquotable {
            value: value.to_string(),
        })
}

fn quote_path(path: &Path) -> Result<String, DispatchError> {
    quote_word(&path.to_string_lossy())
}
