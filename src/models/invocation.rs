//! Planned invocations and their results
//!
//! An [`Invocation`] is built before anything runs; an [`InvocationResult`]
//! is recorded once the child process has exited.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A suite ready to execute: absolute directory plus the exact command line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub suite: String,
    pub directory: PathBuf,
    pub command: String,
}

/// Outcome of one executed invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvocationResult {
    pub suite: String,
    pub command: String,
    pub directory: PathBuf,
    /// Child exit code; `None` when the child was killed by a signal
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
}

impl InvocationResult {
    pub fn new(invocation: &Invocation, exit_code: Option<i32>, duration_ms: u64) -> Self {
        Self {
            suite: invocation.suite.clone(),
            command: invocation.command.clone(),
            directory: invocation.directory.clone(),
            exit_code,
            duration_ms,
        }
    }

    pub fn passed(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl fmt::Display for InvocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self.exit_code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        };
        let status = if self.passed() { "PASS" } else { "FAIL" };
        write!(
            f,
            "[{}] {} exit={} ({}ms)",
            status, self.suite, code, self.duration_ms
        )
    }
}
