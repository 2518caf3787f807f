//! Child process launching

use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::DispatchError;
use crate::models::Invocation;

/// Runs one invocation to completion and reports its exit code
///
/// `Ok(None)` means the child was terminated by a signal.
pub trait ProcessLauncher {
    fn launch(&mut self, invocation: &Invocation) -> Result<Option<i32>, DispatchError>;
}

impl<L: ProcessLauncher + ?Sized> ProcessLauncher for &mut L {
    fn launch(&mut self, invocation: &Invocation) -> Result<Option<i32>, DispatchError> {
        (**self).launch(invocation)
    }
}

/// Launches commands through a POSIX shell with inherited stdio
///
/// Commands are quoted for `sh`, so the shell must understand single quotes.
#[derive(Clone, Debug)]
pub struct ShellLauncher {
    shell: String,
    flag: String,
}

impl ShellLauncher {
    pub fn new() -> Self {
        Self::with_shell("sh", "-c")
    }

    pub fn with_shell(shell: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            flag: flag.into(),
        }
    }
}

impl Default for ShellLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for ShellLauncher {
    fn launch(&mut self, invocation: &Invocation) -> Result<Option<i32>, DispatchError> {
        debug!(
            "Spawning {} {} in {}",
            self.shell,
            self.flag,
            invocation.directory.display()
        );

        // Blocks until the child exits; no timeout
        let status = Command::new(&self.shell)
            .arg(&self.flag)
            .arg(&invocation.command)
            .current_dir(&invocation.directory)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| DispatchError::Spawn {
                command: invocation.command.clone(),
                source,
            })?;

        Ok(status.code())
    }
}
