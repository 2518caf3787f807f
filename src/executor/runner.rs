//! Suite execution runner
//!
//! Plans every invocation up front, then executes them strictly in order.
//! A failing suite never stops the suites after it.

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{CommandBuilder, ProcessLauncher};
use crate::error::DispatchError;
use crate::models::{Invocation, InvocationResult, SuiteEntry};
use crate::output::format_banner;
use crate::utils::Timer;

/// Sequential runner for a list of suites
pub struct SuiteRunner<L> {
    builder: CommandBuilder,
    test_root: PathBuf,
    launcher: L,
}

impl<L: ProcessLauncher> SuiteRunner<L> {
    pub fn new(builder: CommandBuilder, test_root: impl Into<PathBuf>, launcher: L) -> Self {
        Self {
            builder,
            test_root: test_root.into(),
            launcher,
        }
    }

    /// Resolve directories and build commands without running anything
    ///
    /// Fails on the first suite whose directory does not exist.
    pub fn plan(&self, suites: &[&SuiteEntry]) -> Result<Vec<Invocation>, DispatchError> {
        suites
            .iter()
            .map(|suite| -> Result<Invocation, DispatchError> {
                Ok(Invocation {
                    suite: suite.key.to_string(),
                    directory: resolve_directory(&self.test_root, suite)?,
                    command: self.builder.build(suite),
                })
            })
            .collect()
    }

    /// Run the invocations one after another, printing a banner before each
    pub fn execute(
        &mut self,
        invocations: &[Invocation],
        out: &mut dyn Write,
    ) -> Result<Vec<InvocationResult>> {
        let mut results = Vec::with_capacity(invocations.len());

        for (index, invocation) in invocations.iter().enumerate() {
            write!(
                out,
                "{}",
                format_banner(&invocation.directory, &invocation.command)
            )?;
            // The child writes straight to the terminal
            out.flush()?;

            info!(
                "Running suite {} ({}/{})",
                invocation.suite,
                index + 1,
                invocations.len()
            );

            let timer = Timer::start(&invocation.suite);
            let exit_code = self.launcher.launch(invocation)?;
            let result = InvocationResult::new(invocation, exit_code, timer.elapsed_ms());

            if result.passed() {
                info!("  {}", result);
            } else {
                warn!("  {}", result);
            }
            results.push(result);
        }

        Ok(results)
    }

    /// Plan and execute in one step
    pub fn run(
        &mut self,
        suites: &[&SuiteEntry],
        out: &mut dyn Write,
    ) -> Result<Vec<InvocationResult>> {
        let invocations = self.plan(suites)?;
        self.execute(&invocations, out)
    }

    /// Print the banners a run would produce, without spawning anything
    pub fn dry_run(&self, suites: &[&SuiteEntry], out: &mut dyn Write) -> Result<Vec<Invocation>> {
        let invocations = self.plan(suites)?;
        for invocation in &invocations {
            write!(
                out,
                "{}",
                format_banner(&invocation.directory, &invocation.command)
            )?;
        }
        Ok(invocations)
    }

    #[cfg(test)]
    pub fn into_launcher(self) -> L {
        self.launcher
    }
}

fn resolve_directory(test_root: &Path, suite: &SuiteEntry) -> Result<PathBuf, DispatchError> {
    let path = test_root.join(suite.directory);
    match path.canonicalize() {
        Ok(dir) if dir.is_dir() => Ok(dir),
        _ => Err(DispatchError::DirectoryNotFound {
            suite: suite.key.to_string(),
            path,
        }),
    }
}
