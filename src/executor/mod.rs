//! Test execution engine
//!
//! Builds one runner command per suite and executes them one after another.

mod command;
mod dispatcher;
mod launcher;
mod runner;

pub use command::{effective_processes, effective_runner, CommandBuilder};
pub use dispatcher::{Dispatcher, RunRequest};
pub use launcher::{ProcessLauncher, ShellLauncher};
pub use runner::SuiteRunner;

/// Exit code for a fully successful run
pub const RETURN_SUCCESS: i32 = 0;

/// Exit code for an invalid request or any failed suite
pub const RETURN_FAILURE: i32 = 1;

/// Runner used when none is configured
pub const DEFAULT_RUNNER: &str = "WrapperRunner";
