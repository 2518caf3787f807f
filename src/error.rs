//! Dispatcher errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before or while suites execute
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid type: \"{given}\". Available types: {}", .available.join(", "))]
    UnknownType {
        given: String,
        available: Vec<&'static str>,
    },

    #[error("Test directory for suite '{suite}' does not exist: {}", .path.display())]
    DirectoryNotFound { suite: String, path: PathBuf },

    #[error("Cannot pass `{value}` to the shell: it contains a nul byte")]
    Unquotable { value: String },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
