//! Console formatting for runs
//!
//! Everything here is plain text meant for a terminal or a CI log: a banner
//! before each suite and a summary at the end.

use std::path::Path;

use crate::executor::{RETURN_FAILURE, RETURN_SUCCESS};
use crate::models::InvocationResult;

/// Width that banners are padded to
pub const LINE_WIDTH: usize = 70;

/// Banner printed before a suite runs
///
/// Contains the directory and the exact command so the line can be copied
/// into a shell to reproduce the run.
pub fn format_banner(directory: &Path, command: &str) -> String {
    let line = format!("---- {}> {} ", directory.display(), command);
    format!("\n{line:-<width$}\n\n", width = LINE_WIDTH)
}

/// Rendered run summary and the exit code it implies
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub exit_code: i32,
    pub failed: usize,
    pub total: usize,
}

impl Summary {
    pub fn passed(&self) -> bool {
        self.exit_code == RETURN_SUCCESS
    }
}

/// Aggregate results into the final report
pub fn summarize(results: &[InvocationResult], total: usize) -> Summary {
    let failures: Vec<_> = results.iter().filter(|r| !r.passed()).collect();

    let mut text = "-".repeat(LINE_WIDTH);
    text.push('\n');

    let exit_code = if failures.is_empty() {
        text.push_str(&format!("PASSED ({total})\n"));
        RETURN_SUCCESS
    } else {
        text.push_str(&format!(
            "FAILED - {} of {} failed:\n",
            failures.len(),
            total
        ));
        for failure in &failures {
            text.push_str(&format!(" - {}\n", failure.command));
        }
        RETURN_FAILURE
    };

    Summary {
        text,
        exit_code,
        failed: failures.len(),
        total,
    }
}
