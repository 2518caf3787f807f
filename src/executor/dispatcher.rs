//! Test type dispatcher
//!
//! Ties the catalog, command construction, the suite runner and the summary
//! together for a single `dev-tests-run` invocation.

use anyhow::Result;
use chrono::Utc;
use std::io::Write;
use tracing::{info, warn};

use super::{
    effective_processes, effective_runner, CommandBuilder, ProcessLauncher, SuiteRunner,
    RETURN_FAILURE, RETURN_SUCCESS,
};
use crate::catalog;
use crate::config::InstallPaths;
use crate::error::DispatchError;
use crate::output::{summarize, RunReport};

/// What the caller asked for
#[derive(Clone, Debug, Default)]
pub struct RunRequest {
    pub test_type: String,
    pub runner: Option<String>,
    pub processes: i64,
    pub passthrough: Option<String>,
    pub dry_run: bool,
}

/// Result of a dispatch: the process exit code and, for real runs, a report
#[derive(Debug)]
pub struct RunOutcome {
    pub exit_code: i32,
    pub report: Option<RunReport>,
}

impl RunOutcome {
    fn without_report(exit_code: i32) -> Self {
        Self {
            exit_code,
            report: None,
        }
    }
}

pub struct Dispatcher<L> {
    paths: InstallPaths,
    launcher: L,
}

impl<L: ProcessLauncher> Dispatcher<L> {
    pub fn new(paths: InstallPaths, launcher: L) -> Self {
        Self { paths, launcher }
    }

    /// Resolve the requested type, run its suites and print the summary
    ///
    /// An unknown type is reported on `out` and yields a failing exit code
    /// without running anything. A missing suite directory aborts the whole
    /// run before any child process starts.
    pub fn dispatch(self, request: &RunRequest, out: &mut dyn Write) -> Result<RunOutcome> {
        let suites = match catalog::resolve(&request.test_type) {
            Ok(suites) => suites,
            Err(err @ DispatchError::UnknownType { .. }) => {
                writeln!(out, "{err}")?;
                return Ok(RunOutcome::without_report(RETURN_FAILURE));
            }
            Err(err) => return Err(err.into()),
        };

        let runner_name = effective_runner(request.runner.as_deref()).to_string();
        let processes = effective_processes(request.processes);
        let builder = CommandBuilder::new(
            &self.paths,
            Some(runner_name.as_str()),
            processes,
            request.passthrough.as_deref(),
        )?;

        if !self.paths.runner_executable().exists() {
            warn!(
                "Runner executable not found at {}",
                self.paths.runner_executable().display()
            );
        }

        let mut runner = SuiteRunner::new(builder, self.paths.test_root(), self.launcher);

        if request.dry_run {
            runner.dry_run(&suites, out)?;
            return Ok(RunOutcome::without_report(RETURN_SUCCESS));
        }

        info!(
            "Running type '{}': {} suite(s), runner {}, {} process(es)",
            request.test_type,
            suites.len(),
            runner_name,
            processes
        );

        let started_at = Utc::now();
        let results = runner.run(&suites, out)?;
        let summary = summarize(&results, suites.len());
        write!(out, "{}", summary.text)?;
        out.flush()?;

        let report = RunReport {
            test_type: request.test_type.clone(),
            runner: runner_name,
            processes,
            started_at,
            finished_at: Utc::now(),
            total: summary.total,
            failed: summary.failed,
            passed: summary.passed(),
            results,
        };

        Ok(RunOutcome {
            exit_code: summary.exit_code,
            report: Some(report),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::runner::test_support::{install_tree, ScriptedLauncher};
    use std::path::Path;
    use tempfile::tempdir;

    const UNIT_DIRS: &[&str] = &[
        "unit",
        "static/framework/tests/unit",
        "integration/framework/tests/unit",
    ];

    fn paths(root: &Path) -> InstallPaths {
        InstallPaths {
            base_dir: root.to_path_buf(),
            vendor_dir: "vendor".to_string(),
            interpreter: "php".to_string(),
        }
    }

    fn request(test_type: &str) -> RunRequest {
        RunRequest {
            test_type: test_type.to_string(),
            processes: 1,
            ..Default::default()
        }
    }

    fn dispatch(
        root: &Path,
        request: &RunRequest,
        launcher: ScriptedLauncher,
    ) -> (RunOutcome, String) {
        let mut out = Vec::new();
        let outcome = Dispatcher::new(paths(root), launcher)
            .dispatch(request, &mut out)
            .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_unit_type_passes() {
        let dir = tempdir().unwrap();
        install_tree(dir.path(), UNIT_DIRS);

        let (outcome, output) = dispatch(dir.path(), &request("unit"), ScriptedLauncher::default());

        assert_eq!(outcome.exit_code, 0);
        assert!(output.contains("PASSED (3)"));
        let report = outcome.report.unwrap();
        assert!(report.passed);
        assert_eq!(report.results.len(), 3);
    }

    #[test]
    fn test_invalid_type() {
        let dir = tempdir().unwrap();
        let (outcome, output) = dispatch(dir.path(), &request("bad"), ScriptedLauncher::default());

        assert_ne!(outcome.exit_code, 0);
        assert!(outcome.report.is_none());
        assert!(output.starts_with("Invalid type: \"bad\". Available types: all, unit,"));
        assert!(output.contains("default"));
    }

    #[test]
    fn test_invalid_type_spawns_nothing() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let mut launcher = ScriptedLauncher::default();
        let dispatcher = Dispatcher::new(paths(dir.path()), &mut launcher);
        dispatcher.dispatch(&request("bad"), &mut out).unwrap();
        assert!(launcher.launched.is_empty());
    }

    #[test]
    fn test_processes_zero_becomes_one() {
        let dir = tempdir().unwrap();
        install_tree(dir.path(), UNIT_DIRS);

        let request = RunRequest {
            processes: 0,
            ..request("unit")
        };
        let (_, output) = dispatch(dir.path(), &request, ScriptedLauncher::default());
        assert!(output.contains("--processes 1"));
        assert!(!output.contains("--processes 0"));
    }

    #[test]
    fn test_large_process_count_passed_through() {
        let dir = tempdir().unwrap();
        install_tree(dir.path(), UNIT_DIRS);

        let request = RunRequest {
            processes: 5_000_000_000,
            ..request("unit")
        };
        let (outcome, output) = dispatch(dir.path(), &request, ScriptedLauncher::default());
        assert!(output.contains("--processes 5000000000"));
        assert_eq!(outcome.report.unwrap().processes, 5_000_000_000);
    }

    #[test]
    fn test_processes_and_runner_options() {
        let dir = tempdir().unwrap();
        install_tree(dir.path(), UNIT_DIRS);

        let request = RunRequest {
            processes: 8,
            runner: Some("WrapperRunner".to_string()),
            passthrough: Some("--list-suites".to_string()),
            ..request("unit")
        };
        let (_, output) = dispatch(dir.path(), &request, ScriptedLauncher::default());
        assert!(output.contains("--runner 'WrapperRunner' --processes 8 --list-suites"));
    }

    #[test]
    fn test_default_runner() {
        let dir = tempdir().unwrap();
        install_tree(dir.path(), UNIT_DIRS);

        let request = RunRequest {
            runner: Some(String::new()),
            ..request("unit")
        };
        let (outcome, output) = dispatch(dir.path(), &request, ScriptedLauncher::default());
        assert!(output.contains("--runner 'WrapperRunner'"));
        assert_eq!(outcome.report.unwrap().runner, "WrapperRunner");
    }

    #[test]
    fn test_one_of_two_fails() {
        let dir = tempdir().unwrap();
        install_tree(dir.path(), &["integration"]);

        let launcher = ScriptedLauncher::with_codes([Some(0), Some(255)]);
        let (outcome, output) = dispatch(dir.path(), &request("integration-all"), launcher);

        assert_ne!(outcome.exit_code, 0);
        assert!(output.contains("FAILED - 1 of 2 failed:"));

        let report = outcome.report.unwrap();
        let failing = &report.results[1];
        assert_eq!(failing.suite, "integration-integrity");
        assert!(output.contains(&format!(" - {}\n", failing.command)));
        assert!(!output.contains(&format!(" - {}\n", report.results[0].command)));
    }

    #[test]
    fn test_failing_first_suite_still_runs_rest() {
        let dir = tempdir().unwrap();
        install_tree(dir.path(), UNIT_DIRS);

        let launcher = ScriptedLauncher::with_codes([Some(2), Some(0), Some(0)]);
        let (outcome, output) = dispatch(dir.path(), &request("unit"), launcher);

        assert_ne!(outcome.exit_code, 0);
        assert!(output.contains("FAILED - 1 of 3 failed:"));
        for suite_dir in UNIT_DIRS {
            let expected = dir
                .path()
                .join("dev/tests")
                .join(suite_dir)
                .canonicalize()
                .unwrap();
            assert!(output.contains(&format!("---- {}> ", expected.display())));
        }
    }

    #[test]
    fn test_directory_logged_before_command() {
        let dir = tempdir().unwrap();
        install_tree(dir.path(), UNIT_DIRS);

        let (_, output) = dispatch(dir.path(), &request("unit"), ScriptedLauncher::default());
        let banner = output.lines().find(|l| l.starts_with("---- ")).unwrap();
        assert!(banner.contains("/dev/tests/"));
        assert!(banner.contains("> php "));
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let err = Dispatcher::new(paths(dir.path()), ScriptedLauncher::default())
            .dispatch(&request("legacy"), &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("static-legacy"));
    }

    #[test]
    fn test_dry_run() {
        let dir = tempdir().unwrap();
        install_tree(dir.path(), UNIT_DIRS);

        let request = RunRequest {
            dry_run: true,
            ..request("unit")
        };
        let (outcome, output) = dispatch(dir.path(), &request, ScriptedLauncher::default());
        assert_eq!(outcome.exit_code, 0);
        assert!(outcome.report.is_none());
        assert_eq!(output.matches("---- ").count(), 3);
        assert!(!output.contains("PASSED"));
    }
}
