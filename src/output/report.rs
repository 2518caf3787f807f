//! JSON run report

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::InvocationResult;

/// Machine-readable record of one run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub test_type: String,
    pub runner: String,
    pub processes: i64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub failed: usize,
    pub passed: bool,
    pub results: Vec<InvocationResult>,
}

impl RunReport {
    /// Total wall-clock time of the run
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    /// Write the report as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("Failed to serialize report")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Invocation;
    use chrono::Duration;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn report() -> RunReport {
        let started_at = Utc::now();
        let invocation = Invocation {
            suite: "unit".to_string(),
            directory: PathBuf::from("/srv/shop/dev/tests/unit"),
            command: "php paratest --runner 'WrapperRunner' --processes 2".to_string(),
        };
        RunReport {
            test_type: "unit".to_string(),
            runner: "WrapperRunner".to_string(),
            processes: 2,
            started_at,
            finished_at: started_at + Duration::milliseconds(1500),
            total: 1,
            failed: 1,
            passed: false,
            results: vec![InvocationResult::new(&invocation, Some(2), 1490)],
        }
    }

    #[test]
    fn test_duration() {
        assert_eq!(report().duration_ms(), 1500);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports/nested/run.json");

        report().save(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["test_type"], "unit");
        assert_eq!(json["passed"], false);
        assert_eq!(json["results"][0]["exit_code"], 2);
        assert_eq!(json["results"][0]["suite"], "unit");
    }
}
