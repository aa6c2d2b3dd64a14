use crate::error::{CddError, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::path::Path;

const REQUIRED_FIELDS: [&str; 7] = [
    "plan_path",
    "spec_path",
    "started_at",
    "updated_at",
    "status",
    "steps",
    "acceptance_criteria",
];

/// Current UTC time as RFC 3339 with a `Z` suffix.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    InProgress,
    Completed,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl ProgressStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressStatus::InProgress => "in_progress",
            ProgressStatus::Completed => "completed",
            ProgressStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StepStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOperation {
    Created,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TestFailure,
    LintingError,
    RuntimeError,
    MissingDependency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileTouched {
    pub path: String,
    pub operation: FileOperation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step_id: u32,
    pub description: String,
    pub status: StepStatus,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub files_touched: Vec<FileTouched>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionProgress {
    pub criterion: String,
    pub status: StepStatus,
    #[serde(default)]
    pub validated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub description: String,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<String>,
}

/// Execution record kept in `progress.yaml` next to a ticket's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub plan_path: String,
    pub spec_path: String,
    pub started_at: String,
    pub updated_at: String,
    pub status: ProgressStatus,
    pub steps: Vec<Step>,
    pub acceptance_criteria: Vec<CriterionProgress>,
    #[serde(default)]
    pub files_modified: Vec<String>,
    #[serde(default)]
    pub files_created: Vec<String>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl Progress {
    /// Fresh record for a plan/spec pair, started now.
    pub fn initialize(plan_path: &Path, spec_path: &Path) -> Self {
        let now = now_timestamp();
        Self {
            plan_path: plan_path.display().to_string(),
            spec_path: spec_path.display().to_string(),
            started_at: now.clone(),
            updated_at: now,
            status: ProgressStatus::InProgress,
            steps: Vec::new(),
            acceptance_criteria: Vec::new(),
            files_modified: Vec::new(),
            files_created: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CddError::ProgressNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let value: Value = serde_yaml::from_str(&data).map_err(|e| CddError::InvalidYaml {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        for field in REQUIRED_FIELDS {
            if value.get(field).is_none() {
                return Err(CddError::MissingField(field.to_string()));
            }
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// Stamp `updated_at` and write atomically, creating parent directories.
    pub fn write(&mut self, path: &Path) -> Result<()> {
        self.updated_at = now_timestamp();
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count()
    }

    pub fn validated_criteria(&self) -> usize {
        self.acceptance_criteria
            .iter()
            .filter(|c| c.status == StepStatus::Completed)
            .count()
    }

    pub fn open_issues(&self) -> usize {
        self.issues.iter().filter(|i| i.resolved_at.is_none()).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn initialize_then_write_and_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("specs/tickets/feature-x/progress.yaml");
        let mut progress = Progress::initialize(Path::new("plan.md"), Path::new("spec.yaml"));
        assert_eq!(progress.status, ProgressStatus::InProgress);
        assert!(progress.started_at.ends_with('Z'));

        progress.steps.push(Step {
            step_id: 1,
            description: "Add model".into(),
            status: StepStatus::Completed,
            started_at: None,
            completed_at: Some(now_timestamp()),
            files_touched: vec![FileTouched {
                path: "src/model.rs".into(),
                operation: FileOperation::Created,
            }],
        });
        progress.write(&path).unwrap();

        let back = Progress::read(&path).unwrap();
        assert_eq!(back.steps, progress.steps);
        assert_eq!(back.completed_steps(), 1);
        assert!(back.updated_at.ends_with('Z'));
    }

    #[test]
    fn read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Progress::read(&dir.path().join("progress.yaml")).unwrap_err();
        assert!(err.to_string().contains("Progress file not found"));
    }

    #[test]
    fn read_requires_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.yaml");
        std::fs::write(
            &path,
            "plan_path: p\nspec_path: s\nstarted_at: t\nupdated_at: t\nstatus: blocked\nsteps: []\n",
        )
        .unwrap();
        let err = Progress::read(&path).unwrap_err();
        assert!(matches!(err, CddError::MissingField(ref f) if f == "acceptance_criteria"));
    }

    #[test]
    fn read_rejects_bad_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.yaml");
        std::fs::write(&path, "steps: [unclosed\n").unwrap();
        assert!(Progress::read(&path)
            .unwrap_err()
            .to_string()
            .contains("Invalid YAML format"));
    }

    #[test]
    fn optional_lists_default_and_issues_parse() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.yaml");
        std::fs::write(
            &path,
            "plan_path: p\nspec_path: s\nstarted_at: t\nupdated_at: t\nstatus: blocked\nsteps: []\n\
acceptance_criteria: []\nissues:\n  - timestamp: t\n    type: test_failure\n    description: flaky\n",
        )
        .unwrap();
        let progress = Progress::read(&path).unwrap();
        assert_eq!(progress.status, ProgressStatus::Blocked);
        assert!(progress.files_created.is_empty());
        assert_eq!(progress.open_issues(), 1);
        assert_eq!(progress.issues[0].kind, IssueKind::TestFailure);
    }

    #[test]
    fn display_matches_serialized_form() {
        for status in [StepStatus::Pending, StepStatus::InProgress, StepStatus::Failed] {
            let yaml = serde_yaml::to_string(&status).unwrap();
            assert_eq!(yaml.trim(), status.to_string());
        }
        assert_eq!(ProgressStatus::Blocked.to_string(), "blocked");
    }
}
