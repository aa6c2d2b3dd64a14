use crate::error::{CddError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// TicketType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    Feature,
    Bug,
    Spike,
}

impl TicketType {
    pub fn all() -> &'static [TicketType] {
        &[TicketType::Feature, TicketType::Bug, TicketType::Spike]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TicketType::Feature => "feature",
            TicketType::Bug => "bug",
            TicketType::Spike => "spike",
        }
    }

    /// File name of the scaffolded template under `.cdd/templates/`.
    pub fn template_name(self) -> &'static str {
        match self {
            TicketType::Feature => "feature-ticket-template.yaml",
            TicketType::Bug => "bug-ticket-template.yaml",
            TicketType::Spike => "spike-ticket-template.yaml",
        }
    }

    /// Guess the ticket type from the folder holding a spec file.
    ///
    /// Only the parent directory name is inspected, so unrelated ancestors
    /// (`/home/fixer/...`) never influence the result.
    pub fn infer_from_path(path: &Path) -> Option<TicketType> {
        let folder = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_lowercase())?;

        if folder.contains("feature") || folder.contains("feat") {
            Some(TicketType::Feature)
        } else if folder.contains("bug") || folder.contains("fix") {
            Some(TicketType::Bug)
        } else if folder.contains("spike") || folder.contains("research") {
            Some(TicketType::Spike)
        } else {
            None
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TicketType {
    type Err = CddError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feature" => Ok(TicketType::Feature),
            "bug" => Ok(TicketType::Bug),
            "spike" => Ok(TicketType::Spike),
            _ => Err(CddError::InvalidTicketType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TicketStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Draft,
    Planned,
    InProgress,
    Completed,
    Archived,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Draft => "draft",
            TicketStatus::Planned => "planned",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Completed => "completed",
            TicketStatus::Archived => "archived",
        }
    }

    /// Milestone field stamped into the `ticket` block when entering this status.
    pub fn timestamp_field(self) -> Option<&'static str> {
        match self {
            TicketStatus::InProgress => Some("implementation_started"),
            TicketStatus::Completed => Some("implementation_completed"),
            TicketStatus::Archived => Some("archived_at"),
            TicketStatus::Draft | TicketStatus::Planned => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = CddError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(TicketStatus::Draft),
            "planned" => Ok(TicketStatus::Planned),
            "in_progress" => Ok(TicketStatus::InProgress),
            "completed" => Ok(TicketStatus::Completed),
            "archived" => Ok(TicketStatus::Archived),
            _ => Err(CddError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Typed ticket records
// ---------------------------------------------------------------------------

/// The `ticket:` metadata block of a spec file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketMeta {
    #[serde(rename = "type", default)]
    pub ticket_type: Option<TicketType>,
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImplementationScope {
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub backend: Vec<String>,
    #[serde(default)]
    pub database: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureSpec {
    pub title: Option<String>,
    pub user_story: Option<String>,
    pub business_value: Option<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub implementation_scope: ImplementationScope,
    pub technical_considerations: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImpactAssessment {
    pub severity: Option<Severity>,
    pub affected_users: Option<String>,
    pub workaround: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BugSpec {
    pub title: Option<String>,
    pub problem_description: Option<String>,
    #[serde(default)]
    pub reproduction_steps: Vec<String>,
    #[serde(default)]
    pub impact_assessment: ImpactAssessment,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpikeSpec {
    pub title: Option<String>,
    #[serde(default)]
    pub research_questions: Vec<String>,
    pub investigation_approach: Option<String>,
    pub success_criteria: Option<String>,
    pub timebox: Option<String>,
}

/// Typed view of a ticket spec, one variant per ticket type.
///
/// The on-disk mapping stays the source of truth (key order and unknown keys
/// survive rewrites); this view is built to check field shapes before a
/// spec is written back.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketRecord {
    Feature(FeatureSpec),
    Bug(BugSpec),
    Spike(SpikeSpec),
}

impl TicketRecord {
    pub fn from_mapping(ticket_type: TicketType, mapping: &serde_yaml::Mapping) -> Result<Self> {
        let value = serde_yaml::Value::Mapping(mapping.clone());
        let invalid = |e: serde_yaml::Error| CddError::InvalidSection {
            section: format!("{ticket_type} spec"),
            reason: e.to_string(),
        };
        let record = match ticket_type {
            TicketType::Feature => {
                TicketRecord::Feature(serde_yaml::from_value(value).map_err(invalid)?)
            }
            TicketType::Bug => TicketRecord::Bug(serde_yaml::from_value(value).map_err(invalid)?),
            TicketType::Spike => {
                TicketRecord::Spike(serde_yaml::from_value(value).map_err(invalid)?)
            }
        };
        Ok(record)
    }

    pub fn ticket_type(&self) -> TicketType {
        match self {
            TicketRecord::Feature(_) => TicketType::Feature,
            TicketRecord::Bug(_) => TicketType::Bug,
            TicketRecord::Spike(_) => TicketType::Spike,
        }
    }

    pub fn title(&self) -> Option<&str> {
        let title = match self {
            TicketRecord::Feature(f) => f.title.as_deref(),
            TicketRecord::Bug(b) => b.title.as_deref(),
            TicketRecord::Spike(s) => s.title.as_deref(),
        };
        title.filter(|t| !t.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
