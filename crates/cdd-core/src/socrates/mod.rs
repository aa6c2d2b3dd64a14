//! Socrates: guided, section-by-section filling of documentation files.
//!
//! Dispatch is by file: `CLAUDE.md` goes to the constitution handler,
//! YAML specs under a `tickets` directory go to the ticket handler.

pub mod catalog;
pub mod constitution;
pub mod engine;
pub mod ticket;

use crate::error::{CddError, Result};
use crate::paths;
use crate::prompt::Prompter;
use engine::SectionUpdate;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Constitution,
    Ticket,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub file_path: PathBuf,
    pub updates: Vec<SectionUpdate>,
    pub next_steps: Vec<String>,
}

/// Decide which handler owns `path`.
pub fn detect_document(path: &Path) -> Result<DocumentKind> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let under = |dir: &str| path.components().any(|c| c.as_os_str() == dir);

    if name == paths::CONSTITUTION_MD {
        return Ok(DocumentKind::Constitution);
    }
    if (ext == "yaml" || ext == "yml") && under("tickets") {
        return Ok(DocumentKind::Ticket);
    }
    if ext == "md" && under("commands") {
        return Err(CddError::UnsupportedFile(format!(
            "Slash command files are not supported yet: {}",
            path.display()
        )));
    }
    Err(CddError::UnsupportedFile(format!(
        "Unsupported file type: {}\nSupported: CLAUDE.md and ticket specs under specs/tickets/",
        path.display()
    )))
}

/// Run the conversation for `path` and write the result back.
pub fn run(path: &Path, prompter: &mut dyn Prompter) -> Result<UpdateReport> {
    let kind = detect_document(path)?;
    tracing::debug!(path = %path.display(), ?kind, "socrates dispatch");
    match kind {
        DocumentKind::Constitution => constitution::converse(path, prompter),
        DocumentKind::Ticket => ticket::converse(path, prompter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_by_path() {
        assert_eq!(
            detect_document(Path::new("/p/CLAUDE.md")).unwrap(),
            DocumentKind::Constitution
        );
        assert_eq!(
            detect_document(Path::new("/p/specs/tickets/feature-a/spec.yaml")).unwrap(),
            DocumentKind::Ticket
        );
        assert_eq!(
            detect_document(Path::new("specs/tickets/bug-b/spec.yml")).unwrap(),
            DocumentKind::Ticket
        );
    }

    #[test]
    fn unsupported_files() {
        let err = detect_document(Path::new("/p/.claude/commands/plan.md")).unwrap_err();
        assert!(err.to_string().contains("not supported yet"));

        let err = detect_document(Path::new("/p/notes.txt")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));

        assert!(detect_document(Path::new("/p/config.yaml")).is_err());
    }
}
