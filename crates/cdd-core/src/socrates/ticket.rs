use super::catalog;
use super::engine::{run_catalog, yaml_content_len, SectionStore, SectionValue};
use super::UpdateReport;
use crate::error::Result;
use crate::prompt::Prompter;
use crate::spec_file::{self, SpecDocument};
use crate::ticket::TicketType;
use std::path::Path;

impl SectionStore for SpecDocument {
    fn content_len(&self, key: &str) -> Option<usize> {
        self.get(key).map(yaml_content_len)
    }

    fn put(&mut self, key: &str, value: &SectionValue) {
        self.set(key, value.to_yaml());
    }
}

/// `ticket.type` when recorded, else the folder name, else ask.
pub fn detect_ticket_type(
    path: &Path,
    doc: &SpecDocument,
    prompter: &mut dyn Prompter,
) -> Result<TicketType> {
    if let Some(t) = doc.ticket_type() {
        return Ok(t);
    }
    if let Some(t) = TicketType::infer_from_path(path) {
        tracing::debug!(path = %path.display(), ticket_type = %t, "ticket type inferred from folder");
        return Ok(t);
    }
    let choices: Vec<&str> = TicketType::all().iter().map(|t| t.as_str()).collect();
    let answer = prompter.choose("What kind of ticket is this?", &choices, Some("feature"))?;
    answer.parse()
}

/// Fill in missing ticket sections and rewrite `spec.yaml`.
pub fn converse(path: &Path, prompter: &mut dyn Prompter) -> Result<UpdateReport> {
    let mut doc = if path.exists() {
        SpecDocument::read(path)?
    } else {
        SpecDocument::default()
    };

    let ticket_type = detect_ticket_type(path, &doc, prompter)?;
    prompter.say(&format!("🎯 Working on a {ticket_type} ticket."))?;

    let updates = run_catalog(catalog::for_ticket(ticket_type), &mut doc, prompter)?;
    doc.stamp(ticket_type, spec_file::today());
    doc.write(path)?;

    let folder = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut next_steps = vec![format!("Review the spec: {}", path.display())];
    match ticket_type {
        TicketType::Feature => {
            next_steps.push("Refine it with domain experts".to_string());
            next_steps.push(format!("Start implementation: cdd status {folder} --set in_progress"));
        }
        TicketType::Bug => {
            next_steps.push("Start the investigation from the reproduction steps".to_string());
            next_steps.push("Consider adding diagnostic logging".to_string());
        }
        TicketType::Spike => {
            next_steps.push("Begin research following the investigation approach".to_string());
            next_steps.push("Record findings as they come in".to_string());
        }
    }

    Ok(UpdateReport {
        file_path: path.to_path_buf(),
        updates,
        next_steps,
    })
}
