use crate::error::{CddError, Result};
use crate::messages::Messages;
use crate::paths;
use crate::prompt::Prompter;
use crate::ticket::TicketType;
use crate::{git, spec_file, templates};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Answer to the rename prompt that aborts creation.
pub const CANCEL_WORD: &str = "cancel";

#[derive(Debug, Clone, Serialize)]
pub struct CreatedTicket {
    pub ticket_dir: PathBuf,
    pub spec_path: PathBuf,
    pub slug: String,
    pub folder: String,
    pub ticket_type: TicketType,
    pub overwritten: bool,
}

/// Template for `ticket_type` inside the repository at `repo_root`.
pub fn template_path(repo_root: &Path, ticket_type: TicketType) -> Result<PathBuf> {
    let path = paths::ticket_template(repo_root, ticket_type);
    if !path.is_file() {
        return Err(CddError::TemplateNotFound(
            ticket_type.template_name().to_string(),
        ));
    }
    Ok(path)
}

/// Create `ticket_dir` and write `spec.yaml` from the template, with dates filled in.
pub fn create_ticket_file(ticket_dir: &Path, template: &Path, date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(ticket_dir)?;
    let content = std::fs::read_to_string(template)?;
    let spec_path = ticket_dir.join(paths::SPEC_FILE);
    crate::io::atomic_write(&spec_path, templates::populate_dates(&content, date).as_bytes())?;
    Ok(spec_path)
}

/// Create `specs/tickets/<type>-<slug>/spec.yaml` in the git repository
/// containing `start`.
///
/// When the ticket folder already exists the user either overwrites it or
/// picks another name; answering `cancel` aborts with [`CddError::Cancelled`].
pub fn create_new_ticket(
    start: &Path,
    ticket_type: TicketType,
    name: &str,
    prompter: &mut dyn Prompter,
    msgs: &Messages,
) -> Result<CreatedTicket> {
    let mut slug = paths::normalize_ticket_name(name);
    if slug.is_empty() {
        return Err(CddError::InvalidTicketName(name.to_string()));
    }

    let repo_root = git::repo_root(start)?;
    let template = template_path(&repo_root, ticket_type)?;

    let mut folder = paths::ticket_folder_name(ticket_type, &slug);
    let mut ticket_dir = paths::ticket_dir(&repo_root, &folder);
    let mut overwritten = false;

    while ticket_dir.exists() {
        prompter.say(&(msgs.ticket_exists)(&ticket_dir.display().to_string()))?;
        if prompter.confirm(msgs.ticket_overwrite_prompt, false)? {
            overwritten = true;
            break;
        }

        prompter.say(msgs.ticket_cancel_tip)?;
        let answer = prompter.ask(&(msgs.ticket_rename_prompt)(ticket_type.as_str()), None)?;
        if answer.trim().eq_ignore_ascii_case(CANCEL_WORD) {
            return Err(CddError::Cancelled);
        }
        let renamed = paths::normalize_ticket_name(&answer);
        if renamed.is_empty() {
            prompter.say(msgs.ticket_invalid_name)?;
            continue;
        }
        slug = renamed;
        folder = paths::ticket_folder_name(ticket_type, &slug);
        ticket_dir = paths::ticket_dir(&repo_root, &folder);
    }

    let spec_path = create_ticket_file(&ticket_dir, &template, spec_file::today())?;
    tracing::debug!(path = %spec_path.display(), overwritten, "ticket created");

    Ok(CreatedTicket {
        ticket_dir,
        spec_path,
        slug,
        folder,
        ticket_type,
        overwritten,
    })
}
