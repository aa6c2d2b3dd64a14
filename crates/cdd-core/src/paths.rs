use crate::ticket::TicketType;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SPECS_DIR: &str = "specs";
pub const TICKETS_DIR: &str = "specs/tickets";
pub const ARCHIVE_DIR: &str = "specs/archive";

pub const CDD_DIR: &str = ".cdd";
pub const TEMPLATES_DIR: &str = ".cdd/templates";
pub const CONFIG_FILE: &str = ".cdd/config.yaml";

pub const CLAUDE_DIR: &str = ".claude";
pub const CLAUDE_COMMANDS_DIR: &str = ".claude/commands";

pub const CONSTITUTION_MD: &str = "CLAUDE.md";
pub const SPEC_FILE: &str = "spec.yaml";
pub const PLAN_FILE: &str = "plan.md";
pub const PROGRESS_FILE: &str = "progress.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn tickets_dir(root: &Path) -> PathBuf {
    root.join(TICKETS_DIR)
}

pub fn archive_dir(root: &Path) -> PathBuf {
    root.join(ARCHIVE_DIR)
}

/// Directory name of a ticket: `<type>-<slug>`.
pub fn ticket_folder_name(ticket_type: TicketType, slug: &str) -> String {
    format!("{}-{}", ticket_type, slug)
}

pub fn ticket_dir(root: &Path, folder: &str) -> PathBuf {
    tickets_dir(root).join(folder)
}

pub fn ticket_spec(root: &Path, folder: &str) -> PathBuf {
    ticket_dir(root, folder).join(SPEC_FILE)
}

pub fn ticket_progress(root: &Path, folder: &str) -> PathBuf {
    ticket_dir(root, folder).join(PROGRESS_FILE)
}

pub fn templates_dir(root: &Path) -> PathBuf {
    root.join(TEMPLATES_DIR)
}

pub fn ticket_template(root: &Path, ticket_type: TicketType) -> PathBuf {
    templates_dir(root).join(ticket_type.template_name())
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn constitution_path(root: &Path) -> PathBuf {
    root.join(CONSTITUTION_MD)
}

// ---------------------------------------------------------------------------
// Slug normalization
// ---------------------------------------------------------------------------

static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();
static DASHES_RE: OnceLock<Regex> = OnceLock::new();

fn disallowed_re() -> &'static Regex {
    DISALLOWED_RE.get_or_init(|| Regex::new(r"[^a-z0-9-]+").unwrap())
}

fn dashes_re() -> &'static Regex {
    DASHES_RE.get_or_init(|| Regex::new(r"-{2,}").unwrap())
}

/// Turn a free-form ticket name into a lowercase-with-dashes slug.
///
/// `"User Auth System"` becomes `"user-auth-system"`. A name without any
/// alphanumeric character normalizes to the empty string, which callers
/// must reject.
pub fn normalize_ticket_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let dashed = disallowed_re().replace_all(&lowered, "-");
    let collapsed = dashes_re().replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
