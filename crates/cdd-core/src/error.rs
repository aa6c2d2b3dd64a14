use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CddError {
    // -- initialization -----------------------------------------------------
    #[error("Refusing to initialize in system directory: {}", .0.display())]
    DangerousPath(PathBuf),

    #[error("No write permission for directory: {}", .0.display())]
    NoWritePermission(PathBuf),

    #[error("template source '{0}' is missing from this build")]
    TemplateSourceMissing(String),

    // -- ticket creation ----------------------------------------------------
    #[error("Not a git repository\nCDD requires git for version control of documentation.\nRun: git init")]
    NotGitRepo,

    #[error("Git not found\nCDD requires git to be installed.\nInstall git: https://git-scm.com/downloads")]
    GitNotFound,

    #[error("Template not found: {0}\nTemplates are required for ticket creation.\nRun: cdd init")]
    TemplateNotFound(String),

    #[error("Invalid ticket name '{0}'\nName must contain at least one alphanumeric character.\nExample: cdd new feature user-authentication")]
    InvalidTicketName(String),

    #[error("invalid ticket type '{0}': expected feature, bug or spike")]
    InvalidTicketType(String),

    #[error("invalid ticket status '{0}'")]
    InvalidStatus(String),

    #[error("cancelled by user")]
    Cancelled,

    // -- path resolution ----------------------------------------------------
    #[error("{}", crate::resolve::not_found_message(.ticket, .suggestions, .command))]
    TicketNotFound {
        ticket: String,
        suggestions: Vec<String>,
        command: String,
    },

    // -- conversation -------------------------------------------------------
    #[error("{0}")]
    UnsupportedFile(String),

    // -- spec / progress / archive -----------------------------------------
    #[error("Spec file not found: {}", .0.display())]
    SpecNotFound(PathBuf),

    #[error("Invalid YAML format in {}: {}", .path.display(), .reason)]
    InvalidYaml { path: PathBuf, reason: String },

    #[error("Spec file must contain a dictionary: {}", .0.display())]
    SpecNotMapping(PathBuf),

    #[error("Spec file is missing 'ticket' section: {}", .0.display())]
    MissingTicketSection(PathBuf),

    #[error("invalid '{}' section: {}", .section, .reason)]
    InvalidSection { section: String, reason: String },

    #[error("Progress file not found: {}", .0.display())]
    ProgressNotFound(PathBuf),

    #[error("Missing required field in progress file: {0}")]
    MissingField(String),

    #[error("Ticket folder not found: {}", .0.display())]
    TicketFolderNotFound(PathBuf),

    #[error("Archived ticket not found: {}", .0.display())]
    ArchivedTicketNotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Ticket '{0}' already exists in archive")]
    AlreadyArchived(String),

    #[error("Ticket '{0}' already exists in active tickets")]
    AlreadyActive(String),

    #[error("not initialized: run 'cdd init'")]
    NotInitialized,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CddError>;
