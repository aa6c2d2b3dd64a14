mod cmd;
mod output;
mod root;

use cdd_core::config::{Config, Language};
use cdd_core::messages::Messages;
use cdd_core::CddError;
use cdd_core::ticket::{TicketStatus, TicketType};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "cdd",
    about = "Context-driven documentation: scaffold, create and fill project and ticket specs",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .cdd/ or .git/)
    #[arg(long, global = true, env = "CDD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize CDD in a project
    Init {
        /// Target directory (default: project root)
        path: Option<PathBuf>,

        /// Create directories and config only, no templates
        #[arg(long)]
        minimal: bool,

        /// Language for CLI messages (en, pt-br)
        #[arg(long, default_value = "en")]
        language: Language,
    },

    /// Create a new ticket from its template
    New {
        /// Ticket type: feature, bug or spike
        ticket_type: TicketType,

        /// Ticket name (normalized to lowercase-with-dashes)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Fill in a document section by section (CLAUDE.md or a ticket)
    Socrates {
        /// Ticket name (e.g. feature-auth) or file path
        target: String,
    },

    /// Print the file path a ticket name resolves to
    Resolve {
        ticket: String,

        /// File inside the ticket folder
        #[arg(long, default_value = "spec.yaml")]
        file: String,
    },

    /// Show or change a ticket's status
    Status {
        ticket: String,

        /// New status: draft, planned, in_progress, completed, archived
        #[arg(long)]
        set: Option<TicketStatus>,

        /// Don't stamp the status milestone date
        #[arg(long)]
        no_timestamp: bool,
    },

    /// Move a ticket to specs/archive/
    Archive { ticket: String },

    /// Move an archived ticket back to specs/tickets/
    Restore { ticket: String },

    /// List archived tickets
    Archived,

    /// Show or start implementation progress tracking for a ticket
    Progress {
        ticket: String,

        /// Create progress.yaml for the ticket
        #[arg(long)]
        init: bool,
    },
}

/// Message catalog for the project's configured language. A missing or
/// unreadable config falls back to English with a warning.
fn project_messages(root: &Path) -> &'static Messages {
    if !Config::exists(root) {
        eprintln!("{}", Language::default().messages().config_missing);
    }
    let config = Config::load_or_default(root);
    for warning in config.validate() {
        tracing::warn!("{warning}");
    }
    config.language.messages()
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let msgs = match &cli.command {
        Commands::Init { language, .. } => language.messages(),
        _ => project_messages(&root),
    };

    let result = match cli.command {
        Commands::Init {
            path,
            minimal,
            language,
        } => {
            let target = path.unwrap_or_else(|| root.clone());
            cmd::init::run(&target, minimal, language, cli.json)
        }
        Commands::New { ticket_type, name } => {
            cmd::new::run(&root, ticket_type, &name.join(" "), msgs, cli.json)
        }
        Commands::Socrates { target } => cmd::socrates::run(&root, &target, msgs, cli.json),
        Commands::Resolve { ticket, file } => cmd::resolve::run(&root, &ticket, &file, cli.json),
        Commands::Status {
            ticket,
            set,
            no_timestamp,
        } => cmd::status::run(&root, &ticket, set, !no_timestamp, msgs, cli.json),
        Commands::Archive { ticket } => cmd::archive::archive(&root, &ticket, msgs, cli.json),
        Commands::Restore { ticket } => cmd::archive::restore(&root, &ticket, msgs, cli.json),
        Commands::Archived => cmd::archive::list(&root, msgs, cli.json),
        Commands::Progress { ticket, init } => {
            cmd::progress::run(&root, &ticket, init, msgs, cli.json)
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {}: {}", msgs.error_label, error_text(&e, msgs));
        std::process::exit(1);
    }
}

/// Translated text for known core errors, otherwise the full context chain.
fn error_text(e: &anyhow::Error, msgs: &Messages) -> String {
    e.downcast_ref::<CddError>()
        .and_then(|err| msgs.describe_error(err))
        .unwrap_or_else(|| format!("{e:#}"))
}
