//! Ticket-name to path resolution with fuzzy suggestions on miss.

use crate::error::{CddError, Result};
use crate::paths;
use crate::ticket::TicketType;
use std::path::{Path, PathBuf};

/// Minimum similarity ratio for a directory to be suggested.
pub const SIMILARITY_THRESHOLD: f64 = 0.6;
pub const MAX_SUGGESTIONS: usize = 3;

const EXPLICIT_EXTENSIONS: [&str; 3] = [".md", ".yaml", ".yml"];

pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    /// Resolver over `<root>/specs/tickets`.
    pub fn new(root: &Path) -> Self {
        Self::with_base(paths::tickets_dir(root))
    }

    /// Resolver over an arbitrary directory of ticket folders (e.g. the archive).
    pub fn with_base(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// True when `token` names a file rather than a ticket.
    pub fn is_explicit(token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        token.contains('/')
            || token.contains(std::path::MAIN_SEPARATOR)
            || EXPLICIT_EXTENSIONS.iter().any(|ext| token.ends_with(ext))
    }

    /// Map `token` to a file path.
    ///
    /// Explicit paths are returned unchanged. A bare ticket name resolves to
    /// `<base>/<token>/<target>` when the ticket folder exists; otherwise the
    /// error carries up to [`MAX_SUGGESTIONS`] close folder names and hints
    /// for `command`.
    pub fn resolve(&self, token: &str, target: &str, command: &str) -> Result<PathBuf> {
        if Self::is_explicit(token) {
            tracing::debug!(token, "explicit path, resolver bypassed");
            return Ok(PathBuf::from(token));
        }
        Ok(self.resolve_dir(token, command)?.join(target))
    }

    /// Map a bare ticket name to its folder under the base directory.
    pub fn resolve_dir(&self, token: &str, command: &str) -> Result<PathBuf> {
        let dir = self.base.join(token);
        if !token.is_empty() && !token.starts_with('.') && dir.is_dir() {
            tracing::debug!(token, dir = %dir.display(), "ticket resolved");
            return Ok(dir);
        }

        let suggestions = self.find_similar(token);
        tracing::debug!(token, ?suggestions, "ticket not found");
        Err(CddError::TicketNotFound {
            ticket: token.to_string(),
            suggestions,
            command: command.to_string(),
        })
    }

    /// Folder names under the base at least [`SIMILARITY_THRESHOLD`] similar
    /// to `token`, best first, ties broken by name.
    pub fn find_similar(&self, token: &str) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.base) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut scored: Vec<(f64, String)> = entries
            .flatten()
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| !name.starts_with('.'))
            .filter_map(|name| {
                let score = similarity(token, &name);
                (score >= SIMILARITY_THRESHOLD).then_some((score, name))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, name)| name)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

/// Ratcliff/Obershelp similarity: `2·M / (|a| + |b|)` where `M` counts the
/// characters in recursively found longest common blocks.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// Start in `a`, start in `b` and length of the longest common substring.
/// The earliest block wins among equals.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                cur[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = cur;
    }
    best
}

// ---------------------------------------------------------------------------
// Error text
// ---------------------------------------------------------------------------

/// Body of the "ticket not found" error, with per-suggestion command hints
/// or, when nothing is close, the commands that would create the ticket.
pub fn not_found_message(ticket: &str, suggestions: &[String], command: &str) -> String {
    let mut msg = format!("Ticket not found: {ticket}\n");
    if suggestions.is_empty() {
        msg.push_str(&format!(
            "\nNo existing tickets match '{ticket}'. Create one with:\n"
        ));
        for ticket_type in TicketType::all() {
            msg.push_str(&format!("  cdd new {ticket_type} {ticket}\n"));
        }
    } else {
        msg.push_str("\nDid you mean:\n");
        for suggestion in suggestions {
            msg.push_str(&format!("  • {suggestion}\n      cdd {command} {suggestion}\n"));
        }
    }
    msg.trim_end().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
