use super::catalog;
use super::engine::{run_catalog, SectionStore, SectionValue};
use super::UpdateReport;
use crate::error::Result;
use crate::prompt::Prompter;
use std::path::Path;

const TITLE: &str = "# Project Constitution";
const PREAMBLE: &str = "> This file is the foundational context for AI-assisted development in this project.\n\
> Keep it current so every conversation starts from the same understanding.";
const FOOTER_MARKER: &str = "*Generated by CDD Framework";

/// Order sections are written in. Sections outside this list follow in file
/// order.
pub const RENDER_ORDER: &[&str] = &[
    "Project Overview",
    "Architecture & Design Patterns",
    "Technology Stack & Constraints",
    "Development Standards",
    "Team Conventions",
];

/// `CLAUDE.md` split into `## ` sections, in file order.
///
/// Text above the first heading and below the generator footer belongs to
/// the user and is written back verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstitutionDoc {
    header: Option<String>,
    sections: Vec<(String, String)>,
    trailer: Option<String>,
}

impl ConstitutionDoc {
    pub fn parse(content: &str) -> Self {
        let mut header: Vec<&str> = Vec::new();
        let mut trailer: Vec<&str> = Vec::new();
        let mut sections: Vec<(String, String)> = Vec::new();
        let mut current: Option<(String, Vec<&str>)> = None;
        let mut past_footer = false;

        for line in content.lines() {
            if past_footer {
                trailer.push(line);
                continue;
            }
            if line.starts_with(FOOTER_MARKER) {
                past_footer = true;
                continue;
            }
            if let Some(heading) = line.strip_prefix("## ") {
                if let Some((name, body)) = current.take() {
                    sections.push((name, clean_body(&body)));
                }
                current = Some((heading.trim().to_string(), Vec::new()));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line);
            } else {
                header.push(line);
            }
        }
        if let Some((name, body)) = current {
            sections.push((name, clean_body(&body)));
        }

        Self {
            header: non_blank(clean_body(&header)),
            sections,
            trailer: non_blank(trailer.join("\n").trim().to_string()),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, body)| body.as_str())
    }

    pub fn set(&mut self, name: &str, body: String) {
        match self.sections.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = body,
            None => self.sections.push((name.to_string(), body)),
        }
    }

    /// Markdown rendering: the user's header (or the default title), known
    /// sections in [`RENDER_ORDER`], any other sections in file order, the
    /// generator footer, then the user's trailing text.
    pub fn render(&self) -> String {
        let mut out = match &self.header {
            Some(header) => format!("{header}\n\n"),
            None => format!("{TITLE}\n\n{PREAMBLE}\n\n"),
        };

        let ordered = RENDER_ORDER
            .iter()
            .filter_map(|key| self.sections.iter().find(|(n, _)| n == key))
            .chain(
                self.sections
                    .iter()
                    .filter(|(n, _)| !RENDER_ORDER.contains(&n.as_str())),
            );

        for (name, body) in ordered {
            out.push_str(&format!("## {name}\n\n{body}\n\n"));
        }

        out.push_str(&format!(
            "---\n\n{FOOTER_MARKER} v{}*\n",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(trailer) = &self.trailer {
            out.push_str(&format!("\n{trailer}\n"));
        }
        out
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        crate::io::atomic_write(path, self.render().as_bytes())
    }
}

/// Trim blank edges and the trailing `---` rule that precedes the footer.
fn clean_body(lines: &[&str]) -> String {
    let joined = lines.join("\n");
    let mut body = joined.trim();
    while let Some(rest) = body.strip_suffix("---") {
        body = rest.trim_end();
    }
    body.to_string()
}

fn non_blank(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

impl SectionStore for ConstitutionDoc {
    fn content_len(&self, key: &str) -> Option<usize> {
        self.get(key).map(|body| body.trim().chars().count())
    }

    fn put(&mut self, key: &str, value: &SectionValue) {
        self.set(key, value.to_markdown());
    }
}

/// Fill in missing constitution sections and rewrite the file.
pub fn converse(path: &Path, prompter: &mut dyn Prompter) -> Result<UpdateReport> {
    let mut doc = ConstitutionDoc::read(path)?;
    prompter.say("📜 Working on the project constitution.")?;

    let updates = run_catalog(catalog::CONSTITUTION, &mut doc, prompter)?;
    if !updates.is_empty() {
        doc.write(path)?;
    }

    Ok(UpdateReport {
        file_path: path.to_path_buf(),
        updates,
        next_steps: vec![
            format!("Review the constitution: {}", path.display()),
            "Create a first ticket: cdd new feature <name>".to_string(),
            "Develop it with Socrates: cdd socrates <ticket>".to_string(),
        ],
    })
}
