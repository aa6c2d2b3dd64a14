use crate::output::{print_fields, print_json};
use cdd_core::messages::Messages;
use cdd_core::resolve::PathResolver;
use cdd_core::spec_file::SpecDocument;
use cdd_core::ticket::TicketStatus;
use cdd_core::paths;
use std::path::Path;

pub fn run(
    root: &Path,
    ticket: &str,
    set: Option<TicketStatus>,
    add_timestamp: bool,
    msgs: &Messages,
    json: bool,
) -> anyhow::Result<()> {
    let spec_path = PathResolver::new(root).resolve(ticket, paths::SPEC_FILE, "status")?;
    let name = ticket_name(&spec_path, ticket);

    if let Some(status) = set {
        SpecDocument::update_status(&spec_path, status, add_timestamp)?;
        if json {
            print_json(&serde_json::json!({
                "ticket": name,
                "status": status,
                "spec_path": spec_path,
            }))?;
        } else {
            println!("{}", (msgs.status_updated)(&name, status.as_str()));
        }
        return Ok(());
    }

    let doc = SpecDocument::read(&spec_path)?;
    let meta = doc.meta()?;
    let title = doc
        .record()?
        .and_then(|r| r.title().map(str::to_string));

    if json {
        return print_json(&serde_json::json!({
            "ticket": name,
            "spec_path": spec_path,
            "title": title,
            "meta": meta,
        }));
    }

    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    print_fields(&[
        (msgs.label_ticket, name),
        (msgs.label_title, or_dash(title)),
        (msgs.label_type, or_dash(meta.ticket_type.map(|t| t.to_string()))),
        (msgs.label_status, or_dash(meta.status.map(|s| s.to_string()))),
        (msgs.label_created, or_dash(meta.created)),
        (msgs.label_updated, or_dash(meta.updated)),
    ]);
    Ok(())
}

/// Folder name of the ticket owning `spec_path`, falling back to the token.
fn ticket_name(spec_path: &Path, token: &str) -> String {
    spec_path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| token.to_string())
}
