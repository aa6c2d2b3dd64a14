use crate::output::{print_json, print_table};
use cdd_core::archive::{archive_ticket, list_archived_tickets, restore_ticket};
use cdd_core::messages::Messages;
use cdd_core::paths;
use cdd_core::resolve::PathResolver;
use cdd_core::spec_file::SpecDocument;
use cdd_core::ticket::TicketStatus;
use std::path::Path;

fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn archive(root: &Path, ticket: &str, msgs: &Messages, json: bool) -> anyhow::Result<()> {
    let ticket_dir = PathResolver::new(root).resolve_dir(ticket, "archive")?;
    let dest = archive_ticket(&ticket_dir, &paths::archive_dir(root))?;

    let spec = dest.join(paths::SPEC_FILE);
    if spec.exists() {
        if let Err(e) = SpecDocument::update_status(&spec, TicketStatus::Archived, true) {
            tracing::warn!(path = %spec.display(), "could not mark ticket archived: {e}");
        }
    }

    let name = folder_name(&dest);
    if json {
        print_json(&serde_json::json!({ "ticket": name, "path": dest }))?;
    } else {
        println!("{}", (msgs.archived)(&name));
    }
    Ok(())
}

pub fn restore(root: &Path, ticket: &str, msgs: &Messages, json: bool) -> anyhow::Result<()> {
    let resolver = PathResolver::with_base(paths::archive_dir(root));
    let archived_dir = resolver.resolve_dir(ticket, "restore")?;
    let dest = restore_ticket(&archived_dir, &paths::tickets_dir(root))?;

    let name = folder_name(&dest);
    if json {
        print_json(&serde_json::json!({ "ticket": name, "path": dest }))?;
    } else {
        println!("{}", (msgs.restored)(&name));
    }
    Ok(())
}

pub fn list(root: &Path, msgs: &Messages, json: bool) -> anyhow::Result<()> {
    let archived = list_archived_tickets(&paths::archive_dir(root))?;

    let entries: Vec<(String, Option<TicketStatus>)> = archived
        .iter()
        .map(|dir| {
            let status = SpecDocument::get_status(&dir.join(paths::SPEC_FILE))
                .ok()
                .flatten();
            (folder_name(dir), status)
        })
        .collect();

    if json {
        let items: Vec<_> = entries
            .iter()
            .map(|(name, status)| serde_json::json!({ "ticket": name, "status": status }))
            .collect();
        return print_json(&items);
    }

    if entries.is_empty() {
        println!("{}", msgs.no_archived);
        return Ok(());
    }

    let rows = entries
        .into_iter()
        .map(|(name, status)| {
            vec![
                name,
                status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&[msgs.col_ticket, msgs.col_status], rows);
    Ok(())
}
