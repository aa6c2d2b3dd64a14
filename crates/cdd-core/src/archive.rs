use crate::error::{CddError, Result};
use std::path::{Path, PathBuf};

fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Move `ticket_dir` into `archive_base`, returning the new location.
pub fn archive_ticket(ticket_dir: &Path, archive_base: &Path) -> Result<PathBuf> {
    if !ticket_dir.exists() {
        return Err(CddError::TicketFolderNotFound(ticket_dir.to_path_buf()));
    }
    if !ticket_dir.is_dir() {
        return Err(CddError::NotADirectory(ticket_dir.to_path_buf()));
    }

    let name = folder_name(ticket_dir);
    let dest = archive_base.join(&name);
    if dest.exists() {
        return Err(CddError::AlreadyArchived(name));
    }

    std::fs::create_dir_all(archive_base)?;
    std::fs::rename(ticket_dir, &dest)?;
    tracing::debug!(from = %ticket_dir.display(), to = %dest.display(), "ticket archived");
    Ok(dest)
}

/// Move `archived_dir` back into `tickets_base`, returning the new location.
pub fn restore_ticket(archived_dir: &Path, tickets_base: &Path) -> Result<PathBuf> {
    if !archived_dir.exists() {
        return Err(CddError::ArchivedTicketNotFound(archived_dir.to_path_buf()));
    }
    if !archived_dir.is_dir() {
        return Err(CddError::NotADirectory(archived_dir.to_path_buf()));
    }

    let name = folder_name(archived_dir);
    let dest = tickets_base.join(&name);
    if dest.exists() {
        return Err(CddError::AlreadyActive(name));
    }

    std::fs::create_dir_all(tickets_base)?;
    std::fs::rename(archived_dir, &dest)?;
    tracing::debug!(from = %archived_dir.display(), to = %dest.display(), "ticket restored");
    Ok(dest)
}

/// Archived ticket folders, sorted by name. A missing archive is empty.
pub fn list_archived_tickets(archive_base: &Path) -> Result<Vec<PathBuf>> {
    if !archive_base.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(archive_base)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}
