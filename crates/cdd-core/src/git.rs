use crate::error::{CddError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Top-level directory of the git working tree containing `dir`.
pub fn repo_root(dir: &Path) -> Result<PathBuf> {
    let git = which::which("git").map_err(|_| CddError::GitNotFound)?;
    let output = Command::new(git)
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()?;

    if !output.status.success() {
        tracing::debug!(
            dir = %dir.display(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "git rev-parse failed"
        );
        return Err(CddError::NotGitRepo);
    }

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(PathBuf::from(root))
}
