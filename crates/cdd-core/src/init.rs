use crate::config::{Config, Language};
use crate::error::{CddError, Result};
use crate::ticket::TicketType;
use crate::{git, io, paths, templates};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// System locations `cdd init` refuses to touch (the home directory is
/// checked separately).
pub const DANGEROUS_PATHS: &[&str] = &[
    "/",
    "/usr",
    "/etc",
    "/bin",
    "/sbin",
    "/var",
    "/sys",
    "/proc",
    "/boot",
    "/lib",
    "/opt",
    "/usr/lib",
    "/usr/local",
];

/// Directories of a CDD project, parents first.
pub const DIRECTORIES: &[&str] = &[
    paths::SPECS_DIR,
    paths::TICKETS_DIR,
    paths::ARCHIVE_DIR,
    paths::CLAUDE_DIR,
    paths::CLAUDE_COMMANDS_DIR,
    paths::CDD_DIR,
    paths::TEMPLATES_DIR,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    pub minimal: bool,
    pub language: Language,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub path: PathBuf,
    /// Set when the target sat inside a git repository and the scaffold went
    /// to the repository root instead.
    pub git_root: Option<PathBuf>,
    pub existing_items: Vec<String>,
    pub created_dirs: Vec<String>,
    pub created_files: Vec<String>,
    pub skipped_files: Vec<String>,
}

impl InitReport {
    pub fn existing_structure(&self) -> bool {
        !self.existing_items.is_empty()
    }
}

fn resolve(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        Ok(path.canonicalize()?)
    } else {
        Ok(std::path::absolute(path)?)
    }
}

/// Both the lexical and the symlink-resolved forms are checked, so `/bin`
/// stays refused on systems where it links to `/usr/bin`.
pub fn is_dangerous_path(path: &Path) -> bool {
    let mut forms = Vec::new();
    if let Ok(absolute) = std::path::absolute(path) {
        forms.push(absolute);
    }
    if let Ok(resolved) = resolve(path) {
        forms.push(resolved);
    }

    let home = home::home_dir().map(|h| h.canonicalize().unwrap_or(h));
    forms.iter().any(|p| {
        DANGEROUS_PATHS.iter().any(|d| p == Path::new(d)) || home.as_deref() == Some(p.as_path())
    })
}

/// Absolute form of `path`, rejecting system directories and read-only targets.
pub fn validate_path(path: &Path) -> Result<PathBuf> {
    let resolved = resolve(path)?;
    if is_dangerous_path(&resolved) {
        return Err(CddError::DangerousPath(resolved));
    }
    if resolved.is_dir() {
        tempfile::NamedTempFile::new_in(&resolved)
            .map_err(|e| write_check_error(&resolved, e))?;
    } else if resolved.exists() && std::fs::metadata(&resolved)?.permissions().readonly() {
        return Err(CddError::NoWritePermission(resolved));
    }
    Ok(resolved)
}

/// Map a failed test write inside `dir` to the error `init` reports.
fn write_check_error(dir: &Path, err: std::io::Error) -> CddError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => CddError::NoWritePermission(dir.to_path_buf()),
        _ => CddError::Io(err),
    }
}

/// CDD directories and key files already present under `base`.
pub fn check_existing_structure(base: &Path) -> Vec<String> {
    DIRECTORIES
        .iter()
        .chain([paths::CONSTITUTION_MD, paths::CONFIG_FILE].iter())
        .filter(|item| base.join(item).exists())
        .map(|item| item.to_string())
        .collect()
}

/// Create every missing CDD directory, returning the ones created.
pub fn create_directory_structure(base: &Path) -> Result<Vec<String>> {
    let mut created = Vec::new();
    for dir in DIRECTORIES {
        if io::ensure_dir(&base.join(dir))? {
            created.push(dir.to_string());
        }
    }
    Ok(created)
}

/// Embedded template name and project-relative destination of each scaffold file.
fn scaffold_files() -> Vec<(&'static str, String)> {
    let mut files = vec![(templates::CONSTITUTION_TEMPLATE, paths::CONSTITUTION_MD.to_string())];
    for t in TicketType::all() {
        files.push((
            t.template_name(),
            format!("{}/{}", paths::TEMPLATES_DIR, t.template_name()),
        ));
    }
    files
}

/// Write the scaffold files that don't exist yet. Returns (created, skipped).
pub fn write_template_files(base: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let mut created = Vec::new();
    let mut skipped = Vec::new();
    for (source, dest) in scaffold_files() {
        let content = templates::get(source)?;
        if io::write_if_missing(&base.join(&dest), content.as_bytes())? {
            created.push(dest);
        } else {
            skipped.push(dest);
        }
    }
    Ok((created, skipped))
}

/// Scaffold a CDD project at `path` (or at the root of its git repository).
///
/// Existing files are never overwritten; a partial structure is completed.
pub fn initialize_project(path: &Path, options: InitOptions) -> Result<InitReport> {
    let mut target = validate_path(path)?;
    io::ensure_dir(&target)?;

    let existing_items = check_existing_structure(&target);

    let mut git_root = None;
    if let Ok(root) = git::repo_root(&target) {
        let root = root.canonicalize().unwrap_or(root);
        if root != target {
            tracing::debug!(target = %target.display(), root = %root.display(), "using git root");
            target = root.clone();
            git_root = Some(root);
        }
    }

    let created_dirs = create_directory_structure(&target)?;
    let mut created_files = Vec::new();
    let mut skipped_files = Vec::new();

    if Config::exists(&target) {
        skipped_files.push(paths::CONFIG_FILE.to_string());
    } else {
        Config::new(options.language).save(&target)?;
        created_files.push(paths::CONFIG_FILE.to_string());
    }

    if !options.minimal {
        let (created, skipped) = write_template_files(&target)?;
        created_files.extend(created);
        skipped_files.extend(skipped);
    }

    Ok(InitReport {
        path: target,
        git_root,
        existing_items,
        created_dirs,
        created_files,
        skipped_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn system_directories_are_dangerous() {
        for p in ["/", "/usr", "/etc", "/usr/local"] {
            assert!(is_dangerous_path(Path::new(p)), "{p}");
        }
        let dir = TempDir::new().unwrap();
        assert!(!is_dangerous_path(dir.path()));
        if let Some(home) = home::home_dir() {
            assert!(is_dangerous_path(&home));
        }
    }

    #[test]
    fn validate_rejects_dangerous() {
        let err = validate_path(Path::new("/etc")).unwrap_err();
        assert!(err.to_string().contains("Refusing to initialize"));
    }

    #[test]
    fn validate_accepts_writable_directory() {
        let dir = TempDir::new().unwrap();
        let resolved = validate_path(dir.path()).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn denied_writes_become_permission_errors() {
        let dir = Path::new("/srv/locked");
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        match write_check_error(dir, denied) {
            CddError::NoWritePermission(p) => assert_eq!(p, dir),
            other => panic!("unexpected: {other:?}"),
        }

        let other = std::io::Error::from(std::io::ErrorKind::NotFound);
        assert!(matches!(write_check_error(dir, other), CddError::Io(_)));
    }

    #[test]
    fn validate_resolves_missing_targets() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("new-project");
        let resolved = validate_path(&target).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("new-project"));
    }

    #[test]
    fn full_init_creates_everything() {
        let dir = TempDir::new().unwrap();
        let report = initialize_project(dir.path(), InitOptions::default()).unwrap();

        assert!(!report.existing_structure());
        assert_eq!(report.created_dirs.len(), DIRECTORIES.len());
        for item in DIRECTORIES {
            assert!(report.path.join(item).is_dir(), "{item}");
        }
        assert!(report.path.join("CLAUDE.md").is_file());
        assert!(report.path.join(".cdd/templates/feature-ticket-template.yaml").is_file());
        assert!(report.path.join(".cdd/templates/bug-ticket-template.yaml").is_file());
        assert!(report.path.join(".cdd/templates/spike-ticket-template.yaml").is_file());
        assert_eq!(report.created_files.len(), 5);
        assert_eq!(Config::load(&report.path).unwrap().language, Language::En);
    }

    #[test]
    fn second_init_skips_existing_files() {
        let dir = TempDir::new().unwrap();
        initialize_project(dir.path(), InitOptions::default()).unwrap();
        std::fs::write(dir.path().join("CLAUDE.md"), "custom").unwrap();

        let report = initialize_project(dir.path(), InitOptions::default()).unwrap();
        assert!(report.existing_structure());
        assert!(report.created_dirs.is_empty());
        assert!(report.created_files.is_empty());
        assert_eq!(report.skipped_files.len(), 5);
        assert_eq!(std::fs::read_to_string(dir.path().join("CLAUDE.md")).unwrap(), "custom");
    }

    #[test]
    fn partial_structure_is_completed() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("specs")).unwrap();
        let report = initialize_project(dir.path(), InitOptions::default()).unwrap();
        assert_eq!(report.existing_items, vec!["specs"]);
        assert!(!report.created_dirs.contains(&"specs".to_string()));
        assert!(report.path.join("specs/archive").is_dir());
    }

    #[test]
    fn minimal_init_writes_only_config() {
        let dir = TempDir::new().unwrap();
        let report = initialize_project(
            dir.path(),
            InitOptions {
                minimal: true,
                language: Language::PtBr,
            },
        )
        .unwrap();
        assert_eq!(report.created_files, vec![paths::CONFIG_FILE]);
        assert!(!report.path.join("CLAUDE.md").exists());
        assert_eq!(Config::load(&report.path).unwrap().language, Language::PtBr);
    }

    #[test]
    fn init_prefers_git_root() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let status = std::process::Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir.path())
            .status()
            .unwrap();
        assert!(status.success());

        let nested = dir.path().join("sub/dir");
        let report = initialize_project(&nested, InitOptions::default()).unwrap();
        let root = dir.path().canonicalize().unwrap();
        assert_eq!(report.path, root);
        assert_eq!(report.git_root.as_deref(), Some(root.as_path()));
        assert!(root.join("specs/tickets").is_dir());
    }
}
