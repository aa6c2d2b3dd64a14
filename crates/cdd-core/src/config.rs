use crate::error::{CddError, Result};
use crate::messages::{self, Messages};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const CURRENT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-br")]
    PtBr,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::PtBr => "pt-br",
        }
    }

    /// Message catalog for user-facing CLI text.
    pub fn messages(self) -> &'static Messages {
        match self {
            Language::En => &messages::EN,
            Language::PtBr => &messages::PT_BR,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en" => Ok(Language::En),
            "pt-br" => Ok(Language::PtBr),
            other => Err(format!("unsupported language '{other}': expected en or pt-br")),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Project settings stored in `.cdd/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Config {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            version: CURRENT_VERSION,
        }
    }

    pub fn exists(root: &Path) -> bool {
        paths::config_path(root).is_file()
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(CddError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like [`Config::load`], but a missing or unreadable file falls back to
    /// defaults. Malformed files are logged, never fatal.
    pub fn load_or_default(root: &Path) -> Self {
        match Self::load(root) {
            Ok(cfg) => cfg,
            Err(CddError::NotInitialized) => {
                tracing::debug!(root = %root.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(
                    path = %paths::config_path(root).display(),
                    error = %e,
                    "ignoring unreadable config, using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.version > CURRENT_VERSION {
            warnings.push(format!(
                "config version {} is newer than supported version {CURRENT_VERSION}",
                self.version
            ));
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::new(Language::PtBr);
        cfg.save(dir.path()).unwrap();

        let raw = std::fs::read_to_string(paths::config_path(dir.path())).unwrap();
        assert!(raw.contains("language: pt-br"), "{raw}");

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(CddError::NotInitialized)
        ));
        assert_eq!(Config::load_or_default(dir.path()), Config::default());
    }

    #[test]
    fn missing_fields_default() {
        let dir = TempDir::new().unwrap();
        crate::io::atomic_write(&paths::config_path(dir.path()), b"{}\n").unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.language, Language::En);
        assert_eq!(cfg.version, CURRENT_VERSION);
    }

    #[test]
    fn malformed_config_falls_back_to_english() {
        let dir = TempDir::new().unwrap();
        crate::io::atomic_write(&paths::config_path(dir.path()), b"language: klingon\n").unwrap();
        assert!(Config::load(dir.path()).is_err());
        assert_eq!(Config::load_or_default(dir.path()).language, Language::En);
    }

    #[test]
    fn language_parsing() {
        assert_eq!("pt-br".parse::<Language>().unwrap(), Language::PtBr);
        assert_eq!("PT_BR".parse::<Language>().unwrap(), Language::PtBr);
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn newer_version_warns() {
        let cfg = Config {
            language: Language::En,
            version: CURRENT_VERSION + 1,
        };
        assert_eq!(cfg.validate().len(), 1);
        assert!(Config::default().validate().is_empty());
    }
}
