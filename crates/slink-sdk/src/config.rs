use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors raised while loading a [`SlinkConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("missing config key: {0}")]
    Missing(&'static str),

    #[error("{key} must be an absolute path, got {}", .path.display())]
    NotAbsolute { key: &'static str, path: PathBuf },
}

/// The two directories slink works in.
///
/// Both must already exist; slink never creates them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlinkConfig {
    /// Root of the sharded blob tree.
    pub storage_root: PathBuf,
    /// Root of the grouping-key link tree.
    pub link_root: PathBuf,
}

#[derive(Deserialize)]
struct TomlFile {
    storage_root: Option<PathBuf>,
    link_root: Option<PathBuf>,
}

/// Host configuration document, of which only two keys matter here:
///
/// ```json
/// {
///   "StorageDirectory": "/var/lib/host/db",
///   "StorageLink": { "LinkDirectory": "/var/lib/host/links" }
/// }
/// ```
#[derive(Deserialize)]
struct HostFile {
    #[serde(rename = "StorageDirectory")]
    storage_directory: Option<PathBuf>,
    #[serde(rename = "StorageLink")]
    storage_link: Option<HostLinkSection>,
}

#[derive(Deserialize)]
struct HostLinkSection {
    #[serde(rename = "LinkDirectory")]
    link_directory: Option<PathBuf>,
}

impl SlinkConfig {
    pub fn new(storage_root: impl Into<PathBuf>, link_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            link_root: link_root.into(),
        }
    }

    /// Parse a TOML document with `storage_root` and `link_root` keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: TomlFile = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config = Self {
            storage_root: file.storage_root.ok_or(ConfigError::Missing("storage_root"))?,
            link_root: file.link_root.ok_or(ConfigError::Missing("link_root"))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a host-style JSON configuration document.
    pub fn from_host_json_str(s: &str) -> Result<Self, ConfigError> {
        let file: HostFile =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let storage_root = file
            .storage_directory
            .ok_or(ConfigError::Missing("StorageDirectory"))?;
        let link_root = file
            .storage_link
            .ok_or(ConfigError::Missing("StorageLink"))?
            .link_directory
            .ok_or(ConfigError::Missing("StorageLink.LinkDirectory"))?;
        let config = Self {
            storage_root,
            link_root,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, choosing the format by extension: `.json` files are
    /// read as host configuration, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_host_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Check that both roots are absolute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, path) in [
            ("storage_root", &self.storage_root),
            ("link_root", &self.link_root),
        ] {
            if !path.is_absolute() {
                return Err(ConfigError::NotAbsolute {
                    key,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }
}
