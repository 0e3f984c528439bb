//! Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration (desk/config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub archive_scan: ArchiveScanConfig,
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default = "default_portal_name")]
    pub name: String,
    /// Client code used when `new` commands omit `--client`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_client_code: Option<String>,
}

fn default_portal_name() -> String {
    "deskctl-portal".to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            name: default_portal_name(),
            default_client_code: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root directory for the desk SSOT (desk/)
    #[serde(default = "default_desk_root")]
    pub desk_root: PathBuf,
}

fn default_desk_root() -> PathBuf {
    PathBuf::from("desk")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            desk_root: default_desk_root(),
        }
    }
}

impl PathsConfig {
    /// Engagement SSOT directory (desk/engagements/)
    pub fn engagements_dir(&self) -> PathBuf {
        self.desk_root.join("engagements")
    }

    /// Document index path (desk/documents.toml)
    pub fn documents_path(&self) -> PathBuf {
        self.desk_root.join("documents.toml")
    }
}

/// Archive drive scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveScanConfig {
    /// Enable archive scanning during `check` (default: false)
    #[serde(default)]
    pub enabled: bool,
    /// Directories to scan (e.g. mounted drive roots)
    #[serde(default)]
    pub roots: Vec<PathBuf>,
    /// Glob patterns for files to include
    #[serde(default = "default_scan_include")]
    pub include: Vec<String>,
    /// Glob patterns for files to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_scan_include() -> Vec<String> {
    vec!["**/*".to_string()]
}

impl Default for ArchiveScanConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            roots: vec![],
            include: default_scan_include(),
            exclude: vec![],
        }
    }
}

/// Write-lock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcurrencyConfig {
    /// Seconds to wait for the exclusive store lock before giving up
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,
}

fn default_lock_timeout_secs() -> u64 {
    10
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            lock_timeout_secs: default_lock_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .or_else(Self::find_config)
            .unwrap_or_else(|| PathBuf::from("desk/config.toml"));

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if no file exists
            Ok(Config::default())
        }
    }

    /// Find config file by walking up directory tree
    fn find_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let config_path = current.join("desk/config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    // Convenience accessors that delegate to paths
    pub fn engagements_dir(&self) -> PathBuf {
        self.paths.engagements_dir()
    }

    pub fn documents_path(&self) -> PathBuf {
        self.paths.documents_path()
    }

    /// Generate default config TOML
    pub fn default_toml() -> &'static str {
        r#"[portal]
name = "my-portal"
# Client code used when `new` commands omit --client
# default_client_code = "ABC"

[paths]
desk_root = "desk"

[archive_scan]
# Verify on-disk archive filenames against the naming grammar and the
# document index during `deskctl check`.
enabled = false
# roots = ["/mnt/f-drive", "/mnt/w-drive"]
# include = ["**/*"]
# exclude = ["**/.DS_Store"]

[concurrency]
lock_timeout_secs = 10
"#
    }
}
