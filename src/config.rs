//! Project configuration management
//!
//! This module handles reading and writing the project-level `dashkit.toml`,
//! which names the registry to fetch from and the directories each component
//! kind is installed into.
//!
//! # Examples
//!
//! ```no_run
//! use dashkit::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load config from the project root (defaults when the file is absent)
//! let config = Config::load(".")?;
//! println!("Registry URL: {}", config.registry.url);
//!
//! // Modify and save
//! let mut config = config;
//! config.install.overwrite = true;
//! config.save(".")?;
//! # Ok(())
//! # }
//! ```

use crate::installer::TargetResolver;
use crate::{ItemKind, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the per-project configuration file
pub const CONFIG_FILE: &str = "dashkit.toml";

/// Project configuration (`dashkit.toml` in the project root)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Where each component kind lands in the project tree
    #[serde(default)]
    pub targets: TargetsConfig,

    /// Install behavior
    #[serde(default)]
    pub install: InstallConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry type: "http" or "file"
    #[serde(rename = "type", default = "default_registry_type")]
    pub registry_type: String,

    /// Registry base URL (for HTTP registries)
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Registry root directory (for file registries), `~` allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Bound on every catalog fetch
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_registry_type() -> String {
    "http".to_string()
}

fn default_registry_url() -> String {
    "https://registry.dashkit.dev".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registry_type: default_registry_type(),
            url: default_registry_url(),
            path: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Target directory per component kind, relative to the project root
///
/// `~` expands to the home directory, mostly useful for shared component
/// trees outside the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsConfig {
    #[serde(default = "default_chart_dir")]
    pub chart: String,
    #[serde(default = "default_ui_dir")]
    pub ui: String,
    #[serde(default = "default_layout_dir")]
    pub layout: String,
    #[serde(default = "default_filter_dir")]
    pub filter: String,
    #[serde(default = "default_primitive_dir")]
    pub primitive: String,
}

fn default_chart_dir() -> String {
    "src/components/charts".to_string()
}

fn default_ui_dir() -> String {
    "src/components/ui".to_string()
}

fn default_layout_dir() -> String {
    "src/components/layouts".to_string()
}

fn default_filter_dir() -> String {
    "src/components/filters".to_string()
}

fn default_primitive_dir() -> String {
    "src/components/primitives".to_string()
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            chart: default_chart_dir(),
            ui: default_ui_dir(),
            layout: default_layout_dir(),
            filter: default_filter_dir(),
            primitive: default_primitive_dir(),
        }
    }
}

impl TargetsConfig {
    pub fn dir_for(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Chart => &self.chart,
            ItemKind::Ui => &self.ui,
            ItemKind::Layout => &self.layout,
            ItemKind::Filter => &self.filter,
            ItemKind::Primitive => &self.primitive,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Overwrite differing files without asking
    #[serde(default)]
    pub overwrite: bool,
}

impl Config {
    fn config_path<P: AsRef<Path>>(project_dir: P) -> PathBuf {
        project_dir.as_ref().join(CONFIG_FILE)
    }

    /// Check whether a project has been initialized
    pub fn exists<P: AsRef<Path>>(project_dir: P) -> bool {
        Self::config_path(project_dir).exists()
    }

    /// Load config from the project directory, or defaults if absent
    ///
    /// Environment variable overrides:
    /// - `DASHKIT_REGISTRY_URL`: Overrides `registry.url`
    pub fn load<P: AsRef<Path>>(project_dir: P) -> Result<Self> {
        let path = Self::config_path(project_dir);

        let mut config = if !path.exists() {
            Self::default()
        } else {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        };

        if let Ok(url) = std::env::var("DASHKIT_REGISTRY_URL") {
            if !url.is_empty() {
                config.registry.url = url;
            }
        }

        Ok(config)
    }

    /// Save config to the project directory
    pub fn save<P: AsRef<Path>>(&self, project_dir: P) -> Result<()> {
        let path = Self::config_path(project_dir);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn get_registry_url(&self) -> String {
        self.registry.url.clone()
    }

    /// Registry root for file registries, with `~` expanded
    pub fn registry_path(&self) -> Option<PathBuf> {
        self.registry
            .path
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }

    /// Target directory for one component kind, with `~` expanded
    pub fn target_dir(&self, kind: ItemKind) -> PathBuf {
        PathBuf::from(shellexpand::tilde(self.targets.dir_for(kind)).into_owned())
    }

    /// Build the installer's path-mapping callback for a project root
    ///
    /// Absolute target directories (after `~` expansion) win over the
    /// project root; relative ones are joined onto it.
    pub fn target_resolver<P: AsRef<Path>>(&self, project_dir: P) -> TargetResolver {
        let project_dir = project_dir.as_ref().to_path_buf();
        let config = self.clone();

        Arc::new(move |file_name: &str, kind: ItemKind| {
            project_dir.join(config.target_dir(kind)).join(file_name)
        })
    }
}
