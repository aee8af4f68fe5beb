//! Component registry client and catalog types
//!
//! This module provides the catalog data model plus a file-based registry
//! client (used for local registry development and tests). The HTTP client
//! most installations talk to lives in `registry_http`.
//!
//! # Examples
//!
//! ```no_run
//! use dashkit::{FileRegistryClient, RegistryClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = RegistryClient::File(FileRegistryClient::new("./registry"));
//!
//! // Browse the catalog
//! for item in registry.get_index()? {
//!     println!("{}: {}", item.name, item.description);
//! }
//!
//! // Fetch a single component
//! let item = registry.get_item("bar-chart")?;
//! println!("{} ships {} file(s)", item.name, item.files.len());
//! # Ok(())
//! # }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A single installable component as published in the registry
///
/// Items are immutable once fetched: the installer reads them, it never
/// writes them back. All fields use camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub name: String,
    pub kind: ItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: String,
    /// External packages the consuming project must install (e.g. "recharts")
    #[serde(default)]
    pub package_dependencies: Vec<String>,
    #[serde(default)]
    pub package_dev_dependencies: Vec<String>,
    #[serde(default)]
    pub package_peer_dependencies: Vec<String>,
    /// Names of other catalog items this one needs installed alongside it
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
    pub files: Vec<ItemFile>,
    /// Opaque publisher metadata, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// One source file carried by a component, with its full content inline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFile {
    pub relative_name: String,
    pub content: String,
}

/// Component kind, which decides the target directory on install
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Data visualization components (bar charts, sparklines, ...)
    Chart,
    /// General UI building blocks (cards, badges, tables)
    Ui,
    /// Page-level arrangement components (grids, sidebars)
    Layout,
    /// Interactive data-filtering controls
    Filter,
    /// Low-level shared pieces other components build on
    Primitive,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Chart,
        ItemKind::Ui,
        ItemKind::Layout,
        ItemKind::Filter,
        ItemKind::Primitive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Chart => "chart",
            ItemKind::Ui => "ui",
            ItemKind::Layout => "layout",
            ItemKind::Filter => "filter",
            ItemKind::Primitive => "primitive",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl CatalogItem {
    /// Check the invariants serde cannot express
    ///
    /// Registry content is untrusted input; file names in particular must
    /// never escape the target directory the installer maps them into.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::CatalogInvalid(
                "component has an empty name".to_string(),
            ));
        }

        if self.files.is_empty() {
            return Err(Error::CatalogInvalid(format!(
                "component '{}' has no files",
                self.name
            )));
        }

        for file in &self.files {
            if file.relative_name.trim().is_empty() {
                return Err(Error::CatalogInvalid(format!(
                    "component '{}' has a file with an empty name",
                    self.name
                )));
            }

            let path = Path::new(&file.relative_name);
            if path.is_absolute() {
                return Err(Error::CatalogInvalid(format!(
                    "component '{}' file '{}' uses an absolute path",
                    self.name, file.relative_name
                )));
            }
            if path.components().any(|c| matches!(c, Component::ParentDir)) {
                return Err(Error::CatalogInvalid(format!(
                    "component '{}' file '{}' escapes the target directory",
                    self.name, file.relative_name
                )));
            }
        }

        Ok(())
    }
}

pub enum RegistryClient {
    File(FileRegistryClient),
    Http(crate::registry_http::HttpRegistryClient),
}

pub struct FileRegistryClient {
    registry_path: PathBuf,
}

impl RegistryClient {
    /// Create a registry client using configuration
    pub fn from_config(config: &crate::Config) -> Result<Self> {
        match config.registry.registry_type.as_str() {
            "file" => {
                let path = config.registry_path().ok_or_else(|| {
                    Error::InvalidConfig(
                        "registry type is 'file' but no path is set".to_string(),
                    )
                })?;
                Ok(RegistryClient::File(FileRegistryClient::new(path)))
            }
            "http" => {
                let http_client = crate::registry_http::HttpRegistryClient::new(
                    config.get_registry_url(),
                    config.registry.timeout_seconds,
                )?;
                Ok(RegistryClient::Http(http_client))
            }
            other => Err(Error::InvalidConfig(format!(
                "unknown registry type '{}' (expected 'http' or 'file')",
                other
            ))),
        }
    }

    /// Fetch the full catalog
    pub fn get_index(&self) -> Result<Vec<CatalogItem>> {
        match self {
            RegistryClient::File(client) => client.get_index(),
            RegistryClient::Http(client) => client.get_index(),
        }
    }

    /// Fetch a single component by name
    pub fn get_item(&self, name: &str) -> Result<CatalogItem> {
        match self {
            RegistryClient::File(client) => client.get_item(name),
            RegistryClient::Http(client) => client.get_item(name),
        }
    }
}

impl FileRegistryClient {
    /// Create a client over a local registry directory
    pub fn new<P: AsRef<Path>>(registry_path: P) -> Self {
        Self {
            registry_path: registry_path.as_ref().to_path_buf(),
        }
    }

    /// Path to the directory holding one JSON document per component
    pub fn components_dir(&self) -> PathBuf {
        self.registry_path.join("components")
    }

    pub fn get_index(&self) -> Result<Vec<CatalogItem>> {
        let index_file = self.registry_path.join("index.json");

        let content = fs::read_to_string(&index_file).map_err(|e| {
            Error::CatalogUnavailable(format!(
                "cannot read registry index {}: {}",
                index_file.display(),
                e
            ))
        })?;

        let items: Vec<CatalogItem> = serde_json::from_str(&content)
            .map_err(|e| Error::CatalogInvalid(format!("registry index: {}", e)))?;

        for item in &items {
            item.validate()?;
        }

        Ok(items)
    }

    pub fn get_item(&self, name: &str) -> Result<CatalogItem> {
        let item_file = self.components_dir().join(format!("{}.json", name));

        if !item_file.exists() {
            // Try to find similar component names for suggestions
            let similar = self.find_similar_components(name);

            let mut error_msg = format!("'{}' is not in the registry", name);

            if !similar.is_empty() {
                error_msg.push_str("\n\nDid you mean one of these?\n  ");
                error_msg.push_str(&similar.join("\n  "));
            }

            return Err(Error::ItemNotFound(error_msg));
        }

        let content = fs::read_to_string(&item_file).map_err(|e| {
            Error::CatalogUnavailable(format!(
                "cannot read {}: {}",
                item_file.display(),
                e
            ))
        })?;

        let item: CatalogItem = serde_json::from_str(&content)
            .map_err(|e| Error::CatalogInvalid(format!("component '{}': {}", name, e)))?;

        item.validate()?;

        Ok(item)
    }

    /// Find components with similar names using simple edit distance
    fn find_similar_components(&self, query: &str) -> Vec<String> {
        let components_dir = self.components_dir();

        if !components_dir.exists() {
            return Vec::new();
        }

        let mut similar = Vec::new();

        if let Ok(entries) = fs::read_dir(components_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|s| s.to_str()) == Some("json") {
                    if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                        if name.contains(query)
                            || query.contains(name)
                            || self.levenshtein_distance(query, name) <= 3
                        {
                            similar.push(name.to_string());
                        }
                    }
                }
            }
        }

        similar.sort();
        similar.truncate(5); // Show max 5 suggestions
        similar
    }

    /// Calculate Levenshtein distance between two strings
    fn levenshtein_distance(&self, s1: &str, s2: &str) -> usize {
        let len1 = s1.chars().count();
        let len2 = s2.chars().count();
        let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

        for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
            row[0] = i;
        }
        for (j, val) in matrix[0].iter_mut().enumerate().take(len2 + 1) {
            *val = j;
        }

        for (i, c1) in s1.chars().enumerate() {
            for (j, c2) in s2.chars().enumerate() {
                let cost = if c1 == c2 { 0 } else { 1 };
                matrix[i + 1][j + 1] = std::cmp::min(
                    std::cmp::min(matrix[i][j + 1] + 1, matrix[i + 1][j] + 1),
                    matrix[i][j] + cost,
                );
            }
        }

        matrix[len1][len2]
    }
}
