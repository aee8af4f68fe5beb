//! Dashkit - a component registry installer for dashboard UI kits
//!
//! Dashkit copies dashboard components (charts, cards, layouts, filters)
//! from a shared registry straight into your project source tree, the way
//! you would vendor them by hand, with features like:
//!
//! - Transitive resolution of component-to-component dependencies with
//!   cycle protection and deduplication
//! - Idempotent installs: unchanged files are never rewritten
//! - Diff previews with per-file confirmation before overwriting local edits
//! - Collection of the external package dependencies the installed
//!   components expect (for your own package manager to install)
//! - HTTP and local-directory registry backends
//!
//! # Examples
//!
//! ```no_run
//! use dashkit::{install_all, resolve, Config, RegistryClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load project configuration
//! let config = Config::load(".")?;
//!
//! // Create registry client and resolve what "kpi-card" pulls in
//! let registry = RegistryClient::from_config(&config)?;
//! let resolution = resolve(&["kpi-card".to_string()], &registry);
//!
//! // Materialize everything into the configured target directories
//! let target_for = config.target_resolver(".");
//! let reports = install_all(&resolution.resolved, &target_for, false, None, None);
//!
//! println!("Installed {} component(s)", reports.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`registry`] - Catalog types and registry clients
//! - [`resolver`] - Transitive registry-dependency resolution
//! - [`installer`] - Materialize component files with the conflict policy
//! - [`report`] - Per-file outcomes and summary aggregation
//! - [`diff`] - Unified diff rendering for overwrite previews
//! - [`config`] - Project configuration (`dashkit.toml`)
//! - [`error`] - Error types and result handling

pub mod config;
pub mod diff;
pub mod error;
pub mod installer;
pub mod registry;
pub mod registry_http;
pub mod report;
pub mod resolver;

pub use config::{Config, InstallConfig, RegistryConfig, TargetsConfig, CONFIG_FILE};
pub use error::{Error, Result};
pub use installer::{install_all, install_item, CancelFlag, OverwritePrompt, TargetResolver};
pub use registry::{CatalogItem, FileRegistryClient, ItemFile, ItemKind, RegistryClient};
pub use report::{aggregate, FileReport, InstallOutcome, ItemReport, Summary};
pub use resolver::{resolve, ResolutionResult, UnresolvedItem};
