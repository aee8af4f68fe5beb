//! Component materialization onto the local filesystem
//!
//! This module writes a resolved component's files into the target tree,
//! one file at a time, applying the conflict policy: absent files are
//! created, identical files are left alone, and differing files are only
//! overwritten with the `overwrite` flag or an accepted diff preview.
//!
//! The installer never prints and never prompts itself; target paths and
//! overwrite confirmation come in as caller-supplied callbacks, which keeps
//! the policy (and the terminal) out of the core.
//!
//! # Examples
//!
//! ```no_run
//! use dashkit::{install_all, resolve, Config, RegistryClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(".")?;
//! let registry = RegistryClient::from_config(&config)?;
//! let resolution = resolve(&["kpi-card".to_string()], &registry);
//!
//! let target_for = config.target_resolver(".");
//! let reports = install_all(&resolution.resolved, &target_for, false, None, None);
//! for report in &reports {
//!     println!("{}: {} file(s) processed", report.name, report.files.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::report::{FileReport, InstallOutcome, ItemReport};
use crate::{diff, CatalogItem, ItemFile, ItemKind, Result};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Maps a published file name and component kind to a target path
///
/// Called with:
/// - `file_name`: the file's relative name as published (e.g. "kpi-card.tsx")
/// - `kind`: the component's kind, which decides the base directory
pub type TargetResolver = Arc<dyn Fn(&str, ItemKind) -> std::path::PathBuf + Send + Sync>;

/// Asks the operator whether a differing file may be overwritten
///
/// Called with:
/// - `file_name`: the file about to be replaced
/// - `diff_preview`: a unified diff from on-disk content to incoming content
///
/// Returning false keeps the existing file untouched.
pub type OverwritePrompt = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// Cooperative cancellation flag, checked before every file and component
///
/// Once set, no further write is issued; writes already in progress finish
/// (each write is a single complete-content call, so no partial files).
pub type CancelFlag = Arc<AtomicBool>;

/// Install every file of one component, in published order
///
/// I/O failures are scoped to the file they hit: the failing file reports
/// [`InstallOutcome::Failed`] and its siblings still get processed. Without
/// a `confirm` callback, differing files are kept as they are.
pub fn install_item(
    item: &CatalogItem,
    target_for: &TargetResolver,
    overwrite: bool,
    confirm: Option<&OverwritePrompt>,
    cancel: Option<&CancelFlag>,
) -> ItemReport {
    let mut files = Vec::with_capacity(item.files.len());

    for file in &item.files {
        if is_cancelled(cancel) {
            tracing::debug!(
                "install of '{}' cancelled before '{}'",
                item.name,
                file.relative_name
            );
            break;
        }

        let target = target_for(&file.relative_name, item.kind);

        let (outcome, note) = match materialize_file(file, &target, overwrite, confirm) {
            Ok(done) => done,
            Err(e) => (InstallOutcome::Failed, Some(e.to_string())),
        };

        files.push(FileReport {
            name: file.relative_name.clone(),
            path: target,
            outcome,
            note,
        });
    }

    ItemReport {
        name: item.name.clone(),
        files,
    }
}

/// Install resolved components strictly in order
///
/// Component *i+1* never starts before component *i* is done, including any
/// blocking confirmation; prompts must reach the operator one at a time.
/// A set cancel flag stops the batch; reports collected so far are returned.
pub fn install_all(
    items: &[CatalogItem],
    target_for: &TargetResolver,
    overwrite: bool,
    confirm: Option<&OverwritePrompt>,
    cancel: Option<&CancelFlag>,
) -> Vec<ItemReport> {
    let mut reports = Vec::with_capacity(items.len());

    for item in items {
        if is_cancelled(cancel) {
            tracing::debug!(
                "install cancelled; {} component(s) not attempted",
                items.len() - reports.len()
            );
            break;
        }

        reports.push(install_item(item, target_for, overwrite, confirm, cancel));
    }

    reports
}

fn is_cancelled(cancel: Option<&CancelFlag>) -> bool {
    cancel.map(|flag| flag.load(Ordering::SeqCst)).unwrap_or(false)
}

fn materialize_file(
    file: &ItemFile,
    target: &Path,
    overwrite: bool,
    confirm: Option<&OverwritePrompt>,
) -> Result<(InstallOutcome, Option<String>)> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let existing = match fs::read(target) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    match existing {
        None => {
            fs::write(target, &file.content)?;
            tracing::debug!("created {}", target.display());
            Ok((InstallOutcome::Created, None))
        }
        Some(bytes) if bytes == file.content.as_bytes() => {
            // Re-running with unchanged registry content must not touch disk
            Ok((InstallOutcome::Skipped, None))
        }
        Some(bytes) => {
            if overwrite {
                fs::write(target, &file.content)?;
                tracing::debug!("updated {}", target.display());
                return Ok((InstallOutcome::Updated, None));
            }

            let old = String::from_utf8_lossy(&bytes);
            let preview = diff::unified_diff(&old, &file.content, &file.relative_name);

            let accepted = match confirm {
                Some(callback) => callback(&file.relative_name, &preview),
                None => false,
            };

            if accepted {
                fs::write(target, &file.content)?;
                tracing::debug!("updated {} after confirmation", target.display());
                Ok((InstallOutcome::Updated, None))
            } else {
                Ok((
                    InstallOutcome::Skipped,
                    Some("existing file kept".to_string()),
                ))
            }
        }
    }
}
