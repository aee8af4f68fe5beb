//! Per-file install outcomes and their roll-up into a summary
//!
//! The installer records what happened to every file it touched; nothing
//! in here prints or performs I/O. Commands render these structs.

use std::path::PathBuf;

/// What happened to a single target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// No prior file existed; content was written
    Created,
    /// A different file existed and was overwritten
    Updated,
    /// File already had identical content, or the overwrite was declined
    Skipped,
    /// An I/O error prevented the write
    Failed,
}

impl InstallOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallOutcome::Created => "created",
            InstallOutcome::Updated => "updated",
            InstallOutcome::Skipped => "skipped",
            InstallOutcome::Failed => "failed",
        }
    }
}

impl std::fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome for one file of one component
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Relative name as published in the catalog
    pub name: String,
    /// Where the file was (or would have been) written
    pub path: PathBuf,
    pub outcome: InstallOutcome,
    /// Failure detail, or the reason a file was skipped
    pub note: Option<String>,
}

/// Outcome for one component, file by file
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub name: String,
    pub files: Vec<FileReport>,
}

impl ItemReport {
    pub fn created(&self) -> bool {
        self.has(InstallOutcome::Created)
    }

    pub fn updated(&self) -> bool {
        self.has(InstallOutcome::Updated)
    }

    pub fn skipped(&self) -> bool {
        self.has(InstallOutcome::Skipped)
    }

    pub fn failed(&self) -> bool {
        self.has(InstallOutcome::Failed)
    }

    fn has(&self, outcome: InstallOutcome) -> bool {
        self.files.iter().any(|f| f.outcome == outcome)
    }
}

/// File-level counts across a whole install run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.failed
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} skipped, {} failed",
            self.created, self.updated, self.skipped, self.failed
        )
    }
}

/// Count file outcomes across all components
///
/// Pure function: callers decide what the counts mean (the CLI treats any
/// failure as a non-zero exit).
pub fn aggregate(reports: &[ItemReport]) -> Summary {
    let mut summary = Summary::default();

    for report in reports {
        for file in &report.files {
            match file.outcome {
                InstallOutcome::Created => summary.created += 1,
                InstallOutcome::Updated => summary.updated += 1,
                InstallOutcome::Skipped => summary.skipped += 1,
                InstallOutcome::Failed => summary.failed += 1,
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, outcome: InstallOutcome) -> FileReport {
        FileReport {
            name: name.to_string(),
            path: PathBuf::from("src/components").join(name),
            outcome,
            note: None,
        }
    }

    #[test]
    fn test_aggregate_counts_files_not_items() {
        let reports = vec![
            ItemReport {
                name: "kpi-card".to_string(),
                files: vec![
                    file("kpi-card.tsx", InstallOutcome::Created),
                    file("kpi-card.css", InstallOutcome::Created),
                ],
            },
            ItemReport {
                name: "bar-chart".to_string(),
                files: vec![
                    file("bar-chart.tsx", InstallOutcome::Skipped),
                    file("bar-chart.css", InstallOutcome::Failed),
                ],
            },
        ];

        let summary = aggregate(&reports);
        assert_eq!(summary.created, 2);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = aggregate(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_item_report_any_semantics() {
        let report = ItemReport {
            name: "data-table".to_string(),
            files: vec![
                file("data-table.tsx", InstallOutcome::Created),
                file("columns.tsx", InstallOutcome::Skipped),
            ],
        };

        assert!(report.created());
        assert!(report.skipped());
        assert!(!report.updated());
        assert!(!report.failed());
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            created: 3,
            updated: 1,
            skipped: 2,
            failed: 0,
        };
        assert_eq!(summary.to_string(), "3 created, 1 updated, 2 skipped, 0 failed");
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(InstallOutcome::Created.to_string(), "created");
        assert_eq!(InstallOutcome::Failed.as_str(), "failed");
    }
}
