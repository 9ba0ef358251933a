//! Scaffolding reports and progress reporting.

use std::path::Path;
use std::time::Duration;

use crate::fetch::FetchOutcome;

/// Statistics of a scaffolding run.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    /// How the archive was obtained. `None` when only extraction ran.
    pub fetch: Option<FetchOutcome>,

    /// Number of files written (rewritten ones included).
    pub files_extracted: usize,

    /// Number of files whose content went through the interceptor.
    pub files_rewritten: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Entries that were not materialized (symlinks).
    pub entries_skipped: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction.
    pub duration: Duration,

    /// Warnings generated during extraction.
    pub warnings: Vec<String>,
}

impl ScaffoldReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns total number of entries materialized.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Callback trait for progress reporting during extraction.
///
/// # Examples
///
/// ```
/// use starter_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("{current}/{total}: {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called before an entry is processed.
    ///
    /// # Arguments
    ///
    /// * `path` - Entry name with the root prefix stripped
    /// * `total` - Total number of records in the archive
    /// * `current` - Current record number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after an entry's bytes reached the disk.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been completely processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when extraction finished successfully.
    fn on_complete(&mut self);
}

/// Progress sink that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = ScaffoldReport::new();
        assert_eq!(report.files_extracted, 0);
        assert_eq!(report.files_rewritten, 0);
        assert!(report.fetch.is_none());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_add_warning() {
        let mut report = ScaffoldReport::new();
        report.add_warning("symlink skipped".to_string());
        assert!(report.has_warnings());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_total_items() {
        let mut report = ScaffoldReport::new();
        report.files_extracted = 10;
        report.directories_created = 5;
        report.entries_skipped = 2;
        assert_eq!(report.total_items(), 15);
    }
}
