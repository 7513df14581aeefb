use crate::shared::Result;
use std::path::{Path, PathBuf};

/// A previously saved tabular report
#[derive(Debug, Clone)]
pub struct SavedReport {
    pub path: PathBuf,
    /// Directory the report lives in; regenerated artifacts go here
    pub directory: PathBuf,
    pub content: String,
}

/// ReportRepository port for storing report artifacts
///
/// Each analysis run writes into its own timestamped directory below the
/// reports root.
pub trait ReportRepository {
    /// Creates (or reuses) the run directory `name` below the reports root
    fn create_run_directory(&self, name: &str) -> Result<PathBuf>;

    /// Writes one artifact into a run directory
    ///
    /// # Returns
    /// Path of the written file
    fn write_artifact(&self, directory: &Path, file_name: &str, content: &str) -> Result<PathBuf>;

    /// Lists saved tabular reports relative to the reports root, newest first
    fn list_reports(&self) -> Result<Vec<String>>;

    /// Reads a saved report given its path relative to the reports root
    ///
    /// # Errors
    /// Returns an error if the report does not exist or cannot be read
    fn read_report(&self, relative_path: &str) -> Result<SavedReport>;
}
