use crate::cbom_analysis::domain::ToolName;
use crate::shared::Result;
use std::path::PathBuf;

/// A CBOM file produced by one tool for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CbomFile {
    /// Repository key, taken from the file stem
    pub repository: String,
    pub path: PathBuf,
}

impl CbomFile {
    pub fn new(repository: impl Into<String>, path: PathBuf) -> Self {
        Self {
            repository: repository.into(),
            path,
        }
    }
}

/// CbomSource port for enumerating and reading stored CBOMs
///
/// This port abstracts the directory tree `<cbom_dir>/<tool>/<repo>.json`.
pub trait CbomSource {
    /// Lists the CBOM files a tool produced, sorted by repository
    ///
    /// # Returns
    /// `None` when the tool has no data directory at all
    fn list_cbom_files(&self, tool: &ToolName) -> Result<Option<Vec<CbomFile>>>;

    /// Reads the raw content of one CBOM file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails the safety checks
    fn read_cbom(&self, file: &CbomFile) -> Result<String>;
}
