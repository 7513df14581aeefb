use std::path::PathBuf;

/// Where report artifacts are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunDirectory {
    /// A new `YYYY-MM-DD-HH-MM` directory below the reports root
    Timestamped,
    /// An existing directory, used when a saved report is regenerated
    Existing(PathBuf),
}

/// PublishRequest - Options for writing report artifacts
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub run_directory: RunDirectory,
    /// Whether the CSV export is written alongside charts and summary
    pub write_table: bool,
}

impl PublishRequest {
    pub fn new(run_directory: RunDirectory, write_table: bool) -> Self {
        Self {
            run_directory,
            write_table,
        }
    }
}

/// PublishResponse - What the publish use case produced
#[derive(Debug, Clone)]
pub struct PublishResponse {
    /// Run directory the artifacts were written to
    pub directory: PathBuf,
    /// Paths of all written artifacts, in write order
    pub artifacts: Vec<PathBuf>,
    /// Console rendering of the comparison tables
    pub tables: String,
}
