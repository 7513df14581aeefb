use super::file_writer::FileSystemWriter;
use crate::ports::outbound::{OutputPresenter, ReportRepository, SavedReport};
use crate::shared::error::CbomBenchError;
use crate::shared::security::read_checked;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// ReportDirectory adapter storing run directories below a reports root
///
/// Saved tables are recognized by their extension; they are looked up both
/// in run directories and, for reports written by older versions, directly
/// in the root.
pub struct ReportDirectory {
    root: PathBuf,
    table_extension: &'static str,
}

impl ReportDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            table_extension: "csv",
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_table(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(self.table_extension))
    }

    fn read_dir_sorted(path: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(path).map_err(|e| CbomBenchError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        let mut paths = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect::<Vec<_>>();
        paths.sort();
        Ok(paths)
    }

    /// Resolves a user supplied report path
    ///
    /// Paths are taken relative to the reports root first; a path that only
    /// exists relative to the working directory is accepted as is.
    fn resolve(&self, report: &str) -> Option<PathBuf> {
        let under_root = self.root.join(report);
        if under_root.is_file() {
            return Some(under_root);
        }
        let as_given = PathBuf::from(report);
        as_given.is_file().then_some(as_given)
    }
}

impl ReportRepository for ReportDirectory {
    fn create_run_directory(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        fs::create_dir_all(&path).map_err(|e| CbomBenchError::FileWriteError {
            path: path.clone(),
            details: e.to_string(),
        })?;
        Ok(path)
    }

    fn write_artifact(&self, directory: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = directory.join(file_name);
        FileSystemWriter::new(path.clone()).present(content)?;
        Ok(path)
    }

    fn list_reports(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            tracing::debug!(path = %self.root.display(), "reports directory does not exist");
            return Ok(Vec::new());
        }

        let mut reports = Vec::new();
        for entry in Self::read_dir_sorted(&self.root)? {
            let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if entry.is_dir() {
                for file in Self::read_dir_sorted(&entry)? {
                    if !self.is_table(&file) {
                        continue;
                    }
                    if let Some(file_name) = file.file_name().and_then(|n| n.to_str()) {
                        reports.push(format!("{}/{}", name, file_name));
                    }
                }
            } else if self.is_table(&entry) {
                reports.push(name.to_string());
            }
        }

        // Run directories are named by timestamp, so reverse order is newest first
        reports.sort_by(|a, b| b.cmp(a));
        Ok(reports)
    }

    fn read_report(&self, relative_path: &str) -> Result<SavedReport> {
        let path = self
            .resolve(relative_path)
            .ok_or_else(|| CbomBenchError::ReportNotFound {
                path: self.root.join(relative_path),
            })?;
        let content = read_checked(&path, "report")?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(SavedReport {
            path,
            directory,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ReportDirectory) {
        let temp_dir = TempDir::new().unwrap();
        let reports = ReportDirectory::new(temp_dir.path().join("Reports"));
        (temp_dir, reports)
    }

    #[test]
    fn test_list_reports_missing_root() {
        let (_temp_dir, reports) = setup();
        assert!(reports.list_reports().unwrap().is_empty());
    }

    #[test]
    fn test_list_reports_newest_first_with_legacy() {
        let (_temp_dir, reports) = setup();
        for run in ["2024-01-05-10-00", "2024-03-01-08-30"] {
            let dir = reports.create_run_directory(run).unwrap();
            reports
                .write_artifact(&dir, "cbom_comparison.csv", "Repository\n")
                .unwrap();
            reports.write_artifact(&dir, "summary.md", "# x").unwrap();
        }
        fs::write(reports.root().join("cbom_comparison_old.csv"), "Repository\n").unwrap();
        fs::write(reports.root().join("notes.txt"), "ignored").unwrap();

        let listed = reports.list_reports().unwrap();
        assert_eq!(
            listed,
            vec![
                "cbom_comparison_old.csv",
                "2024-03-01-08-30/cbom_comparison.csv",
                "2024-01-05-10-00/cbom_comparison.csv",
            ]
        );
    }

    #[test]
    fn test_read_report_returns_directory() {
        let (_temp_dir, reports) = setup();
        let dir = reports.create_run_directory("2024-03-01-08-30").unwrap();
        reports
            .write_artifact(&dir, "cbom_comparison.csv", "Repository,Tool\n")
            .unwrap();

        let saved = reports
            .read_report("2024-03-01-08-30/cbom_comparison.csv")
            .unwrap();
        assert_eq!(saved.directory, dir);
        assert_eq!(saved.content, "Repository,Tool\n");
    }

    #[test]
    fn test_read_report_accepts_path_outside_root() {
        let (temp_dir, reports) = setup();
        let outside = temp_dir.path().join("exported.csv");
        fs::write(&outside, "Repository\n").unwrap();

        let saved = reports.read_report(outside.to_str().unwrap()).unwrap();
        assert_eq!(saved.directory, temp_dir.path());
    }

    #[test]
    fn test_read_report_not_found() {
        let (_temp_dir, reports) = setup();
        let err = reports.read_report("2099-01-01-00-00/missing.csv").unwrap_err();
        assert!(err.to_string().contains("Report not found"));
    }
}
