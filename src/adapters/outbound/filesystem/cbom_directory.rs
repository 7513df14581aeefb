use crate::cbom_analysis::domain::ToolName;
use crate::ports::outbound::{CbomFile, CbomSource, MetricsReader};
use crate::shared::error::CbomBenchError;
use crate::shared::security::read_checked;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the run metrics document inside the metrics directory
pub const METRICS_FILE_NAME: &str = "durations.json";

/// CbomDirectoryReader adapter for the on-disk benchmark data
///
/// This adapter implements both CbomSource and MetricsReader ports over the
/// layout `<cbom_dir>/<tool>/<repo>.json` plus `<metrics_dir>/durations.json`.
pub struct CbomDirectoryReader {
    cbom_dir: PathBuf,
    metrics_path: PathBuf,
}

impl CbomDirectoryReader {
    pub fn new(cbom_dir: impl Into<PathBuf>, metrics_dir: impl AsRef<Path>) -> Self {
        Self {
            cbom_dir: cbom_dir.into(),
            metrics_path: metrics_dir.as_ref().join(METRICS_FILE_NAME),
        }
    }

    fn is_json_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl CbomSource for CbomDirectoryReader {
    fn list_cbom_files(&self, tool: &ToolName) -> Result<Option<Vec<CbomFile>>> {
        let tool_dir = self.cbom_dir.join(tool.as_str());
        if !tool_dir.is_dir() {
            tracing::debug!(path = %tool_dir.display(), "tool directory missing");
            return Ok(None);
        }

        let entries = fs::read_dir(&tool_dir).map_err(|e| CbomBenchError::FileReadError {
            path: tool_dir.clone(),
            details: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| CbomBenchError::FileReadError {
                    path: tool_dir.clone(),
                    details: e.to_string(),
                })?
                .path();
            if !Self::is_json_file(&path) || path.is_dir() {
                continue;
            }
            let Some(repository) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %path.display(), "skipping CBOM with a non UTF-8 name");
                continue;
            };
            files.push(CbomFile::new(repository, path.clone()));
        }
        files.sort_by(|a, b| a.repository.cmp(&b.repository));

        Ok(Some(files))
    }

    fn read_cbom(&self, file: &CbomFile) -> Result<String> {
        read_checked(&file.path, "CBOM")
    }
}

impl MetricsReader for CbomDirectoryReader {
    fn read_metrics(&self) -> Result<Option<String>> {
        if !self.metrics_path.exists() {
            return Ok(None);
        }
        read_checked(&self.metrics_path, METRICS_FILE_NAME).map(Some)
    }
}
