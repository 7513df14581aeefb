use super::cbom_directory::METRICS_FILE_NAME;
use super::file_writer::FileSystemWriter;
use crate::cbom_analysis::domain::{MetricsIndex, RunMetrics, ToolName};
use crate::ports::outbound::{CbomStore, OutputPresenter};
use crate::shared::error::CbomBenchError;
use crate::shared::security::read_checked;
use crate::shared::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemCbomStore adapter writing the layout read by `CbomDirectoryReader`
pub struct FileSystemCbomStore {
    cbom_dir: PathBuf,
    metrics_dir: PathBuf,
}

impl FileSystemCbomStore {
    pub fn new(cbom_dir: impl Into<PathBuf>, metrics_dir: impl Into<PathBuf>) -> Self {
        Self {
            cbom_dir: cbom_dir.into(),
            metrics_dir: metrics_dir.into(),
        }
    }

    fn metrics_path(&self) -> PathBuf {
        self.metrics_dir.join(METRICS_FILE_NAME)
    }

    fn create_dir(path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| {
            CbomBenchError::FileWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Loads the current metrics; a missing file is an empty index
    fn load_metrics(&self) -> Result<MetricsIndex> {
        let path = self.metrics_path();
        if !path.exists() {
            return Ok(MetricsIndex::new());
        }
        let content = read_checked(&path, METRICS_FILE_NAME)?;
        MetricsIndex::from_json_str(&content).map_err(|e| {
            CbomBenchError::FileReadError {
                path,
                details: format!("existing metrics are not valid: {}", e),
            }
            .into()
        })
    }

    /// Removes the `*.json` files directly inside a tool directory
    fn remove_cboms(tool_dir: &Path) -> Result<usize> {
        let entries = fs::read_dir(tool_dir).map_err(|e| Self::write_error(tool_dir, e))?;
        let mut removed = 0;
        for entry in entries {
            let path = entry.map_err(|e| Self::write_error(tool_dir, e))?.path();
            let is_cbom = path.extension().is_some_and(|ext| ext == "json");
            if is_cbom && path.is_file() {
                Self::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn remove_file(path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| Self::write_error(path, e))
    }

    fn write_error(path: &Path, e: std::io::Error) -> anyhow::Error {
        CbomBenchError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    }
}

impl CbomStore for FileSystemCbomStore {
    fn store_cbom(&self, tool: &ToolName, repository: &str, cbom: &Value) -> Result<PathBuf> {
        let tool_dir = self.cbom_dir.join(tool.as_str());
        Self::create_dir(&tool_dir)?;

        let path = tool_dir.join(format!("{}.json", repository));
        let content = serde_json::to_string_pretty(cbom)?;
        FileSystemWriter::new(path.clone()).present(&content)?;
        Ok(path)
    }

    fn record_run(&self, repository: &str, tool: &ToolName, metrics: RunMetrics) -> Result<()> {
        let mut index = self.load_metrics()?;
        index.upsert(repository, tool.as_str(), metrics);

        Self::create_dir(&self.metrics_dir)?;
        FileSystemWriter::new(self.metrics_path()).present(&index.to_json_string()?)
    }

    fn delete_all(&self, tools: &[ToolName]) -> Result<()> {
        let metrics_path = self.metrics_path();
        if metrics_path.is_file() {
            Self::remove_file(&metrics_path)?;
        }

        let mut removed = 0;
        for tool in tools {
            let tool_dir = self.cbom_dir.join(tool.as_str());
            if !tool_dir.is_dir() || tool_dir.is_symlink() {
                continue;
            }
            removed += Self::remove_cboms(&tool_dir)?;

            let is_empty = fs::read_dir(&tool_dir)
                .map_err(|e| Self::write_error(&tool_dir, e))?
                .next()
                .is_none();
            if is_empty {
                fs::remove_dir(&tool_dir).map_err(|e| Self::write_error(&tool_dir, e))?;
            }
        }

        tracing::info!(path = %self.cbom_dir.display(), removed, "deleted benchmark data");
        Ok(())
    }
}
