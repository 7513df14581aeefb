use crate::cbom_analysis::domain::{repository_name_from_url, RunMetrics, ToolName};
use crate::ports::outbound::{CbomStore, ProgressReporter};
use crate::shared::error::CbomBenchError;
use crate::shared::Result;
use serde_json::Value;
use std::path::PathBuf;

/// RecordCbomUseCase - Adds tool output to the benchmark data set
pub struct RecordCbomUseCase<CS, PR> {
    cbom_store: CS,
    progress_reporter: PR,
}

impl<CS, PR> RecordCbomUseCase<CS, PR>
where
    CS: CbomStore,
    PR: ProgressReporter,
{
    pub fn new(cbom_store: CS, progress_reporter: PR) -> Self {
        Self {
            cbom_store,
            progress_reporter,
        }
    }

    /// Stores a CBOM and its run metrics
    ///
    /// # Arguments
    /// * `tool` - Tool that produced the CBOM
    /// * `repository_url` - Repository the CBOM was generated from
    /// * `content` - Raw CBOM JSON
    /// * `duration` - Wall-clock time of the tool run in seconds
    ///
    /// # Returns
    /// Path the CBOM was stored at
    ///
    /// # Errors
    /// Returns an error if the content is not JSON, the URL has no usable
    /// repository name, or the store fails
    pub fn record(
        &self,
        tool: &ToolName,
        repository_url: &str,
        content: &str,
        duration: Option<f64>,
    ) -> Result<PathBuf> {
        let cbom: Value = serde_json::from_str(content).map_err(|e| CbomBenchError::Validation {
            message: format!("CBOM is not valid JSON: {}", e),
        })?;
        if let Some(d) = duration {
            if !d.is_finite() || d < 0.0 {
                return Err(CbomBenchError::Validation {
                    message: format!("Duration must be a non-negative number of seconds, got {}", d),
                }
                .into());
            }
        }
        let repository = repository_name_from_url(repository_url)?;

        let path = self.cbom_store.store_cbom(tool, &repository, &cbom)?;
        self.cbom_store.record_run(
            &repository,
            tool,
            RunMetrics::new(duration, Some(repository_url.to_string())),
        )?;

        self.progress_reporter.report_completion(&format!(
            "✅ Recorded {} CBOM for {} at {}",
            tool.display_name(),
            repository,
            path.display()
        ));
        Ok(path)
    }

    /// Deletes the stored CBOMs of the given tools and the metrics file
    pub fn delete_all(&self, tools: &[ToolName]) -> Result<()> {
        self.cbom_store.delete_all(tools)?;
        self.progress_reporter
            .report_completion("✅ Deleted all stored CBOMs and metrics");
        Ok(())
    }
}
