use crate::cbom_analysis::domain::{RunMetrics, ToolName};
use crate::shared::Result;
use serde_json::Value;
use std::path::PathBuf;

/// CbomStore port for persisting benchmark output
///
/// Writes are the mirror image of [`super::CbomSource`] and
/// [`super::MetricsReader`]: whatever is stored here is picked up by the
/// next analysis.
pub trait CbomStore {
    /// Stores the CBOM a tool produced for a repository
    ///
    /// # Returns
    /// The path the CBOM was written to
    fn store_cbom(&self, tool: &ToolName, repository: &str, cbom: &Value) -> Result<PathBuf>;

    /// Records timing and origin of a tool run, replacing any earlier entry
    fn record_run(&self, repository: &str, tool: &ToolName, metrics: RunMetrics) -> Result<()>;

    /// Deletes the stored CBOMs of the given tools and the metrics file
    ///
    /// Only `<tool>/*.json` files are removed; anything else under the
    /// CBOM directory is left alone.
    fn delete_all(&self, tools: &[ToolName]) -> Result<()>;
}
