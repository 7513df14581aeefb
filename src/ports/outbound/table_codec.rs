use crate::cbom_analysis::domain::ComparisonRecord;
use crate::shared::Result;

/// ComparisonTableCodec port for the flat tabular export
///
/// Encoding and decoding must agree so that a saved report can be reloaded
/// and re-rendered without the original CBOMs.
pub trait ComparisonTableCodec {
    /// File name used for the export inside a run directory
    fn file_name(&self) -> &'static str;

    /// Encodes records as a table, one row per (repository, tool)
    fn encode(&self, records: &[ComparisonRecord]) -> Result<String>;

    /// Decodes a table written by [`ComparisonTableCodec::encode`]
    fn decode(&self, content: &str) -> Result<Vec<ComparisonRecord>>;
}
