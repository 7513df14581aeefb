use crate::application::read_models::{ComparisonReadModel, ComparisonReadModelBuilder};
use crate::cbom_analysis::domain::ToolName;
use crate::ports::outbound::{ComparisonTableCodec, ProgressReporter, ReportRepository};
use crate::shared::error::CbomBenchError;
use crate::shared::Result;
use std::path::PathBuf;

/// LoadReportUseCase - Lists and reloads saved comparison tables
///
/// A reloaded table is turned back into a read model so the charts and
/// tables can be regenerated without the original CBOMs.
pub struct LoadReportUseCase<RR, TC, PR> {
    report_repository: RR,
    table_codec: TC,
    progress_reporter: PR,
}

impl<RR, TC, PR> LoadReportUseCase<RR, TC, PR>
where
    RR: ReportRepository,
    TC: ComparisonTableCodec,
    PR: ProgressReporter,
{
    pub fn new(report_repository: RR, table_codec: TC, progress_reporter: PR) -> Self {
        Self {
            report_repository,
            table_codec,
            progress_reporter,
        }
    }

    /// Saved reports, newest first
    pub fn list(&self) -> Result<Vec<String>> {
        self.report_repository.list_reports()
    }

    /// Loads a saved report
    ///
    /// # Returns
    /// The rebuilt read model and the directory the report lives in
    ///
    /// # Errors
    /// Returns an error if the report cannot be read or decoded
    pub fn load(
        &self,
        report: &str,
        tool_order: &[ToolName],
        language: &str,
    ) -> Result<(ComparisonReadModel, PathBuf)> {
        let saved = self.report_repository.read_report(report)?;
        self.progress_reporter
            .report(&format!("📖 Loading data from {}...", saved.path.display()));

        let records = self.table_codec.decode(&saved.content).map_err(|e| {
            CbomBenchError::ReportParseError {
                path: saved.path.clone(),
                details: format!("{:#}", e),
            }
        })?;
        self.progress_reporter
            .report(&format!("✅ Loaded {} record(s)", records.len()));

        let model = ComparisonReadModelBuilder::build(records, tool_order, language);
        Ok((model, saved.directory))
    }
}
