use crate::application::dto::{PublishRequest, PublishResponse, RunDirectory};
use crate::application::read_models::ComparisonReadModel;
use crate::ports::outbound::{
    ChartRenderer, ComparisonTableCodec, ProgressReporter, ReportFormatter, ReportRepository,
};
use crate::shared::Result;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::path::Path;

/// File name of the Markdown summary written into each run directory
pub const SUMMARY_FILE_NAME: &str = "summary.md";

/// PublishReportUseCase - Writes the artifacts of a comparison
///
/// Charts, a Markdown summary and (optionally) the CSV export go into a run
/// directory; the grid tables are returned for the console.
pub struct PublishReportUseCase<RR, CR, TC, PR> {
    report_repository: RR,
    chart_renderer: CR,
    table_codec: TC,
    console_formatter: Box<dyn ReportFormatter>,
    summary_formatter: Box<dyn ReportFormatter>,
    progress_reporter: PR,
}

impl<RR, CR, TC, PR> PublishReportUseCase<RR, CR, TC, PR>
where
    RR: ReportRepository,
    CR: ChartRenderer,
    TC: ComparisonTableCodec,
    PR: ProgressReporter,
{
    pub fn new(
        report_repository: RR,
        chart_renderer: CR,
        table_codec: TC,
        console_formatter: Box<dyn ReportFormatter>,
        summary_formatter: Box<dyn ReportFormatter>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            report_repository,
            chart_renderer,
            table_codec,
            console_formatter,
            summary_formatter,
            progress_reporter,
        }
    }

    /// Publishes the report artifacts for `model`
    ///
    /// # Errors
    /// Returns an error if the run directory cannot be created or an
    /// artifact cannot be rendered or written
    pub fn execute(
        &self,
        model: &ComparisonReadModel,
        request: PublishRequest,
    ) -> Result<PublishResponse> {
        let directory = match request.run_directory {
            RunDirectory::Timestamped => self
                .report_repository
                .create_run_directory(&run_directory_name(&Local::now()))?,
            RunDirectory::Existing(path) => path,
        };
        let mut artifacts = Vec::new();

        if request.write_table {
            let table = self.table_codec.encode(&model.records)?;
            artifacts.push(self.write(&directory, self.table_codec.file_name(), &table)?);
        }

        self.progress_reporter.report("📊 Rendering charts...");
        let charts = self.chart_renderer.render(model)?;
        if charts.is_empty() {
            self.progress_reporter
                .report_error("⚠️  Warning: No chart had data to plot");
        }
        for chart in &charts {
            artifacts.push(self.write(&directory, &chart.file_name, &chart.content)?);
        }

        let summary = self.summary_formatter.format(model)?;
        artifacts.push(self.write(&directory, SUMMARY_FILE_NAME, &summary)?);

        let tables = self.console_formatter.format(model)?;

        self.progress_reporter.report_completion(&format!(
            "✅ Wrote {} artifact(s) to {}",
            artifacts.len(),
            directory.display()
        ));

        Ok(PublishResponse {
            directory,
            artifacts,
            tables,
        })
    }

    fn write(&self, directory: &Path, file_name: &str, content: &str) -> Result<std::path::PathBuf> {
        let path = self
            .report_repository
            .write_artifact(directory, file_name, content)?;
        tracing::debug!(path = %path.display(), "wrote report artifact");
        Ok(path)
    }
}

/// Name of the run directory for a report created at `at` (`YYYY-MM-DD-HH-MM`)
pub fn run_directory_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%Y-%m-%d-%H-%M").to_string()
}
