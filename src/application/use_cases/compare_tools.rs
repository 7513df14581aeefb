use crate::application::dto::{AnalysisRequest, ComparisonResponse};
use crate::application::read_models::ComparisonReadModelBuilder;
use crate::cbom_analysis::domain::{CbomAnalysis, MetricsIndex, ToolName};
use crate::cbom_analysis::services::{
    AnalysisSet, CbomNormalizer, ComparisonAggregator, RepositorySizes,
};
use crate::ports::outbound::{CbomSource, MetricsReader, ProgressReporter, RepositorySizeProvider};
use crate::shared::Result;
use futures::stream::{self, StreamExt};

/// Maximum number of size lookups in flight at once
const MAX_CONCURRENT_SIZE_LOOKUPS: usize = 4;

/// CompareToolsUseCase - Core use case for benchmarking CBOM tools
///
/// Reads every stored CBOM, normalizes it, joins the results with recorded
/// run metrics and repository sizes, and builds the comparison read model.
///
/// # Type Parameters
/// * `CS` - CbomSource implementation
/// * `MR` - MetricsReader implementation
/// * `SP` - RepositorySizeProvider implementation (optional)
/// * `PR` - ProgressReporter implementation
pub struct CompareToolsUseCase<CS, MR, SP, PR> {
    cbom_source: CS,
    metrics_reader: MR,
    size_provider: Option<SP>,
    progress_reporter: PR,
}

impl<CS, MR, SP, PR> CompareToolsUseCase<CS, MR, SP, PR>
where
    CS: CbomSource,
    MR: MetricsReader,
    SP: RepositorySizeProvider,
    PR: ProgressReporter,
{
    /// Creates a new CompareToolsUseCase with injected dependencies
    pub fn new(
        cbom_source: CS,
        metrics_reader: MR,
        size_provider: Option<SP>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            cbom_source,
            metrics_reader,
            size_provider,
            progress_reporter,
        }
    }

    /// Executes the comparison
    ///
    /// Per-file failures never abort the run; they become error records.
    ///
    /// # Errors
    /// Returns an error only if a tool directory cannot be listed
    pub async fn execute(&self, request: AnalysisRequest) -> Result<ComparisonResponse> {
        // Step 1: Normalize every CBOM
        let (analyses, files_analyzed) = self.analyze_tools(&request.tools)?;
        let failed_files = analyses.error_count();

        // Step 2: Load run metrics
        let metrics = self.load_metrics();

        // Step 3: Look up repository sizes if requested
        let sizes = if request.fetch_sizes {
            self.fetch_sizes(&metrics).await
        } else {
            RepositorySizes::new()
        };

        // Step 4: Join and summarize
        let records = ComparisonAggregator::join(analyses, &request.tools, &metrics, &sizes);
        let model = ComparisonReadModelBuilder::build(records, &request.tools, &request.language);

        Ok(ComparisonResponse::new(model, files_analyzed, failed_files))
    }

    /// Normalizes the CBOMs of all tools
    ///
    /// # Returns
    /// Tuple of (analyses, number of files read)
    fn analyze_tools(&self, tools: &[ToolName]) -> Result<(AnalysisSet, usize)> {
        let mut analyses = AnalysisSet::new();
        let mut files_analyzed = 0;

        for tool in tools {
            let Some(files) = self.cbom_source.list_cbom_files(tool)? else {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: No CBOM directory found for tool '{}'",
                    tool
                ));
                continue;
            };

            self.progress_reporter.report(&format!(
                "🔍 Analyzing {} CBOM(s) from {}...",
                files.len(),
                tool
            ));

            for (index, file) in files.iter().enumerate() {
                let analysis = match self.cbom_source.read_cbom(file) {
                    Ok(raw) => CbomNormalizer::analyze_str(&raw, tool),
                    Err(e) => CbomAnalysis::failed(format!("{:#}", e)),
                };

                if let Some(error) = analysis.error() {
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Failed to analyze {}: {}",
                        file.path.display(),
                        error
                    ));
                } else {
                    tracing::debug!(
                        tool = %tool,
                        repository = %file.repository,
                        components = analysis.total_components(),
                        "analyzed CBOM"
                    );
                }

                analyses.insert(file.repository.clone(), tool.clone(), analysis);
                files_analyzed += 1;
                self.progress_reporter
                    .report_progress(index + 1, files.len(), Some(tool.as_str()));
            }
        }

        Ok((analyses, files_analyzed))
    }

    /// Loads recorded durations and URLs; problems degrade to empty metrics
    fn load_metrics(&self) -> MetricsIndex {
        let raw = match self.metrics_reader.read_metrics() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.progress_reporter
                    .report_error("⚠️  Warning: Metrics file not found; execution times will be missing");
                return MetricsIndex::new();
            }
            Err(e) => {
                self.progress_reporter
                    .report_error(&format!("⚠️  Warning: Failed to read metrics file: {:#}", e));
                return MetricsIndex::new();
            }
        };

        MetricsIndex::from_json_str(&raw).unwrap_or_else(|e| {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: Failed to parse metrics file: {:#}", e));
            MetricsIndex::new()
        })
    }

    /// Looks up the size of every distinct repository URL
    ///
    /// Failed lookups are reported and leave the size absent.
    async fn fetch_sizes(&self, metrics: &MetricsIndex) -> RepositorySizes {
        let Some(provider) = &self.size_provider else {
            return RepositorySizes::new();
        };

        let urls = ComparisonAggregator::size_lookups(metrics);
        if urls.is_empty() {
            return RepositorySizes::new();
        }

        self.progress_reporter.report(&format!(
            "📏 Fetching sizes for {} repositor{}...",
            urls.len(),
            if urls.len() == 1 { "y" } else { "ies" }
        ));

        let total = urls.len();
        let mut lookups = stream::iter(urls)
            .map(|url| async move {
                let result = provider.fetch_size(&url).await;
                (url, result)
            })
            .buffer_unordered(MAX_CONCURRENT_SIZE_LOOKUPS);

        let mut sizes = RepositorySizes::new();
        let mut completed = 0;
        while let Some((url, result)) = lookups.next().await {
            completed += 1;
            match result {
                Ok(size) => {
                    sizes.insert(url, size);
                }
                Err(e) => self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Could not fetch size for {}: {:#}",
                    url, e
                )),
            }
            self.progress_reporter.report_progress(completed, total, None);
        }

        sizes
    }
}
