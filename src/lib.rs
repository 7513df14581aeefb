//! cbom-bench - Benchmark comparison of CBOM generation tools
//!
//! This library reads the Cryptographic Bills of Materials (CBOMs) produced by
//! several tools for the same set of repositories, normalizes them, joins them
//! with run durations and repository sizes, and reports per-tool statistics as
//! tables, charts and a CSV export. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`cbom_analysis`): Normalization, aggregation and statistics
//! - **Application Layer** (`application`): Use cases, read models and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use cbom_bench::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let use_case: CompareToolsUseCase<_, _, GitHubSizeProvider, _> = CompareToolsUseCase::new(
//!     CbomDirectoryReader::new("CBOMdata", "CBOMdata/metrics"),
//!     CbomDirectoryReader::new("CBOMdata", "CBOMdata/metrics"),
//!     None,
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = AnalysisRequest::new(ToolName::defaults(), false, "Java");
//! let response = use_case.execute(request).await?;
//!
//! let tables = GridTableFormatter::new().format(&response.model)?;
//! println!("{}", tables);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cbom_analysis;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        CbomDirectoryReader, FileSystemCbomStore, FileSystemWriter, ReportDirectory,
        StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        CsvTableCodec, GridTableFormatter, MarkdownReportFormatter, SvgChartRenderer,
    };
    pub use crate::adapters::outbound::network::{CachingSizeProvider, GitHubSizeProvider};
    pub use crate::application::dto::{
        AnalysisRequest, ComparisonResponse, PublishRequest, PublishResponse, RunDirectory,
        TableStyle,
    };
    pub use crate::application::read_models::{ComparisonReadModel, ComparisonReadModelBuilder};
    pub use crate::application::use_cases::{
        CompareToolsUseCase, LoadReportUseCase, PublishReportUseCase, RecordCbomUseCase,
    };
    pub use crate::cbom_analysis::domain::{
        CbomAnalysis, ComparisonRecord, MetricsIndex, RepositorySize, RunMetrics, ToolName,
        ToolStatistics, TypeCounts,
    };
    pub use crate::cbom_analysis::services::{
        AnalysisSet, CbomNormalizer, ComparisonAggregator, StatisticsCalculator,
    };
    pub use crate::ports::outbound::{
        CbomFile, CbomSource, CbomStore, ChartArtifact, ChartRenderer, ComparisonTableCodec,
        MetricsReader, OutputPresenter, ProgressReporter, ReportFormatter, ReportRepository,
        RepositorySizeProvider, SavedReport,
    };
    pub use crate::shared::Result;
}
