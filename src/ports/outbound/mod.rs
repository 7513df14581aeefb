/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod cbom_source;
pub mod cbom_store;
pub mod chart_renderer;
pub mod metrics_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod report_repository;
pub mod repository_size_provider;
pub mod table_codec;

pub use cbom_source::{CbomFile, CbomSource};
pub use cbom_store::CbomStore;
pub use chart_renderer::{ChartArtifact, ChartRenderer};
pub use metrics_reader::MetricsReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use report_repository::{ReportRepository, SavedReport};
pub use repository_size_provider::RepositorySizeProvider;
pub use table_codec::ComparisonTableCodec;
