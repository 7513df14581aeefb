/// Mock implementations for testing
mod mock_cbom_source;
mod mock_metrics_reader;
mod mock_progress_reporter;
mod mock_size_provider;

pub use mock_cbom_source::MockCbomSource;
pub use mock_metrics_reader::MockMetricsReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_size_provider::MockSizeProvider;
