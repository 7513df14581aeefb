pub mod analysis;
pub mod comparison_record;
pub mod metrics;
pub mod repository;
pub mod tool;
pub mod tool_statistics;

pub use analysis::{CbomAnalysis, TypeCounts};
pub use comparison_record::ComparisonRecord;
pub use metrics::{MetricsIndex, RunMetrics};
pub use repository::{repository_name_from_url, GitHubRepository, RepositorySize};
pub use tool::{CbomShape, ToolName, DEFAULT_TOOLS};
pub use tool_statistics::ToolStatistics;
