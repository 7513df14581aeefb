//! Comparison read model for query operations
//!
//! This module provides the main read model struct that aggregates
//! all comparison data in a presentation-ready format.

use super::repository_detail_view::RepositoryDetailView;
use crate::cbom_analysis::domain::{ComparisonRecord, ToolStatistics};

/// Main read model for a tool comparison
///
/// Holds the flat records (for export), per-tool statistics (for the summary)
/// and the pivoted views consumed by tables and charts. Tool-indexed vectors
/// are aligned with `tools`.
#[derive(Debug, Clone)]
pub struct ComparisonReadModel {
    /// Flat (repository, tool) records
    pub records: Vec<ComparisonRecord>,
    /// Statistics in reporting order
    pub statistics: Vec<ToolStatistics>,
    /// Tool names in reporting order
    pub tools: Vec<String>,
    /// Language whose share of the repository size is tracked (e.g., "Java")
    pub language: String,
    /// Component type counts, one row per type in name order
    pub type_distribution: Vec<TypeDistributionRow>,
    /// Execution time per repository and tool, in seconds
    pub execution_times: RepositoryDetailView,
    /// Component count per repository and tool
    pub component_counts: RepositoryDetailView,
}

/// Component count of one type across all tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDistributionRow {
    pub component_type: String,
    /// One count per tool, aligned with [`ComparisonReadModel::tools`]
    pub counts: Vec<usize>,
}

impl ComparisonReadModel {
    /// Returns true when there is nothing to report
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Statistics for a tool, if it is part of the comparison
    pub fn statistics_for(&self, tool: &str) -> Option<&ToolStatistics> {
        self.statistics.iter().find(|s| s.tool == tool)
    }

    /// (language size, execution time) points for one tool, or all tools
    pub fn size_time_points(&self, tool: Option<&str>) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter(|r| tool.is_none_or(|t| r.tool == t))
            .filter_map(|r| Some((r.language_size? as f64, r.execution_time?)))
            .filter(|(_, time)| time.is_finite())
            .collect()
    }

    /// Execution times of one tool, skipping runs without timing
    pub fn execution_times_of(&self, tool: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.tool == tool)
            .filter_map(|r| r.execution_time)
            .filter(|t| t.is_finite())
            .collect()
    }
}
