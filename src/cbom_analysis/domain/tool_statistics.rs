use super::analysis::TypeCounts;

/// Summary statistics for one tool across all benchmarked repositories
#[derive(Debug, Clone, PartialEq)]
pub struct ToolStatistics {
    pub tool: String,
    pub total_repos: usize,
    pub empty_cboms: usize,
    pub non_empty_cboms: usize,
    /// Share of empty CBOMs in percent (0-100)
    pub empty_percentage: f64,
    pub avg_components: f64,
    /// Mean component count over non-empty CBOMs; 0 when every CBOM is empty
    pub avg_components_non_empty: f64,
    pub total_components: usize,
    /// Mean execution time in seconds over the runs that recorded one
    pub avg_execution_time: Option<f64>,
    /// Sample standard deviation of the execution time (needs two values)
    pub execution_time_std: Option<f64>,
    pub component_types: TypeCounts,
}
