use crate::cbom_analysis::domain::{ComparisonRecord, ToolName, ToolStatistics, TypeCounts};

/// StatisticsCalculator service computing per-tool summaries
///
/// Works on the flat comparison records so that a reloaded report produces
/// exactly the same numbers as the run that wrote it.
pub struct StatisticsCalculator;

impl StatisticsCalculator {
    /// Calculates statistics for every tool that has at least one record
    ///
    /// Tools follow `tool_order`; tools only present in the records are
    /// appended in name order.
    pub fn calculate(records: &[ComparisonRecord], tool_order: &[ToolName]) -> Vec<ToolStatistics> {
        Self::tools_present(records, tool_order)
            .into_iter()
            .filter_map(|tool| Self::calculate_for_tool(records, &tool))
            .collect()
    }

    /// Statistics for a single tool, or `None` when it has no records
    pub fn calculate_for_tool(records: &[ComparisonRecord], tool: &str) -> Option<ToolStatistics> {
        let tool_records: Vec<&ComparisonRecord> =
            records.iter().filter(|r| r.tool == tool).collect();
        if tool_records.is_empty() {
            return None;
        }

        let total_repos = tool_records.len();
        let empty_cboms = tool_records.iter().filter(|r| r.is_empty).count();
        let non_empty: Vec<f64> = tool_records
            .iter()
            .filter(|r| !r.is_empty)
            .map(|r| r.total_components as f64)
            .collect();
        let all_counts: Vec<f64> = tool_records
            .iter()
            .map(|r| r.total_components as f64)
            .collect();
        let times: Vec<f64> = tool_records
            .iter()
            .filter_map(|r| r.execution_time)
            .filter(|t| t.is_finite())
            .collect();

        let mut component_types = TypeCounts::new();
        for record in &tool_records {
            for (component_type, count) in &record.component_types {
                *component_types.entry(component_type.clone()).or_default() += count;
            }
        }

        Some(ToolStatistics {
            tool: tool.to_string(),
            total_repos,
            empty_cboms,
            non_empty_cboms: non_empty.len(),
            empty_percentage: empty_cboms as f64 / total_repos as f64 * 100.0,
            avg_components: mean(&all_counts).unwrap_or(0.0),
            avg_components_non_empty: mean(&non_empty).unwrap_or(0.0),
            total_components: tool_records.iter().map(|r| r.total_components).sum(),
            avg_execution_time: mean(&times),
            execution_time_std: sample_std_dev(&times),
            component_types,
        })
    }

    /// Tool names in reporting order
    pub fn tools_present(records: &[ComparisonRecord], tool_order: &[ToolName]) -> Vec<String> {
        let mut tools: Vec<String> = tool_order
            .iter()
            .map(|t| t.as_str())
            .filter(|t| records.iter().any(|r| r.tool == *t))
            .map(str::to_string)
            .collect();

        let mut extra: Vec<String> = records
            .iter()
            .map(|r| r.tool.clone())
            .filter(|t| !tools.contains(t))
            .collect();
        extra.sort();
        extra.dedup();
        tools.extend(extra);
        tools
    }
}

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); `None` below two values
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
