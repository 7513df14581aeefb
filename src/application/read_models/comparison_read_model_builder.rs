//! Builder for constructing ComparisonReadModel from comparison records
//!
//! Both a fresh analysis and a reloaded report go through this builder, so
//! the tables and charts they produce are identical for identical records.

use super::comparison_read_model::{ComparisonReadModel, TypeDistributionRow};
use super::repository_detail_view::{RepositoryDetailView, RepositoryRowView};
use crate::cbom_analysis::domain::{ComparisonRecord, ToolName, ToolStatistics};
use crate::cbom_analysis::services::{mean, StatisticsCalculator};
use std::collections::{BTreeMap, BTreeSet};

/// Builder for constructing ComparisonReadModel from flat records
pub struct ComparisonReadModelBuilder;

impl ComparisonReadModelBuilder {
    /// Builds the read model
    ///
    /// # Arguments
    /// * `records` - Joined (repository, tool) records
    /// * `tool_order` - Configured tool order; other tools are appended by name
    /// * `language` - Display name of the tracked language
    pub fn build(
        records: Vec<ComparisonRecord>,
        tool_order: &[ToolName],
        language: &str,
    ) -> ComparisonReadModel {
        let tools = StatisticsCalculator::tools_present(&records, tool_order);
        let statistics = StatisticsCalculator::calculate(&records, tool_order);
        let type_distribution = Self::build_type_distribution(&statistics);
        let execution_times = Self::build_detail_view(
            &records,
            &tools,
            "Execution Time per Repository (seconds)",
            2,
            |r| r.execution_time.filter(|t| t.is_finite()),
        );
        let component_counts = Self::build_detail_view(
            &records,
            &tools,
            "Components per Repository",
            0,
            |r| Some(r.total_components as f64),
        );

        ComparisonReadModel {
            records,
            statistics,
            tools,
            language: language.to_string(),
            type_distribution,
            execution_times,
            component_counts,
        }
    }

    /// One row per component type seen by any tool, in name order
    fn build_type_distribution(statistics: &[ToolStatistics]) -> Vec<TypeDistributionRow> {
        let types: BTreeSet<&String> = statistics
            .iter()
            .flat_map(|s| s.component_types.keys())
            .collect();

        types
            .into_iter()
            .map(|component_type| TypeDistributionRow {
                component_type: component_type.clone(),
                counts: statistics
                    .iter()
                    .map(|s| s.component_types.get(component_type).copied().unwrap_or(0))
                    .collect(),
            })
            .collect()
    }

    /// Pivots one metric into a repository x tool table
    fn build_detail_view(
        records: &[ComparisonRecord],
        tools: &[String],
        title: &str,
        precision: usize,
        metric: impl Fn(&ComparisonRecord) -> Option<f64>,
    ) -> RepositoryDetailView {
        let mut by_repository: BTreeMap<&str, Vec<&ComparisonRecord>> = BTreeMap::new();
        for record in records {
            by_repository
                .entry(record.repository.as_str())
                .or_default()
                .push(record);
        }

        let rows: Vec<RepositoryRowView> = by_repository
            .into_iter()
            .map(|(repository, repo_records)| {
                let values: Vec<Option<f64>> = tools
                    .iter()
                    .map(|tool| {
                        repo_records
                            .iter()
                            .find(|r| &r.tool == tool)
                            .and_then(|r| metric(r))
                    })
                    .collect();
                let present: Vec<f64> = values.iter().flatten().copied().collect();
                // Sizes are per repository; every record of a repo carries the same ones
                let first = repo_records[0];

                RepositoryRowView {
                    repository: repository.to_string(),
                    repository_size: first.repository_size,
                    language_size: first.language_size,
                    values,
                    average: mean(&present),
                }
            })
            .collect();

        let column_averages = (0..tools.len())
            .map(|column| {
                let present: Vec<f64> = rows.iter().filter_map(|row| row.values[column]).collect();
                mean(&present)
            })
            .collect();

        RepositoryDetailView {
            title: title.to_string(),
            precision,
            rows,
            column_averages,
        }
    }
}
