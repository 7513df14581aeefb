use crate::cbom_analysis::domain::{
    CbomAnalysis, ComparisonRecord, MetricsIndex, RepositorySize, ToolName,
};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Repository sizes keyed by the source URL they were looked up with
pub type RepositorySizes = HashMap<String, RepositorySize>;

/// AnalysisSet aggregate: per-file analyses keyed by repository, then tool
#[derive(Debug, Clone, Default)]
pub struct AnalysisSet {
    analyses: BTreeMap<String, BTreeMap<ToolName, CbomAnalysis>>,
}

impl AnalysisSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the analysis of `tool` for `repository`, replacing any earlier one
    pub fn insert(&mut self, repository: impl Into<String>, tool: ToolName, analysis: CbomAnalysis) {
        self.analyses
            .entry(repository.into())
            .or_default()
            .insert(tool, analysis);
    }

    pub fn get(&self, repository: &str, tool: &ToolName) -> Option<&CbomAnalysis> {
        self.analyses.get(repository).and_then(|tools| tools.get(tool))
    }

    /// Number of (repository, tool) analyses held
    pub fn len(&self) -> usize {
        self.analyses.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn error_count(&self) -> usize {
        self.analyses
            .values()
            .flat_map(BTreeMap::values)
            .filter(|a| a.error().is_some())
            .count()
    }
}

/// ComparisonAggregator service joining analyses with timing and size data
///
/// Missing metrics or sizes never drop a row; they surface as absent values.
pub struct ComparisonAggregator;

impl ComparisonAggregator {
    /// Produces one record per (repository, tool) pair
    ///
    /// Repositories are emitted in sorted order. Within a repository, tools
    /// follow `tool_order`; tools not listed there come last in name order.
    pub fn join(
        analyses: AnalysisSet,
        tool_order: &[ToolName],
        metrics: &MetricsIndex,
        sizes: &RepositorySizes,
    ) -> Vec<ComparisonRecord> {
        let mut records = Vec::with_capacity(analyses.len());

        for (repository, mut by_tool) in analyses.analyses {
            let repo_url = metrics.source_url(&repository);
            let size = repo_url
                .and_then(|url| sizes.get(url))
                .copied()
                .unwrap_or_default();

            let mut ordered: Vec<(ToolName, CbomAnalysis)> = tool_order
                .iter()
                .filter_map(|tool| by_tool.remove_entry(tool))
                .collect();
            ordered.extend(by_tool);

            for (tool, analysis) in ordered {
                let run = metrics.get(&repository, tool.as_str());
                let source_url = run
                    .and_then(|m| m.url.clone())
                    .or_else(|| repo_url.map(str::to_string));
                let (_, component_types, error) = analysis.into_parts();

                records.push(
                    ComparisonRecord::new(repository.clone(), tool.as_str(), component_types)
                        .with_execution_time(run.and_then(|m| m.duration))
                        .with_sizes(size.total_kb, size.language_kb)
                        .with_source_url(source_url)
                        .with_error(error),
                );
            }
        }

        records
    }

    /// Distinct source URLs whose sizes must be looked up, in repository order
    pub fn size_lookups(metrics: &MetricsIndex) -> Vec<String> {
        let mut seen = HashSet::new();
        metrics
            .repositories()
            .filter_map(|repo| metrics.source_url(repo))
            .filter(|url| seen.insert(url.to_string()))
            .map(str::to_string)
            .collect()
    }
}
