use super::analysis::TypeCounts;

/// ComparisonRecord: one flat row per (repository, tool) pair
///
/// This is the joined view that statistics, tables, charts and the CSV export
/// all consume. It is also what a saved report is reloaded into.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRecord {
    pub repository: String,
    pub tool: String,
    pub total_components: usize,
    pub is_empty: bool,
    /// Execution time in seconds
    pub execution_time: Option<f64>,
    /// Total repository size in KB
    pub repository_size: Option<u64>,
    /// Size of the tracked language in KB
    pub language_size: Option<u64>,
    pub source_url: Option<String>,
    pub error: Option<String>,
    pub component_types: TypeCounts,
}

impl ComparisonRecord {
    /// Creates a record with no timing, size or error information
    pub fn new(
        repository: impl Into<String>,
        tool: impl Into<String>,
        component_types: TypeCounts,
    ) -> Self {
        let total_components = component_types.values().sum();
        Self {
            repository: repository.into(),
            tool: tool.into(),
            total_components,
            is_empty: total_components == 0,
            execution_time: None,
            repository_size: None,
            language_size: None,
            source_url: None,
            error: None,
            component_types,
        }
    }

    pub fn with_execution_time(mut self, execution_time: Option<f64>) -> Self {
        self.execution_time = execution_time;
        self
    }

    pub fn with_sizes(mut self, repository_size: Option<u64>, language_size: Option<u64>) -> Self {
        self.repository_size = repository_size;
        self.language_size = language_size;
        self
    }

    pub fn with_source_url(mut self, source_url: Option<String>) -> Self {
        self.source_url = source_url;
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}
