use crate::application::read_models::ComparisonReadModel;

/// ComparisonResponse - Result of the tool comparison use case
#[derive(Debug, Clone)]
pub struct ComparisonResponse {
    /// Everything the report artifacts are rendered from
    pub model: ComparisonReadModel,
    /// Number of CBOM files read across all tools
    pub files_analyzed: usize,
    /// Number of files that produced an error record
    pub failed_files: usize,
}

impl ComparisonResponse {
    pub fn new(model: ComparisonReadModel, files_analyzed: usize, failed_files: usize) -> Self {
        Self {
            model,
            files_analyzed,
            failed_files,
        }
    }

    /// Returns true when no CBOM produced a record
    pub fn has_no_data(&self) -> bool {
        self.model.is_empty()
    }
}
