use crate::cbom_analysis::domain::ToolName;

/// AnalysisRequest - Internal request DTO for the tool comparison use case
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Tools to compare, in reporting order
    pub tools: Vec<ToolName>,
    /// Whether repository sizes are looked up from the code host
    pub fetch_sizes: bool,
    /// Language whose share of the repository size is tracked
    pub language: String,
}

impl AnalysisRequest {
    pub fn new(tools: Vec<ToolName>, fetch_sizes: bool, language: impl Into<String>) -> Self {
        Self {
            tools,
            fetch_sizes,
            language: language.into(),
        }
    }
}
