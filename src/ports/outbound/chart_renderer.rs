use crate::application::read_models::ComparisonReadModel;
use crate::shared::Result;

/// A rendered chart ready to be written next to the report
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub file_name: String,
    pub content: String,
}

impl ChartArtifact {
    pub fn new(file_name: impl Into<String>, content: String) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }
}

/// ChartRenderer port for producing chart files from a comparison
pub trait ChartRenderer {
    /// Renders every chart the data supports; charts without data are omitted
    fn render(&self, model: &ComparisonReadModel) -> Result<Vec<ChartArtifact>>;
}
