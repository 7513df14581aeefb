use crate::application::read_models::ComparisonReadModel;
use crate::shared::Result;

/// ReportFormatter port for rendering the comparison tables
///
/// Implementations decide the table dialect (terminal grid, Markdown, ...).
pub trait ReportFormatter {
    /// Renders summary, type distribution and per-repository tables
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn format(&self, model: &ComparisonReadModel) -> Result<String>;
}
