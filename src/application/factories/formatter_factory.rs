use crate::adapters::outbound::formatters::{GridTableFormatter, MarkdownReportFormatter};
use crate::application::dto::TableStyle;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating comparison table formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified table style
    ///
    /// # Examples
    /// ```
    /// use cbom_bench::application::dto::TableStyle;
    /// use cbom_bench::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(TableStyle::Grid);
    /// ```
    pub fn create(style: TableStyle) -> Box<dyn ReportFormatter> {
        match style {
            TableStyle::Grid => Box::new(GridTableFormatter::new()),
            TableStyle::Markdown => Box::new(MarkdownReportFormatter::new()),
        }
    }
}
