/// Formatter adapters for the comparison report: tables, CSV and charts
mod csv_codec;
mod grid_formatter;
mod markdown_formatter;
mod svg;
mod svg_chart_renderer;
mod tables;

pub use csv_codec::{CsvTableCodec, CSV_FILE_NAME};
pub use grid_formatter::GridTableFormatter;
pub use markdown_formatter::MarkdownReportFormatter;
pub use svg_chart_renderer::SvgChartRenderer;
