use super::tables::{report_tables, Align, TableData};
use crate::application::read_models::ComparisonReadModel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// MarkdownReportFormatter adapter for the `summary.md` written with each report
///
/// Renders the same tables as the console output as GitHub-flavored Markdown,
/// followed by the files that could not be analyzed.
pub struct MarkdownReportFormatter;

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_header(&self, output: &mut String, model: &ComparisonReadModel) -> Result<()> {
        output.push_str("# CBOM Tool Comparison\n\n");
        let repositories = model.component_counts.rows.len();
        writeln!(
            output,
            "{} tool(s) compared across {} repositor{}.",
            model.tools.len(),
            repositories,
            if repositories == 1 { "y" } else { "ies" }
        )?;
        output.push('\n');
        Ok(())
    }

    fn render_table(&self, output: &mut String, table: &TableData) -> Result<()> {
        writeln!(output, "## {}", table.title)?;
        output.push('\n');

        let header: Vec<String> = table
            .headers
            .iter()
            .map(|h| Self::escape_markdown_table_cell(h))
            .collect();
        writeln!(output, "| {} |", header.join(" | "))?;

        let separator: Vec<&str> = table
            .alignments
            .iter()
            .map(|a| match a {
                Align::Left => ":---",
                Align::Right => "---:",
            })
            .collect();
        writeln!(output, "|{}|", separator.join("|"))?;

        for row in &table.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|c| Self::escape_markdown_table_cell(c))
                .collect();
            writeln!(output, "| {} |", cells.join(" | "))?;
        }
        output.push('\n');
        Ok(())
    }

    fn render_errors(&self, output: &mut String, model: &ComparisonReadModel) -> Result<()> {
        let failed: Vec<_> = model.records.iter().filter(|r| r.error.is_some()).collect();
        if failed.is_empty() {
            return Ok(());
        }

        output.push_str("## Analysis Errors\n\n");
        for record in failed {
            writeln!(
                output,
                "- `{}` / {}: {}",
                record.repository,
                record.tool,
                record.error.as_deref().unwrap_or_default()
            )?;
        }
        output.push('\n');
        Ok(())
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownReportFormatter {
    fn format(&self, model: &ComparisonReadModel) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, model)?;
        for table in report_tables(model) {
            self.render_table(&mut output, &table)?;
        }
        self.render_errors(&mut output, model)?;
        Ok(output)
    }
}
