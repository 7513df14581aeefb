use super::tables::{report_tables, Align, TableData};
use crate::application::read_models::ComparisonReadModel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// GridTableFormatter adapter rendering the comparison as ASCII grid tables
///
/// The layout matches the common "grid" table style: `+---+` borders, a `=`
/// rule under the header and one space of padding in every cell.
pub struct GridTableFormatter;

impl GridTableFormatter {
    pub fn new() -> Self {
        Self
    }

    fn column_widths(table: &TableData) -> Vec<usize> {
        table
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn rule(output: &mut String, widths: &[usize], fill: char) {
        output.push('+');
        for width in widths {
            output.push_str(&fill.to_string().repeat(width + 2));
            output.push('+');
        }
        output.push('\n');
    }

    fn row(output: &mut String, cells: &[String], widths: &[usize], alignments: &[Align]) -> Result<()> {
        output.push('|');
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            match alignments.get(i).copied().unwrap_or(Align::Left) {
                Align::Left => write!(output, " {:<width$} |", cell, width = width)?,
                Align::Right => write!(output, " {:>width$} |", cell, width = width)?,
            }
        }
        output.push('\n');
        Ok(())
    }

    fn render_table(output: &mut String, table: &TableData) -> Result<()> {
        let widths = Self::column_widths(table);

        writeln!(output, "=== {} ===", table.title)?;
        output.push('\n');
        Self::rule(output, &widths, '-');
        Self::row(output, &table.headers, &widths, &table.alignments)?;
        Self::rule(output, &widths, '=');
        for row in &table.rows {
            Self::row(output, row, &widths, &table.alignments)?;
            Self::rule(output, &widths, '-');
        }
        Ok(())
    }
}

impl Default for GridTableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for GridTableFormatter {
    fn format(&self, model: &ComparisonReadModel) -> Result<String> {
        let mut output = String::new();
        for table in report_tables(model) {
            output.push('\n');
            Self::render_table(&mut output, &table)?;
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::ComparisonReadModelBuilder;
    use crate::cbom_analysis::domain::{ComparisonRecord, ToolName, TypeCounts};

    #[test]
    fn test_render_table_layout() {
        let table = TableData {
            title: "Demo".to_string(),
            headers: vec!["Name".to_string(), "Count".to_string()],
            alignments: vec![Align::Left, Align::Right],
            rows: vec![
                vec!["alpha".to_string(), "7".to_string()],
                vec!["b".to_string(), "1234567".to_string()],
            ],
        };
        let mut output = String::new();
        GridTableFormatter::render_table(&mut output, &table).unwrap();

        let expected = "\
=== Demo ===

+-------+---------+
| Name  |   Count |
+=======+=========+
| alpha |       7 |
+-------+---------+
| b     | 1234567 |
+-------+---------+
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_format_contains_all_sections() {
        let types: TypeCounts = [("algorithm".to_string(), 2)].into();
        let records = vec![ComparisonRecord::new("alpha", "cbomkit", types)];
        let model = ComparisonReadModelBuilder::build(records, &ToolName::defaults(), "Java");

        let output = GridTableFormatter::new().format(&model).unwrap();
        assert!(output.contains("=== CBOM Tool Comparison Summary ==="));
        assert!(output.contains("=== Component Type Distribution ==="));
        assert!(output.contains("=== Execution Time per Repository (seconds) ==="));
        assert!(output.contains("=== Components per Repository ==="));
        assert!(output.contains("| Cbomkit |"));
    }
}
