//! Table layouts shared by the grid and Markdown formatters
//!
//! Each function turns part of the read model into headers and text cells;
//! the formatters only decide how the cells are drawn.

use crate::application::read_models::{ComparisonReadModel, RepositoryDetailView};
use crate::cbom_analysis::domain::ToolName;

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A titled table of preformatted cells
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub title: String,
    pub headers: Vec<String>,
    pub alignments: Vec<Align>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Creates a table whose first column is left aligned and the rest right aligned
    fn new(title: impl Into<String>, headers: Vec<String>) -> Self {
        let alignments = (0..headers.len())
            .map(|i| if i == 0 { Align::Left } else { Align::Right })
            .collect();
        Self {
            title: title.into(),
            headers,
            alignments,
            rows: Vec::new(),
        }
    }
}

/// Display name for a tool column ("cbomkit" -> "Cbomkit")
pub fn tool_label(tool: &str) -> String {
    ToolName::new(tool)
        .map(|t| t.display_name())
        .unwrap_or_else(|_| tool.to_string())
}

/// Every table of the report, in print order
pub fn report_tables(model: &ComparisonReadModel) -> Vec<TableData> {
    let mut tables = vec![summary_table(model)];
    if !model.type_distribution.is_empty() {
        tables.push(type_distribution_table(model));
    }
    tables.push(repository_detail_table(model, &model.execution_times));
    tables.push(repository_detail_table(model, &model.component_counts));
    tables
}

pub fn summary_table(model: &ComparisonReadModel) -> TableData {
    let headers = [
        "Tool",
        "Repos",
        "Non-Empty",
        "Empty",
        "Empty %",
        "Total Comp.",
        "Avg/Repo",
        "Avg/Non-Empty",
        "Avg Time (s)",
        "Std Time (s)",
    ];
    let mut table = TableData::new(
        "CBOM Tool Comparison Summary",
        headers.iter().map(|h| h.to_string()).collect(),
    );

    for stats in &model.statistics {
        table.rows.push(vec![
            tool_label(&stats.tool),
            stats.total_repos.to_string(),
            stats.non_empty_cboms.to_string(),
            stats.empty_cboms.to_string(),
            format!("{:.1}%", stats.empty_percentage),
            stats.total_components.to_string(),
            format!("{:.1}", stats.avg_components),
            format!("{:.1}", stats.avg_components_non_empty),
            optional_seconds(stats.avg_execution_time),
            optional_seconds(stats.execution_time_std),
        ]);
    }
    table
}

pub fn type_distribution_table(model: &ComparisonReadModel) -> TableData {
    let mut headers = vec!["Component Type".to_string()];
    headers.extend(model.tools.iter().map(|t| tool_label(t)));
    let mut table = TableData::new("Component Type Distribution", headers);

    for row in &model.type_distribution {
        let mut cells = vec![row.component_type.clone()];
        cells.extend(row.counts.iter().map(usize::to_string));
        table.rows.push(cells);
    }
    table
}

pub fn repository_detail_table(model: &ComparisonReadModel, view: &RepositoryDetailView) -> TableData {
    let mut headers = vec![
        "Repository".to_string(),
        "Total Size".to_string(),
        format!("{} Size", model.language),
    ];
    headers.extend(model.tools.iter().map(|t| tool_label(t)));
    headers.push("Average".to_string());
    let mut table = TableData::new(view.title.clone(), headers);

    for row in &view.rows {
        let mut cells = vec![
            row.repository.clone(),
            row.repository_size
                .map_or_else(|| "N/A".to_string(), |kb| format!("{} KB", kb)),
            row.language_size
                .map_or_else(|| format!("No {}", model.language), |kb| format!("{} KB", kb)),
        ];
        cells.extend(row.values.iter().map(|v| view.format_value(*v)));
        cells.push(view.format_value(row.average));
        table.rows.push(cells);
    }

    let mut average_row = vec!["Average".to_string(), String::new(), String::new()];
    average_row.extend(view.column_averages.iter().map(|v| view.format_value(*v)));
    average_row.push(String::new());
    table.rows.push(average_row);

    table
}

fn optional_seconds(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}", v))
}
