/// One repository row of a per-repository detail table
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryRowView {
    pub repository: String,
    /// Total repository size in KB
    pub repository_size: Option<u64>,
    /// Size of the tracked language in KB
    pub language_size: Option<u64>,
    /// One value per tool; `None` when the tool has no value for this repository
    pub values: Vec<Option<f64>>,
    /// Mean of the present values
    pub average: Option<f64>,
}

/// Repository x tool pivot of one metric
///
/// Rows are sorted by repository name, columns follow the tool order of the
/// owning read model.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryDetailView {
    pub title: String,
    /// Decimal places used when the values are printed
    pub precision: usize,
    pub rows: Vec<RepositoryRowView>,
    /// Column means over the repositories that have a value
    pub column_averages: Vec<Option<f64>>,
}

impl RepositoryDetailView {
    /// Formats a metric value with this view's precision
    pub fn format_value(&self, value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{:.*}", self.precision, v),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_uses_precision() {
        let view = RepositoryDetailView {
            title: "Execution Time".to_string(),
            precision: 2,
            rows: vec![],
            column_averages: vec![],
        };
        assert_eq!(view.format_value(Some(1.5)), "1.50");
        assert_eq!(view.format_value(Some(12.0)), "12.00");
        assert_eq!(view.format_value(None), "N/A");

        let counts = RepositoryDetailView { precision: 0, ..view };
        assert_eq!(counts.format_value(Some(7.0)), "7");
    }
}
