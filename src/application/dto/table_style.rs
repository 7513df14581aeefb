/// Table dialect used when rendering the comparison tables
///
/// Consoles get box-drawn grids; the summary file written next to the charts
/// uses Markdown so it renders on code hosting sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII grid tables for terminal output (default)
    Grid,
    /// GitHub-flavored Markdown tables
    Markdown,
}

impl std::fmt::Display for TableStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableStyle::Grid => write!(f, "grid"),
            TableStyle::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_style_display() {
        assert_eq!(TableStyle::Grid.to_string(), "grid");
        assert_eq!(TableStyle::Markdown.to_string(), "markdown");
    }
}
