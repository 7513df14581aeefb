use crate::cbom_analysis::domain::{ComparisonRecord, ToolName, TypeCounts};
use crate::ports::outbound::ComparisonTableCodec;
use crate::shared::Result;
use csv::{ReaderBuilder, StringRecord, Writer};
use std::collections::BTreeSet;

/// File name of the CSV export inside a run directory
pub const CSV_FILE_NAME: &str = "cbom_comparison.csv";

/// Prefix of the per-type count columns
const TYPE_COLUMN_PREFIX: &str = "Type_";

/// Header written for the tracked language size; older reports used `Java_Size`
const LANGUAGE_SIZE_COLUMN: &str = "Language_Size";
const LEGACY_LANGUAGE_SIZE_COLUMN: &str = "Java_Size";

const FIXED_COLUMNS: [&str; 9] = [
    "Repository",
    "Tool",
    "Total_Components",
    "Is_Empty",
    "Execution_Time",
    "Repository_Size",
    LANGUAGE_SIZE_COLUMN,
    "Source_Url",
    "Error",
];

/// CsvTableCodec adapter for the flat comparison export
///
/// One row per (repository, tool); component types are spread over one
/// `Type_<name>` column per type seen in any record.
pub struct CsvTableCodec;

impl CsvTableCodec {
    pub fn new() -> Self {
        Self
    }

    fn optional<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    /// Parses a count that may have been written as a float (e.g., `512.0`)
    fn parse_count(raw: &str) -> Option<u64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<u64>().ok().or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v as u64)
        })
    }

    fn parse_float(raw: &str) -> Option<f64> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn parse_bool(raw: &str) -> Option<bool> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn non_empty(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl Default for CsvTableCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Column positions of a decoded table
struct Columns {
    repository: usize,
    tool: usize,
    total_components: Option<usize>,
    is_empty: Option<usize>,
    execution_time: Option<usize>,
    repository_size: Option<usize>,
    language_size: Option<usize>,
    source_url: Option<usize>,
    error: Option<usize>,
    types: Vec<(usize, String)>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| anyhow::anyhow!("missing required column '{}'", name))
        };

        Ok(Self {
            repository: required("Repository")?,
            tool: required("Tool")?,
            total_components: position("Total_Components"),
            is_empty: position("Is_Empty"),
            execution_time: position("Execution_Time"),
            repository_size: position("Repository_Size"),
            language_size: position(LANGUAGE_SIZE_COLUMN)
                .or_else(|| position(LEGACY_LANGUAGE_SIZE_COLUMN)),
            source_url: position("Source_Url"),
            error: position("Error"),
            types: headers
                .iter()
                .enumerate()
                .filter_map(|(i, h)| {
                    h.trim()
                        .strip_prefix(TYPE_COLUMN_PREFIX)
                        .filter(|name| !name.is_empty())
                        .map(|name| (i, name.to_string()))
                })
                .collect(),
        })
    }
}

impl ComparisonTableCodec for CsvTableCodec {
    fn file_name(&self) -> &'static str {
        CSV_FILE_NAME
    }

    fn encode(&self, records: &[ComparisonRecord]) -> Result<String> {
        let types: BTreeSet<&String> = records
            .iter()
            .flat_map(|r| r.component_types.keys())
            .collect();

        let mut writer = Writer::from_writer(Vec::new());
        let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
        header.extend(types.iter().map(|t| format!("{}{}", TYPE_COLUMN_PREFIX, t)));
        writer.write_record(&header)?;

        for record in records {
            let mut row = vec![
                record.repository.clone(),
                record.tool.clone(),
                record.total_components.to_string(),
                if record.is_empty { "True" } else { "False" }.to_string(),
                Self::optional(record.execution_time),
                Self::optional(record.repository_size),
                Self::optional(record.language_size),
                record.source_url.clone().unwrap_or_default(),
                record.error.clone().unwrap_or_default(),
            ];
            row.extend(
                types
                    .iter()
                    .map(|t| record.component_types.get(*t).copied().unwrap_or(0).to_string()),
            );
            writer.write_record(&row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }

    fn decode(&self, content: &str) -> Result<Vec<ComparisonRecord>> {
        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(content.as_bytes());
        let columns = Columns::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row.map_err(|e| anyhow::anyhow!("row {}: {}", line + 1, e))?;
            let field = |index: Option<usize>| index.and_then(|i| row.get(i)).unwrap_or("");

            let component_types: TypeCounts = columns
                .types
                .iter()
                .filter_map(|(i, name)| {
                    let count = Self::parse_count(row.get(*i).unwrap_or(""))?;
                    (count > 0).then(|| (name.clone(), count as usize))
                })
                .collect();

            let repository = field(Some(columns.repository)).trim();
            let tool = field(Some(columns.tool)).trim();
            if repository.is_empty() || tool.is_empty() {
                anyhow::bail!("row {}: repository and tool must not be empty", line + 1);
            }
            // Tool names end up in chart file names
            let tool =
                ToolName::new(tool).map_err(|e| anyhow::anyhow!("row {}: {}", line + 1, e))?;

            let mut record = ComparisonRecord::new(repository, tool.as_str(), component_types)
            .with_execution_time(Self::parse_float(field(columns.execution_time)))
            .with_sizes(
                Self::parse_count(field(columns.repository_size)),
                Self::parse_count(field(columns.language_size)),
            )
            .with_source_url(Self::non_empty(field(columns.source_url)))
            .with_error(Self::non_empty(field(columns.error)));

            // The stored totals win over the type columns, which may be absent
            if let Some(total) = Self::parse_count(field(columns.total_components)) {
                record.total_components = total as usize;
                record.is_empty = total == 0;
            }
            if let Some(is_empty) = Self::parse_bool(field(columns.is_empty)) {
                if is_empty != record.is_empty {
                    anyhow::bail!(
                        "row {}: Is_Empty is {} but Total_Components is {}",
                        line + 1,
                        is_empty,
                        record.total_components
                    );
                }
            }

            records.push(record);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<ComparisonRecord> {
        let alpha_types: TypeCounts =
            [("algorithm".to_string(), 3), ("certificate".to_string(), 1)].into();
        let beta_types: TypeCounts = [("library".to_string(), 2)].into();
        vec![
            ComparisonRecord::new("alpha", "cbomkit", alpha_types)
                .with_execution_time(Some(41.25))
                .with_sizes(Some(5120), Some(800))
                .with_source_url(Some("https://github.com/acme/alpha".to_string())),
            ComparisonRecord::new("beta", "cdxgen", beta_types),
            ComparisonRecord::new("gamma", "deepseek", TypeCounts::new())
                .with_error(Some("Invalid JSON: EOF, \"quoted\"".to_string())),
        ]
    }

    #[test]
    fn test_encode_header_and_rows() {
        let csv = CsvTableCodec::new().encode(&sample_records()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Repository,Tool,Total_Components,Is_Empty,Execution_Time,Repository_Size,Language_Size,Source_Url,Error,Type_algorithm,Type_certificate,Type_library"
        );
        assert_eq!(
            lines.next().unwrap(),
            "alpha,cbomkit,4,False,41.25,5120,800,https://github.com/acme/alpha,,3,1,0"
        );
        assert_eq!(lines.next().unwrap(), "beta,cdxgen,2,False,,,,,,0,0,2");
    }

    #[test]
    fn test_decode_restores_encoded_records() {
        let codec = CsvTableCodec::new();
        let records = sample_records();
        let decoded = codec.decode(&codec.encode(&records).unwrap()).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_decode_legacy_report() {
        let legacy = "\
Repository,Tool,Total_Components,Is_Empty,Execution_Time,Repository_Size,Java_Size,Error,Type_algorithm,Type_key
petclinic,cbomkit,5,False,12.5,2048.0,1024.0,,3.0,2.0
petclinic,cdxgen,0,True,,2048.0,1024.0,,,
";
        let records = CsvTableCodec::new().decode(legacy).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].language_size, Some(1024));
        assert_eq!(records[0].repository_size, Some(2048));
        assert_eq!(records[0].component_types["algorithm"], 3);
        assert_eq!(records[0].component_types["key"], 2);
        assert_eq!(records[0].execution_time, Some(12.5));
        assert!(records[1].is_empty);
        assert!(records[1].component_types.is_empty());
        assert_eq!(records[1].source_url, None);
    }

    #[test]
    fn test_decode_requires_repository_and_tool() {
        let err = CsvTableCodec::new()
            .decode("Tool,Total_Components\ncdxgen,1\n")
            .unwrap_err();
        assert!(err.to_string().contains("missing required column 'Repository'"));
    }

    #[test]
    fn test_decode_rejects_ragged_rows() {
        let result = CsvTableCodec::new().decode("Repository,Tool\nalpha,cdxgen,extra\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_emptiness_that_contradicts_total() {
        let err = CsvTableCodec::new()
            .decode("Repository,Tool,Total_Components,Is_Empty\nalpha,cdxgen,5,True\n")
            .unwrap_err();
        assert!(err.to_string().contains("row 1: Is_Empty is true but Total_Components is 5"));
    }

    #[test]
    fn test_decode_derives_emptiness_from_total() {
        let records = CsvTableCodec::new()
            .decode("Repository,Tool,Total_Components\nalpha,cdxgen,0\nbeta,cdxgen,3\n")
            .unwrap();
        assert!(records[0].is_empty);
        assert!(!records[1].is_empty);
    }

    #[test]
    fn test_decode_rejects_invalid_tool_names() {
        let err = CsvTableCodec::new()
            .decode("Repository,Tool,Total_Components\nalpha,cdxgen,1\nbeta,../../pwned,1\n")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("row 2:"), "{}", message);
        assert!(message.contains("invalid characters"));
    }

    #[test]
    fn test_decode_normalizes_tool_case() {
        let records = CsvTableCodec::new()
            .decode("Repository,Tool,Total_Components\nalpha,CBOMkit,1\n")
            .unwrap();
        assert_eq!(records[0].tool, "cbomkit");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(CsvTableCodec::new().file_name(), "cbom_comparison.csv");
    }
}
