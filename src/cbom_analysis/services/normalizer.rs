use crate::cbom_analysis::domain::{CbomAnalysis, CbomShape, ToolName, TypeCounts};
use crate::shared::Result;
use serde_json::Value;

/// Type recorded for components without a readable type field
pub const UNKNOWN_TYPE: &str = "unknown";

/// CbomNormalizer service for reducing tool-specific CBOM layouts to a type tally
///
/// This service contains pure business logic. It never fails: anything it
/// cannot interpret becomes an analysis carrying an error marker, so one bad
/// file cannot abort a benchmark run.
pub struct CbomNormalizer;

impl CbomNormalizer {
    /// Analyzes raw CBOM text produced by `tool`
    pub fn analyze_str(raw: &str, tool: &ToolName) -> CbomAnalysis {
        match serde_json::from_str::<Value>(raw) {
            Ok(payload) => Self::analyze(&payload, tool),
            Err(e) => CbomAnalysis::failed(format!("Invalid JSON: {}", e)),
        }
    }

    /// Analyzes an already parsed CBOM payload produced by `tool`
    pub fn analyze(payload: &Value, tool: &ToolName) -> CbomAnalysis {
        let shape = tool.shape();
        match Self::extract_components(payload, shape) {
            Ok(components) => CbomAnalysis::from_type_counts(Self::tally(components, shape)),
            Err(e) => CbomAnalysis::failed(e.to_string()),
        }
    }

    /// Locates the component array for the given document shape
    ///
    /// Documents that do not match the expected shape at all yield no
    /// components. A `components` field of the wrong JSON type is an error.
    pub fn extract_components(payload: &Value, shape: CbomShape) -> Result<&[Value]> {
        match (shape, payload) {
            (CbomShape::ScanResultList, Value::Array(results)) => {
                match results.first().and_then(|first| first.get("bom")) {
                    Some(bom @ Value::Object(_)) => Self::components_of(bom),
                    _ => Ok(&[]),
                }
            }
            // Some CBOMkit versions hand back the bare BOM instead of a result list.
            // Its components are counted here rather than treating the file as empty.
            (_, Value::Object(_)) => Self::components_of(payload),
            _ => Ok(&[]),
        }
    }

    fn components_of(document: &Value) -> Result<&[Value]> {
        match document.get("components") {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(components)) => Ok(components),
            Some(other) => anyhow::bail!(
                "`components` must be an array, found {}",
                Self::json_kind(other)
            ),
        }
    }

    /// Counts components by type; every component contributes exactly one
    fn tally(components: &[Value], shape: CbomShape) -> TypeCounts {
        let mut counts = TypeCounts::new();
        for component in components {
            let component_type = Self::component_type(component, shape);
            *counts.entry(component_type.to_string()).or_default() += 1;
        }
        counts
    }

    fn component_type(component: &Value, shape: CbomShape) -> &str {
        let asset_type = if shape.prefers_asset_type() {
            component
                .get("cryptoProperties")
                .and_then(|props| props.get("assetType"))
                .and_then(Value::as_str)
        } else {
            None
        };

        asset_type
            .or_else(|| component.get("type").and_then(Value::as_str))
            .unwrap_or(UNKNOWN_TYPE)
    }

    fn json_kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}
