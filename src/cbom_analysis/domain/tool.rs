use crate::shared::Result;

/// Maximum length for tool names (used as directory names)
const MAX_TOOL_NAME_LENGTH: usize = 64;

/// Tools benchmarked by default, in report column order
pub const DEFAULT_TOOLS: [&str; 3] = ["cbomkit", "cdxgen", "deepseek"];

/// Layout of the JSON document a tool writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbomShape {
    /// A list of scan results, each carrying a `bom` object with `components`
    ScanResultList,
    /// A single CycloneDX object with a top-level `components` array
    FlatDocument,
}

impl CbomShape {
    /// Whether `cryptoProperties.assetType` takes precedence over `type`
    pub fn prefers_asset_type(self) -> bool {
        matches!(self, CbomShape::ScanResultList)
    }
}

/// NewType wrapper for a CBOM tool identifier
///
/// Names are normalized to lowercase. They double as directory names under the
/// CBOM data directory, so only a conservative character set is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolName(String);

impl ToolName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_lowercase();

        if name.is_empty() {
            anyhow::bail!("Tool name cannot be empty");
        }

        if name.len() > MAX_TOOL_NAME_LENGTH {
            anyhow::bail!(
                "Tool name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_TOOL_NAME_LENGTH
            );
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            anyhow::bail!(
                "Tool name '{}' contains invalid characters. Only ASCII letters, digits, hyphens and underscores are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    /// Parses the built-in tool list
    pub fn defaults() -> Vec<ToolName> {
        DEFAULT_TOOLS.iter().map(|t| ToolName(t.to_string())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shape of the documents this tool produces.
    ///
    /// cdxgen and the LLM-backed generator emit plain CycloneDX documents;
    /// CBOMkit and unrecognised tools are read as scan-result lists.
    pub fn shape(&self) -> CbomShape {
        match self.0.as_str() {
            "cdxgen" | "deepseek" => CbomShape::FlatDocument,
            _ => CbomShape::ScanResultList,
        }
    }

    /// Capitalized name for table headers ("cbomkit" -> "Cbomkit")
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ToolName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ToolName::new(s)
    }
}
