//! Configuration file support for cbombench.
//!
//! Provides YAML-based configuration through `cbombench.config.yml` files,
//! and the merge of command-line overrides, file values and defaults into
//! the settings a command runs with.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::adapters::outbound::network::DEFAULT_GITHUB_API_URL;
use crate::cbom_analysis::domain::ToolName;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "cbombench.config.yml";

const DEFAULT_CBOM_DIR: &str = "CBOMdata";
const DEFAULT_REPORTS_DIR: &str = "Reports";
const DEFAULT_SIZE_LANGUAGE: &str = "Java";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub cbom_dir: Option<PathBuf>,
    pub metrics_dir: Option<PathBuf>,
    pub reports_dir: Option<PathBuf>,
    pub tools: Option<Vec<String>>,
    pub size_language: Option<String>,
    pub fetch_repository_sizes: Option<bool>,
    pub github_api_url: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref tools) = config.tools {
        for (i, tool) in tools.iter().enumerate() {
            if tool.trim().is_empty() {
                bail!(
                    "Invalid config: tools[{}] must not be empty.\n\n\
                     💡 Hint: Each entry of 'tools' names a subdirectory of the CBOM directory (e.g., \"cbomkit\").",
                    i
                );
            }
        }
    }
    if let Some(ref language) = config.size_language {
        if language.trim().is_empty() {
            bail!(
                "Invalid config: size_language must not be empty.\n\n\
                 💡 Hint: Use a GitHub language name such as \"Java\"."
            );
        }
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line; `None` or empty means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cbom_dir: Option<PathBuf>,
    pub metrics_dir: Option<PathBuf>,
    pub reports_dir: Option<PathBuf>,
    pub tools: Vec<String>,
    pub no_sizes: bool,
}

/// Effective settings after merging CLI > config file > defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub cbom_dir: PathBuf,
    pub metrics_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub tools: Vec<ToolName>,
    pub size_language: String,
    pub fetch_repository_sizes: bool,
    pub github_api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        let cbom_dir = PathBuf::from(DEFAULT_CBOM_DIR);
        Self {
            metrics_dir: cbom_dir.join("metrics"),
            cbom_dir,
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            tools: ToolName::defaults(),
            size_language: DEFAULT_SIZE_LANGUAGE.to_string(),
            fetch_repository_sizes: true,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
        }
    }
}

impl Settings {
    /// Merges the layers; the metrics directory follows the CBOM directory
    /// unless it is set explicitly
    pub fn merge(config: Option<ConfigFile>, overrides: Overrides) -> Result<Self> {
        let defaults = Settings::default();
        let config = config.unwrap_or_default();

        let cbom_dir = overrides
            .cbom_dir
            .or(config.cbom_dir)
            .unwrap_or(defaults.cbom_dir);
        let metrics_dir = overrides
            .metrics_dir
            .or(config.metrics_dir)
            .unwrap_or_else(|| cbom_dir.join("metrics"));

        let tool_names = if !overrides.tools.is_empty() {
            Some(overrides.tools)
        } else {
            config.tools
        };
        let tools = match tool_names {
            Some(names) => parse_tools(&names)?,
            None => defaults.tools,
        };

        Ok(Self {
            cbom_dir,
            metrics_dir,
            reports_dir: overrides
                .reports_dir
                .or(config.reports_dir)
                .unwrap_or(defaults.reports_dir),
            tools,
            size_language: config.size_language.unwrap_or(defaults.size_language),
            fetch_repository_sizes: !overrides.no_sizes
                && config
                    .fetch_repository_sizes
                    .unwrap_or(defaults.fetch_repository_sizes),
            github_api_url: config.github_api_url.unwrap_or(defaults.github_api_url),
        })
    }
}

/// Parses tool names, dropping duplicates while keeping the first position
fn parse_tools(names: &[String]) -> Result<Vec<ToolName>> {
    let mut tools: Vec<ToolName> = Vec::with_capacity(names.len());
    for name in names {
        let tool = ToolName::new(name.as_str())?;
        if !tools.contains(&tool) {
            tools.push(tool);
        }
    }
    if tools.is_empty() {
        bail!("At least one tool must be given.\n\n💡 Hint: Use --tools cbomkit,cdxgen");
    }
    Ok(tools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tool_names(settings: &Settings) -> Vec<&str> {
        settings.tools.iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
cbom_dir: data/cboms
reports_dir: out
tools:
  - cbomkit
  - cdxgen
size_language: Python
fetch_repository_sizes: false
github_api_url: http://localhost:8080
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.cbom_dir, Some(PathBuf::from("data/cboms")));
        assert!(config.metrics_dir.is_none());
        assert_eq!(config.reports_dir, Some(PathBuf::from("out")));
        assert_eq!(
            config.tools.as_deref(),
            Some(&["cbomkit".to_string(), "cdxgen".to_string()][..])
        );
        assert_eq!(config.size_language.as_deref(), Some("Python"));
        assert_eq!(config.fetch_repository_sizes, Some(false));
        assert_eq!(
            config.github_api_url.as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "size_language: Go\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.size_language.as_deref(), Some("Go"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_tool_name_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "tools:\n  - cbomkit\n  - \"  \"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("tools[1] must not be empty"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "tools: [cbomkit]\nformat: pdf\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 1);
        assert!(config.unknown_fields.contains_key("format"));
    }

    #[test]
    fn test_merge_defaults() {
        let settings = Settings::merge(None, Overrides::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cbom_dir, PathBuf::from("CBOMdata"));
        assert_eq!(settings.metrics_dir, PathBuf::from("CBOMdata/metrics"));
        assert_eq!(settings.reports_dir, PathBuf::from("Reports"));
        assert_eq!(tool_names(&settings), vec!["cbomkit", "cdxgen", "deepseek"]);
        assert_eq!(settings.size_language, "Java");
        assert!(settings.fetch_repository_sizes);
        assert_eq!(settings.github_api_url, "https://api.github.com");
    }

    #[test]
    fn test_merge_cli_overrides_config() {
        let config = ConfigFile {
            cbom_dir: Some(PathBuf::from("from-config")),
            reports_dir: Some(PathBuf::from("config-reports")),
            tools: Some(vec!["cdxgen".to_string()]),
            fetch_repository_sizes: Some(true),
            ..Default::default()
        };
        let overrides = Overrides {
            cbom_dir: Some(PathBuf::from("from-cli")),
            tools: vec!["Deepseek".to_string(), "cbomkit".to_string(), "deepseek".to_string()],
            no_sizes: true,
            ..Default::default()
        };

        let settings = Settings::merge(Some(config), overrides).unwrap();
        assert_eq!(settings.cbom_dir, PathBuf::from("from-cli"));
        assert_eq!(settings.metrics_dir, PathBuf::from("from-cli/metrics"));
        assert_eq!(settings.reports_dir, PathBuf::from("config-reports"));
        assert_eq!(tool_names(&settings), vec!["deepseek", "cbomkit"]);
        assert!(!settings.fetch_repository_sizes);
    }

    #[test]
    fn test_merge_config_over_defaults() {
        let config = ConfigFile {
            metrics_dir: Some(PathBuf::from("timings")),
            size_language: Some("Kotlin".to_string()),
            fetch_repository_sizes: Some(false),
            ..Default::default()
        };

        let settings = Settings::merge(Some(config), Overrides::default()).unwrap();
        assert_eq!(settings.cbom_dir, PathBuf::from("CBOMdata"));
        assert_eq!(settings.metrics_dir, PathBuf::from("timings"));
        assert_eq!(settings.size_language, "Kotlin");
        assert!(!settings.fetch_repository_sizes);
    }

    #[test]
    fn test_merge_rejects_invalid_tool() {
        let overrides = Overrides {
            tools: vec!["../etc".to_string()],
            ..Default::default()
        };
        assert!(Settings::merge(None, overrides).is_err());
    }
}
