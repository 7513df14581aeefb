use crate::shared::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// RunMetrics value object: timing and origin of one tool run on one repository
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunMetrics {
    /// Wall-clock duration of the CBOM generation in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Repository URL the CBOM was generated from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RunMetrics {
    pub fn new(duration: Option<f64>, url: Option<String>) -> Self {
        Self { duration, url }
    }

    /// Reads a tool entry, ignoring fields of the wrong JSON type
    fn from_entry(entry: &Map<String, Value>) -> Self {
        Self {
            duration: entry.get("duration").and_then(Value::as_f64),
            url: entry
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

/// MetricsIndex aggregate: the contents of `durations.json`
///
/// Layout on disk is `{ "<repo>": { "<tool>": { "duration": 12.3, "url": "..." } } }`.
/// Entries that are not objects are skipped so that one hand-edited line does
/// not discard the whole file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricsIndex {
    entries: BTreeMap<String, BTreeMap<String, RunMetrics>>,
}

impl MetricsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the metrics document
    ///
    /// # Errors
    /// Returns an error if the content is not JSON or its root is not an object
    pub fn from_json_str(content: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(content)?;
        let Value::Object(repos) = root else {
            anyhow::bail!("metrics root must be a JSON object keyed by repository name");
        };

        let mut index = Self::new();
        for (repo, tools) in repos {
            let Value::Object(tools) = tools else {
                tracing::debug!(repository = %repo, "skipping non-object metrics entry");
                continue;
            };
            for (tool, entry) in tools {
                if let Value::Object(entry) = entry {
                    index.upsert(&repo, &tool, RunMetrics::from_entry(&entry));
                }
            }
        }
        Ok(index)
    }

    /// Serializes the index back to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn upsert(&mut self, repository: &str, tool: &str, metrics: RunMetrics) {
        self.entries
            .entry(repository.to_string())
            .or_default()
            .insert(tool.to_string(), metrics);
    }

    pub fn get(&self, repository: &str, tool: &str) -> Option<&RunMetrics> {
        self.entries.get(repository).and_then(|tools| tools.get(tool))
    }

    /// Execution time of `tool` on `repository`, if recorded
    pub fn duration(&self, repository: &str, tool: &str) -> Option<f64> {
        self.get(repository, tool).and_then(|m| m.duration)
    }

    /// First source URL recorded for a repository by any tool
    pub fn source_url(&self, repository: &str) -> Option<&str> {
        self.entries
            .get(repository)?
            .values()
            .find_map(|m| m.url.as_deref())
    }

    /// Repository names in sorted order
    pub fn repositories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "spring-petclinic": {
            "cbomkit": {"duration": 41.5, "url": "https://github.com/spring-projects/spring-petclinic"},
            "cdxgen": {"duration": 12.0, "url": "https://github.com/spring-projects/spring-petclinic"}
        },
        "jwt-demo": {
            "deepseek": {"url": "https://github.com/acme/jwt-demo.git"}
        }
    }"#;

    #[test]
    fn test_from_json_str_reads_durations() {
        let index = MetricsIndex::from_json_str(SAMPLE).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.duration("spring-petclinic", "cbomkit"), Some(41.5));
        assert_eq!(index.duration("spring-petclinic", "cdxgen"), Some(12.0));
        assert_eq!(index.duration("jwt-demo", "deepseek"), None);
        assert_eq!(index.duration("unknown", "cbomkit"), None);
    }

    #[test]
    fn test_source_url_from_any_tool() {
        let index = MetricsIndex::from_json_str(SAMPLE).unwrap();
        assert_eq!(
            index.source_url("jwt-demo"),
            Some("https://github.com/acme/jwt-demo.git")
        );
        assert_eq!(index.source_url("missing"), None);
    }

    #[test]
    fn test_from_json_str_skips_malformed_entries() {
        let content = r#"{
            "a": "not an object",
            "b": {"cdxgen": 5, "cbomkit": {"duration": "slow", "url": 7}}
        }"#;
        let index = MetricsIndex::from_json_str(content).unwrap();
        assert_eq!(index.repositories().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(index.get("b", "cbomkit"), Some(&RunMetrics::default()));
        assert!(index.get("b", "cdxgen").is_none());
    }

    #[test]
    fn test_from_json_str_rejects_non_object_root() {
        assert!(MetricsIndex::from_json_str("[1, 2]").is_err());
        assert!(MetricsIndex::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_upsert_and_serialize() {
        let mut index = MetricsIndex::new();
        index.upsert(
            "repo",
            "cdxgen",
            RunMetrics::new(Some(3.25), Some("https://github.com/o/repo".to_string())),
        );
        index.upsert("repo", "cbomkit", RunMetrics::new(None, None));

        let json = index.to_json_string().unwrap();
        let reparsed = MetricsIndex::from_json_str(&json).unwrap();
        assert_eq!(reparsed, index);
        assert!(!json.contains("null"));
    }
}
