use cbom_bench::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Mock CbomSource serving in-memory CBOM documents per tool
#[derive(Default)]
pub struct MockCbomSource {
    /// tool -> repository -> content (`None` simulates an unreadable file)
    pub files: BTreeMap<String, BTreeMap<String, Option<String>>>,
}

impl MockCbomSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cbom(mut self, tool: &str, repository: &str, content: &str) -> Self {
        self.files
            .entry(tool.to_string())
            .or_default()
            .insert(repository.to_string(), Some(content.to_string()));
        self
    }

    pub fn with_unreadable(mut self, tool: &str, repository: &str) -> Self {
        self.files
            .entry(tool.to_string())
            .or_default()
            .insert(repository.to_string(), None);
        self
    }

    fn path_of(tool: &str, repository: &str) -> PathBuf {
        PathBuf::from(tool).join(format!("{}.json", repository))
    }
}

impl CbomSource for MockCbomSource {
    fn list_cbom_files(&self, tool: &ToolName) -> Result<Option<Vec<CbomFile>>> {
        Ok(self.files.get(tool.as_str()).map(|repos| {
            repos
                .keys()
                .map(|repo| CbomFile::new(repo.clone(), Self::path_of(tool.as_str(), repo)))
                .collect()
        }))
    }

    fn read_cbom(&self, file: &CbomFile) -> Result<String> {
        let tool = file
            .path
            .parent()
            .and_then(|p| p.to_str())
            .unwrap_or_default();
        match self.files.get(tool).and_then(|repos| repos.get(&file.repository)) {
            Some(Some(content)) => Ok(content.clone()),
            Some(None) => anyhow::bail!("Mock read failure for {}", file.path.display()),
            None => anyhow::bail!("Mock file not found: {}", file.path.display()),
        }
    }
}
