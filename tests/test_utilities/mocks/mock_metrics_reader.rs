use cbom_bench::prelude::*;

/// Mock MetricsReader returning a fixed metrics document
pub struct MockMetricsReader {
    pub content: Option<String>,
    pub should_fail: bool,
}

impl MockMetricsReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            should_fail: false,
        }
    }

    pub fn missing() -> Self {
        Self {
            content: None,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: None,
            should_fail: true,
        }
    }
}

impl MetricsReader for MockMetricsReader {
    fn read_metrics(&self) -> Result<Option<String>> {
        if self.should_fail {
            anyhow::bail!("Mock metrics reader failure");
        }
        Ok(self.content.clone())
    }
}
