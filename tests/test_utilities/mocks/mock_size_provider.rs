use async_trait::async_trait;
use cbom_bench::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock RepositorySizeProvider with canned sizes; unknown URLs fail
#[derive(Default, Clone)]
pub struct MockSizeProvider {
    pub sizes: HashMap<String, RepositorySize>,
    pub calls: Arc<AtomicUsize>,
}

impl MockSizeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, url: &str, total_kb: u64, language_kb: Option<u64>) -> Self {
        self.sizes
            .insert(url.to_string(), RepositorySize::new(Some(total_kb), language_kb));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositorySizeProvider for MockSizeProvider {
    async fn fetch_size(&self, repository_url: &str) -> Result<RepositorySize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.sizes.get(repository_url) {
            Some(size) => Ok(*size),
            None => anyhow::bail!("Mock size lookup failed for {}", repository_url),
        }
    }
}
