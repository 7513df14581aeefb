use crate::cbom_analysis::domain::RepositorySize;
use crate::ports::outbound::RepositorySizeProvider;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingSizeProvider wraps a RepositorySizeProvider and adds in-memory caching.
///
/// Several repositories (forks, renamed checkouts) can point at the same URL;
/// each URL is looked up once per run. Failures are not cached.
pub struct CachingSizeProvider<P: RepositorySizeProvider> {
    inner: P,
    cache: Arc<DashMap<String, RepositorySize>>,
}

impl<P: RepositorySizeProvider> CachingSizeProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<P: RepositorySizeProvider> RepositorySizeProvider for CachingSizeProvider<P> {
    async fn fetch_size(&self, repository_url: &str) -> Result<RepositorySize> {
        let key = repository_url.trim_end_matches('/').to_string();
        if let Some(cached) = self.cache.get(&key) {
            return Ok(*cached);
        }

        let size = self.inner.fetch_size(repository_url).await?;
        self.cache.insert(key, size);
        Ok(size)
    }
}
