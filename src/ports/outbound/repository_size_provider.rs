use crate::cbom_analysis::domain::RepositorySize;
use crate::shared::Result;
use async_trait::async_trait;

/// RepositorySizeProvider port for looking up repository sizes
///
/// This port abstracts the code host API (e.g., GitHub) used to retrieve the
/// total size of a repository and the share written in one language.
#[async_trait]
pub trait RepositorySizeProvider: Send + Sync {
    /// Fetches the size of the repository behind `repository_url`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The URL does not point to a supported code host
    /// - The network request fails or returns an error status
    /// - The response cannot be parsed
    async fn fetch_size(&self, repository_url: &str) -> Result<RepositorySize>;
}
