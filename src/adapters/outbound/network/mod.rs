/// Network adapters for external API calls
mod caching_size_provider;
mod github_client;

pub use caching_size_provider::CachingSizeProvider;
pub use github_client::{GitHubSizeProvider, DEFAULT_GITHUB_API_URL};
