use crate::cbom_analysis::domain::{GitHubRepository, RepositorySize};
use crate::ports::outbound::RepositorySizeProvider;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Public GitHub REST API endpoint
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct GitHubRepositoryInfo {
    /// Repository size in KB as reported by GitHub
    #[serde(default)]
    size: Option<u64>,
}

/// GitHubSizeProvider adapter for looking up repository sizes on GitHub
///
/// This adapter implements the RepositorySizeProvider port using
/// `GET /repos/{owner}/{repo}` for the total size and
/// `GET /repos/{owner}/{repo}/languages` for the per-language byte counts.
pub struct GitHubSizeProvider {
    client: reqwest::Client,
    api_url: String,
    language: String,
    max_retries: u32,
}

impl GitHubSizeProvider {
    /// Creates a provider for the given API endpoint
    ///
    /// # Arguments
    /// * `api_url` - Base URL of the GitHub REST API
    /// * `token` - Personal access token sent as a bearer token
    /// * `language` - Language whose byte count is reported (e.g., "Java")
    pub fn new(api_url: &str, token: Option<&str>, language: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| anyhow::anyhow!("GitHub token contains invalid characters"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let user_agent = format!("cbom-bench/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
            max_retries: 3,
        })
    }

    fn repository_endpoint(&self, repository: &GitHubRepository) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url,
            urlencoding::encode(repository.owner()),
            urlencoding::encode(repository.name())
        )
    }

    /// Fetches a JSON document with retry logic
    ///
    /// Client errors (4xx) are not retried; server and network errors are.
    async fn get_json_with_retry<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) if response.status().is_success() => {
                    return Ok(response.json::<T>().await?);
                }
                Ok(response) if response.status().is_client_error() => {
                    anyhow::bail!("GitHub API returned status code {} for {}", response.status(), url);
                }
                Ok(response) => {
                    last_error = Some(anyhow::anyhow!(
                        "GitHub API returned status code {} for {}",
                        response.status(),
                        url
                    ));
                }
                Err(e) => last_error = Some(e.into()),
            }

            if attempt < self.max_retries {
                tracing::debug!(url, attempt, "retrying GitHub request");
                tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No request was sent to {}", url)))
    }

    /// Byte count of the tracked language, matched case-insensitively
    fn language_bytes(&self, languages: &HashMap<String, u64>) -> u64 {
        languages
            .get(&self.language)
            .or_else(|| {
                languages
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(&self.language))
                    .map(|(_, bytes)| bytes)
            })
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl RepositorySizeProvider for GitHubSizeProvider {
    async fn fetch_size(&self, repository_url: &str) -> Result<RepositorySize> {
        let repository = GitHubRepository::parse(repository_url)?;
        let endpoint = self.repository_endpoint(&repository);

        let info: GitHubRepositoryInfo = self.get_json_with_retry(&endpoint).await?;
        let languages: HashMap<String, u64> = self
            .get_json_with_retry(&format!("{}/languages", endpoint))
            .await?;

        let size = RepositorySize::new(
            info.size,
            RepositorySize::language_kb_from_bytes(self.language_bytes(&languages)),
        );
        tracing::debug!(
            repository = %repository_url,
            total_kb = ?size.total_kb,
            language_kb = ?size.language_kb,
            "fetched repository size"
        );
        Ok(size)
    }
}
