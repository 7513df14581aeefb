use crate::shared::error::CbomBenchError;
use crate::shared::Result;

/// RepositorySize value object: sizes reported by the code host, in KB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositorySize {
    /// Total repository size
    pub total_kb: Option<u64>,
    /// Size of the code written in the tracked language
    pub language_kb: Option<u64>,
}

impl RepositorySize {
    pub fn new(total_kb: Option<u64>, language_kb: Option<u64>) -> Self {
        Self {
            total_kb,
            language_kb,
        }
    }

    /// Converts a byte count from a languages breakdown to KB; zero means absent
    pub fn language_kb_from_bytes(bytes: u64) -> Option<u64> {
        (bytes > 0).then_some(bytes / 1024)
    }
}

/// Owner/name coordinates of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitHubRepository {
    owner: String,
    name: String,
}

impl GitHubRepository {
    /// Parses an HTTPS or SSH GitHub URL
    ///
    /// Accepted forms:
    /// - `https://github.com/<owner>/<repo>[.git][/...]`
    /// - `git@github.com:<owner>/<repo>[.git]`
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || CbomBenchError::InvalidRepositoryUrl {
            url: url.to_string(),
        };
        let trimmed = url.trim();

        let path = if let Some(rest) = trimmed.strip_prefix("git@github.com:") {
            rest
        } else {
            let without_scheme = trimmed
                .strip_prefix("https://")
                .or_else(|| trimmed.strip_prefix("http://"))
                .ok_or_else(invalid)?;
            let (host, path) = without_scheme.split_once('/').ok_or_else(invalid)?;
            if !matches!(host, "github.com" | "www.github.com") {
                return Err(invalid().into());
            }
            path
        };

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments.next().ok_or_else(invalid)?;
        let name = segments.next().ok_or_else(invalid)?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        if name.is_empty() {
            return Err(invalid().into());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Derives the repository key used for CBOM file names from a clone URL
///
/// Works for any host: the last non-empty path segment without `.git`.
pub fn repository_name_from_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default();
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() || name.contains("..") || name.contains('\\') {
        return Err(CbomBenchError::InvalidRepositoryUrl {
            url: url.to_string(),
        }
        .into());
    }
    Ok(name.to_string())
}
