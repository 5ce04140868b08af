use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ForgeConfig;
use crate::errors::VulnScopeError;

const USER_AGENT: &str = concat!("vulnscope/", env!("CARGO_PKG_VERSION"));

/// One commit as returned by the forge's commits endpoint, narrowed to the
/// fields the diff view renders.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub sha: String,
    pub html_url: String,
    #[serde(default)]
    pub files: Vec<CommitFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitFile {
    pub filename: String,
    #[serde(default)]
    pub blob_url: String,
    /// Unified-diff hunk text; absent for binary or oversized files.
    #[serde(default)]
    pub patch: Option<String>,
}

pub struct ForgeClient {
    client: Client,
    api_base: String,
}

impl ForgeClient {
    pub fn new(config: &ForgeConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<CommitDetail, VulnScopeError> {
        let url = format!("{}/repos/{}/{}/commits/{}", self.api_base, owner, repo, sha);
        let resp = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| VulnScopeError::Network(format!("Commit request failed: {}", e)))?;

        let status = resp.status();
        if status == 403 || status == 429 {
            return Err(VulnScopeError::ForgeApi("Forge rate limit exceeded".into()));
        }
        if status == 404 {
            return Err(VulnScopeError::NotFound(format!(
                "Commit {} not found in {}/{}",
                sha, owner, repo
            )));
        }
        if !status.is_success() {
            return Err(VulnScopeError::ForgeApi(format!(
                "Forge returned HTTP {} for {}",
                status, url
            )));
        }

        let commit: CommitDetail = resp
            .json()
            .await
            .map_err(|e| VulnScopeError::ForgeApi(format!("Failed to parse commit: {}", e)))?;

        debug!(sha = %commit.sha, files = commit.files.len(), "Fetched commit");
        Ok(commit)
    }
}

pub fn commit_url(cfg: &ForgeConfig, owner: &str, repo: &str, sha: &str) -> String {
    format!("{}/{}/{}/commit/{}", cfg.web_host, owner, repo, sha)
}

pub fn blob_url(cfg: &ForgeConfig, owner: &str, repo: &str, rev: &str, path: &str) -> String {
    format!("{}/{}/{}/blob/{}/{}", cfg.web_host, owner, repo, rev, path)
}

pub fn tree_url(cfg: &ForgeConfig, owner: &str, repo: &str, tag: &str) -> String {
    format!("{}/{}/{}/tree/{}", cfg.web_host, owner, repo, tag)
}

/// Raw-content URL for a file at a tag, derived by swapping the raw host
/// into the project's repository URL.
pub fn raw_file_url(cfg: &ForgeConfig, repository_url: &str, tag: &str, path: &str) -> String {
    let raw_repo = repository_url.replace(&cfg.web_host, &cfg.raw_host);
    format!("{}/{}/{}", raw_repo, tag, path)
}

/// Line-anchored source URL for a code-flow step.
pub fn source_line_url(repository_url: &str, tag: &str, path: &str, line: u32) -> String {
    format!("{}/blob/{}/{}#L{}", repository_url, tag, path, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ForgeConfig {
        ForgeConfig::default()
    }

    #[test]
    fn test_commit_and_tree_urls() {
        assert_eq!(
            commit_url(&cfg(), "perwendel", "spark", "abc123"),
            "https://github.com/perwendel/spark/commit/abc123"
        );
        assert_eq!(
            tree_url(&cfg(), "perwendel", "spark", "2.5.1"),
            "https://github.com/perwendel/spark/tree/2.5.1"
        );
    }

    #[test]
    fn test_blob_url() {
        assert_eq!(
            blob_url(&cfg(), "perwendel", "spark", "abc123", "src/main/java/A.java"),
            "https://github.com/perwendel/spark/blob/abc123/src/main/java/A.java"
        );
    }

    #[test]
    fn test_raw_file_url_swaps_host() {
        assert_eq!(
            raw_file_url(
                &cfg(),
                "https://github.com/perwendel/spark",
                "2.5.1",
                "src/main/java/spark/resource/ClassPathResource.java"
            ),
            "https://raw.githubusercontent.com/perwendel/spark/2.5.1/src/main/java/spark/resource/ClassPathResource.java"
        );
    }

    #[test]
    fn test_source_line_url() {
        assert_eq!(
            source_line_url(
                "https://github.com/perwendel/spark",
                "2.5.1",
                "src/main/java/A.java",
                51
            ),
            "https://github.com/perwendel/spark/blob/2.5.1/src/main/java/A.java#L51"
        );
    }

    #[test]
    fn test_commit_detail_parses_api_payload() {
        let commit: CommitDetail = serde_json::from_str(
            r#"{
                "sha": "abc123def456",
                "html_url": "https://github.com/perwendel/spark/commit/abc123def456",
                "files": [
                    {"filename": "src/main/java/A.java",
                     "blob_url": "https://github.com/perwendel/spark/blob/abc123def456/src/main/java/A.java",
                     "patch": "@@ -1,2 +1,2 @@\n-old\n+new"},
                    {"filename": "docs/image.png",
                     "blob_url": "https://github.com/perwendel/spark/blob/abc123def456/docs/image.png"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(commit.files.len(), 2);
        assert!(commit.files[0].patch.is_some());
        assert!(commit.files[1].patch.is_none());
    }
}
