use std::collections::HashSet;
use std::path::Path;

use tracing::warn;

use super::types::VulnScopeConfig;
use crate::errors::VulnScopeError;

pub async fn parse_config(path: &Path) -> Result<VulnScopeConfig, VulnScopeError> {
    if !path.exists() {
        return Err(VulnScopeError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(VulnScopeError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: VulnScopeConfig = serde_yaml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Semantic validation of a parsed configuration.
fn validate(config: &VulnScopeConfig) -> Result<(), VulnScopeError> {
    let base = &config.dataset.base_url;
    if base.is_empty() {
        return Err(VulnScopeError::Config("dataset.base_url must not be empty".into()));
    }
    if !base.starts_with("http://") && !base.starts_with("https://") {
        return Err(VulnScopeError::Config(format!(
            "dataset.base_url must be an http(s) URL, got '{}'",
            base
        )));
    }

    let mut seen = HashSet::new();
    for query in &config.queries {
        if query.name.is_empty() {
            return Err(VulnScopeError::Config("query entries must have a name".into()));
        }
        if !seen.insert(query.name.as_str()) {
            return Err(VulnScopeError::Config(format!(
                "Duplicate query name in config: '{}'",
                query.name
            )));
        }
    }

    if config.nvd.resolved_api_key().is_none() {
        warn!("No NVD API key configured; NVD requests will be rate-limited");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_parse_missing_file() {
        let result = parse_config(Path::new("/nonexistent/vulnscope.yaml")).await;
        assert!(matches!(result, Err(VulnScopeError::Config(_))));
    }

    #[tokio::test]
    async fn test_parse_minimal_config() {
        let file = write_config("dataset:\n  base_url: https://example.org/bench\n");
        let config = parse_config(file.path()).await.unwrap();
        assert_eq!(config.dataset.base_url, "https://example.org/bench");
        // Untouched sections keep their defaults
        assert_eq!(config.dataset.project_info, "data/project_info.csv");
    }

    #[tokio::test]
    async fn test_parse_rejects_bad_scheme() {
        let file = write_config("dataset:\n  base_url: ftp://example.org\n");
        assert!(parse_config(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_parse_rejects_duplicate_queries() {
        let file = write_config(
            "queries:\n  - name: q1\n    title: One\n  - name: q1\n    title: Two\n",
        );
        assert!(parse_config(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_parse_rejects_unnamed_query() {
        let file = write_config("queries:\n  - name: \"\"\n    title: Empty\n");
        assert!(parse_config(file.path()).await.is_err());
    }
}
