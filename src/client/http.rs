use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::VulnScopeError;

/// HTTP client for the statically served dataset artifacts (CSV files,
/// SARIF results, directory-listing pages) under a single base URL.
pub struct ArtifactClient {
    client: Client,
    base_url: String,
}

impl ArtifactClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an artifact path against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn fetch_text(&self, path: &str) -> Result<String, VulnScopeError> {
        let url = self.url(path);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VulnScopeError::Network(format!("GET {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(VulnScopeError::Network(format!(
                "GET {} returned HTTP {}",
                url, status
            )));
        }

        resp.text()
            .await
            .map_err(|e| VulnScopeError::Network(format!("Reading {} failed: {}", url, e)))
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, VulnScopeError> {
        let text = self.fetch_text(path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch a header-keyed CSV artifact and deserialize its rows. Rows that
    /// fail to deserialize are skipped rather than failing the whole file,
    /// matching the tolerance of the upstream artifact generators.
    pub async fn fetch_csv<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, VulnScopeError> {
        let text = self.fetch_text(path).await?;
        parse_csv_rows(&text)
    }
}

pub fn parse_csv_rows<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, VulnScopeError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => debug!(row = index, error = %e, "Skipping malformed CSV row"),
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        name: String,
        count: u32,
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ArtifactClient::new("http://localhost:8000/");
        assert_eq!(client.url("/data/x.csv"), "http://localhost:8000/data/x.csv");
        assert_eq!(client.url("data/x.csv"), "http://localhost:8000/data/x.csv");
    }

    #[test]
    fn test_parse_csv_rows_header_keyed() {
        let rows: Vec<Row> = parse_csv_rows("name,count\nalpha,3\nbeta,7\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "alpha");
        assert_eq!(rows[1].count, 7);
    }

    #[test]
    fn test_parse_csv_rows_skips_malformed() {
        let rows: Vec<Row> = parse_csv_rows("name,count\nalpha,3\ngamma,not-a-number\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "alpha");
    }

    #[test]
    fn test_parse_csv_rows_empty_body() {
        let rows: Vec<Row> = parse_csv_rows("name,count\n").unwrap();
        assert!(rows.is_empty());
    }
}
