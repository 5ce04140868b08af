use async_trait::async_trait;
use thiserror::Error;

/// A probe that failed is distinct from a directory with no children: `Err`
/// means the listing could not be fetched at all, `Ok(vec![])` means it was
/// fetched and contained no matching entries.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),
}

/// Lists the immediate children of a served directory-listing page.
#[async_trait]
pub trait DirectoryProber: Send + Sync {
    /// Child directory names (anchors whose href ends in `/`).
    async fn child_directories(&self, url: &str) -> Result<Vec<String>, ProbeError>;

    /// Child file names (anchors whose href carries an extension dot).
    async fn child_files(&self, url: &str) -> Result<Vec<String>, ProbeError>;
}

/// Extract child directory names from a directory-listing body. Matches
/// anchors of the form `<a href="name/">`, returning `name` without the
/// trailing slash, in the order the anchors appear.
pub fn extract_child_directories(body: &str) -> Vec<String> {
    let re = regex::Regex::new(r#"<a href="(\S+)/">"#).unwrap();
    re.captures_iter(body).map(|c| c[1].to_string()).collect()
}

/// Extract child file names from a directory-listing body. Matches anchors
/// whose href contains an extension marker, e.g. `<a href="results.sarif">`.
pub fn extract_child_files(body: &str) -> Vec<String> {
    let re = regex::Regex::new(r#"<a href="(\S+\.\S+)">"#).unwrap();
    re.captures_iter(body).map(|c| c[1].to_string()).collect()
}

/// `DirectoryProber` over live HTTP: one GET per probe, no caching and no
/// retries, so a crawl never issues a request the caller didn't ask for.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_listing(&self, url: &str) -> Result<String, ProbeError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProbeError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        resp.text().await.map_err(|e| ProbeError::Network(e.to_string()))
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryProber for HttpProber {
    async fn child_directories(&self, url: &str) -> Result<Vec<String>, ProbeError> {
        let body = self.fetch_listing(url).await?;
        Ok(extract_child_directories(&body))
    }

    async fn child_files(&self, url: &str) -> Result<Vec<String>, ProbeError> {
        let body = self.fetch_listing(url).await?;
        Ok(extract_child_files(&body))
    }
}
