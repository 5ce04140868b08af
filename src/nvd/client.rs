use chrono::NaiveDateTime;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::NvdConfig;
use crate::errors::VulnScopeError;

pub const NOT_FOUND_MESSAGE: &str = "Vulnerability not found in NVD database";

/// What the viewer shows from an NVD record.
#[derive(Debug, Clone)]
pub struct NvdSummary {
    pub description: String,
    pub published: Option<NaiveDateTime>,
    pub last_modified: Option<NaiveDateTime>,
    pub base_score: Option<f64>,
    pub base_severity: Option<String>,
}

pub struct NvdClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl NvdClient {
    pub fn new(config: &NvdConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolved_api_key(),
        }
    }

    /// Look up one CVE. A CVE the API doesn't know yields a summary whose
    /// description is the not-found message, not an error.
    pub async fn fetch_summary(&self, cve_id: &str) -> Result<NvdSummary, VulnScopeError> {
        let mut request = self
            .client
            .get(format!("{}/rest/json/cves/2.0", self.base_url))
            .query(&[("cveId", cve_id)]);

        if let Some(key) = &self.api_key {
            request = request.header("apiKey", key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| VulnScopeError::Network(format!("NVD request failed: {}", e)))?;

        let status = resp.status();
        if status == 403 || status == 429 {
            return Err(VulnScopeError::NvdApi(
                "NVD rate limit exceeded; configure an API key".into(),
            ));
        }
        if !status.is_success() {
            return Err(VulnScopeError::NvdApi(format!("NVD returned HTTP {}", status)));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| VulnScopeError::NvdApi(format!("Failed to parse NVD response: {}", e)))?;

        debug!(cve_id, "NVD lookup complete");
        Ok(summarize(&data))
    }
}

fn summarize(data: &Value) -> NvdSummary {
    let Some(vuln) = data["vulnerabilities"].as_array().and_then(|v| v.first()) else {
        return NvdSummary {
            description: NOT_FOUND_MESSAGE.to_string(),
            published: None,
            last_modified: None,
            base_score: None,
            base_severity: None,
        };
    };

    let cve = &vuln["cve"];
    let description = english_descriptions(cve).unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string());
    let (base_score, base_severity) = cvss_metrics(cve);

    NvdSummary {
        description,
        published: cve["published"].as_str().and_then(parse_timestamp),
        last_modified: cve["lastModified"].as_str().and_then(parse_timestamp),
        base_score,
        base_severity,
    }
}

/// All English descriptions of the record, joined line by line.
fn english_descriptions(cve: &Value) -> Option<String> {
    let descriptions = cve["descriptions"].as_array()?;
    let texts: Vec<&str> = descriptions
        .iter()
        .filter(|d| d["lang"].as_str() == Some("en"))
        .filter_map(|d| d["value"].as_str())
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n"))
    }
}

/// Base score and severity from the newest CVSS metric block present.
fn cvss_metrics(cve: &Value) -> (Option<f64>, Option<String>) {
    for key in ["cvssMetricV31", "cvssMetricV30", "cvssMetricV2"] {
        if let Some(metric) = cve["metrics"][key].as_array().and_then(|m| m.first()) {
            let score = metric["cvssData"]["baseScore"].as_f64();
            let severity = metric["cvssData"]["baseSeverity"]
                .as_str()
                .or_else(|| metric["baseSeverity"].as_str())
                .map(|s| s.to_string());
            return (score, severity);
        }
    }
    (None, None)
}

/// NVD timestamps carry millisecond precision and no zone designator.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "totalResults": 1,
            "vulnerabilities": [{
                "cve": {
                    "id": "CVE-2016-9177",
                    "published": "2016-11-03T10:59:00.133",
                    "lastModified": "2017-07-26T01:29:00.397",
                    "descriptions": [
                        {"lang": "en", "value": "Directory traversal vulnerability in Spark 2.5."},
                        {"lang": "es", "value": "Vulnerabilidad de salto de directorio."}
                    ],
                    "metrics": {
                        "cvssMetricV30": [{
                            "cvssData": {"baseScore": 5.3, "baseSeverity": "MEDIUM"}
                        }]
                    }
                }
            }]
        })
    }

    #[test]
    fn test_summarize_filters_to_english() {
        let summary = summarize(&sample_response());
        assert_eq!(
            summary.description,
            "Directory traversal vulnerability in Spark 2.5."
        );
    }

    #[test]
    fn test_summarize_extracts_dates_and_cvss() {
        let summary = summarize(&sample_response());
        assert_eq!(summary.published.unwrap().format("%Y-%m-%d").to_string(), "2016-11-03");
        assert!(summary.last_modified.is_some());
        assert_eq!(summary.base_score, Some(5.3));
        assert_eq!(summary.base_severity.as_deref(), Some("MEDIUM"));
    }

    #[test]
    fn test_summarize_unknown_cve() {
        let summary = summarize(&json!({"totalResults": 0, "vulnerabilities": []}));
        assert_eq!(summary.description, NOT_FOUND_MESSAGE);
        assert!(summary.published.is_none());
        assert!(summary.base_score.is_none());
    }

    #[test]
    fn test_multiple_english_descriptions_joined() {
        let data = json!({
            "vulnerabilities": [{
                "cve": {
                    "descriptions": [
                        {"lang": "en", "value": "First."},
                        {"lang": "en", "value": "Second."}
                    ]
                }
            }]
        });
        assert_eq!(summarize(&data).description, "First.\nSecond.");
    }

    #[test]
    fn test_timestamp_parse_tolerates_precision() {
        assert!(parse_timestamp("2016-11-03T10:59:00.133").is_some());
        assert!(parse_timestamp("2016-11-03T10:59:00").is_some());
        assert!(parse_timestamp("not-a-date").is_none());
    }
}
