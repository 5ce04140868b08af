use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct VulnScopeConfig {
    pub dataset: DatasetConfig,
    pub queries: Vec<QueryConfig>,
    pub nvd: NvdConfig,
    pub forge: ForgeConfig,
}

impl VulnScopeConfig {
    /// Catalog of recognized analysis queries. An empty `queries` section
    /// falls back to the built-in catalog.
    pub fn query_catalog(&self) -> QueryCatalog {
        if self.queries.is_empty() {
            QueryCatalog::builtin()
        } else {
            QueryCatalog::from_configs(&self.queries)
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Base URL the static artifacts are served under.
    pub base_url: String,
    /// Path of the per-project CSV, relative to `base_url`.
    pub project_info: String,
    /// Path of the fixed-methods CSV, relative to `base_url`.
    pub fix_info: String,
    /// Directory holding per-database analysis output trees.
    pub output_dir: String,
    /// File extension of the dataset's source language.
    pub source_extension: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            project_info: "data/project_info.csv".to_string(),
            fix_info: "data/fix_info.csv".to_string(),
            output_dir: "output".to_string(),
            source_extension: ".java".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    pub name: String,
    pub title: String,
}

/// Recognized query names mapped to display titles. Discovery only reports
/// result directories whose query name appears here.
#[derive(Debug, Clone, Default)]
pub struct QueryCatalog {
    titles: BTreeMap<String, String>,
}

impl QueryCatalog {
    pub fn builtin() -> Self {
        let mut titles = BTreeMap::new();
        titles.insert("cwe-022wLLM".to_string(), "Path Traversal (CWE-22)".to_string());
        titles.insert("cwe-078wLLM".to_string(), "OS Command Injection (CWE-78)".to_string());
        titles.insert("cwe-079wLLM".to_string(), "Cross-Site Scripting (CWE-79)".to_string());
        titles.insert("cwe-094wLLM".to_string(), "Code Injection (CWE-94)".to_string());
        Self { titles }
    }

    pub fn from_configs(configs: &[QueryConfig]) -> Self {
        let titles = configs
            .iter()
            .map(|q| (q.name.clone(), q.title.clone()))
            .collect();
        Self { titles }
    }

    pub fn recognizes(&self, name: &str) -> bool {
        self.titles.contains_key(name)
    }

    pub fn title(&self, name: &str) -> Option<&str> {
        self.titles.get(name).map(|s| s.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.titles.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NvdConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for NvdConfig {
    fn default() -> Self {
        Self {
            base_url: "https://services.nvd.nist.gov".to_string(),
            api_key: None,
        }
    }
}

impl NvdConfig {
    /// API key resolution order: `NVD_API_KEY` env var, then the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("NVD_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub api_base: String,
    pub raw_host: String,
    pub web_host: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            raw_host: "https://raw.githubusercontent.com".to_string(),
            web_host: "https://github.com".to_string(),
        }
    }
}
