use thiserror::Error;

#[derive(Debug, Error)]
pub enum VulnScopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("NVD API error: {0}")]
    NvdApi(String),

    #[error("Forge API error: {0}")]
    ForgeApi(String),

    #[error("Directory probe failed: {0}")]
    Probe(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
