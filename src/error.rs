use thiserror::Error;

#[derive(Error, Debug)]
pub enum NutriRootError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Crop catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Invalid soil sample: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, NutriRootError>;
