use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{path} returned status {status}")]
    Status { status: StatusCode, path: String },

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no API key configured")]
    MissingCredential,
}

pub type CatalogResult<T> = Result<T, CatalogError>;
