use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}
