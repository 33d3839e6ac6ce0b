use crate::sdk::http::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoiError {
    #[error("{provider} API error: status {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} response could not be parsed: {source}")]
    Parse {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Reasons the aggregation pipeline as a whole produced nothing usable.
#[derive(Error, Debug, PartialEq)]
pub enum PipelineError {
    #[error("no valid search points")]
    NoSearchPoints,

    #[error("all {attempts} provider calls failed")]
    AllProvidersFailed { attempts: usize },
}
