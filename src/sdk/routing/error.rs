use crate::sdk::http::FetchError;
use serde::Deserialize;
use thiserror::Error;

// Mapbox error bodies look like {"message": "...", "code": "..."}
#[derive(Deserialize, Debug)]
pub struct MapboxErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Invalid coordinates for route calculation: ({lng}, {lat})")]
    InvalidCoordinate { lng: f64, lat: f64 },

    #[error("Missing Mapbox access token")]
    MissingToken,

    #[error("API Error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("No route found between the given points")]
    NoRoute,

    #[error("No geocode results for: {0}")]
    NoResults(String),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl RoutingError {
    /// Builds an `ApiError` from a non-success body, falling back to the raw
    /// text when it is not the structured Mapbox shape.
    pub fn from_api_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<MapboxErrorPayload>(body)
            .ok()
            .and_then(|payload| payload.message.or(payload.code))
            .unwrap_or_else(|| body.chars().take(300).collect());
        RoutingError::ApiError { status, message }
    }
}
