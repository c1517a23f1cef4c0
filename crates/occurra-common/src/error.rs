use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OccurraError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Security error: {0}")]
    SecurityError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OccurraError {
    /// HTTP status the web layer answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            OccurraError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            OccurraError::SecurityError(_) => StatusCode::FORBIDDEN,
            OccurraError::Http(_) | OccurraError::Serialization(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OccurraError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, OccurraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_is_bad_request() {
        let err = OccurraError::InvalidQuery("species name is empty".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid query: species name is empty");
    }

    #[test]
    fn test_upstream_decode_failure_is_bad_gateway() {
        let err: OccurraError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_blocked_host_is_forbidden() {
        let resp = OccurraError::SecurityError("blocked".into()).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
