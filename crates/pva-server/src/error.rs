use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use pva_engine::EngineError;

/// Failures starting or running the server itself.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// A request-scoped failure, mapped onto an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Undecodable or contradictory request input.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(EngineError::RollbackInProgress) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Engine(EngineError::MalformedBatch(_))
            | ApiError::Engine(EngineError::MalformedEvent(_)) => StatusCode::BAD_REQUEST,
            ApiError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = %status, error = %self, "request failed");
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Engine(EngineError::RollbackInProgress).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Engine(EngineError::MalformedBatch("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Engine(EngineError::UnsupportedVerb("watch".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
