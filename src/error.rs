use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No artist found with the name: {0}")]
    ArtistNotFound(String),

    #[error("No tracks found for artist: {0}")]
    NoTracksFound(String),

    #[error("Requested {requested} tracks but only {available} are available")]
    PoolExhausted { requested: usize, available: usize },

    #[error("Catalog error: {0}")]
    Gateway(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ArtistNotFound(_) | AppError::NoTracksFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::PoolExhausted { .. } => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::Gateway(ref msg) => {
                tracing::error!("Catalog error: {}", msg);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
