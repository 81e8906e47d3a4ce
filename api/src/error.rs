use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// The central error type used for HTTP responses.
///
/// The status mapping lives here, once: client mistakes caught before any
/// database call become 400, the single not-found case becomes 404, and
/// everything else (constraint violations, connectivity loss, SQL errors)
/// collapses into a 500. Bodies are plain text.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("not found")]
    NotFound(&'static str),

    #[error("bad request")]
    BadRequest(&'static str),

    #[error("internal error")]
    Internal(
        #[source]
        #[from]
        eyre::Report,
    ),

    /// Database error
    #[error("database error")]
    Database(
        #[source]
        #[from]
        sqlx::Error,
    ),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Internal(..) => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
            AppError::Database(..) => (StatusCode::INTERNAL_SERVER_ERROR, "database error"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, *msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, *msg),
        };

        let mut response = (status, message).into_response();

        response.extensions_mut().insert(Arc::new(self));

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("Patient not found.").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::BadRequest("Invalid or missing `ids` payload").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_errors_map_to_500() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn the_error_is_stashed_for_the_logging_middleware() {
        let response = AppError::Internal(eyre::eyre!("boom")).into_response();
        assert!(response.extensions().get::<Arc<AppError>>().is_some());
    }
}
