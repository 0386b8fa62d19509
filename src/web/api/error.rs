use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::angles::CoordinateError;
use crate::catalog::CatalogError;
use crate::storage::StorageError;
use crate::web::auth::PermissionError;

#[derive(Debug)]
pub enum ApiError {
    Permission(PermissionError),
    Validation(String),
    NotFound(String),
    Conflict(&'static str, String),
    Storage(StorageError),
}

impl From<PermissionError> for ApiError {
    fn from(e: PermissionError) -> Self {
        ApiError::Permission(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Storage(e)
    }
}

impl From<CoordinateError> for ApiError {
    fn from(e: CoordinateError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(_) => ApiError::NotFound(e.to_string()),
            CatalogError::DuplicateName(_) => ApiError::Conflict("satellite_exists", e.to_string()),
            CatalogError::BuiltinReadOnly(_) => {
                ApiError::Conflict("satellite_builtin", e.to_string())
            }
            _ => ApiError::Validation(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Permission(e) => e.into_response(),
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message("satellite_not_found", &msg)),
            )
                .into_response(),
            ApiError::Conflict(reason, msg) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse::with_message(reason, &msg)),
            )
                .into_response(),
            ApiError::Storage(e) => {
                log::error!("Failed to persist session: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::with_message("storage_error", &e.to_string())),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_status() {
        let cases = [
            (CatalogError::NotFound("A".into()), StatusCode::NOT_FOUND),
            (CatalogError::DuplicateName("A".into()), StatusCode::CONFLICT),
            (CatalogError::BuiltinReadOnly("A".into()), StatusCode::CONFLICT),
            (
                CatalogError::InvalidEntry {
                    file: "f".into(),
                    message: "m".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn coordinate_errors_are_bad_requests() {
        let response = ApiError::from(CoordinateError::InvalidLatitude(91.0)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Permission(PermissionError).into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn error_body_omits_empty_message() {
        let json = serde_json::to_value(ErrorResponse {
            error: "nope".into(),
            message: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "error": "nope" }));
    }
}
