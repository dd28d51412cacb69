use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::{ErrorBody, UnauthorizedBody};

pub const BOOKMARK_NOT_FOUND: &str = "Bookmark does not exist";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing {0} in request body")]
    MissingField(&'static str),
    #[error("'rating' must be a number between 1 and 10")]
    InvalidRating,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized request")]
    Unauthorized,
    #[error("{0}")]
    InvalidBody(String),
    #[error("Bookmark does not exist")]
    NotFound,
    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::InvalidBody(error.to_string())
    }
}

/// Marks a 500 response so the fault reporter can render it for the
/// configured environment.
#[derive(Debug, Clone)]
pub struct FaultDetail(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, Json(UnauthorizedBody::new())).into_response(),
            ApiError::InvalidBody(msg) => (StatusCode::BAD_REQUEST, Json(ErrorBody::new(&msg))).into_response(),
            ApiError::NotFound => (StatusCode::NOT_FOUND, Json(ErrorBody::new(BOOKMARK_NOT_FOUND))).into_response(),
            ApiError::Fault(err) => {
                let detail = crate::unpack_error(&*err);
                let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
                response.extensions_mut().insert(FaultDetail(detail));
                response
            }
        }
    }
}
