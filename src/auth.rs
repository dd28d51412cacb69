use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::handler::AppState;

/// Token from an `Authorization: Bearer <token>` header value. Accepts the
/// `Bearer` and `bearer` spellings of the scheme.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.split_once(' ')?;
    matches!(scheme, "Bearer" | "bearer").then_some(token)
}

/// Rejects every request whose bearer token does not match the configured one.
pub async fn require_bearer_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let authorized = matches!(bearer_token(header), Some(token) if token == &*state.api_token);

    if !authorized {
        tracing::error!("unauthorized request to path {}", request.uri().path());
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
