use std::any::Any;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use tracing::info;

use crate::api::{ErrorBody, FaultBody, StatusBody};
use crate::config::Environment;
use crate::db::Database;
use crate::error::FaultDetail;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub api_token: Arc<str>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(db: Arc<Database>, api_token: &str, environment: Environment) -> Self {
        AppState {
            db,
            api_token: Arc::from(api_token),
            environment,
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(StatusBody::new("ok"))
}

/// Renders 500 responses tagged with a [`FaultDetail`]. Production hides the
/// detail behind a generic message.
pub async fn report_faults(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    let Some(FaultDetail(detail)) = response.extensions().get::<FaultDetail>().cloned() else {
        return response;
    };

    tracing::error!(%method, %path, error = %detail, "request failed");

    match state.environment {
        Environment::Production => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new("server error"))).into_response()
        }
        Environment::Development => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(FaultBody::new(&detail))).into_response()
        }
    }
}

/// Turns a handler panic into a fault so it is reported like any other.
pub fn panic_to_fault(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    response.extensions_mut().insert(FaultDetail(format!("panic: {detail}")));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_become_fault_details() {
        let response = panic_to_fault(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.extensions().get::<FaultDetail>().unwrap().0, "panic: boom");

        let response = panic_to_fault(Box::new(String::from("bang")));
        assert_eq!(response.extensions().get::<FaultDetail>().unwrap().0, "panic: bang");

        let response = panic_to_fault(Box::new(42_u8));
        assert_eq!(
            response.extensions().get::<FaultDetail>().unwrap().0,
            "panic: handler panicked"
        );
    }
}
