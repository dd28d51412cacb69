use axum::http::{HeaderName, HeaderValue, Method};
use axum::{Router, middleware, routing::get};
use std::error::Error;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub mod api;
pub mod auth;
pub mod bookmarks;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod sanitize;

use handler::AppState;

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}

/// Sent on every response unless a handler already set them.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-permitted-cross-domain-policies", "none"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
];

fn with_security_headers(mut router: Router) -> Router {
    for (name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(*name),
            HeaderValue::from_static(*value),
        ));
    }
    router
}

/// The full service: every route behind the bearer gate, faults rendered per
/// environment, CORS outermost so preflights never hit the gate.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let router = Router::new()
        .route("/", get(handler::healthcheck))
        .merge(bookmarks::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token))
        .layer(CatchPanicLayer::custom(handler::panic_to_fault))
        .layer(middleware::from_fn_with_state(state.clone(), handler::report_faults))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    with_security_headers(router)
}
