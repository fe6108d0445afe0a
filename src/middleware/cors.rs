// src/middleware/cors.rs
use std::any::Any;

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::responses;

/// Answers every preflight directly and stamps the CORS headers on
/// everything else.
pub async fn cors(req: Request, next: Next) -> Response {
    if *req.method() == Method::OPTIONS {
        return responses::preflight();
    }

    let mut response = next.run(req).await;
    responses::apply_cors_headers(response.headers_mut());
    response
}

/// Last-resort guard for panics escaping a handler.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Unhandled error while serving request");

    responses::error(
        "An unexpected error occurred",
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    )
}
