// src/responses.rs
//! Response shapes shared by every handler.

use axum::{
    Json,
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

pub const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        "GET, POST, PUT, DELETE, OPTIONS",
    ),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (header::ACCESS_CONTROL_MAX_AGE, "86400"),
];

pub const HTML_CONTENT_TYPE: &str = "text/html;charset=UTF-8";

/// Overwrite the CORS headers on an outgoing header map.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

#[derive(Serialize)]
struct Envelope<T> {
    success: bool,
    #[serde(flatten)]
    data: T,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Value>,
}

/// Replace every header named in `overrides`, keeping the rest.
fn with_overrides(mut response: Response, overrides: HeaderMap) -> Response {
    let headers = response.headers_mut();
    for name in overrides.keys() {
        headers.remove(name);
    }
    for (name, value) in &overrides {
        headers.append(name.clone(), value.clone());
    }
    response
}

/// `{ "success": true, ...data }`. `data` must serialize to a map.
pub fn success<T: Serialize>(data: T, status: StatusCode) -> Response {
    success_with_headers(data, status, HeaderMap::new())
}

pub fn success_with_headers<T: Serialize>(
    data: T,
    status: StatusCode,
    headers: HeaderMap,
) -> Response {
    let response = (
        status,
        CORS_HEADERS,
        Json(Envelope {
            success: true,
            data,
        }),
    )
        .into_response();
    with_overrides(response, headers)
}

/// `{ "success": false, "message": .., "errors"?: .. }`.
pub fn error(message: &str, status: StatusCode, errors: Option<Value>) -> Response {
    error_with_headers(message, status, errors, HeaderMap::new())
}

pub fn error_with_headers(
    message: &str,
    status: StatusCode,
    errors: Option<Value>,
    headers: HeaderMap,
) -> Response {
    let response = (
        status,
        CORS_HEADERS,
        Json(ErrorBody {
            success: false,
            message,
            errors,
        }),
    )
        .into_response();
    with_overrides(response, headers)
}

pub fn preflight() -> Response {
    (StatusCode::NO_CONTENT, CORS_HEADERS).into_response()
}

pub fn html(markup: impl Into<Body>, status: StatusCode) -> Response {
    asset(markup, HTML_CONTENT_TYPE, status)
}

pub fn asset(body: impl Into<Body>, content_type: &'static str, status: StatusCode) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, content_type)],
        body.into(),
    )
        .into_response()
}
