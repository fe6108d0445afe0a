// src/error.rs
use axum::{
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::responses;

pub const GENERIC_FAILURE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// `allowed` becomes the `Allow` header.
    #[error("Method not allowed")]
    MethodNotAllowed { allowed: Vec<Method> },

    #[error("Request body too large")]
    PayloadTooLarge,

    /// `public` goes to the client, `cause` only to the logs.
    #[error("{public}: {cause:#}")]
    Internal {
        public: &'static str,
        cause: anyhow::Error,
    },
}

impl AppError {
    pub fn internal(public: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        AppError::Internal {
            public,
            cause: cause.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn allow_header(allowed: &[Method]) -> HeaderMap {
    let value = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&value) {
        headers.insert(header::ALLOW, value);
    }
    headers
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::BadRequest(message) | AppError::NotFound(message) => {
                responses::error(&message, status, None)
            }
            AppError::MethodNotAllowed { allowed } => responses::error_with_headers(
                "Method not allowed",
                status,
                None,
                allow_header(&allowed),
            ),
            AppError::PayloadTooLarge => responses::error("Request body too large", status, None),
            AppError::Internal { public, cause } => {
                let detail = format!("{cause:#}");
                tracing::error!(error = %detail, "{public}");
                responses::error(public, status, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[tokio::test]
    async fn internal_details_stay_private() {
        let err = AppError::internal("Something failed", anyhow!("db password is hunter2"));
        assert!(err.to_string().contains("hunter2"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("Something failed"));
        assert!(!body.contains("hunter2"));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::MethodNotAllowed { allowed: vec![] }.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::PayloadTooLarge.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::internal(GENERIC_FAILURE, anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn method_not_allowed_lists_allowed_verbs() {
        let response = AppError::MethodNotAllowed {
            allowed: vec![Method::GET, Method::POST],
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, POST");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }
}
