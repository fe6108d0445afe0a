// src/routes/assets.rs
//! Embedded chat UI.

use axum::{http::StatusCode, response::Response};

use crate::{error::AppError, responses};

const DEFAULT_DOCUMENT: &str = "index.html";

static ASSETS: &[(&str, &str)] = &[
    ("index.html", include_str!("../../assets/index.html")),
    ("styles.css", include_str!("../../assets/styles.css")),
    ("app.js", include_str!("../../assets/app.js")),
];

static CONTENT_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".css", "text/css"),
    (".js", "text/javascript"),
    (".json", "application/json"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".svg", "image/svg+xml"),
    (".ico", "image/x-icon"),
];

pub fn content_type_for(path: &str) -> &'static str {
    let extension = path.rfind('.').map(|i| &path[i..]).unwrap_or("");
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, content_type)| *content_type)
        .unwrap_or("text/plain")
}

pub fn serve(path: &str) -> Result<Response, AppError> {
    let name = match path.trim_start_matches('/') {
        "" => DEFAULT_DOCUMENT,
        other => other,
    };

    let Some((_, body)) = ASSETS.iter().find(|(known, _)| *known == name) else {
        tracing::debug!(path = %name, "No embedded asset");
        return Err(AppError::NotFound("File not found".to_string()));
    };

    Ok(match content_type_for(name) {
        "text/html" => responses::html(*body, StatusCode::OK),
        content_type => responses::asset(*body, content_type, StatusCode::OK),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("styles.css"), "text/css");
        assert_eq!(content_type_for("app.js"), "text/javascript");
        assert_eq!(content_type_for("img/logo.svg"), "image/svg+xml");
        assert_eq!(content_type_for("README"), "text/plain");
        assert_eq!(content_type_for("archive.tar.gz"), "text/plain");
    }

    #[test]
    fn root_is_index() {
        for path in ["", "/", "index.html"] {
            let response = serve(path).unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                responses::HTML_CONTENT_TYPE
            );
        }
    }

    #[test]
    fn unknown_asset_is_not_found() {
        let err = serve("favicon.ico").unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "File not found"));
    }

    #[test]
    fn every_asset_is_served() {
        for (name, _) in ASSETS {
            assert!(serve(name).is_ok(), "{name} should be served");
        }
    }
}
