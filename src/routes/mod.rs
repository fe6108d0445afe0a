// src/routes/mod.rs
pub mod assets;
pub mod chat;
pub mod table;

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Request, State},
    middleware,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    error::{AppError, GENERIC_FAILURE},
    middleware::cors::{cors, handle_panic},
    state::SharedState,
};
use table::{Endpoint, ROUTES, Resolution};

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .fallback(dispatch)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
}

/// Every request lands here; the route table decides what runs.
async fn dispatch(State(state): State<SharedState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let method = parts.method;
    let path = parts.uri.path();

    let result = match table::resolve(ROUTES, &method, path) {
        Resolution::NotFound => Err(AppError::NotFound("Not found".to_string())),
        Resolution::MethodNotAllowed { allowed } => Err(AppError::MethodNotAllowed { allowed }),
        Resolution::Matched { endpoint, params } => match endpoint {
            Endpoint::Health => Ok(chat::health(&state)),
            Endpoint::Greeting => Ok(chat::greeting()),
            Endpoint::Chat => match read_body(body, state.config.server.body_limit).await {
                Ok(bytes) => chat::chat(&state, &bytes).await,
                Err(err) => Err(err),
            },
            Endpoint::Asset => assets::serve(params.first().copied().unwrap_or_default()),
        },
    };

    if let Err(err) = &result {
        tracing::debug!(%method, %path, status = %err.status(), "Request rejected");
    }
    result.into_response()
}

/// Buffer a request body of at most `limit` bytes.
async fn read_body(body: Body, limit: usize) -> Result<Bytes, AppError> {
    axum::body::to_bytes(body, limit).await.map_err(body_error)
}

fn body_error(err: axum::Error) -> AppError {
    let cause = err.into_inner();
    if cause.downcast_ref::<LengthLimitError>().is_some() {
        AppError::PayloadTooLarge
    } else {
        AppError::internal(GENERIC_FAILURE, anyhow::anyhow!(cause))
    }
}
