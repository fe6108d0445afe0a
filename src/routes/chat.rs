// src/routes/chat.rs
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::Response,
};
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, GreetingResponse, HealthResponse},
    responses,
    state::AppState,
};

pub const GREETINGS: [&str; 4] = [
    "Hi there! I'm here to listen and support you. How are you feeling today?",
    "Welcome to our space for conversation. What's on your mind today?",
    "Hello! I'm your supportive chat companion. How can I help you today?",
    "I'm here for you whenever you need to talk. How are you doing right now?",
];

const CHAT_FAILURE: &str = "An error occurred while processing your message";

pub fn greeting() -> Response {
    let message = GREETINGS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(GREETINGS[0]);

    // Picked per request, so caches must not pin one greeting.
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    responses::success_with_headers(
        GreetingResponse {
            message: message.to_string(),
        },
        StatusCode::OK,
        headers,
    )
}

pub async fn chat(state: &AppState, body: &[u8]) -> Result<Response, AppError> {
    let payload: ChatRequest =
        serde_json::from_slice(body).map_err(|e| AppError::internal(CHAT_FAILURE, e))?;

    let conversation_id = payload
        .echoed_conversation_id()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let message = payload.message.unwrap_or_default();
    if message.trim().is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let reply = state.gemini.reply(&message).await;

    Ok(responses::success(
        ChatResponse {
            message: reply,
            conversation_id,
        },
        StatusCode::OK,
    ))
}

pub fn health(state: &AppState) -> Response {
    responses::success(
        HealthResponse {
            status: "ok".to_string(),
            mode: state.gemini.mode().as_str().to_string(),
        },
        StatusCode::OK,
    )
}
