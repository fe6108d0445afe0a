// src/services/gemini.rs
//! Gemini `generateContent` client with mock and fallback replies.
//!
//! [`GeminiClient::reply`] always produces text: mock replies when the
//! integration is off, the upstream answer when the call succeeds and
//! [`FALLBACK_REPLY`] when it does not.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GeminiConfig;
use crate::services::mock;

pub const FALLBACK_REPLY: &str = "I'm having trouble connecting right now. Please try again in a moment, or if this continues, let someone know about the technical issue.";

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 800;
const TOP_P: f32 = 0.95;
const TOP_K: u32 = 40;

pub const SYSTEM_PROMPT: &str = r#"
You are a supportive, empathetic mental health chatbot. Your goal is to provide a safe space for users to express themselves and receive emotional support. You are not a therapist or medical professional, and you should make this clear when appropriate.

## Communication Style:
- Be warm, empathetic and non-judgmental at all times
- Use a conversational, natural tone
- Practice active listening by reflecting back what you hear and asking clarifying questions
- Be patient and give users space to express themselves
- Match your emotional tone to the user's needs (supportive, gentle, encouraging)

## Guidelines:
- Focus on emotional support rather than giving medical advice
- When users express serious mental health concerns, gently suggest they speak to a qualified professional
- Avoid dismissive or minimizing language ("just cheer up", "it could be worse")
- Suggest simple mindfulness, grounding, or relaxation techniques when appropriate
- Maintain appropriate boundaries - you're a supportive companion, not a doctor or therapist
- If someone appears to be in immediate danger, provide crisis resources

## Crisis Handling:
If a user expresses thoughts of suicide or severe distress:
1. Take it seriously and respond with care
2. Suggest immediate contact with crisis services
3. Provide the relevant crisis hotline information:
   - National Suicide Prevention Lifeline: 988 or 1-800-273-8255
   - Crisis Text Line: Text HOME to 741741

Remember that your primary role is to listen, provide support, and direct to appropriate professional resources when needed.
"#;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to Gemini failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Gemini response had no candidate text")]
    MissingText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    Live,
    Mock,
}

impl ReplyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyMode::Live => "live",
            ReplyMode::Mock => "mock",
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn mode(&self) -> ReplyMode {
        if self.config.live_key().is_some() {
            ReplyMode::Live
        } else {
            ReplyMode::Mock
        }
    }

    pub async fn reply(&self, user_message: &str) -> String {
        let Some(api_key) = self.config.live_key() else {
            return mock::reply(user_message);
        };

        match self.generate(api_key, user_message).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, model = %self.config.model, "Gemini call failed, sending fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn generate(&self, api_key: &str, user_message: &str) -> Result<String, UpstreamError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        tracing::debug!(
            model = %self.config.model,
            message_len = user_message.len(),
            "Sending request to Gemini"
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::new(user_message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(UpstreamError::Status { status, body });
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload.into_text().ok_or(UpstreamError::MissingText)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    system_instruction: SystemInstruction,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(user_message: &'a str) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [TextPart { text: user_message }],
            }],
            system_instruction: SystemInstruction {
                parts: [TextPart {
                    text: SYSTEM_PROMPT,
                }],
            },
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                top_p: TOP_P,
                top_k: TOP_K,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: [TextPart<'static>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}
