use axum::{Json, extract::State};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::middleware::JsonBody;
use crate::types::chat::{ChatRequest, ChatResponse};
use crate::{NambiError, router::NambiState};

/// Words whose presence shows the scrape reached the real site pages.
pub const SENTINEL_KEYWORDS: &[&str] = &["Uganda", "Kampala", "Nambi", "booking"];

const PREVIEW_CHARS: usize = 500;

/// POST /api/chat
pub async fn chat_handler(
    State(state): State<NambiState>,
    JsonBody(req): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, NambiError> {
    let Some(question) = req.question else {
        return Err(NambiError::Validation("Question is required".to_string()));
    };
    info!(
        session_id = req.session_id.as_deref().unwrap_or("-"),
        first_message = req.is_first_message.unwrap_or(false),
        "chat request"
    );

    let resp = state
        .chat
        .answer(&question, req.session_id.as_deref())
        .await?;
    Ok(Json(resp))
}

#[derive(Debug, Serialize)]
pub struct ContentDebug {
    pub cache_loaded: bool,
    pub content_length: usize,
    pub keywords: BTreeMap<String, bool>,
    pub content_preview: String,
    pub url_count: usize,
}

/// GET /api/debug/content: reports the cache as-is, never loads it.
pub async fn debug_content_handler(State(state): State<NambiState>) -> Json<ContentDebug> {
    let cache = state.chat.cache();
    let snapshot = cache.snapshot();
    let keywords = SENTINEL_KEYWORDS
        .iter()
        .map(|k| (k.to_string(), snapshot.content.contains(*k)))
        .collect();

    Json(ContentDebug {
        cache_loaded: snapshot.loaded,
        content_length: snapshot.content.chars().count(),
        keywords,
        content_preview: snapshot.content.chars().take(PREVIEW_CHARS).collect(),
        url_count: cache.url_count(),
    })
}
