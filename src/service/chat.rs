use crate::api::GenerativeModel;
use crate::config::ChatConfig;
use crate::content::ContentCache;
use crate::error::NambiError;
use crate::service::intents::{self, Intent};
use crate::service::prompt::build_prompt;
use crate::types::chat::ChatResponse;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Chat policy: canned intents first, then a grounded model call.
pub struct ChatService {
    cache: Arc<ContentCache>,
    model: Arc<dyn GenerativeModel>,
    fallback_path: Option<PathBuf>,
    cfg: ChatConfig,
}

impl ChatService {
    pub fn new(
        cache: Arc<ContentCache>,
        model: Arc<dyn GenerativeModel>,
        fallback_path: Option<PathBuf>,
        cfg: ChatConfig,
    ) -> Self {
        Self {
            cache,
            model,
            fallback_path,
            cfg,
        }
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    pub async fn answer(
        &self,
        question: &str,
        session_id: Option<&str>,
    ) -> Result<ChatResponse, NambiError> {
        let session = session_id.unwrap_or("-");
        match intents::classify(question) {
            Intent::Greeting => {
                debug!(session, "greeting intent");
                return Ok(intents::welcome_response(&self.cfg));
            }
            Intent::Booking => {
                debug!(session, "booking intent");
                return Ok(intents::booking_response(&self.cfg));
            }
            Intent::Question => {}
        }

        let content = self.grounding_content().await?;
        let prompt = build_prompt(&content, question.trim(), &self.cfg.fallback_url);

        info!(session, prompt_chars = prompt.len(), "asking model");
        let answer = self.model.generate(&prompt).await.inspect_err(|e| {
            warn!(session, error = %e, "model call failed");
        })?;
        Ok(ChatResponse::answer(answer))
    }

    /// Cached corpus, or the on-disk fallback when the scrape came back empty.
    async fn grounding_content(&self) -> Result<Arc<str>, NambiError> {
        let content = self.cache.get_or_load().await;
        if !content.trim().is_empty() {
            return Ok(content);
        }

        let Some(path) = self.fallback_path.as_ref() else {
            return Err(NambiError::ContentUnavailable);
        };
        match tokio::fs::read_to_string(path).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(path = %path.display(), "using fallback content file");
                Ok(Arc::from(text))
            }
            Ok(_) => {
                warn!(path = %path.display(), "fallback content file is empty");
                Err(NambiError::ContentUnavailable)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "fallback content file unreadable");
                Err(NambiError::ContentUnavailable)
            }
        }
    }
}
