pub mod gemini_api;

use crate::error::NambiError;
use async_trait::async_trait;

pub use gemini_api::GeminiApi;

/// Text-in, text-out generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, NambiError>;
}
