use crate::api::GenerativeModel;
use crate::config::GeminiConfig;
use crate::error::{GeminiError, NambiError};
use crate::types::gemini::{GenerateContentRequest, GeminiResponse};
use async_trait::async_trait;
use tracing::{debug, error};
use url::Url;

/// Stateless client for the Gemini `generateContent` REST endpoint.
/// Every call is a single attempt.
#[derive(Clone)]
pub struct GeminiApi {
    client: reqwest::Client,
    api_key: String,
    url: Url,
}

impl GeminiApi {
    pub fn new(cfg: &GeminiConfig) -> Result<Self, NambiError> {
        let client = reqwest::Client::builder().timeout(cfg.timeout()).build()?;
        Self::with_client(client, cfg)
    }

    pub fn with_client(client: reqwest::Client, cfg: &GeminiConfig) -> Result<Self, NambiError> {
        let url = generate_url(&cfg.base_url, &cfg.model)?;
        Ok(Self {
            client,
            api_key: cfg.api_key.clone(),
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

fn generate_url(base: &Url, model: &str) -> Result<Url, NambiError> {
    base.join(&format!("v1beta/models/{model}:generateContent"))
        .map_err(|e| NambiError::Validation(format!("invalid Gemini URL: {e}")))
}

#[async_trait]
impl GenerativeModel for GeminiApi {
    async fn generate(&self, prompt: &str) -> Result<String, NambiError> {
        let body = GenerateContentRequest::from_prompt(prompt);
        let resp = self
            .client
            .post(self.url.clone())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                NambiError::UpstreamModel(e.to_string())
            })?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| NambiError::UpstreamModel(e.to_string()))?;

        if !status.is_success() {
            let details = serde_json::from_slice::<GeminiError>(&bytes)
                .map(|e| e.describe())
                .unwrap_or_else(|_| format!("upstream status {status}"));
            error!(%status, %details, "Gemini returned an error");
            return Err(NambiError::UpstreamModel(details));
        }

        let parsed: GeminiResponse = serde_json::from_slice(&bytes)
            .map_err(|e| NambiError::UpstreamModel(format!("malformed Gemini response: {e}")))?;
        debug!(model_version = %parsed.modelVersion, "Gemini response received");

        parsed.text().ok_or_else(|| {
            let reason = parsed.block_reason().unwrap_or("no candidates returned");
            NambiError::UpstreamModel(format!("empty Gemini response: {reason}"))
        })
    }
}
