use crate::config::ContentConfig;
use crate::content::fetcher::{PageFetcher, extract_visible_text};
use crate::error::NambiError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use url::Url;

/// Renders each page in headless Chromium and extracts text from the
/// resulting DOM, so client-rendered pages yield their real content.
///
/// The browser is launched on the first fetch and reused afterwards; a
/// failed launch fails that page like any other fetch error.
pub struct BrowserPageFetcher {
    browser: OnceCell<Browser>,
    render_timeout: Duration,
    user_agent: String,
    chrome_executable: Option<PathBuf>,
}

impl BrowserPageFetcher {
    pub fn new(cfg: &ContentConfig) -> Self {
        Self {
            browser: OnceCell::new(),
            render_timeout: cfg.render_timeout(),
            user_agent: cfg.user_agent.clone(),
            chrome_executable: cfg.chrome_executable.clone(),
        }
    }

    pub fn render_timeout(&self) -> Duration {
        self.render_timeout
    }

    fn launch_config(&self) -> Result<BrowserConfig, String> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={}", self.user_agent))
            .request_timeout(self.render_timeout);
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        builder.build()
    }

    async fn browser(&self) -> Result<&Browser, String> {
        self.browser
            .get_or_try_init(|| async {
                let (browser, mut handler) = Browser::launch(self.launch_config()?)
                    .await
                    .map_err(|e| format!("browser launch failed: {e}"))?;

                // the CDP connection only makes progress while its handler is polled
                tokio::spawn(async move {
                    while let Some(event) = handler.next().await {
                        if let Err(e) = event {
                            debug!(error = %e, "browser event error");
                        }
                    }
                });

                info!("headless browser launched");
                Ok(browser)
            })
            .await
    }
}

#[async_trait]
impl PageFetcher for BrowserPageFetcher {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, NambiError> {
        let fetch_err = |reason: String| NambiError::Fetch {
            url: url.to_string(),
            reason,
        };

        let browser = self.browser().await.map_err(fetch_err)?;
        let page = browser
            .new_page(url.as_str())
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let rendered = tokio::time::timeout(self.render_timeout, async {
            page.wait_for_navigation().await?;
            page.content().await
        })
        .await;

        if let Err(e) = page.close().await {
            debug!(url = %url, error = %e, "failed to close page");
        }

        let html = match rendered {
            Ok(Ok(html)) => html,
            Ok(Err(e)) => return Err(fetch_err(e.to_string())),
            Err(_) => {
                return Err(fetch_err(format!(
                    "render timed out after {}s",
                    self.render_timeout.as_secs()
                )));
            }
        };

        debug!(url = %url, bytes = html.len(), "page rendered");
        Ok(extract_visible_text(&html))
    }
}
