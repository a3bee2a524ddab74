use crate::config::{ContentConfig, FetcherKind};
use crate::content::browser::BrowserPageFetcher;
use crate::error::NambiError;
use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Elements whose text never reaches the grounding corpus.
const HIDDEN_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "nav", "header", "footer",
];

/// Turns one URL into its visible text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str {
        "custom"
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, NambiError>;
}

/// The fetcher selected by `content.fetcher`.
pub fn build_fetcher(cfg: &ContentConfig) -> Result<Arc<dyn PageFetcher>, NambiError> {
    Ok(match cfg.fetcher {
        FetcherKind::Http => Arc::new(HttpPageFetcher::new(cfg)?),
        FetcherKind::Browser => Arc::new(BrowserPageFetcher::new(cfg)),
    })
}

/// Plain HTTP GET plus HTML stripping. Pages that only render client-side
/// come back with whatever the server ships in the initial document.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(cfg: &ContentConfig) -> Result<Self, NambiError> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(cfg.fetch_timeout())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, NambiError> {
        let fetch_err = |reason: String| NambiError::Fetch {
            url: url.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fetch_err(format!("unexpected status {status}")));
        }

        let html = resp.text().await.map_err(|e| fetch_err(e.to_string()))?;
        debug!(url = %url, bytes = html.len(), "page downloaded");
        Ok(extract_visible_text(&html))
    }
}

/// Strip markup and hidden sections, one trimmed line per text run.
/// Internal whitespace collapses to single spaces and empty lines are dropped.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        raw.push_str(text);
        raw.push('\n');
    }

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_chrome_and_scripts() {
        let html = r#"
            <html>
              <head><title>Everything Uganda</title><style>body { color: red; }</style></head>
              <body>
                <header>Site header</header>
                <nav><a href="/">Home</a></nav>
                <main>
                  <h1>Kampala</h1>
                  <p>Kampala is the capital.</p>
                </main>
                <script>console.log("tracking");</script>
                <footer>Copyright</footer>
              </body>
            </html>
        "#;

        let text = extract_visible_text(html);
        assert_eq!(text, "Kampala\nKampala is the capital.");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let html = "<body><p>  Lake \t Victoria\n\n\n   is   large  </p><div>   </div></body>";
        let text = extract_visible_text(html);
        assert_eq!(text, "Lake Victoria\nis large");
    }

    #[test]
    fn configured_kind_selects_the_fetcher() {
        let mut cfg = ContentConfig::default();
        assert_eq!(build_fetcher(&cfg).unwrap().name(), "browser");

        cfg.fetcher = FetcherKind::Http;
        assert_eq!(build_fetcher(&cfg).unwrap().name(), "http");
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert_eq!(extract_visible_text(""), "");
        assert_eq!(extract_visible_text("<script>var x = 1;</script>"), "");
    }
}
