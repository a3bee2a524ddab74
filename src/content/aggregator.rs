use crate::content::fetcher::PageFetcher;
use crate::error::NambiError;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Header line written before each page's text.
pub fn delimiter(url: &Url) -> String {
    format!("--- CONTENT FROM {url} ---")
}

/// Fetches a fixed, ordered list of pages into one corpus.
#[derive(Clone)]
pub struct ContentAggregator {
    fetcher: Arc<dyn PageFetcher>,
    urls: Vec<Url>,
}

impl ContentAggregator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, urls: Vec<Url>) -> Self {
        Self { fetcher, urls }
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    /// Fetch every page in order. A failed page is logged and skipped; it
    /// never aborts the batch and leaves no placeholder behind.
    pub async fn aggregate(&self) -> String {
        let mut outcomes: Vec<(&Url, Result<String, NambiError>)> =
            Vec::with_capacity(self.urls.len());
        for url in &self.urls {
            info!(url = %url, "fetching page");
            outcomes.push((url, self.fetcher.fetch_text(url).await));
        }

        let sections: Vec<String> = outcomes
            .into_iter()
            .filter_map(|(url, outcome)| {
                outcome
                    .inspect_err(|e| warn!(url = %url, error = %e, "failed to fetch page"))
                    .ok()
                    .map(|text| format!("{}\n{}", delimiter(url), text))
            })
            .collect();

        info!(
            fetcher = self.fetcher.name(),
            fetched = sections.len(),
            total = self.urls.len(),
            "site content aggregated"
        );
        sections.join("\n")
    }
}
