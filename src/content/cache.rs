use crate::content::aggregator::ContentAggregator;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Loading,
    Loaded(Arc<str>),
}

/// Point-in-time view of the cache, used by diagnostics.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub loaded: bool,
    pub content: Arc<str>,
}

/// Process-lifetime holder of the scraped site corpus.
///
/// Loads at most once. The first caller to find the cache unloaded takes
/// `load_gate`, re-checks the state and spawns the aggregation as its own
/// task; callers only wait on that task's handle. A caller dropped mid-load
/// leaves the handle in the gate, so the next caller joins the same load and
/// the task still publishes `Loaded` with nobody waiting. An empty corpus is
/// stored like any other so a broken site does not turn every chat request
/// into a fresh scrape.
pub struct ContentCache {
    state: Arc<RwLock<CacheState>>,
    load_gate: Mutex<Option<JoinHandle<Arc<str>>>>,
    aggregator: Option<Arc<ContentAggregator>>,
}

impl ContentCache {
    pub fn new(aggregator: ContentAggregator) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::Empty)),
            load_gate: Mutex::new(None),
            aggregator: Some(Arc::new(aggregator)),
        }
    }

    /// A cache that is already `Loaded` and never fetches.
    pub fn preloaded(content: impl Into<Arc<str>>) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::Loaded(content.into()))),
            load_gate: Mutex::new(None),
            aggregator: None,
        }
    }

    pub fn url_count(&self) -> usize {
        self.aggregator.as_ref().map_or(0, |a| a.urls().len())
    }

    pub fn state(&self) -> CacheState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn loaded(&self) -> Option<Arc<str>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            CacheState::Loaded(content) => Some(content.clone()),
            _ => None,
        }
    }

    /// Current content without triggering a load; empty while unloaded.
    pub fn snapshot(&self) -> CacheSnapshot {
        match self.loaded() {
            Some(content) => CacheSnapshot {
                loaded: true,
                content,
            },
            None => CacheSnapshot {
                loaded: false,
                content: Arc::from(""),
            },
        }
    }

    pub async fn get_or_load(&self) -> Arc<str> {
        if let Some(content) = self.loaded() {
            return content;
        }

        let mut in_flight = self.load_gate.lock().await;
        if let Some(content) = self.loaded() {
            return content;
        }

        let load = in_flight.get_or_insert_with(|| self.spawn_load());
        let content = match load.await {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "website content load aborted; caching empty result");
                let empty: Arc<str> = Arc::from("");
                set_state(&self.state, CacheState::Loaded(empty.clone()));
                empty
            }
        };
        // a finished handle must not be polled again
        *in_flight = None;
        content
    }

    fn spawn_load(&self) -> JoinHandle<Arc<str>> {
        set_state(&self.state, CacheState::Loading);
        let state = self.state.clone();
        let aggregator = self.aggregator.clone();

        tokio::spawn(async move {
            let content: Arc<str> = match aggregator {
                Some(aggregator) => {
                    info!(urls = aggregator.urls().len(), "loading website content");
                    aggregator.aggregate().await.into()
                }
                None => Arc::from(""),
            };

            if content.is_empty() {
                warn!("website content load produced nothing; caching empty result");
            } else {
                info!(chars = content.len(), "website content loaded");
            }

            set_state(&state, CacheState::Loaded(content.clone()));
            content
        })
    }
}

fn set_state(state: &RwLock<CacheState>, next: CacheState) {
    *state.write().unwrap_or_else(PoisonError::into_inner) = next;
}
