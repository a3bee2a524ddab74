//! Website content used as grounding for the chatbot.
//!
//! Layout:
//! - `fetcher.rs`: one URL to visible text, plain HTTP
//! - `browser.rs`: one URL to visible text via headless Chromium
//! - `aggregator.rs`: ordered list of URLs to one delimited corpus
//! - `cache.rs`: load-once holder shared by every request

pub mod aggregator;
pub mod browser;
pub mod cache;
pub mod fetcher;

pub use aggregator::ContentAggregator;
pub use cache::{CacheSnapshot, CacheState, ContentCache};
pub use browser::BrowserPageFetcher;
pub use fetcher::{HttpPageFetcher, PageFetcher, build_fetcher, extract_visible_text};
