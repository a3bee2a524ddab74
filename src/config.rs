use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "NAMBI_";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; NambiBot/1.0; +https://everything-ug.netlify.app/)";

/// Pages scraped into the grounding corpus, in delimiter order.
pub const DEFAULT_SITE_URLS: &[&str] = &[
    "https://everything-ug.netlify.app/",
    "https://everything-ug.netlify.app/facts",
    "https://everything-ug.netlify.app/culture",
    "https://everything-ug.netlify.app/top-cities/kampala",
    "https://everything-ug.netlify.app/religion",
    "https://everything-ug.netlify.app/travel-tips",
    "https://everything-ug.netlify.app/destinations",
    "https://everything-ug.netlify.app/activities",
    "https://everything-ug.netlify.app/about",
    "https://everything-ug.netlify.app/where-to-stay",
    "https://everything-ug.netlify.app/insights",
    "https://everything-ug.netlify.app/impact",
    "https://everything-ug.netlify.app/holiday-booking",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub content: ContentConfig,
    pub gemini: GeminiConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
}

/// How pages are turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Plain GET; only sees server-rendered markup.
    Http,
    /// Headless Chromium; sees what client-side scripts render.
    #[default]
    Browser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub site_urls: Vec<Url>,
    pub fetcher: FetcherKind,
    pub fetch_timeout_secs: u64,
    /// Per-page budget for the browser fetcher.
    pub render_timeout_secs: u64,
    /// Chromium binary; looked up on `PATH` when unset.
    pub chrome_executable: Option<PathBuf>,
    pub user_agent: String,
    /// Read when the scraped corpus comes back empty.
    pub fallback_path: PathBuf,
    /// Warm the cache in the background at startup instead of on first chat.
    pub preload: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Url,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Where the model points users when the corpus has no answer.
    pub fallback_url: String,
    pub booking_url: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:nambi.sqlite".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            site_urls: DEFAULT_SITE_URLS
                .iter()
                .filter_map(|u| Url::parse(u).ok())
                .collect(),
            fetcher: FetcherKind::default(),
            fetch_timeout_secs: 15,
            render_timeout_secs: 30,
            chrome_executable: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fallback_path: PathBuf::from("site_content.txt"),
            preload: true,
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            base_url: Url::parse("https://generativelanguage.googleapis.com/")
                .expect("static Gemini base URL is valid"),
            timeout_secs: 60,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            fallback_url: "https://everything-ug.netlify.app/".to_string(),
            booking_url: "https://everything-ug.netlify.app/holiday-booking".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `NAMBI_SECTION__KEY` env vars.
    /// A bare `GEMINI_API_KEY` is honoured last.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["GEMINI_API_KEY"])
                    .map(|_| "gemini.api_key".into()),
            )
    }
}

impl ContentConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

impl GeminiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
