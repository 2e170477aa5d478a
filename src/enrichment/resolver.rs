use async_trait::async_trait;
use reqwest::{Client, Proxy};
use scraper::{Html, Selector};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::IngestResult;
use crate::util::env::{env_opt, env_parse};

pub const DEFAULT_SEARCH_URL: &str =
    "https://www.transfermarkt.com/schnellsuche/ergebnis/schnellsuche";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SubjectKind {
    Team,
    Player,
}

impl SubjectKind {
    /// CSS class of the search-result block holding this subject's profile.
    pub fn marker_class(self) -> &'static str {
        match self {
            SubjectKind::Team => "vereinprofil_tooltip",
            SubjectKind::Player => "spielprofil_tooltip",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubjectKind::Team => "team",
            SubjectKind::Player => "player",
        }
    }
}

/// Outcome of one lookup. `NotFound` means the page was fetched and parsed
/// but carried no usable image; `Failed` means the page never arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoLookup {
    Found(String),
    NotFound,
    Failed(String),
}

impl PhotoLookup {
    pub fn url(&self) -> Option<&str> {
        match self {
            PhotoLookup::Found(url) => Some(url.as_str()),
            PhotoLookup::NotFound | PhotoLookup::Failed(_) => None,
        }
    }
}

impl fmt::Display for PhotoLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoLookup::Found(url) => write!(f, "found {url}"),
            PhotoLookup::NotFound => f.write_str("not found"),
            PhotoLookup::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Anything that can turn a display name into a photo lookup. Implementations
/// never error; every failure folds into `PhotoLookup`.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    async fn resolve_photo(&self, display_name: &str, kind: SubjectKind) -> PhotoLookup;
}

#[derive(Clone, Debug)]
pub struct ResolverConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub proxy: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout: Duration::from_secs(10),
            proxy: None,
        }
    }
}

impl ResolverConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_opt("RESOLVER_BASE_URL").unwrap_or(defaults.base_url),
            user_agent: env_opt("RESOLVER_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout: Duration::from_secs(env_parse("RESOLVER_TIMEOUT_SECS", 10u64)),
            proxy: env_opt("RESOLVER_PROXY"),
        }
    }
}

/// HTTP-backed profile photo lookup. Clones share one connection pool.
#[derive(Clone)]
pub struct ProfileResolver {
    http: Client,
    cfg: Arc<ResolverConfig>,
}

impl ProfileResolver {
    pub fn new(cfg: ResolverConfig) -> IngestResult<Self> {
        let mut builder = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.timeout);
        builder = match &cfg.proxy {
            Some(proxy) => builder.proxy(Proxy::all(proxy.as_str())?),
            None => builder.no_proxy(),
        };
        Ok(Self {
            http: builder.build()?,
            cfg: Arc::new(cfg),
        })
    }

    /// Search URL for a display name; the name goes in form-encoded.
    pub fn search_url(&self, display_name: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.cfg.base_url)?;
        url.query_pairs_mut().append_pair("query", display_name.trim());
        Ok(url)
    }

    async fn fetch_page(&self, display_name: &str) -> Result<String, String> {
        let url = self.search_url(display_name).map_err(|e| format!("bad search url: {e}"))?;
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| format!("request to {url} failed: {e}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("http {status} from {url}"));
        }
        resp.text()
            .await
            .map_err(|e| format!("reading body from {url} failed: {e}"))
    }
}

#[async_trait]
impl PhotoSource for ProfileResolver {
    async fn resolve_photo(&self, display_name: &str, kind: SubjectKind) -> PhotoLookup {
        let html = match self.fetch_page(display_name).await {
            Ok(html) => html,
            Err(reason) => {
                warn!(name = %display_name, kind = kind.as_str(), error = %reason, "photo lookup failed");
                return PhotoLookup::Failed(reason);
            }
        };
        match extract_photo_src(&html, kind.marker_class()) {
            Some(src) => {
                debug!(name = %display_name, kind = kind.as_str(), src = %src, "photo found");
                PhotoLookup::Found(src)
            }
            None => {
                warn!(name = %display_name, kind = kind.as_str(), "no profile photo in search results");
                PhotoLookup::NotFound
            }
        }
    }
}

/// `src` of the first `img` inside the first `div` carrying `marker_class`.
/// Only that first block is considered.
pub fn extract_photo_src(html: &str, marker_class: &str) -> Option<String> {
    let block_sel = Selector::parse(&format!("div.{marker_class}")).ok()?;
    let img_sel = Selector::parse("img").ok()?;
    let document = Html::parse_document(html);
    let block = document.select(&block_sel).next()?;
    let img = block.select(&img_sel).next()?;
    img.value()
        .attr("src")
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_string)
}
