use anyhow::Result;
use std::fmt;
use std::ops::Range;
use std::time::Duration;
use tracing::{debug, warn};
use urlencoding::encode;

use super::{LyricsError, SearchResponse};
use crate::config::Config;
use crate::title::SongTitle;

const USER_AGENT: &str = concat!("chrylics/", env!("CARGO_PKG_VERSION"));

/// Fully formed search URL for one song title.
///
/// Doubles as the cache key, so it must be a pure function of the title and
/// the configured search settings. `Display` and `Debug` mask the API key;
/// only `as_str` gives the URL that is actually sent.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    url: String,
    key: Range<usize>,
}

impl SearchRequest {
    pub fn new(endpoint: &str, api_key: &str, engine_id: &str, title: &SongTitle) -> Self {
        let prefix = format!("{endpoint}?key=");
        let key = encode(api_key);
        let key_range = prefix.len()..prefix.len() + key.len();
        let url = format!(
            "{prefix}{key}&cx={}&q={}&num=1",
            encode(engine_id),
            encode(title.as_str())
        );

        Self {
            url,
            key: key_range,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}***{}",
            &self.url[..self.key.start],
            &self.url[self.key.end..]
        )
    }
}

impl fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SearchRequest")
            .field(&format_args!("{self}"))
            .finish()
    }
}

/// HTTP side of a lookup: the custom search call and the lyrics page fetch.
#[derive(Clone)]
pub struct LyricsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl LyricsClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        })
    }

    /// Build a client from configuration. Fails when the search credentials are missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let (api_key, engine_id) = config.search_credentials()?;
        Self::new(&config.search_endpoint, api_key, engine_id, config.http_timeout)
    }

    pub fn search_request(&self, title: &SongTitle) -> SearchRequest {
        SearchRequest::new(&self.endpoint, &self.api_key, &self.engine_id, title)
    }

    /// Run the search and return the link of the top result.
    pub async fn search_first_link(&self, request: &SearchRequest) -> Result<String, LyricsError> {
        debug!(%request, "querying search endpoint");

        let response = self
            .client
            .get(request.as_str())
            .send()
            .await
            .map_err(|e| LyricsError::SearchUnavailable(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "search endpoint returned an error status");
            return Err(LyricsError::NoSearchResults);
        }

        let body = response
            .text()
            .await
            .map_err(|e| LyricsError::SearchUnavailable(e.without_url()))?;

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse search response: {e}");
            LyricsError::NoSearchResults
        })?;

        parsed.first_link().map(str::to_string)
    }

    /// Download a lyrics page as text.
    pub async fn fetch_page(&self, url: &str) -> Result<String, LyricsError> {
        debug!(url, "fetching lyrics page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LyricsError::LyricsSiteUnavailable(Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, url, "lyrics page returned an error status");
            return Err(LyricsError::LyricsSiteUnavailable(None));
        }

        response
            .text()
            .await
            .map_err(|e| LyricsError::LyricsSiteUnavailable(Some(e)))
    }
}
