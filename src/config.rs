use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub search_api_key: Option<String>,
    /// Custom search engine restricted to the lyrics site.
    pub search_engine_id: Option<String>,
    pub search_endpoint: String,
    pub cache_dir: Option<PathBuf>,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let search_api_key = non_empty_var("CHRYLICS_SEARCH_API_KEY");
        let search_engine_id = non_empty_var("CHRYLICS_SEARCH_ENGINE_ID");
        let search_endpoint = non_empty_var("CHRYLICS_SEARCH_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_SEARCH_ENDPOINT.to_string());
        let cache_dir = non_empty_var("CHRYLICS_CACHE_DIR").map(PathBuf::from);
        let http_timeout = non_empty_var("CHRYLICS_HTTP_TIMEOUT_SECS")
            .and_then(|secs| secs.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));

        Self {
            search_api_key,
            search_engine_id,
            search_endpoint,
            cache_dir,
            http_timeout,
        }
    }

    pub fn has_search_credentials(&self) -> bool {
        self.search_api_key.is_some() && self.search_engine_id.is_some()
    }

    /// API key and engine id, or an error naming what is missing.
    pub fn search_credentials(&self) -> Result<(&str, &str)> {
        match (&self.search_api_key, &self.search_engine_id) {
            (Some(key), Some(engine)) => Ok((key.as_str(), engine.as_str())),
            (None, _) => Err(anyhow!("CHRYLICS_SEARCH_API_KEY is not set")),
            (_, None) => Err(anyhow!("CHRYLICS_SEARCH_ENGINE_ID is not set")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_api_key: None,
            search_engine_id: None,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            cache_dir: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
