use tracing::{debug, info, warn};

use super::{KeyValueStore, LyricsClient, LyricsError, ScrapedLyrics, SearchRequest};
use crate::scrape::scrape_lyrics_page;
use crate::title::SongTitle;

/// Turns a song title into scraped lyrics: cached or searched page URL,
/// page fetch, marker scrape.
pub struct LyricsResolver<S> {
    client: LyricsClient,
    store: S,
}

impl<S: KeyValueStore> LyricsResolver<S> {
    pub fn new(client: LyricsClient, store: S) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn search_request(&self, title: &SongTitle) -> SearchRequest {
        self.client.search_request(title)
    }

    pub async fn resolve(&self, title: &SongTitle) -> Result<ScrapedLyrics, LyricsError> {
        let request = self.search_request(title);
        let page_url = self.lyrics_page_url(&request).await?;

        info!(title = title.as_str(), %page_url, "resolved lyrics page");

        let html = self.client.fetch_page(&page_url).await?;
        Ok(scrape_lyrics_page(&html))
    }

    /// Cached page URL for the request, or the top search result (which is then cached).
    async fn lyrics_page_url(&self, request: &SearchRequest) -> Result<String, LyricsError> {
        match self.store.get(request.as_str()) {
            Ok(Some(url)) => {
                debug!(%url, "search cache hit");
                return Ok(url);
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to read search cache: {e:#}"),
        }

        let url = self.client.search_first_link(request).await?;

        if let Err(e) = self.store.set(request.as_str(), &url) {
            warn!("Failed to cache search result: {e:#}");
        }

        Ok(url)
    }
}
