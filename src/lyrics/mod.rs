pub mod api;
pub mod resolver;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use resolver::LyricsResolver;
pub use api::{LyricsClient, SearchRequest};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Band, song and lyrics as cut out of a lyrics page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedLyrics {
    pub band_name: String,
    pub song_name: String,
    pub lyrics_html: String, // raw markup, `<br>` separated
}

/// Body of a custom search response. Only the fields we read are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub link: Option<String>,
}

impl SearchResponse {
    /// Link of the first item, if the response has one.
    ///
    /// `Err(NoSearchResults)` when `items` is missing or empty,
    /// `Err(NoLyricsFound)` when the first item carries no usable link.
    pub fn first_link(&self) -> Result<&str, LyricsError> {
        let first = self
            .items
            .as_ref()
            .and_then(|items| items.first())
            .ok_or(LyricsError::NoSearchResults)?;

        match first.link.as_deref() {
            Some(link) if !link.trim().is_empty() => Ok(link),
            _ => Err(LyricsError::NoLyricsFound),
        }
    }
}

/// Ways a lyrics lookup can end early. The messages are shown to the user as is.
#[derive(Debug, Error)]
pub enum LyricsError {
    #[error("Network error.")]
    SearchUnavailable(#[source] reqwest::Error),
    #[error("No response from Google search!")]
    NoSearchResults,
    #[error("Could not find lyrics for song.")]
    NoLyricsFound,
    #[error("Lyrics site error.")]
    LyricsSiteUnavailable(#[source] Option<reqwest::Error>),
}
