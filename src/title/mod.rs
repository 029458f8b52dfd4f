//! Song title extraction for each supported source.

mod tunein;
mod youtube;

use std::fmt;
use thiserror::Error;

pub use tunein::{extract_now_playing, NOW_PLAYING_SENTINEL};
pub use youtube::clean_youtube_title;

/// Search term for one lookup. Trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongTitle(String);

impl SongTitle {
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("No current song information available")]
    NoCurrentSong,
    #[error("No played song was found.")]
    UnsupportedSource,
    #[error("There was a problem with the script : {0}")]
    ScriptFailed(String),
}

/// Sites whose tabs carry enough information to find the playing song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSite {
    YouTube,
    TuneIn,
}

impl SourceSite {
    pub const ALL: [SourceSite; 2] = [SourceSite::YouTube, SourceSite::TuneIn];

    pub fn display_name(self) -> &'static str {
        match self {
            SourceSite::YouTube => "YouTube",
            SourceSite::TuneIn => "TuneIn Radio",
        }
    }
}

/// Which supported site, if any, a tab URL belongs to.
pub fn detect_source(url: &str) -> Option<SourceSite> {
    if url.contains("youtube.com") {
        Some(SourceSite::YouTube)
    } else if url.contains("tunein.com") {
        Some(SourceSite::TuneIn)
    } else {
        None
    }
}

/// Fallback for unsupported sites: whatever text the user selected in the page.
pub fn from_selection(selection: Option<&str>) -> Result<SongTitle, TitleError> {
    selection
        .and_then(SongTitle::new)
        .ok_or(TitleError::UnsupportedSource)
}
