use super::{SongTitle, TitleError};
use crate::scrape::extract_between;

const TITLE_MARKER: &str = "class=\"title\">";
const TITLE_END_MARKER: &str = "</";

/// Label the player shows when a station is on air without track metadata.
pub const NOW_PLAYING_SENTINEL: &str = "Live";

/// Pull the now-playing label out of the player's HTML.
pub fn extract_now_playing(html: &str) -> Result<SongTitle, TitleError> {
    let label = extract_between(html, TITLE_MARKER, TITLE_END_MARKER)
        .ok_or(TitleError::NoCurrentSong)?;

    if label.trim() == NOW_PLAYING_SENTINEL {
        return Err(TitleError::NoCurrentSong);
    }

    SongTitle::new(label).ok_or(TitleError::NoCurrentSong)
}
