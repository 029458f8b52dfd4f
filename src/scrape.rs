//! Marker based substring extraction.
//!
//! Pages are never parsed structurally. A [`MarkerCursor`] walks forward
//! through the text, taking whatever sits between two literal anchors.

use crate::lyrics::ScrapedLyrics;

const BAND_BLOCK_MARKER: &str = "<div class=\"lyricsh\">";
const BOLD_OPEN: &str = "<b>";
const BOLD_CLOSE: &str = "</b>";
const LYRICS_START_MARKER: &str = "Sorry about that. -->";
const LYRICS_END_MARKER: &str = "</div>";

/// Forward-only cursor over a text body.
#[derive(Debug, Clone)]
pub struct MarkerCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> MarkerCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move past the next occurrence of `marker`.
    ///
    /// Returns `false` and leaves the cursor untouched when the marker is absent.
    pub fn skip_past(&mut self, marker: &str) -> bool {
        match self.text[self.pos..].find(marker) {
            Some(offset) => {
                self.pos += offset + marker.len();
                true
            }
            None => false,
        }
    }

    /// Take the text between the next `start` marker and the `end` marker that
    /// follows it, leaving the cursor on the `end` marker.
    ///
    /// A missing marker yields an empty string and does not move the cursor.
    pub fn take_between(&mut self, start: &str, end: &str) -> String {
        let rest = &self.text[self.pos..];
        let Some(start_offset) = rest.find(start) else {
            return String::new();
        };
        let content_start = start_offset + start.len();
        let Some(len) = rest[content_start..].find(end) else {
            return String::new();
        };

        self.pos += content_start + len;
        rest[content_start..content_start + len].to_string()
    }
}

/// Take the text between the first `start` marker and the `end` marker after it.
pub fn extract_between(text: &str, start: &str, end: &str) -> Option<String> {
    let content_start = text.find(start)? + start.len();
    let len = text[content_start..].find(end)?;
    Some(text[content_start..content_start + len].to_string())
}

/// Scrape band name, song name and lyrics out of a lyrics page.
///
/// The three fields are located in order. Each missing marker leaves its field
/// empty; later fields are still searched for from wherever the cursor stopped.
pub fn scrape_lyrics_page(html: &str) -> ScrapedLyrics {
    let mut cursor = MarkerCursor::new(html);

    cursor.skip_past(BAND_BLOCK_MARKER);
    let band_name = cursor.take_between(BOLD_OPEN, BOLD_CLOSE);
    let song_name = cursor.take_between(BOLD_OPEN, BOLD_CLOSE);
    let lyrics_html = cursor.take_between(LYRICS_START_MARKER, LYRICS_END_MARKER);

    ScrapedLyrics {
        band_name,
        song_name,
        lyrics_html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<div class="ringtone">ads</div>
<div class="lyricsh">
<h2><b>Artist Lyrics</b></h2>
</div>
<div class="col-xs-12"><b>"Song Title"</b>
<div>
<!-- Usage of azlyrics.com content by any third-party lyrics provider is prohibited by our licensing agreement. Sorry about that. -->
First line<br>
Second line<br>
</div>
</body></html>"#;

    #[test]
    fn test_take_between_advances_cursor() {
        let mut cursor = MarkerCursor::new("<b>one</b> <b>two</b>");
        assert_eq!(cursor.take_between("<b>", "</b>"), "one");
        assert_eq!(cursor.take_between("<b>", "</b>"), "two");
        assert_eq!(cursor.take_between("<b>", "</b>"), "");
    }

    #[test]
    fn test_take_between_missing_start() {
        let mut cursor = MarkerCursor::new("no markers here");
        assert_eq!(cursor.take_between("<b>", "</b>"), "");
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_take_between_missing_end() {
        let mut cursor = MarkerCursor::new("<b>unterminated");
        assert_eq!(cursor.take_between("<b>", "</b>"), "");
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_skip_past() {
        let mut cursor = MarkerCursor::new("abc<b>x</b>");
        assert!(cursor.skip_past("abc"));
        assert_eq!(cursor.position(), 3);
        assert!(!cursor.skip_past("zzz"));
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_extract_between() {
        assert_eq!(
            extract_between("x class=\"title\">Song</span>", "class=\"title\">", "</"),
            Some("Song".to_string())
        );
        assert_eq!(extract_between("nothing", "class=\"title\">", "</"), None);
        assert_eq!(extract_between("class=\"title\">open", "class=\"title\">", "</"), None);
    }

    #[test]
    fn test_scrape_lyrics_page() {
        let scraped = scrape_lyrics_page(PAGE);
        assert_eq!(scraped.band_name, "Artist Lyrics");
        assert_eq!(scraped.song_name, "\"Song Title\"");
        assert_eq!(scraped.lyrics_html, "\nFirst line<br>\nSecond line<br>\n");
    }

    #[test]
    fn test_scrape_without_lyrics_marker() {
        let html = r#"<div class="lyricsh"><b>Band</b></div><b>Song</b><div>words</div>"#;
        let scraped = scrape_lyrics_page(html);
        assert_eq!(scraped.band_name, "Band");
        assert_eq!(scraped.song_name, "Song");
        assert_eq!(scraped.lyrics_html, "");
    }

    #[test]
    fn test_scrape_empty_page() {
        let scraped = scrape_lyrics_page("");
        assert!(scraped.band_name.is_empty());
        assert!(scraped.song_name.is_empty());
        assert!(scraped.lyrics_html.is_empty());
    }

    #[test]
    fn test_scrape_non_ascii() {
        let html = "<div class=\"lyricsh\"><b>Sigur Rós</b><b>Hoppípolla</b>Sorry about that. -->Brosandi</div>";
        let scraped = scrape_lyrics_page(html);
        assert_eq!(scraped.band_name, "Sigur Rós");
        assert_eq!(scraped.song_name, "Hoppípolla");
        assert_eq!(scraped.lyrics_html, "Brosandi");
    }
}
