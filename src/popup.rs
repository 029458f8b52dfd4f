//! The popup flow: find the playing song in the active tab, look up its
//! lyrics and describe what should be shown.

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::lyrics::{KeyValueStore, LyricsResolver, ScrapedLyrics};
use crate::messaging::{message_channel, MessageSender};
use crate::title::{
    clean_youtube_title, detect_source, extract_now_playing, from_selection, SongTitle,
    SourceSite, TitleError,
};

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTab {
    pub url: String,
    pub title: String,
}

/// What the popup can ask of the browser.
#[async_trait]
pub trait TabHost {
    fn active_tab(&self) -> ActiveTab;

    /// Text currently selected in the page, if any.
    async fn selected_text(&self) -> Option<String>;

    /// Run the now-playing script in the page. The script reports back
    /// through `outbox`.
    async fn inject_now_playing(&self, outbox: MessageSender) -> Result<()>;
}

/// Everything the popup displays. A field is shown exactly when it is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupView {
    pub status: Option<String>,
    pub band_name: Option<String>,
    pub song_name: Option<String>,
    pub search_string: Option<String>,
    pub lyrics_html: Option<String>,
    pub supported_sites: Option<Vec<&'static str>>,
}

impl PopupView {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn from_title_error(error: &TitleError) -> Self {
        let mut view = Self::with_status(error.to_string());
        if *error == TitleError::UnsupportedSource {
            view.supported_sites = Some(SourceSite::ALL.iter().map(|s| s.display_name()).collect());
        }
        view
    }

    pub fn found(title: &SongTitle, lyrics: ScrapedLyrics) -> Self {
        Self {
            status: None,
            band_name: Some(lyrics.band_name),
            song_name: Some(lyrics.song_name),
            search_string: Some(format!("Searched for: \"{title}\"")),
            lyrics_html: Some(lyrics.lyrics_html),
            supported_sites: None,
        }
    }
}

impl fmt::Display for PopupView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = &self.status {
            writeln!(f, "{status}")?;
        }
        if let Some(sites) = &self.supported_sites {
            writeln!(f, "Current supported sites: {}", sites.join(", "))?;
        }
        if let Some(band) = &self.band_name {
            writeln!(f, "{}", html_to_text(band))?;
        }
        if let Some(song) = &self.song_name {
            writeln!(f, "{}", html_to_text(song))?;
        }
        if let Some(search) = &self.search_string {
            writeln!(f, "{search}\n")?;
        }
        if let Some(lyrics) = &self.lyrics_html {
            writeln!(f, "{}", html_to_text(lyrics).trim())?;
        }
        Ok(())
    }
}

/// Plain text version of scraped markup for terminal output.
pub fn html_to_text(html: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(html, "\n");
    let without_tags = TAG.replace_all(&with_breaks, "");
    html_escape::decode_html_entities(&without_tags).into_owned()
}

pub fn searching_status(title: &SongTitle) -> String {
    format!("Searching for lyrics for {title}...")
}

/// Work out the song title for whatever site the tab is on.
pub async fn song_title<H: TabHost + ?Sized>(host: &H) -> Result<SongTitle, TitleError> {
    let tab = host.active_tab();

    match detect_source(&tab.url) {
        Some(SourceSite::YouTube) => {
            let cleaned = clean_youtube_title(&tab.title);
            info!(title = %cleaned, "cleaned YouTube title");
            SongTitle::new(cleaned).ok_or(TitleError::NoCurrentSong)
        }
        Some(SourceSite::TuneIn) => {
            let (outbox, mut inbox) = message_channel();
            host.inject_now_playing(outbox)
                .await
                .map_err(|e| TitleError::ScriptFailed(format!("{e:#}")))?;

            let source = inbox
                .current_song_source()
                .await
                .ok_or(TitleError::NoCurrentSong)?;
            extract_now_playing(&source)
        }
        None => from_selection(host.selected_text().await.as_deref()),
    }
}

/// Run one popup session. `report` receives interim status lines.
pub async fn run_popup<H, S>(
    host: &H,
    resolver: &LyricsResolver<S>,
    mut report: impl FnMut(&str),
) -> PopupView
where
    H: TabHost + ?Sized,
    S: KeyValueStore,
{
    let title = match song_title(host).await {
        Ok(title) => title,
        Err(e) => {
            info!("No song to look up: {e}");
            return PopupView::from_title_error(&e);
        }
    };

    report(&searching_status(&title));

    match resolver.resolve(&title).await {
        Ok(lyrics) => PopupView::found(&title, lyrics),
        Err(e) => {
            warn!(title = title.as_str(), "Lyrics lookup failed: {e:?}");
            PopupView::with_status(format!("Cannot display lyrics. {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::PageMessage;

    struct FakeHost {
        tab: ActiveTab,
        selection: Option<String>,
        page_source: Option<String>,
    }

    impl FakeHost {
        fn new(url: &str, title: &str) -> Self {
            Self {
                tab: ActiveTab {
                    url: url.to_string(),
                    title: title.to_string(),
                },
                selection: None,
                page_source: None,
            }
        }
    }

    #[async_trait]
    impl TabHost for FakeHost {
        fn active_tab(&self) -> ActiveTab {
            self.tab.clone()
        }

        async fn selected_text(&self) -> Option<String> {
            self.selection.clone()
        }

        async fn inject_now_playing(&self, outbox: MessageSender) -> Result<()> {
            match &self.page_source {
                Some(source) => {
                    outbox
                        .post(&PageMessage::CurrentSongTuneIn {
                            source: source.clone(),
                        })
                        .await
                }
                None => Err(anyhow::anyhow!("cannot access page")),
            }
        }
    }

    #[tokio::test]
    async fn test_song_title_youtube() {
        let host = FakeHost::new(
            "https://www.youtube.com/watch?v=abc",
            "(2) Artist - Song Title (Official Video) - YouTube",
        );
        assert_eq!(song_title(&host).await.unwrap().as_str(), "Artist - Song Title");
    }

    #[tokio::test]
    async fn test_song_title_youtube_without_song() {
        let host = FakeHost::new("https://www.youtube.com/", "YouTube");
        assert_eq!(song_title(&host).await, Err(TitleError::NoCurrentSong));
    }

    #[tokio::test]
    async fn test_song_title_tunein() {
        let mut host = FakeHost::new("https://tunein.com/radio/station/", "TuneIn");
        host.page_source = Some(r#"<div class="title">Massive Attack - Teardrop</div>"#.to_string());
        assert_eq!(
            song_title(&host).await.unwrap().as_str(),
            "Massive Attack - Teardrop"
        );
    }

    #[tokio::test]
    async fn test_song_title_tunein_live() {
        let mut host = FakeHost::new("https://tunein.com/radio/station/", "TuneIn");
        host.page_source = Some(r#"<div class="title">Live</div>"#.to_string());
        assert_eq!(song_title(&host).await, Err(TitleError::NoCurrentSong));
    }

    #[tokio::test]
    async fn test_song_title_tunein_script_failure() {
        let host = FakeHost::new("https://tunein.com/radio/station/", "TuneIn");
        assert_eq!(
            song_title(&host).await,
            Err(TitleError::ScriptFailed("cannot access page".to_string()))
        );
    }

    #[tokio::test]
    async fn test_song_title_selection() {
        let mut host = FakeHost::new("https://example.com/blog", "Blog");
        host.selection = Some("  Portishead - Glory Box ".to_string());
        assert_eq!(
            song_title(&host).await.unwrap().as_str(),
            "Portishead - Glory Box"
        );
    }

    #[tokio::test]
    async fn test_song_title_unsupported() {
        let host = FakeHost::new("https://example.com/blog", "Blog");
        assert_eq!(song_title(&host).await, Err(TitleError::UnsupportedSource));
    }

    #[test]
    fn test_view_for_unsupported_source() {
        let view = PopupView::from_title_error(&TitleError::UnsupportedSource);
        assert_eq!(view.status.as_deref(), Some("No played song was found."));
        assert_eq!(view.supported_sites, Some(vec!["YouTube", "TuneIn Radio"]));
        assert!(view.lyrics_html.is_none());
    }

    #[test]
    fn test_view_for_no_current_song() {
        let view = PopupView::from_title_error(&TitleError::NoCurrentSong);
        assert_eq!(
            view.status.as_deref(),
            Some("No current song information available")
        );
        assert!(view.supported_sites.is_none());
    }

    #[test]
    fn test_view_found() {
        let title = SongTitle::new("Artist - Song").unwrap();
        let view = PopupView::found(
            &title,
            ScrapedLyrics {
                band_name: "Artist".to_string(),
                song_name: "Song".to_string(),
                lyrics_html: "la la<br>\nla".to_string(),
            },
        );
        assert!(view.status.is_none());
        assert_eq!(view.search_string.as_deref(), Some("Searched for: \"Artist - Song\""));
        assert_eq!(
            view.to_string(),
            "Artist\nSong\nSearched for: \"Artist - Song\"\n\nla la\n\nla\n"
        );
    }

    #[test]
    fn test_html_to_text() {
        assert_eq!(html_to_text("one<br>two<BR/>three"), "one\ntwo\nthree");
        assert_eq!(html_to_text("<i>[Chorus]</i>"), "[Chorus]");
        assert_eq!(html_to_text("Rock &amp; Roll &quot;Now&quot;"), "Rock & Roll \"Now\"");
    }

    #[test]
    fn test_searching_status() {
        let title = SongTitle::new("Artist - Song").unwrap();
        assert_eq!(searching_status(&title), "Searching for lyrics for Artist - Song...");
    }
}
