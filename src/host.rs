//! A [`TabHost`] backed by command line input instead of a browser.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::messaging::{MessageSender, PageMessage};
use crate::popup::{ActiveTab, TabHost};

#[derive(Debug, Clone, Default)]
pub struct CliHost {
    pub url: String,
    pub title: String,
    pub selection: Option<String>,
    /// Saved HTML of the TuneIn player, standing in for the injected script.
    pub now_playing_html: Option<PathBuf>,
}

#[async_trait]
impl TabHost for CliHost {
    fn active_tab(&self) -> ActiveTab {
        ActiveTab {
            url: self.url.clone(),
            title: self.title.clone(),
        }
    }

    async fn selected_text(&self) -> Option<String> {
        self.selection.clone()
    }

    async fn inject_now_playing(&self, outbox: MessageSender) -> Result<()> {
        let path = self
            .now_playing_html
            .as_ref()
            .ok_or_else(|| anyhow!("no player HTML given, pass --now-playing-html"))?;

        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!(path = %path.display(), bytes = source.len(), "posting player HTML");

        outbox.post(&PageMessage::CurrentSongTuneIn { source }).await
    }
}
