//! Page script to popup messaging.
//!
//! Scripts injected into a page post JSON messages tagged by `action`. The
//! popup side decodes them and only reacts to the actions it knows.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum PageMessage {
    /// HTML of the TuneIn player, collected by the now-playing script.
    #[serde(rename = "getCurrentSong_tunein")]
    CurrentSongTuneIn { source: String },
}

/// Page side of the channel.
#[derive(Debug, Clone)]
pub struct MessageSender {
    tx: mpsc::Sender<String>,
}

impl MessageSender {
    pub async fn post(&self, message: &PageMessage) -> Result<()> {
        self.post_raw(serde_json::to_string(message)?).await
    }

    /// Post an already encoded message as is.
    pub async fn post_raw(&self, json: String) -> Result<()> {
        self.tx
            .send(json)
            .await
            .map_err(|_| anyhow!("popup is no longer listening"))
    }
}

/// Popup side of the channel.
#[derive(Debug)]
pub struct MessageReceiver {
    rx: mpsc::Receiver<String>,
}

impl MessageReceiver {
    /// Decode one raw message. Unknown actions and malformed payloads give `None`.
    pub fn accept_json(json: &str) -> Option<PageMessage> {
        match serde_json::from_str(json) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!("Ignoring page message: {e}");
                None
            }
        }
    }

    /// Wait for the now-playing HTML. `None` once every sender is gone.
    pub async fn current_song_source(&mut self) -> Option<String> {
        while let Some(json) = self.rx.recv().await {
            if let Some(PageMessage::CurrentSongTuneIn { source }) = Self::accept_json(&json) {
                return Some(source);
            }
        }
        None
    }
}

pub fn message_channel() -> (MessageSender, MessageReceiver) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    (MessageSender { tx }, MessageReceiver { rx })
}
