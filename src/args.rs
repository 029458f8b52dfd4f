use std::{fs::File, io, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chrylics::host::CliHost;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// URL of the tab playing music
    #[clap(long, short)]
    pub url: String,
    /// Title of the tab, as shown in the browser's title bar
    #[clap(long, short, default_value = "")]
    pub title: String,
    /// Saved HTML of the TuneIn player. Only used for tunein.com URLs.
    #[clap(long)]
    pub now_playing_html: Option<PathBuf>,
    /// Text selected in the page, used as the song title on unsupported sites
    #[clap(long, short)]
    pub selection: Option<String>,
    /// Do not read or write the on-disk search cache
    #[clap(long)]
    pub no_cache: bool,
    /// File to write the log to. If not specified, logs will be written to stderr.
    #[clap(long, short)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Build the tracing subscriber using parameters from the command line arguments
    pub fn init_tracing_subscriber(&self) -> Result<()> {
        let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());

        match self.log_file.as_ref() {
            None => builder.with_writer(io::stderr).init(),
            Some(f) => {
                let file = File::create(f)
                    .with_context(|| format!("Failed to open log file {}", f.display()))?;
                builder.with_writer(Mutex::new(file)).init();
            }
        }
        Ok(())
    }

    pub fn host(&self) -> CliHost {
        CliHost {
            url: self.url.clone(),
            title: self.title.clone(),
            selection: self.selection.clone(),
            now_playing_html: self.now_playing_html.clone(),
        }
    }
}
