use anyhow::Result;
use clap::Parser as _;

use chrylics::{
    config::Config,
    lyrics::{FileStore, KeyValueStore, LyricsClient, LyricsResolver, MemoryStore},
    popup,
};

mod args;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    let args = args::Args::parse();
    args.init_tracing_subscriber()?;

    let config = Config::from_env();
    if !config.has_search_credentials() {
        println!(
            "Set CHRYLICS_SEARCH_API_KEY and CHRYLICS_SEARCH_ENGINE_ID to a custom search engine restricted to azlyrics.com."
        );
        return Ok(());
    }

    let client = LyricsClient::from_config(&config)?;
    let store = open_store(&config, args.no_cache);
    let resolver = LyricsResolver::new(client, store);

    let view = popup::run_popup(&args.host(), &resolver, |status| eprintln!("{status}")).await;
    print!("{view}");

    Ok(())
}

fn open_store(config: &Config, no_cache: bool) -> Box<dyn KeyValueStore> {
    if no_cache {
        return Box::new(MemoryStore::new());
    }

    let store = match &config.cache_dir {
        Some(dir) => FileStore::with_dir(dir),
        None => FileStore::new(),
    };

    match store {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("Search cache disabled: {e:#}");
            Box::new(MemoryStore::new())
        }
    }
}
