pub mod config;
pub mod host;
pub mod lyrics;
pub mod messaging;
pub mod popup;
pub mod scrape;
pub mod title;
