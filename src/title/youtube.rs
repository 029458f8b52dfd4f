use regex::Regex;
use std::sync::LazyLock;

// Removed in this order, so " - YouTube" goes before the bare "YouTube"
const BRANDING: &[&str] = &[
    " - YouTube",
    "YouTube",
    "Youtube",
    "youtube",
    "[Music Video]",
    "Music Video",
    "lyrics",
    "Lyrics",
    "(Official Video)",
    "(OFFICIAL VIDEO)",
    "(official video)",
    "[Official Video]",
    "[OFFICIAL VIDEO]",
    "[official video]",
];

// Unread notification count the site prepends to the tab title, e.g. "(3) "
static NOTIFICATION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\(\d+\)(.*)$").unwrap());

fn strip_once(title: &str) -> String {
    let mut cleaned = title.to_string();
    for branding in BRANDING {
        cleaned = cleaned.replace(branding, "");
    }
    cleaned = cleaned.replace('"', "");

    let trimmed = cleaned.trim();
    match NOTIFICATION_PREFIX.captures(trimmed) {
        Some(captures) => captures[1].trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Reduce a YouTube tab title to the song name it advertises.
///
/// Applied until nothing changes, so cleaning an already clean title is a no-op.
/// The result may be empty when the title was nothing but branding.
pub fn clean_youtube_title(title: &str) -> String {
    let mut current = strip_once(title);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
