//! Video URL normalisation for embedding.
//!
//! Admins paste whatever link they have; players need the embeddable form.

use std::sync::LazyLock;

use regex::Regex;

static YOUTUBE_WATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/watch\?(?:.*&)?v=([A-Za-z0-9_-]+)").expect("valid regex")
});

static YOUTUBE_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]+)").expect("valid regex"));

static DRIVE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"drive\.google\.com/file/d/([A-Za-z0-9_-]+)").expect("valid regex")
});

/// Rewrite a YouTube or Google Drive link into its embeddable form.
///
/// Unrecognised URLs are returned unchanged.
pub fn embed_url(url: &str) -> String {
    if let Some(caps) = YOUTUBE_WATCH.captures(url) {
        return format!("https://www.youtube.com/embed/{}", &caps[1]);
    }
    if let Some(caps) = YOUTUBE_SHORT.captures(url) {
        return format!("https://www.youtube.com/embed/{}", &caps[1]);
    }
    if let Some(caps) = DRIVE_FILE.captures(url) {
        return format!("https://drive.google.com/file/d/{}/preview", &caps[1]);
    }
    url.to_string()
}
