// Video id extraction from the URL shapes people actually paste.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Matches watch, youtu.be and shorts URLs, capturing the 11-char id.
fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/shorts/)([a-zA-Z0-9_-]{11})",
        )
        .expect("video URL pattern is valid")
    })
}

fn bare_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-zA-Z0-9_-]{11})$").expect("video id pattern is valid"))
}

/// Extract the video id from a YouTube URL or a bare 11-character id.
///
/// Leading/trailing whitespace is ignored. Returns `None` for anything else.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    [url_pattern(), bare_id_pattern()]
        .into_iter()
        .find_map(|re| re.captures(input))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
