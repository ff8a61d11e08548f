use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn url_regex() -> &'static Regex {
    static RE_URL: OnceLock<Regex> = OnceLock::new();
    RE_URL.get_or_init(|| {
        Regex::new(r"(?i)\b(?:https?|ftp|file)://[-A-Z0-9+&@#/%?=~_|!:,.;]*[-A-Z0-9+&@#/%=~_|]")
            .expect("valid url regex")
    })
}

/// Rewrites every bare URL into a Markdown link whose label is the URL.
pub fn link_urls(text: &str) -> Cow<'_, str> {
    url_regex().replace_all(text, "[${0}](${0})")
}
