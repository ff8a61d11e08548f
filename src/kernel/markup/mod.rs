//! Raw notes → platform Markdown → HTML preview.

pub mod detect;
pub mod links;
pub mod preview;
pub mod tags;
pub mod templates;

pub use detect::{auto_detect, detect_for, is_markdown_candidate};
pub use links::link_urls;
pub use preview::render_preview;
pub use tags::{to_markdown, ParsedBlock, Tag, TagParser};
pub use templates::Template;

/// Full conversion for one file: optional detection, then tag parsing.
pub fn convert(path: &str, raw: &str, auto_detect: bool) -> String {
    to_markdown(&detect_for(path, raw, auto_detect))
}
