//! HTML preview of platform Markdown.
//!
//! Conversion itself is delegated to a [`MarkdownRenderer`]. The only work
//! done here is textual: closing fences that carry an `{{exec}}`/`{{copy}}`
//! marker are split so CommonMark closes the fence, and after rendering every
//! code element followed by a marker is unwrapped into a styled block.

use regex::Regex;
use std::sync::OnceLock;

use crate::kernel::services::ports::MarkdownRenderer;

pub const EXEC_BLOCK_CLASS: &str = "exec-block";
pub const COPY_BLOCK_CLASS: &str = "copy-block";

fn closing_fence_regex() -> &'static Regex {
    static RE_CLOSE: OnceLock<Regex> = OnceLock::new();
    RE_CLOSE.get_or_init(|| {
        Regex::new(r"(?m)^([ \t]*`{3,})[ \t]*(\{\{(?:exec|copy)\}\})[ \t]*$")
            .expect("valid closing fence regex")
    })
}

fn fenced_html_regex() -> &'static Regex {
    static RE_FENCED: OnceLock<Regex> = OnceLock::new();
    RE_FENCED.get_or_init(|| {
        Regex::new(r#"<pre><code(?: class="[^"]*")?>([^<]*)</code></pre>\s*<p>\{\{(exec|copy)\}\}</p>"#)
            .expect("valid fenced html regex")
    })
}

fn inline_html_regex() -> &'static Regex {
    static RE_INLINE: OnceLock<Regex> = OnceLock::new();
    RE_INLINE.get_or_init(|| {
        Regex::new(r"<code>([^<]*)</code>\s*\{\{(exec|copy)\}\}").expect("valid inline html regex")
    })
}

fn block_class(marker: &str) -> &'static str {
    if marker == "exec" {
        EXEC_BLOCK_CLASS
    } else {
        COPY_BLOCK_CLASS
    }
}

/// Moves trailing markers off closing fences onto their own line.
pub fn split_fence_markers(markdown: &str) -> String {
    closing_fence_regex()
        .replace_all(markdown, "${1}\n${2}")
        .into_owned()
}

/// Rewrites rendered code followed by a marker into styled containers.
pub fn decorate_blocks(html: &str) -> String {
    let fenced = fenced_html_regex().replace_all(html, |caps: &regex::Captures| {
        format!(
            r#"<div class="{}"><pre><code>{}</code></pre></div>"#,
            block_class(&caps[2]),
            &caps[1]
        )
    });
    inline_html_regex()
        .replace_all(&fenced, |caps: &regex::Captures| {
            format!(
                r#"<span class="{}"><code>{}</code></span>"#,
                block_class(&caps[2]),
                &caps[1]
            )
        })
        .into_owned()
}

pub fn render_preview(renderer: &dyn MarkdownRenderer, markdown: &str) -> String {
    let html = renderer.render(&split_fence_markers(markdown));
    decorate_blocks(&html)
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/markup/preview.rs"]
mod tests;
