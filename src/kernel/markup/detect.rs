//! Best-effort tag inference for unmarked notes.
//!
//! Existing code (fenced blocks and inline spans) is swapped for placeholder
//! tokens before any rule runs and restored afterwards, so detection never
//! rewrites code. The three line rules run in a fixed order, each over the
//! output of the previous one.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

use super::tags::{is_tag_line, COPY_MARKER, EXEC_MARKER};
use crate::models::path_key;

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';
const HEADING_MAX_WORDS: usize = 8;
const HEADING_MAX_CHARS: usize = 60;

fn inline_code_regex() -> &'static Regex {
    static RE_INLINE: OnceLock<Regex> = OnceLock::new();
    RE_INLINE.get_or_init(|| Regex::new(r"`[^`\n]+`").expect("valid inline code regex"))
}

fn placeholder_regex() -> &'static Regex {
    static RE_PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    RE_PLACEHOLDER
        .get_or_init(|| Regex::new("\u{E000}(\\d+)\u{E001}").expect("valid placeholder regex"))
}

fn list_marker_regex() -> &'static Regex {
    static RE_LIST: OnceLock<Regex> = OnceLock::new();
    RE_LIST.get_or_init(|| Regex::new(r"(?m)^\s*(?:[-+*]|\d+\.)\s").expect("valid list regex"))
}

/// Whether a file should go through detection at all.
pub fn is_markdown_candidate(path: &str, content: &str) -> bool {
    match path_key::extension(path_key::name(path)).map(str::to_ascii_lowercase) {
        Some(ext) if ext == "md" => true,
        Some(ext) if ext == "json" || ext == "sh" => false,
        _ => has_markdown_signals(content),
    }
}

fn has_markdown_signals(content: &str) -> bool {
    content.contains('#')
        || content.contains("```")
        || content.contains('*')
        || content.contains('[')
        || content.contains('|')
        || list_marker_regex().is_match(content)
}

/// Runs detection when enabled and applicable, borrowing the input otherwise.
pub fn detect_for<'a>(path: &str, content: &'a str, enabled: bool) -> Cow<'a, str> {
    if enabled && is_markdown_candidate(path, content) {
        Cow::Owned(auto_detect(content))
    } else {
        Cow::Borrowed(content)
    }
}

pub fn auto_detect(content: &str) -> String {
    let mut stash = CodeStash::default();
    let protected = stash.protect(content);

    let mut lines: Vec<String> = protected.lines().map(str::to_string).collect();
    let headings: Vec<bool> = (0..lines.len())
        .map(|idx| is_standalone_heading(&lines, idx))
        .collect();
    for (line, is_heading) in lines.iter_mut().zip(headings) {
        if is_heading {
            *line = format!("{{{{h1}}}} {line}");
        }
    }
    for line in lines.iter_mut() {
        if let Some(rewritten) = prompt_to_exec(line) {
            *line = rewritten;
        }
    }
    for line in lines.iter_mut() {
        if let Some(rewritten) = indented_to_copy(line) {
            *line = rewritten;
        }
    }

    let mut out = stash.restore(&lines.join("\n"));
    if content.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn is_untouchable(line: &str) -> bool {
    line.contains(PLACEHOLDER_OPEN) || line.contains('`') || is_tag_line(line)
}

fn is_blank_at(lines: &[String], idx: Option<usize>) -> bool {
    idx.and_then(|i| lines.get(i))
        .map_or(true, |line| line.trim().is_empty())
}

fn is_standalone_heading(lines: &[String], idx: usize) -> bool {
    let line = &lines[idx];
    if is_untouchable(line) || !line.chars().next().is_some_and(char::is_uppercase) {
        return false;
    }
    if line.chars().count() > HEADING_MAX_CHARS
        || line.unicode_words().count() > HEADING_MAX_WORDS
        || line.contains(['.', '!', '?', ':', ';', ','])
    {
        return false;
    }
    is_blank_at(lines, idx.checked_sub(1)) && is_blank_at(lines, Some(idx + 1))
}

fn prompt_to_exec(line: &str) -> Option<String> {
    if is_untouchable(line) {
        return None;
    }
    let rest = line.trim_start().strip_prefix(['$', '>'])?.trim();
    if rest.is_empty() {
        return None;
    }
    Some(format!("`{rest}`{EXEC_MARKER}"))
}

fn indented_to_copy(line: &str) -> Option<String> {
    if is_untouchable(line) || !(line.starts_with("    ") || line.starts_with('\t')) {
        return None;
    }
    let code = line.trim();
    if code.is_empty() {
        return None;
    }
    Some(format!("`{code}`{COPY_MARKER}"))
}

/// Holds the code spans removed before detection.
#[derive(Default)]
struct CodeStash {
    spans: Vec<String>,
}

impl CodeStash {
    fn token(&mut self, original: String) -> String {
        let token = format!("{PLACEHOLDER_OPEN}{}{PLACEHOLDER_CLOSE}", self.spans.len());
        self.spans.push(original);
        token
    }

    fn protect(&mut self, content: &str) -> String {
        let fenced = self.protect_fences(content);
        inline_code_regex()
            .replace_all(&fenced, |caps: &regex::Captures| self.token(caps[0].to_string()))
            .into_owned()
    }

    /// Collapses each fenced block (opening fence through its closing fence)
    /// into one placeholder line. An unterminated fence runs to the end.
    fn protect_fences(&mut self, content: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut open: Option<(usize, Vec<&str>)> = None;

        for line in content.lines() {
            let ticks = fence_len(line);
            if let Some((width, block)) = open.as_mut() {
                block.push(line);
                if ticks >= *width {
                    if let Some((_, block)) = open.take() {
                        out.push(self.token(block.join("\n")));
                    }
                }
            } else if ticks >= 3 {
                open = Some((ticks, vec![line]));
            } else {
                out.push(line.to_string());
            }
        }
        if let Some((_, block)) = open {
            out.push(self.token(block.join("\n")));
        }
        out.join("\n")
    }

    fn restore(&self, text: &str) -> String {
        placeholder_regex()
            .replace_all(text, |caps: &regex::Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.spans.get(idx))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

fn fence_len(line: &str) -> usize {
    line.trim_start().chars().take_while(|c| *c == '`').count()
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/markup/detect.rs"]
mod tests;
