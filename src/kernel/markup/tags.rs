//! Line-oriented tag grammar.
//!
//! Raw notes are scanned once, top to bottom. Lines starting with
//! `{{h1}}`, `{{h2}}`, `{{copy}}`, `{{exec}}`, `{{exec interrupt}}` or
//! `{{img}}` select a block kind; every other non-blank line becomes a bullet.
//! Code blocks greedily take the following lines verbatim until a blank line,
//! another tag line, or the end of input.

use regex::Regex;
use std::sync::OnceLock;

use super::links::link_urls;

pub const CODE_FENCE: &str = "````";
pub const EXEC_MARKER: &str = "{{exec}}";
pub const COPY_MARKER: &str = "{{copy}}";
pub const ASSET_PREFIX: &str = "/assets/";

fn tag_regex() -> &'static Regex {
    static RE_TAG: OnceLock<Regex> = OnceLock::new();
    RE_TAG.get_or_init(|| {
        Regex::new(r"(?i)^\{\{(h1|h2|copy|exec|exec interrupt|img)\}\}\s*(.*)$")
            .expect("valid tag regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    H1,
    H2,
    Copy,
    Exec,
    ExecInterrupt,
    Img,
}

impl Tag {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "h1" => Some(Tag::H1),
            "h2" => Some(Tag::H2),
            "copy" => Some(Tag::Copy),
            "exec" => Some(Tag::Exec),
            "exec interrupt" => Some(Tag::ExecInterrupt),
            "img" => Some(Tag::Img),
            _ => None,
        }
    }
}

/// Splits a tag line into its tag and the trimmed content after it.
pub fn match_tag(line: &str) -> Option<(Tag, &str)> {
    let caps = tag_regex().captures(line)?;
    let tag = Tag::from_keyword(caps.get(1)?.as_str())?;
    let content = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some((tag, content))
}

pub fn is_tag_line(line: &str) -> bool {
    tag_regex().is_match(line)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedBlock {
    Heading(u8, String),
    ExecBlock(Vec<String>, bool),
    CopyBlock(Vec<String>),
    Image {
        alt: String,
        title: String,
        path: String,
    },
    Bullet(String),
    Blank,
}

impl ParsedBlock {
    fn image(content: &str) -> Self {
        let parts: Vec<&str> = content.split('|').map(str::trim).collect();
        let pick = |idx: usize| parts.get(idx).copied().filter(|p| !p.is_empty());
        ParsedBlock::Image {
            alt: pick(0).unwrap_or("image").to_string(),
            title: pick(1).unwrap_or_default().to_string(),
            path: pick(2).unwrap_or(content).to_string(),
        }
    }

    /// Appends this block's Markdown to `out`.
    pub fn write_markdown(&self, out: &mut String) {
        match self {
            ParsedBlock::Heading(level, text) => {
                for _ in 0..*level {
                    out.push('#');
                }
                out.push(' ');
                out.push_str(&link_urls(text));
                out.push_str("\n\n");
            }
            ParsedBlock::ExecBlock(lines, interrupt) => {
                let info = if *interrupt { "bash interrupt" } else { "bash" };
                write_fenced(out, info, lines, EXEC_MARKER);
            }
            ParsedBlock::CopyBlock(lines) => write_fenced(out, "text", lines, COPY_MARKER),
            ParsedBlock::Image { alt, title, path } => {
                let file_name = path.rsplit('/').next().unwrap_or(path);
                out.push_str(&format!("![{alt}]({ASSET_PREFIX}{file_name}"));
                if !title.is_empty() {
                    out.push_str(&format!(" \"{title}\""));
                }
                out.push_str(")\n\n");
            }
            ParsedBlock::Bullet(text) => {
                out.push_str("* ");
                out.push_str(&link_urls(text));
                out.push('\n');
            }
            ParsedBlock::Blank => out.push('\n'),
        }
    }
}

fn write_fenced(out: &mut String, info: &str, lines: &[String], marker: &str) {
    out.push_str(CODE_FENCE);
    out.push_str(info);
    out.push('\n');
    out.push_str(&lines.join("\n"));
    out.push('\n');
    out.push_str(CODE_FENCE);
    out.push_str(marker);
    out.push_str("\n\n");
}

/// Single-pass block scanner. Empty code blocks are skipped rather than
/// yielded.
pub struct TagParser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> TagParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().collect(),
            pos: 0,
        }
    }

    fn take_block(&mut self, seed: &str) -> Vec<String> {
        let mut block = Vec::new();
        if !seed.is_empty() {
            block.push(seed.to_string());
        }
        let mut next = self.pos + 1;
        while let Some(line) = self.lines.get(next) {
            if line.trim().is_empty() || is_tag_line(line) {
                break;
            }
            block.push((*line).to_string());
            next += 1;
        }
        self.pos = next;
        block
    }
}

impl Iterator for TagParser<'_> {
    type Item = ParsedBlock;

    fn next(&mut self) -> Option<ParsedBlock> {
        while let Some(line) = self.lines.get(self.pos).copied() {
            let Some((tag, content)) = match_tag(line) else {
                self.pos += 1;
                let trimmed = line.trim();
                return Some(if trimmed.is_empty() {
                    ParsedBlock::Blank
                } else {
                    ParsedBlock::Bullet(trimmed.to_string())
                });
            };

            match tag {
                Tag::H1 | Tag::H2 => {
                    self.pos += 1;
                    let level = if tag == Tag::H1 { 1 } else { 2 };
                    return Some(ParsedBlock::Heading(level, content.to_string()));
                }
                Tag::Img => {
                    self.pos += 1;
                    return Some(ParsedBlock::image(content));
                }
                Tag::Copy | Tag::Exec | Tag::ExecInterrupt => {
                    let lines = self.take_block(content);
                    if lines.is_empty() {
                        continue;
                    }
                    return Some(match tag {
                        Tag::Copy => ParsedBlock::CopyBlock(lines),
                        _ => ParsedBlock::ExecBlock(lines, tag == Tag::ExecInterrupt),
                    });
                }
            }
        }
        None
    }
}

/// Converts raw notes into platform Markdown.
pub fn to_markdown(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for block in TagParser::new(input) {
        block.write_markdown(&mut out);
    }
    out.trim().to_string()
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/markup/tags.rs"]
mod tests;
