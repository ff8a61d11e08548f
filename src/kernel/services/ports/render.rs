/// Markdown to HTML conversion. Implementations must understand GFM tables,
/// lists and fenced code.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}
