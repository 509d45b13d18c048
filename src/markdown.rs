//! Markdown Excerpts
//!
//! Flattens post content to plain text for card previews.

use pulldown_cmark::{Event, Parser, TagEnd};

/// Characters shown on a card before the ellipsis
pub const EXCERPT_CHARS: usize = 160;

/// Plain text of `markdown`, whitespace collapsed, cut to `max_chars`
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}
