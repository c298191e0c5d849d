//! Text measurement helpers

use unicode_width::UnicodeWidthStr;

/// Display width of plain text in terminal columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// `count` spaces
pub fn spaces(count: usize) -> String {
    " ".repeat(count)
}
