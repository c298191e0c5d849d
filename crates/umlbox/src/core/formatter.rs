//! Output formatting hooks
//!
//! Every textual element of a member row passes through one of these hooks
//! before it lands in a [`Line`](super::Line). The plain text is kept for
//! width calculation, so a formatter may add markup or escape sequences
//! without disturbing the box layout.

use std::fmt::{Debug, Write as _};

use super::Access;

/// Text transform applied per element kind. Every hook defaults to identity.
pub trait Formatter: Debug + Send + Sync {
    fn access(&self, access: Access) -> String {
        access.glyph().to_string()
    }

    fn type_name(&self, text: &str) -> String {
        text.to_string()
    }

    fn class_name(&self, text: &str) -> String {
        text.to_string()
    }

    fn method_name(&self, text: &str) -> String {
        text.to_string()
    }

    fn parameter_name(&self, text: &str) -> String {
        text.to_string()
    }

    fn field_name(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Identity formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {}

/// Escapes markup-significant and non-ASCII characters as numeric entities
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Escape `"`, `'`, `<`, `>`, `&` and everything above U+007F as `&#N;`.
    pub fn escape(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if (c as u32) > 127 || matches!(c, '"' | '\'' | '<' | '>' | '&') {
                let _ = write!(out, "&#{};", c as u32);
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl Formatter for HtmlFormatter {
    fn access(&self, access: Access) -> String {
        Self::escape(&access.glyph().to_string())
    }

    fn type_name(&self, text: &str) -> String {
        Self::escape(text)
    }

    fn class_name(&self, text: &str) -> String {
        Self::escape(text)
    }

    fn method_name(&self, text: &str) -> String {
        Self::escape(text)
    }

    fn parameter_name(&self, text: &str) -> String {
        Self::escape(text)
    }

    fn field_name(&self, text: &str) -> String {
        Self::escape(text)
    }
}
