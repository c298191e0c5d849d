//! Terminal colorization for rendered boxes
//!
//! Member text is colored while the box is built, through [`AnsiFormatter`],
//! so the layout is computed from the plain text. The frame is colored
//! afterwards by [`colorize_frame`].

use crossterm::style::{Color, Stylize};
use umlbox::{Access, BoxChars, Formatter};

/// Colors row elements with ANSI escape codes
///
/// - Access glyphs: green, yellow, blue or red from public to private
/// - Class names: bold
/// - Types: cyan
/// - Method names: yellow
/// - Field and parameter names: default (terminal color)
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiFormatter;

impl Formatter for AnsiFormatter {
    fn access(&self, access: Access) -> String {
        let color = match access {
            Access::Public => Color::Green,
            Access::Protected => Color::Yellow,
            Access::PackagePrivate => Color::Blue,
            Access::Private => Color::Red,
        };
        format!("{}", access.glyph().to_string().with(color))
    }

    fn type_name(&self, text: &str) -> String {
        format!("{}", text.to_string().with(Color::Cyan))
    }

    fn class_name(&self, text: &str) -> String {
        format!("{}", text.to_string().bold())
    }

    fn method_name(&self, text: &str) -> String {
        format!("{}", text.to_string().with(Color::Yellow))
    }
}

/// Color the box-drawing frame dark grey and the chain connectors magenta
pub fn colorize_frame(input: &str) -> String {
    let glyphs = BoxChars::light();
    let frame = [
        glyphs.top_left,
        glyphs.top_right,
        glyphs.bottom_left,
        glyphs.bottom_right,
        glyphs.horizontal,
        glyphs.vertical,
        glyphs.t_right,
        glyphs.t_left,
    ];

    let mut result = String::with_capacity(input.len() * 2); // Extra space for ANSI codes
    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        for c in line.chars() {
            if frame.contains(&c) {
                result.push_str(&format!("{}", c.to_string().with(Color::DarkGrey)));
            } else if c == glyphs.arrow_up {
                result.push_str(&format!("{}", c.to_string().with(Color::Magenta)));
            } else {
                result.push(c);
            }
        }
    }
    result
}
