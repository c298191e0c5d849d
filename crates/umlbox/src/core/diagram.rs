//! Diagram entities and box rendering
//!
//! ```text
//! ┌──────────────────────────┐
//! │        Rectangle         │
//! ├──────────────────────────┤
//! │ - length: double         │
//! │ - width: double          │
//! ├──────────────────────────┤
//! │ + Rectangle()            │
//! │ + setWidth(double): void │
//! └──────────────────────────┘
//! ```

use std::fmt;

use tracing::{debug, span, warn, Level};

use super::text::{display_width, spaces};
use super::{BoxChars, DiagramError, Result};

/// One row of a diagram.
///
/// `width` is the visible width of `text`. It may be smaller than the byte
/// or char length when `text` carries markup added by a formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text { text: String, width: usize },
    Separator,
}

impl Line {
    pub fn new(text: impl Into<String>, width: usize) -> Self {
        Line::Text {
            text: text.into(),
            width,
        }
    }

    /// A line whose width is measured from the text itself
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = display_width(&text);
        Line::Text { text, width }
    }

    pub fn text(&self) -> &str {
        match self {
            Line::Text { text, .. } => text,
            Line::Separator => "",
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Line::Text { width, .. } => *width,
            Line::Separator => 0,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Line::Separator)
    }
}

/// A single class box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    class_name: Line,
    content: Vec<Line>,
    min_width: usize,
}

impl Diagram {
    /// Build from a flat line list whose first entry is the header.
    ///
    /// The minimum width covers every line, header included.
    pub fn new(mut lines: Vec<Line>) -> Self {
        let min_width = lines.iter().map(Line::width).max().unwrap_or(0);
        let class_name = if lines.is_empty() {
            Line::new(String::new(), 0)
        } else {
            lines.remove(0)
        };
        Self {
            class_name,
            content: lines,
            min_width,
        }
    }

    /// The header text as produced by the formatter
    pub fn class_name(&self) -> &str {
        self.class_name.text()
    }

    pub fn header(&self) -> &Line {
        &self.class_name
    }

    pub fn lines(&self) -> &[Line] {
        &self.content
    }

    pub fn min_width(&self) -> usize {
        self.min_width
    }

    /// Stack `ancestors` (root first) above this diagram
    pub fn chain_below(self, ancestors: Vec<Diagram>) -> ChainedDiagram {
        let mut diagrams = ancestors;
        diagrams.push(self);
        ChainedDiagram { diagrams }
    }

    /// Render the box `width` columns wide (never narrower than
    /// [`min_width`](Self::min_width)), every row indented by `left_padding`.
    pub fn render(&self, left_padding: usize, width: usize) -> String {
        let chars = BoxChars::light();
        let width = width.max(self.min_width);
        let indent = spaces(left_padding);

        let header_width = self.class_name.width();
        let (left, right) = if header_width > width {
            warn!(
                class_name = self.class_name(),
                header_width,
                width,
                "Class name is wider than the box"
            );
            (0, 0)
        } else {
            let slack = width - header_width;
            (slack / 2, slack - slack / 2)
        };

        let mut rows = Vec::with_capacity(self.content.len() + 3);
        rows.push(format!(
            "{}{}",
            indent,
            chars.rule(chars.top_left, chars.top_right, width)
        ));
        rows.push(format!(
            "{}{}{}{}{}{}",
            indent,
            chars.vertical,
            spaces(left),
            self.class_name.text(),
            spaces(right),
            chars.vertical
        ));
        for line in &self.content {
            let row = match line {
                Line::Separator => chars.rule(chars.t_right, chars.t_left, width),
                Line::Text { text, width: used } => format!(
                    "{}{}{}{}",
                    chars.vertical,
                    text,
                    spaces(width.saturating_sub(*used)),
                    chars.vertical
                ),
            };
            rows.push(format!("{}{}", indent, row));
        }
        rows.push(format!(
            "{}{}",
            indent,
            chars.rule(chars.bottom_left, chars.bottom_right, width)
        ));

        rows.join("\n")
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0, self.min_width))
    }
}

/// Diagrams stacked top to bottom, each pointing up at the one above it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedDiagram {
    diagrams: Vec<Diagram>,
}

impl ChainedDiagram {
    pub fn new(diagrams: Vec<Diagram>) -> Result<Self> {
        if diagrams.is_empty() {
            return Err(DiagramError::EmptyChain);
        }
        Ok(Self { diagrams })
    }

    pub fn diagrams(&self) -> &[Diagram] {
        &self.diagrams
    }

    pub fn min_width(&self) -> usize {
        self.diagrams.iter().map(Diagram::min_width).max().unwrap_or(0)
    }

    /// Each box keeps its own minimum width and is centred within the
    /// chain width; consecutive boxes are joined by a single arrow row at
    /// the chain's midpoint.
    pub fn render(&self, left_padding: usize, width: usize) -> String {
        let span = span!(Level::DEBUG, "chain", diagrams = self.diagrams.len());
        let _enter = span.enter();

        let chars = BoxChars::light();
        let width = width.max(self.min_width());
        let connector = format!("{}{}", spaces(left_padding + width / 2), chars.arrow_up);

        let mut out = String::new();
        for (i, diagram) in self.diagrams.iter().enumerate() {
            if i != 0 {
                out.push('\n');
                out.push_str(&connector);
                out.push('\n');
            }
            let pad = left_padding + (width - diagram.min_width()) / 2;
            out.push_str(&diagram.render(pad, diagram.min_width()));
        }

        debug!(width, "Rendered chain");
        out
    }
}

impl fmt::Display for ChainedDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0, self.min_width()))
    }
}

/// What the facade hands back: one box, or a box with its ancestors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Single(Diagram),
    Chained(ChainedDiagram),
}

impl Rendered {
    pub fn min_width(&self) -> usize {
        match self {
            Rendered::Single(d) => d.min_width(),
            Rendered::Chained(c) => c.min_width(),
        }
    }

    pub fn render(&self, left_padding: usize, width: usize) -> String {
        match self {
            Rendered::Single(d) => d.render(left_padding, width),
            Rendered::Chained(c) => c.render(left_padding, width),
        }
    }

    /// The subject's own box, which is the last one in a chain
    pub fn subject(&self) -> &Diagram {
        match self {
            Rendered::Single(d) => d,
            Rendered::Chained(c) => &c.diagrams[c.diagrams.len() - 1],
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0, self.min_width()))
    }
}
