//! Box drawing glyphs shared by the diagram and chain renderers

/// Glyphs for one class box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    /// Left end of a separator row
    pub t_right: char,
    /// Right end of a separator row
    pub t_left: char,
    /// Connector between chained boxes, pointing at the ancestor
    pub arrow_up: char,
}

impl BoxChars {
    /// The light box-drawing set every diagram is rendered with
    pub const fn light() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
            t_right: '├',
            t_left: '┤',
            arrow_up: '⇧',
        }
    }

    /// A horizontal rule of `width` glyphs between two end caps
    pub fn rule(&self, left: char, right: char, width: usize) -> String {
        let mut row = String::with_capacity((width + 2) * 3);
        row.push(left);
        row.extend(std::iter::repeat(self.horizontal).take(width));
        row.push(right);
        row
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::light()
    }
}
