//! Border styles and definitions.

use bytes::Bytes;

use super::key::KeyWriter;
use super::slot::IndexSlot;
use crate::common::Color;

/// Border line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BorderStyle {
    #[default]
    None = 0,
    Thin = 1,
    Medium = 2,
    Dashed = 3,
    Dotted = 4,
    Thick = 5,
    Double = 6,
    Hair = 7,
    MediumDashed = 8,
    DashDot = 9,
    MediumDashDot = 10,
    DashDotDot = 11,
    MediumDashDotDot = 12,
    SlantDashDot = 13,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Thin => "thin",
            Self::Medium => "medium",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Thick => "thick",
            Self::Double => "double",
            Self::Hair => "hair",
            Self::MediumDashed => "mediumDashed",
            Self::DashDot => "dashDot",
            Self::MediumDashDot => "mediumDashDot",
            Self::DashDotDot => "dashDotDot",
            Self::MediumDashDotDot => "mediumDashDotDot",
            Self::SlantDashDot => "slantDashDot",
        }
    }
}

/// Which diagonals of the cell are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DiagonalBorderType {
    #[default]
    None = 0,
    Up = 1,
    Down = 2,
    Both = 3,
}

/// A side of the cell that can carry a border line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderEdge {
    Left,
    Right,
    Top,
    Bottom,
    Diagonal,
}

impl BorderEdge {
    /// The four outer edges, in the order the setters for "all edges" apply them.
    pub const OUTER: [BorderEdge; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Element name in the `border` record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Diagonal => "diagonal",
        }
    }
}

/// Line style and color of a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderLine {
    pub style: BorderStyle,
    pub color: Option<Color>,
}

/// Border information for a cell.
///
/// Defines the borders on all four sides of a cell plus the diagonals.
/// Borders form their own shared table, so a border carries the index the
/// style registry assigned to it.
#[derive(Debug, Clone, Default)]
pub struct Border {
    left: BorderLine,
    right: BorderLine,
    top: BorderLine,
    bottom: BorderLine,
    diagonal: BorderLine,
    diagonal_type: DiagonalBorderType,
    dirty: bool,
    slot: IndexSlot,
}

impl Border {
    /// Create a new empty border (no borders on any side).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn line(&self, edge: BorderEdge) -> &BorderLine {
        match edge {
            BorderEdge::Left => &self.left,
            BorderEdge::Right => &self.right,
            BorderEdge::Top => &self.top,
            BorderEdge::Bottom => &self.bottom,
            BorderEdge::Diagonal => &self.diagonal,
        }
    }

    #[inline]
    fn line_mut(&mut self, edge: BorderEdge) -> &mut BorderLine {
        self.dirty = true;
        self.slot.invalidate();
        match edge {
            BorderEdge::Left => &mut self.left,
            BorderEdge::Right => &mut self.right,
            BorderEdge::Top => &mut self.top,
            BorderEdge::Bottom => &mut self.bottom,
            BorderEdge::Diagonal => &mut self.diagonal,
        }
    }

    /// Line style of `edge`.
    #[inline]
    pub fn style(&self, edge: BorderEdge) -> BorderStyle {
        self.line(edge).style
    }

    pub fn set_style(&mut self, edge: BorderEdge, style: BorderStyle) {
        self.line_mut(edge).style = style;
    }

    /// Line color of `edge`; `None` is automatic.
    #[inline]
    pub fn color(&self, edge: BorderEdge) -> Option<Color> {
        self.line(edge).color
    }

    pub fn set_color(&mut self, edge: BorderEdge, color: Option<Color>) {
        self.line_mut(edge).color = color;
    }

    #[inline]
    pub fn diagonal_type(&self) -> DiagonalBorderType {
        self.diagonal_type
    }

    pub fn set_diagonal_type(&mut self, diagonal_type: DiagonalBorderType) {
        self.diagonal_type = diagonal_type;
        self.dirty = true;
        self.slot.invalidate();
    }

    /// Check if this border has any visible borders.
    #[inline]
    pub fn has_borders(&self) -> bool {
        [self.left, self.right, self.top, self.bottom, self.diagonal]
            .iter()
            .any(|line| line.style != BorderStyle::None)
    }

    /// Canonical key over every edge, in left, right, top, bottom, diagonal order.
    pub fn key(&self) -> Bytes {
        let mut w = KeyWriter::with_capacity(64);
        for line in [&self.left, &self.right, &self.top, &self.bottom, &self.diagonal] {
            w.variant(line.style as u8).color(line.color);
        }
        w.variant(self.diagonal_type as u8);
        w.finish()
    }

    /// Index in the shared border table, if one was ever assigned.
    #[inline]
    pub fn index(&self) -> Option<u32> {
        self.slot.get()
    }

    /// Record the border table index assigned by the style registry.
    #[inline]
    pub fn set_index(&mut self, index: u32) {
        self.slot.assign(index);
    }

    /// Whether [`Border::index`] was assigned against the current edges.
    #[inline]
    pub fn index_valid(&self) -> bool {
        self.slot.is_assigned()
    }

    #[inline]
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_independent() {
        let mut border = Border::new();
        border.set_style(BorderEdge::Top, BorderStyle::Thick);
        border.set_color(BorderEdge::Top, Some(Color::rgb(0, 0, 255)));

        assert_eq!(border.style(BorderEdge::Top), BorderStyle::Thick);
        assert_eq!(border.style(BorderEdge::Bottom), BorderStyle::None);
        assert_eq!(border.color(BorderEdge::Left), None);
        assert!(border.has_borders());
        assert!(border.is_dirty());
    }

    #[test]
    fn test_key_distinguishes_edges() {
        let mut keys = Vec::new();
        for edge in [
            BorderEdge::Left,
            BorderEdge::Right,
            BorderEdge::Top,
            BorderEdge::Bottom,
            BorderEdge::Diagonal,
        ] {
            let mut border = Border::new();
            border.set_style(edge, BorderStyle::Thin);
            keys.push(border.key());

            let mut border = Border::new();
            border.set_color(edge, Some(Color::rgb(1, 1, 1)));
            keys.push(border.key());
        }
        let mut diagonal = Border::new();
        diagonal.set_diagonal_type(DiagonalBorderType::Both);
        keys.push(diagonal.key());
        keys.push(Border::new().key());

        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_index_dropped_on_change() {
        let mut border = Border::new();
        border.set_index(2);
        assert!(border.index_valid());
        border.set_diagonal_type(DiagonalBorderType::Up);
        assert!(!border.index_valid());
    }

    #[test]
    fn test_style_names() {
        assert_eq!(BorderStyle::MediumDashDotDot.as_str(), "mediumDashDotDot");
        assert_eq!(BorderEdge::Diagonal.as_str(), "diagonal");
    }
}
