//! Placement primitives: Length, Unit, Edge, Placement.
//!
//! Notifications are positioned with CSS edge offsets (`top: 25px`,
//! `right: -100%`). These types carry those offsets around before they are
//! written into a node's inline style.

use std::fmt;

/// A CSS length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Logical pixels.
    Px,
    /// Percentage of the containing block.
    Percent,
}

/// A length with a unit, e.g. `25px` or `-100%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: Unit,
}

impl Length {
    /// Create a length in pixels.
    pub fn px(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    /// Create a length as a percentage.
    pub fn percent(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            Unit::Px => "px",
            Unit::Percent => "%",
        };
        if self.value.fract() == 0.0 {
            write!(f, "{}{suffix}", self.value as i64)
        } else {
            write!(f, "{}{suffix}", self.value)
        }
    }
}

/// One of the four box edges an offset can be anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// All edges in CSS shorthand order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// The CSS property name for this edge.
    pub fn property(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
        }
    }
}

/// A set of edge offsets. Unset edges are left untouched when applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub left: Option<Length>,
}

impl Placement {
    /// An empty placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset for `edge` (builder).
    pub fn with(mut self, edge: Edge, length: Length) -> Self {
        *self.slot(edge) = Some(length);
        self
    }

    /// The offset for `edge`, if set.
    pub fn get(&self, edge: Edge) -> Option<Length> {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    /// Iterate over the set edges in CSS shorthand order.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, Length)> + '_ {
        Edge::ALL
            .into_iter()
            .filter_map(|edge| self.get(edge).map(|len| (edge, len)))
    }

    /// Whether no edge is set.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn slot(&mut self, edge: Edge) -> &mut Option<Length> {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
        }
    }
}
