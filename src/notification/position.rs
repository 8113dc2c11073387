//! Corner placement for the enter transition.
//!
//! A toast starts pushed off the screen along its horizontal edge and slides
//! in once the deferred show task runs. Both placements are pure functions of
//! the corner and the margin.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ToastError};
use crate::geometry::{Edge, Length, Placement};

/// Margin between a resting toast and the screen edges, in pixels.
pub const DEFAULT_MARGIN: f32 = 25.0;

/// One of the four screen corners a toast can rest in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Corner {
    /// All corners.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The kebab-case name (`bottom-right`).
    pub fn name(self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }

    /// The vertical edge the toast rests against.
    pub fn vertical_edge(self) -> Edge {
        match self {
            Corner::TopLeft | Corner::TopRight => Edge::Top,
            Corner::BottomLeft | Corner::BottomRight => Edge::Bottom,
        }
    }

    /// The horizontal edge the toast rests against and slides in from.
    pub fn horizontal_edge(self) -> Edge {
        match self {
            Corner::TopLeft | Corner::BottomLeft => Edge::Left,
            Corner::TopRight | Corner::BottomRight => Edge::Right,
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Corner {
    type Err = ToastError;

    fn from_str(s: &str) -> Result<Self> {
        Corner::ALL
            .into_iter()
            .find(|corner| corner.name() == s)
            .ok_or_else(|| ToastError::UnknownCorner(s.to_owned()))
    }
}

/// Maps a corner to its offscreen and onscreen placements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPolicy {
    margin: Length,
}

impl PositionPolicy {
    /// A policy resting toasts `margin` pixels from the edges.
    pub fn new(margin: f32) -> Self {
        Self {
            margin: Length::px(margin),
        }
    }

    /// Placement before the enter transition: at the margin vertically,
    /// a full width past the horizontal edge.
    pub fn offscreen(&self, corner: Corner) -> Placement {
        Placement::new()
            .with(corner.vertical_edge(), self.margin)
            .with(corner.horizontal_edge(), Length::percent(-100.0))
    }

    /// Resting placement: at the margin from both edges.
    pub fn onscreen(&self, corner: Corner) -> Placement {
        Placement::new()
            .with(corner.vertical_edge(), self.margin)
            .with(corner.horizontal_edge(), self.margin)
    }

    /// `(offscreen, onscreen)` for `corner`.
    pub fn placements(&self, corner: Corner) -> (Placement, Placement) {
        (self.offscreen(corner), self.onscreen(corner))
    }
}

impl Default for PositionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN)
    }
}
