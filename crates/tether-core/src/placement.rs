#![forbid(unsafe_code)]

//! Popup placement relative to its anchor, and its right-to-left mirror.
//!
//! A [`Placement`] names the side of the anchor the popup sits on and how it
//! aligns along that side. `Start`/`End` are logical: in a left-to-right
//! document `Start` is the left edge, in a right-to-left document it is the
//! right edge. The offset math in [`crate::offset`] already honors the
//! direction flag; [`rtl_mirror`] is for callers that author placements in
//! physical terms and need the logical equivalent (or vice versa).
//!
//! # Invariants
//!
//! 1. The set is closed: 4 sides × 3 alignments, every match is exhaustive.
//! 2. [`rtl_mirror`] is total and involutive.
//! 3. `as_str` and `FromStr` round-trip for every value.

use std::fmt;
use std::str::FromStr;

/// The side of the anchor a popup is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Whether the popup stacks vertically (above or below the anchor).
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of the popup along the anchor's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Center,
    Start,
    End,
}

/// Direction + alignment of a popup relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Placement {
    Top,
    TopStart,
    TopEnd,
    #[default]
    Bottom,
    BottomStart,
    BottomEnd,
    Left,
    LeftStart,
    LeftEnd,
    Right,
    RightStart,
    RightEnd,
}

impl Placement {
    /// Every placement, in declaration order.
    pub const ALL: [Placement; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
    ];

    /// Build a placement from its parts.
    #[must_use]
    pub const fn from_parts(side: Side, alignment: Alignment) -> Self {
        match (side, alignment) {
            (Side::Top, Alignment::Center) => Self::Top,
            (Side::Top, Alignment::Start) => Self::TopStart,
            (Side::Top, Alignment::End) => Self::TopEnd,
            (Side::Bottom, Alignment::Center) => Self::Bottom,
            (Side::Bottom, Alignment::Start) => Self::BottomStart,
            (Side::Bottom, Alignment::End) => Self::BottomEnd,
            (Side::Left, Alignment::Center) => Self::Left,
            (Side::Left, Alignment::Start) => Self::LeftStart,
            (Side::Left, Alignment::End) => Self::LeftEnd,
            (Side::Right, Alignment::Center) => Self::Right,
            (Side::Right, Alignment::Start) => Self::RightStart,
            (Side::Right, Alignment::End) => Self::RightEnd,
        }
    }

    /// The side of the anchor this placement uses.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Side::Left,
            Self::Right | Self::RightStart | Self::RightEnd => Side::Right,
        }
    }

    /// The alignment along the side.
    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::Top | Self::Bottom | Self::Left | Self::Right => Alignment::Center,
            Self::TopStart | Self::BottomStart | Self::LeftStart | Self::RightStart => {
                Alignment::Start
            }
            Self::TopEnd | Self::BottomEnd | Self::LeftEnd | Self::RightEnd => Alignment::End,
        }
    }

    /// Mirror for right-to-left documents. See [`rtl_mirror`].
    #[must_use]
    pub const fn rtl_mirror(self) -> Self {
        match self {
            Self::Top => Self::Top,
            Self::TopStart => Self::TopEnd,
            Self::TopEnd => Self::TopStart,
            Self::Bottom => Self::Bottom,
            Self::BottomStart => Self::BottomEnd,
            Self::BottomEnd => Self::BottomStart,
            Self::Left => Self::Right,
            Self::LeftStart => Self::RightStart,
            Self::LeftEnd => Self::RightEnd,
            Self::Right => Self::Left,
            Self::RightStart => Self::LeftStart,
            Self::RightEnd => Self::LeftEnd,
        }
    }

    /// The same alignment on the opposite vertical side.
    ///
    /// Bottom-family placements become Top-family and vice versa; horizontal
    /// placements are returned unchanged.
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::TopStart => Self::BottomStart,
            Self::TopEnd => Self::BottomEnd,
            Self::Bottom => Self::Top,
            Self::BottomStart => Self::TopStart,
            Self::BottomEnd => Self::TopEnd,
            other => other,
        }
    }

    /// Get the placement name as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
        }
    }
}

/// Mirror a placement for right-to-left layout.
///
/// Vertical-family placements keep their side and swap `Start`/`End`;
/// horizontal-family placements swap `Left`/`Right` and keep their suffix.
/// Plain `Top` and `Bottom` are fixed points.
#[inline]
#[must_use]
pub const fn rtl_mirror(placement: Placement) -> Placement {
    placement.rtl_mirror()
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlacementError {
    pub input: String,
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown placement {:?}", self.input)
    }
}

impl std::error::Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| ParsePlacementError {
                input: s.to_string(),
            })
    }
}
