#![forbid(unsafe_code)]

//! Tooltip tail (the small triangle pointing at the anchor).
//!
//! The tail is a clipped square attached to the popup edge that faces the
//! anchor, rotated to point at it, and shifted sideways so it stays over the
//! anchor's center even when the popup itself was pushed around by clamping.

use crate::clamp::OverflowCorrection;
use crate::geometry::Rect;
use crate::placement::{Placement, Side};
use crate::transform::css_number;

/// Clip path that cuts the tail square into an upward-pointing triangle.
pub const TAIL_CLIP_PATH: &str = "polygon(50% 0%, 0% 100%, 100% 100%)";

/// Edge of the popup the tail attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TailEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Geometry of a tooltip tail.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TailGeometry {
    /// Resolved placement of the popup (after any fallback).
    pub placement: Placement,
    /// Lateral shift of the tail in pixels.
    pub translate_x: f64,
    pub is_rtl: bool,
}

impl TailGeometry {
    /// Resolve the tail for a placed popup.
    ///
    /// When the overflow correction moved the popup, the tail is shifted back
    /// by the same amount so it still targets the anchor. Otherwise it is
    /// shifted by the distance between the anchor center and the popup center,
    /// or not at all if either box is unknown.
    #[must_use]
    pub fn resolve(
        placement: Placement,
        is_rtl: bool,
        anchor: Option<&Rect>,
        popup: Option<&Rect>,
        correction: &OverflowCorrection,
    ) -> Self {
        let translate_x = if correction.is_corrected() {
            -correction.correction
        } else {
            match (anchor, popup) {
                (Some(anchor), Some(popup)) => anchor.center_x() - popup.center_x(),
                _ => 0.0,
            }
        };
        Self {
            placement,
            translate_x,
            is_rtl,
        }
    }

    /// The popup edge the tail attaches to (the one facing the anchor).
    #[must_use]
    pub const fn edge(&self) -> TailEdge {
        match self.placement.side() {
            Side::Top => TailEdge::Bottom,
            Side::Bottom => TailEdge::Top,
            Side::Left => TailEdge::Right,
            Side::Right => TailEdge::Left,
        }
    }

    /// Rotation of the triangle in degrees.
    #[must_use]
    pub const fn rotation_deg(&self) -> f64 {
        match self.placement.side() {
            Side::Top => 180.0,
            Side::Bottom => 0.0,
            Side::Left => {
                if self.is_rtl {
                    -90.0
                } else {
                    90.0
                }
            }
            Side::Right => {
                if self.is_rtl {
                    90.0
                } else {
                    -90.0
                }
            }
        }
    }

    /// CSS transform for the tail element.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "translateX({}px) rotate({}deg)",
            css_number(self.translate_x),
            css_number(self.rotation_deg())
        )
    }
}
