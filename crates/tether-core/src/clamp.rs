#![forbid(unsafe_code)]

//! Post-measurement horizontal overflow correction.
//!
//! [`get_offset`](crate::offset::get_offset) clamps against the body before
//! the popup's width is known. Once the popup has been rendered and measured,
//! [`correct_overflow`] nudges it back on-screen when its left edge runs into
//! the reserved left chrome, and (in right-to-left documents) when its right
//! edge runs past the body.
//!
//! The box tested is the one this pass would render: `offset.x` shifted by
//! the placement's alignment transform, with the measured width. The measured
//! position is never used, so a host that renders the corrected layout and
//! measures it again gets the same answer.
//!
//! # Decision Rule
//!
//! 1) No measurement yet: keep `offset.x`, correction is zero.
//! 2) Box left edge `<= left_offset`:
//!    - `TopEnd`/`BottomEnd`: LTR shift right by the popup width; RTL keep.
//!    - `Left*`: LTR shift so the left edge lands on `left_offset`; RTL keep.
//!    - `TopStart`/`BottomStart`/`Right*`: shift right by the popup width.
//!    - `Top`/`Bottom`: shift right by half the popup width.
//! 3) RTL and box right edge `>= body_right - left_offset`: place the right
//!    edge exactly on `body_right - left_offset`.
//!
//! The `Left*` shift is `width - (x - left_offset)` and the RTL clamp is
//! `body_right - left_offset - width - x_factor * width`. Both differ from the
//! plain `width - x - left_offset` and `body_right - width - left_offset`
//! forms when `left_offset != 0` or `x_factor != 0`.

use crate::offset::Offset;
use crate::placement::Placement;
use crate::transform::x_factor;

/// Result of the overflow correction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverflowCorrection {
    /// Corrected horizontal translation.
    pub x: f64,
    /// `x - offset.x`; zero when nothing moved.
    pub correction: f64,
}

impl OverflowCorrection {
    /// No correction applied.
    #[inline]
    pub const fn none(x: f64) -> Self {
        Self { x, correction: 0.0 }
    }

    /// Whether the popup had to be moved.
    #[inline]
    pub fn is_corrected(&self) -> bool {
        self.correction != 0.0
    }
}

/// Correct the horizontal offset of a measured popup.
///
/// `popup_width` is the measured width of the popup, `None` before the first
/// measurement.
#[must_use]
pub fn correct_overflow(
    placement: Placement,
    is_rtl: bool,
    offset: &Offset,
    popup_width: Option<f64>,
    left_offset: f64,
) -> OverflowCorrection {
    let Some(width) = popup_width else {
        return OverflowCorrection::none(offset.x);
    };

    let mut x = offset.x;

    if box_left(placement, is_rtl, x, width) <= left_offset {
        match placement {
            Placement::TopEnd | Placement::BottomEnd => {
                if !is_rtl {
                    x += width;
                }
            }
            Placement::Left | Placement::LeftStart | Placement::LeftEnd => {
                if !is_rtl {
                    x += width - (offset.x - left_offset);
                }
            }
            Placement::TopStart
            | Placement::BottomStart
            | Placement::Right
            | Placement::RightStart
            | Placement::RightEnd => {
                x += width;
            }
            Placement::Top | Placement::Bottom => {
                x += width / 2.0;
            }
        }
    }

    if is_rtl {
        let limit = offset.body_right - left_offset;
        if box_left(placement, is_rtl, x, width) + width >= limit {
            x = limit - width - x_factor(placement, true) * width;
        }
    }

    let correction = x - offset.x;
    if correction != 0.0 {
        crate::debug!(
            placement = %placement,
            rtl = is_rtl,
            from = offset.x,
            to = x,
            "popup overflow corrected"
        );
    }
    OverflowCorrection { x, correction }
}

/// Left edge of a popup of `width` translated to `x` for `placement`.
#[inline]
#[must_use]
pub fn box_left(placement: Placement, is_rtl: bool, x: f64, width: f64) -> f64 {
    x + x_factor(placement, is_rtl) * width
}
