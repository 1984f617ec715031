#![forbid(unsafe_code)]

//! Offset computation: where to translate a popup so it sits next to its anchor.
//!
//! [`get_offset`] is a pure function of a [`PositioningContext`]. It picks an
//! anchor point from the placement (the horizontal basis may come from a
//! separate dock element), then clamps it so that once the percentage
//! transform from [`crate::transform`] is applied the popup stays inside the
//! body.
//!
//! # Invariants
//!
//! 1. A missing anchor yields exactly [`Offset::EMPTY`].
//! 2. Unless `ignore_max_offset_y` or `offset_override` is set,
//!    `0 <= x <= max_offset_x` and `top_offset <= y <= max_offset_y`
//!    whenever those ranges are non-empty; lower bounds win otherwise.
//! 3. `get_offset` with `is_rtl = true` equals `get_offset` with the
//!    [mirrored](crate::placement::rtl_mirror) placement and `is_rtl = false`.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Anchor not attached | `Offset::EMPTY` |
//! | Popup not yet measured | Size treated as zero |
//! | Popup larger than body | Clamped to `0` / `top_offset` |

use crate::geometry::{PopupBox, Rect, Size, Spacing};
use crate::placement::Placement;
use crate::transform::{x_factor, y_factor};

/// Full input of the offset computation.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositioningContext {
    /// Requested placement.
    pub placement: Placement,
    /// Gap between anchor and popup.
    pub spacing: Spacing,
    /// Anchor bounding box, `None` while the anchor is not attached.
    pub anchor_rect: Option<Rect>,
    /// Optional element overriding the horizontal alignment basis.
    pub dock_rect: Option<Rect>,
    /// Measured popup, `None` before first render.
    pub popup: Option<PopupBox>,
    /// Bounding box of the document body.
    pub body_rect: Rect,
    /// Right-to-left document direction.
    pub is_rtl: bool,
    /// Reserved space at the top of the viewport (toolbars).
    pub top_offset: f64,
    /// Reserved space at the left of the viewport (sidebars).
    pub left_offset: f64,
    /// Do not clamp the vertical offset.
    pub ignore_max_offset_y: bool,
    /// Return the raw anchor point without any clamping.
    pub offset_override: bool,
}

impl PositioningContext {
    /// Create a context for an anchor inside a body.
    #[must_use]
    pub fn new(placement: Placement, anchor_rect: Rect, body_rect: Rect) -> Self {
        Self {
            placement,
            anchor_rect: Some(anchor_rect),
            body_rect,
            ..Self::default()
        }
    }

    /// Set the placement.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the spacing.
    #[must_use]
    pub fn spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        self.spacing = spacing.into();
        self
    }

    /// Set or clear the anchor rect.
    #[must_use]
    pub fn anchor(mut self, anchor: Option<Rect>) -> Self {
        self.anchor_rect = anchor;
        self
    }

    /// Set or clear the dock rect.
    #[must_use]
    pub fn dock(mut self, dock: Option<Rect>) -> Self {
        self.dock_rect = dock;
        self
    }

    /// Set or clear the measured popup.
    #[must_use]
    pub fn popup(mut self, popup: Option<PopupBox>) -> Self {
        self.popup = popup;
        self
    }

    /// Set the body rect.
    #[must_use]
    pub fn body(mut self, body: Rect) -> Self {
        self.body_rect = body;
        self
    }

    /// Set the document direction.
    #[must_use]
    pub fn rtl(mut self, is_rtl: bool) -> Self {
        self.is_rtl = is_rtl;
        self
    }

    /// Set the reserved top chrome offset.
    #[must_use]
    pub fn top_offset(mut self, top_offset: f64) -> Self {
        self.top_offset = top_offset;
        self
    }

    /// Set the reserved left chrome offset.
    #[must_use]
    pub fn left_offset(mut self, left_offset: f64) -> Self {
        self.left_offset = left_offset;
        self
    }

    /// Skip the vertical clamp.
    #[must_use]
    pub fn ignore_max_offset_y(mut self, ignore: bool) -> Self {
        self.ignore_max_offset_y = ignore;
        self
    }

    /// Skip all clamping.
    #[must_use]
    pub fn offset_override(mut self, enabled: bool) -> Self {
        self.offset_override = enabled;
        self
    }

    /// Size of the measured popup widened to its scroll size, or zero.
    #[inline]
    pub fn popup_size(&self) -> Size {
        self.popup
            .map(|popup| popup.effective_size())
            .unwrap_or_default()
    }

    /// Largest x that keeps the transformed popup inside the body.
    pub fn max_offset_x(&self) -> f64 {
        let width = self.popup_size().width;
        self.body_rect.width - width - x_factor(self.placement, self.is_rtl) * width
    }

    /// Largest y that keeps the transformed popup inside the body.
    pub fn max_offset_y(&self) -> f64 {
        let height = self.popup_size().height;
        self.body_rect.height + self.body_rect.y - height - y_factor(self.placement) * height
    }
}

/// Computed translation plus supplementary geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    /// Horizontal translation of the popup container.
    pub x: f64,
    /// Vertical translation of the popup container.
    pub y: f64,
    /// Anchor width (consumers size full-width dropdowns from it).
    pub width: f64,
    /// Anchor height.
    pub height: f64,
    /// Right edge of the body, the RTL clamp boundary.
    pub body_right: f64,
}

impl Offset {
    /// Returned when the anchor is unavailable.
    pub const EMPTY: Offset = Offset {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
        body_right: 0.0,
    };

    /// Whether this is the empty sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Horizontal anchor point for a placement.
///
/// `basis` is the dock rect when present, otherwise the anchor.
#[must_use]
pub fn horizontal_offset(placement: Placement, spacing_x: f64, basis: &Rect, is_rtl: bool) -> f64 {
    let left_aligned = basis.left() - spacing_x;
    let right_aligned = basis.right() + spacing_x;
    let center_aligned = basis.left() + basis.width / 2.0;

    match placement {
        Placement::TopStart
        | Placement::BottomStart
        | Placement::Left
        | Placement::LeftStart
        | Placement::LeftEnd => {
            if is_rtl {
                right_aligned
            } else {
                left_aligned
            }
        }
        Placement::TopEnd
        | Placement::BottomEnd
        | Placement::Right
        | Placement::RightStart
        | Placement::RightEnd => {
            if is_rtl {
                left_aligned
            } else {
                right_aligned
            }
        }
        Placement::Top | Placement::Bottom => center_aligned,
    }
}

/// Vertical anchor point for a placement. Always relative to the anchor.
#[must_use]
pub fn vertical_offset(placement: Placement, spacing_y: f64, anchor: &Rect) -> f64 {
    match placement {
        Placement::Bottom
        | Placement::BottomStart
        | Placement::BottomEnd
        | Placement::LeftEnd
        | Placement::RightEnd => anchor.top() + anchor.height + spacing_y,
        Placement::Top
        | Placement::TopStart
        | Placement::TopEnd
        | Placement::LeftStart
        | Placement::RightStart => anchor.top() - spacing_y,
        Placement::Left | Placement::Right => anchor.top() + anchor.height / 2.0,
    }
}

/// Compute the popup offset for a positioning context.
///
/// Never panics. Returns [`Offset::EMPTY`] when the anchor is unavailable.
#[must_use]
pub fn get_offset(ctx: &PositioningContext) -> Offset {
    let Some(anchor) = ctx.anchor_rect else {
        crate::trace!(placement = %ctx.placement, "get_offset without anchor");
        return Offset::EMPTY;
    };

    let basis = ctx.dock_rect.unwrap_or(anchor);
    let raw_x = horizontal_offset(ctx.placement, ctx.spacing.x, &basis, ctx.is_rtl);
    let raw_y = vertical_offset(ctx.placement, ctx.spacing.y, &anchor);

    let (x, y) = if ctx.offset_override {
        (raw_x, raw_y)
    } else {
        let x = raw_x.min(ctx.max_offset_x()).max(0.0);
        let y = if ctx.ignore_max_offset_y {
            raw_y
        } else {
            raw_y.min(ctx.max_offset_y()).max(ctx.top_offset)
        };
        (x, y)
    };

    crate::trace!(
        placement = %ctx.placement,
        rtl = ctx.is_rtl,
        raw_x,
        raw_y,
        x,
        y,
        "offset computed"
    );

    Offset {
        x,
        y,
        width: anchor.width,
        height: anchor.height,
        body_right: ctx.body_rect.right(),
    }
}
