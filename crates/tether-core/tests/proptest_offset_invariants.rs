//! Property-based invariant tests for the offset and transform math.
//!
//! These tests verify invariants that must hold for any anchor, dock, popup
//! and body geometry:
//!
//! 1. RTL offset equals the LTR offset of the mirrored placement.
//! 2. Reflecting the page (anchor and direction) reflects the anchor point.
//! 3. For a fixed anchor, the RTL popup box mirrors the LTR box around the
//!    anchor center.
//! 4. Clamped offsets stay inside `[0, max_x]` and `[top_offset, max_y]`.
//! 5. A missing anchor always yields `Offset::EMPTY`.
//! 6. `rtl_mirror` is involutive; transforms agree with it.
//! 7. Identical inputs give identical outputs.
//!
//! Coordinates are drawn from integer grids so every expected value is exact
//! in `f64`.

use proptest::prelude::*;
use tether_core::transform::x_factor;
use tether_core::{
    Offset, Placement, PopupBox, PositioningContext, Rect, Spacing, get_offset, get_transforms,
    rtl_mirror,
};

// ── Helpers ─────────────────────────────────────────────────────────────

const BODY_W: f64 = 1280.0;
const BODY_H: f64 = 800.0;

fn body() -> Rect {
    Rect::from_size(BODY_W, BODY_H)
}

fn placement_strategy() -> impl Strategy<Value = Placement> {
    prop::sample::select(Placement::ALL.to_vec())
}

fn coord(max: u32) -> impl Strategy<Value = f64> {
    (0u32..=max).prop_map(f64::from)
}

fn anchor_strategy() -> impl Strategy<Value = Rect> {
    (coord(1200), coord(760), coord(80), coord(40)).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn popup_strategy() -> impl Strategy<Value = PopupBox> {
    (coord(400), coord(300), coord(200), coord(100)).prop_map(|(w, h, extra_w, extra_h)| {
        PopupBox::new(Rect::new(0.0, 0.0, w, h)).with_scroll_size(w + extra_w, h + extra_h)
    })
}

fn spacing_strategy() -> impl Strategy<Value = Spacing> {
    (coord(24), coord(24)).prop_map(|(x, y)| Spacing::new(x, y))
}

fn context(placement: Placement, anchor: Rect, spacing: Spacing) -> PositioningContext {
    PositioningContext::new(placement, anchor, body()).spacing(spacing)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. RTL offset equals the mirrored-placement LTR offset
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rtl_equals_mirrored_placement_ltr(
        p in placement_strategy(),
        anchor in anchor_strategy(),
        popup in popup_strategy(),
        spacing in spacing_strategy(),
        top_offset in coord(64),
    ) {
        let rtl = context(p, anchor, spacing)
            .popup(Some(popup))
            .top_offset(top_offset)
            .rtl(true);
        let ltr = context(rtl_mirror(p), anchor, spacing)
            .popup(Some(popup))
            .top_offset(top_offset);
        prop_assert_eq!(get_offset(&rtl), get_offset(&ltr), "placement {}", p);
        prop_assert_eq!(get_transforms(p, true), get_transforms(rtl_mirror(p), false));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Reflecting the page reflects the anchor point
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn page_reflection_reflects_anchor_point(
        p in placement_strategy(),
        anchor in anchor_strategy(),
        spacing in spacing_strategy(),
    ) {
        let ltr = context(p, anchor, spacing).offset_override(true);
        let rtl = context(p, anchor.mirrored_in(BODY_W), spacing)
            .offset_override(true)
            .rtl(true);
        let x_ltr = get_offset(&ltr).x;
        let x_rtl = get_offset(&rtl).x;
        prop_assert_eq!(x_rtl, BODY_W - x_ltr, "placement {}", p);
        prop_assert_eq!(get_offset(&rtl).y, get_offset(&ltr).y);
    }
}

proptest! {
    #[test]
    fn page_reflection_with_dock(
        p in placement_strategy(),
        anchor in anchor_strategy(),
        dock in anchor_strategy(),
    ) {
        let ltr = context(p, anchor, Spacing::default())
            .dock(Some(dock))
            .offset_override(true);
        let rtl = context(p, anchor.mirrored_in(BODY_W), Spacing::default())
            .dock(Some(dock.mirrored_in(BODY_W)))
            .offset_override(true)
            .rtl(true);
        prop_assert_eq!(get_offset(&rtl).x, BODY_W - get_offset(&ltr).x);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. For a fixed anchor the popup box mirrors around the anchor center
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn popup_box_mirrors_around_anchor_center(
        p in placement_strategy(),
        anchor in anchor_strategy(),
        width in coord(400),
        spacing in spacing_strategy(),
    ) {
        let popup = PopupBox::new(Rect::new(0.0, 0.0, width, 10.0));
        let ltr = context(p, anchor, spacing).popup(Some(popup)).offset_override(true);
        let rtl = ltr.clone().rtl(true);

        let ltr_left = get_offset(&ltr).x + x_factor(p, false) * width;
        let rtl_left = get_offset(&rtl).x + x_factor(p, true) * width;
        let ltr_right = ltr_left + width;

        // Mirror of [l, r] around c is [2c - r, 2c - l].
        let twice_center = 2.0 * anchor.x + anchor.width;
        prop_assert_eq!(rtl_left, twice_center - ltr_right, "placement {}", p);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Clamping bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamped_offset_within_bounds(
        p in placement_strategy(),
        anchor in anchor_strategy(),
        popup in popup_strategy(),
        spacing in spacing_strategy(),
        top_offset in coord(64),
        rtl in any::<bool>(),
    ) {
        let ctx = context(p, anchor, spacing)
            .popup(Some(popup))
            .top_offset(top_offset)
            .rtl(rtl);
        let offset = get_offset(&ctx);
        let max_x = ctx.max_offset_x();
        let max_y = ctx.max_offset_y();

        prop_assert!(offset.x >= 0.0);
        if max_x >= 0.0 {
            prop_assert!(offset.x <= max_x, "x={} max_x={}", offset.x, max_x);
            // The transformed box never extends past the body's right edge.
            let width = ctx.popup_size().width;
            let right = offset.x + x_factor(p, rtl) * width + width;
            prop_assert!(right <= BODY_W);
        }

        prop_assert!(offset.y >= top_offset);
        if max_y >= top_offset {
            prop_assert!(offset.y <= max_y, "y={} max_y={}", offset.y, max_y);
        }
    }
}

proptest! {
    #[test]
    fn ignore_max_offset_y_keeps_raw_vertical(
        p in placement_strategy(),
        anchor in anchor_strategy(),
        popup in popup_strategy(),
    ) {
        let clamped = context(p, anchor, Spacing::default()).popup(Some(popup));
        let raw = clamped.clone().offset_override(true);
        let loose = clamped.clone().ignore_max_offset_y(true);
        prop_assert_eq!(get_offset(&loose).y, get_offset(&raw).y);
        prop_assert_eq!(get_offset(&loose).x, get_offset(&clamped).x);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Missing anchor
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_anchor_is_empty(
        p in placement_strategy(),
        popup in popup_strategy(),
        dock in anchor_strategy(),
        rtl in any::<bool>(),
        override_offset in any::<bool>(),
    ) {
        let ctx = PositioningContext::default()
            .placement(p)
            .body(body())
            .popup(Some(popup))
            .dock(Some(dock))
            .rtl(rtl)
            .offset_override(override_offset);
        prop_assert_eq!(get_offset(&ctx), Offset::EMPTY);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Mirror involution
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mirror_involution(p in placement_strategy()) {
        prop_assert_eq!(rtl_mirror(rtl_mirror(p)), p);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Purity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn identical_inputs_identical_outputs(
        p in placement_strategy(),
        anchor in anchor_strategy(),
        popup in popup_strategy(),
        rtl in any::<bool>(),
    ) {
        let ctx = context(p, anchor, Spacing::all(4.0)).popup(Some(popup)).rtl(rtl);
        let first = get_offset(&ctx);
        let second = get_offset(&ctx);
        prop_assert_eq!(first.x.to_bits(), second.x.to_bits());
        prop_assert_eq!(first.y.to_bits(), second.y.to_bits());
        prop_assert_eq!(get_transforms(p, rtl), get_transforms(p, rtl));
    }
}

// ── Fixed scenarios ─────────────────────────────────────────────────────

#[test]
fn scenario_bottom_centered() {
    let anchor = Rect::new(200.0, 100.0, 50.0, 20.0);
    let ctx = context(Placement::Bottom, anchor, Spacing::new(0.0, 8.0)).offset_override(true);
    let offset = get_offset(&ctx);
    assert_eq!((offset.x, offset.y), (225.0, 128.0));
}

#[test]
fn scenario_left_start() {
    let anchor = Rect::new(200.0, 100.0, 50.0, 20.0);
    let ctx = context(Placement::LeftStart, anchor, Spacing::new(0.0, 8.0)).offset_override(true);
    let offset = get_offset(&ctx);
    assert_eq!((offset.x, offset.y), (200.0, 92.0));
}

#[test]
fn scenario_transforms() {
    assert_eq!(get_transforms(Placement::Bottom, false), "translate(-50%, 0%)");
    assert_eq!(get_transforms(Placement::TopEnd, true), "translate(0%, -100%)");
}
