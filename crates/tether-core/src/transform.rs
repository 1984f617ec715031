#![forbid(unsafe_code)]

//! Percentage transforms that align the popup's own box to its offset point.
//!
//! The offset computed in [`crate::offset`] is a point on the anchor. The
//! popup is translated there first and then shifted by a fraction of its own
//! size, so the host never needs the popup's pixel size up front:
//!
//! ```text
//! transform: translate(Xpx, Ypx) translate(xFactor * 100%, yFactor * 100%)
//! ```

use crate::placement::Placement;

/// Fraction of the popup width to shift horizontally.
#[must_use]
pub const fn x_factor(placement: Placement, is_rtl: bool) -> f64 {
    match placement {
        Placement::Left | Placement::LeftStart | Placement::LeftEnd => {
            if is_rtl {
                0.0
            } else {
                -1.0
            }
        }
        Placement::Right | Placement::RightStart | Placement::RightEnd => {
            if is_rtl {
                -1.0
            } else {
                0.0
            }
        }
        Placement::TopStart | Placement::BottomStart => {
            if is_rtl {
                -1.0
            } else {
                0.0
            }
        }
        Placement::TopEnd | Placement::BottomEnd => {
            if is_rtl {
                0.0
            } else {
                -1.0
            }
        }
        Placement::Top | Placement::Bottom => -0.5,
    }
}

/// Fraction of the popup height to shift vertically.
#[must_use]
pub const fn y_factor(placement: Placement) -> f64 {
    match placement {
        Placement::Top
        | Placement::TopStart
        | Placement::TopEnd
        | Placement::LeftEnd
        | Placement::RightEnd => -1.0,
        Placement::Left | Placement::Right => -0.5,
        Placement::Bottom
        | Placement::BottomStart
        | Placement::BottomEnd
        | Placement::LeftStart
        | Placement::RightStart => 0.0,
    }
}

/// CSS transform aligning the popup box to its offset point.
///
/// Returns an empty string when no shift is needed, otherwise
/// `translate(a%, b%)`.
#[must_use]
pub fn get_transforms(placement: Placement, is_rtl: bool) -> String {
    let x = x_factor(placement, is_rtl);
    let y = y_factor(placement);
    if x == 0.0 && y == 0.0 {
        return String::new();
    }
    format!("translate({}%, {}%)", css_number(x * 100.0), css_number(y * 100.0))
}

/// The full transform the portal layer applies to the fixed-position container.
#[must_use]
pub fn css_transform(offset_x: f64, offset_y: f64, placement: Placement, is_rtl: bool) -> String {
    let base = format!(
        "translate({}px, {}px)",
        css_number(offset_x),
        css_number(offset_y)
    );
    let align = get_transforms(placement, is_rtl);
    if align.is_empty() {
        base
    } else {
        format!("{base} {align}")
    }
}

/// Format a number for CSS: no trailing `.0`, never `-0`.
pub(crate) fn css_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_centers_horizontally() {
        assert_eq!(get_transforms(Placement::Bottom, false), "translate(-50%, 0%)");
        assert_eq!(get_transforms(Placement::Bottom, true), "translate(-50%, 0%)");
    }

    #[test]
    fn top_end_rtl_only_lifts() {
        assert_eq!(get_transforms(Placement::TopEnd, true), "translate(0%, -100%)");
        assert_eq!(get_transforms(Placement::TopEnd, false), "translate(-100%, -100%)");
    }

    #[test]
    fn zero_factors_yield_empty_string() {
        assert_eq!(get_transforms(Placement::BottomStart, false), "");
        assert_eq!(get_transforms(Placement::BottomEnd, true), "");
        assert_eq!(get_transforms(Placement::RightStart, false), "");
        assert_eq!(get_transforms(Placement::LeftStart, true), "");
    }

    #[test]
    fn side_placements_center_vertically() {
        assert_eq!(get_transforms(Placement::Left, false), "translate(-100%, -50%)");
        assert_eq!(get_transforms(Placement::Right, false), "translate(0%, -50%)");
        assert_eq!(get_transforms(Placement::Right, true), "translate(-100%, -50%)");
    }

    #[test]
    fn side_end_placements_lift() {
        assert_eq!(y_factor(Placement::LeftEnd), -1.0);
        assert_eq!(y_factor(Placement::RightEnd), -1.0);
        assert_eq!(y_factor(Placement::LeftStart), 0.0);
    }

    #[test]
    fn rtl_factor_matches_mirrored_ltr_factor() {
        for p in Placement::ALL {
            assert_eq!(x_factor(p, true), x_factor(p.rtl_mirror(), false), "{p}");
            assert_eq!(get_transforms(p, true), get_transforms(p.rtl_mirror(), false));
        }
    }

    #[test]
    fn css_transform_composes_pixel_and_percent() {
        assert_eq!(
            css_transform(225.0, 128.0, Placement::Bottom, false),
            "translate(225px, 128px) translate(-50%, 0%)"
        );
        assert_eq!(
            css_transform(10.5, 0.0, Placement::BottomStart, false),
            "translate(10.5px, 0px)"
        );
    }

    #[test]
    fn css_number_never_prints_negative_zero() {
        assert_eq!(css_number(-0.0), "0");
        assert_eq!(css_number(-50.0), "-50");
        assert_eq!(css_number(12.25), "12.25");
    }
}
