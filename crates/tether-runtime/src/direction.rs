#![forbid(unsafe_code)]

//! Document direction and reserved chrome offsets.
//!
//! The host's locale/direction provider hands the positioner three values:
//! whether the document is right-to-left, and how much fixed UI (toolbars,
//! sidebars) occupies the top and left of the viewport. [`DirectionContext`]
//! carries them and can be derived from a locale tag or the environment.

use std::env;
use tether_core::PositioningContext;

/// Primary language subtags written right-to-left.
const RTL_LANGUAGES: &[&str] = &[
    "ar", "arc", "ckb", "dv", "fa", "he", "iw", "ks", "ku", "ps", "sd", "syr", "ug", "ur", "yi",
];

/// Direction and chrome offsets for positioning.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionContext {
    /// Right-to-left document.
    pub is_rtl: bool,
    /// Reserved space at the top of the viewport.
    pub top_offset: f64,
    /// Reserved space at the left of the viewport.
    pub left_offset: f64,
}

impl DirectionContext {
    /// Left-to-right with no reserved chrome.
    pub const LTR: Self = Self {
        is_rtl: false,
        top_offset: 0.0,
        left_offset: 0.0,
    };

    /// Right-to-left with no reserved chrome.
    pub const RTL: Self = Self {
        is_rtl: true,
        top_offset: 0.0,
        left_offset: 0.0,
    };

    /// Direction for a locale tag such as `"ar-EG"` or `"he_IL.UTF-8"`.
    #[must_use]
    pub fn from_locale(locale: &str) -> Self {
        Self {
            is_rtl: is_rtl_locale(locale),
            ..Self::LTR
        }
    }

    /// Direction detected from `LC_ALL`, then `LANG`. Defaults to LTR.
    #[must_use]
    pub fn detect() -> Self {
        let lc_all = env::var("LC_ALL").ok();
        let lang = env::var("LANG").ok();
        let locale = detect_locale_from(lc_all.as_deref(), lang.as_deref());
        Self::from_locale(&locale)
    }

    /// Set the reserved top chrome.
    #[must_use]
    pub fn top_offset(mut self, top_offset: f64) -> Self {
        self.top_offset = top_offset;
        self
    }

    /// Set the reserved left chrome.
    #[must_use]
    pub fn left_offset(mut self, left_offset: f64) -> Self {
        self.left_offset = left_offset;
        self
    }

    /// Copy direction and chrome offsets into a positioning context.
    #[must_use]
    pub fn apply_to(&self, ctx: PositioningContext) -> PositioningContext {
        ctx.rtl(self.is_rtl)
            .top_offset(self.top_offset)
            .left_offset(self.left_offset)
    }
}

/// Whether a locale tag names a right-to-left language.
#[must_use]
pub fn is_rtl_locale(locale: &str) -> bool {
    normalize_locale_raw(locale)
        .and_then(|tag| tag.split('-').next().map(str::to_ascii_lowercase))
        .is_some_and(|language| RTL_LANGUAGES.contains(&language.as_str()))
}

fn detect_locale_from(lc_all: Option<&str>, lang: Option<&str>) -> String {
    lc_all
        .and_then(normalize_locale_raw)
        .or_else(|| lang.and_then(normalize_locale_raw))
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_locale_raw(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("c") || raw.eq_ignore_ascii_case("posix") {
        return None;
    }
    Some(raw.replace('_', "-"))
}
