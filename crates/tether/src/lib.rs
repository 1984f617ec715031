#![forbid(unsafe_code)]
//! Tether public facade crate.
//!
//! Re-exports the positioning math from `tether-core` and, with the default
//! `runtime` feature, the reactive positioner from `tether-runtime`. Most
//! users only need the [`prelude`].

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tether_core::{
    Alignment, Offset, OverflowCorrection, ParsePlacementError, Placement, PopupBox,
    PositioningContext, Rect, Side, Size, Spacing, TAIL_CLIP_PATH, TailEdge, TailGeometry,
    box_left, correct_overflow, css_transform, get_offset, get_transforms, rtl_mirror,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use tether_runtime::{
    DirectionContext, ListenerGuard, ListenerHost, ListenerId, PendingRecompute, PopupLayout,
    Positioner, PositionerConfig, PositionerEvent, PositionerState, RectSource,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tether APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A placement name did not parse.
    Placement(ParsePlacementError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placement(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Placement(err) => Some(err),
        }
    }
}

impl From<ParsePlacementError> for Error {
    fn from(err: ParsePlacementError) -> Self {
        Self::Placement(err)
    }
}

/// Standard result type for tether APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a placement name such as `"bottom-start"` or `"LEFT_END"`.
pub fn parse_placement(name: &str) -> Result<Placement> {
    Ok(name.parse::<Placement>()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Offset, Placement, PopupBox, PositioningContext, Rect, Result, Spacing,
        TailGeometry, get_offset, get_transforms, rtl_mirror,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{
        DirectionContext, ListenerHost, PopupLayout, Positioner, PositionerConfig,
        PositionerEvent, RectSource,
    };

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use tether_core as core;
#[cfg(feature = "runtime")]
pub use tether_runtime as runtime;
