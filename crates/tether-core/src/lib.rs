#![forbid(unsafe_code)]

//! Core: pure geometry for popups anchored to another element.
//!
//! Everything in this crate is a pure function of its inputs. The stateful
//! side (listeners, remeasure, placement fallback) lives in `tether-runtime`.
//!
//! # Pipeline
//!
//! ```text
//! rects + PositioningContext
//!     -> offset::get_offset          (anchor point, clamped to the body)
//!     -> transform::get_transforms   (percentage shift of the popup's own box)
//!     -> clamp::correct_overflow     (post-measurement nudge back on-screen)
//!     -> tail::TailGeometry          (tooltip arrow)
//! ```

pub mod clamp;
pub mod geometry;
pub mod logging;
pub mod offset;
pub mod placement;
pub mod tail;
pub mod transform;

pub use clamp::{OverflowCorrection, box_left, correct_overflow};
pub use geometry::{PopupBox, Rect, Size, Spacing};
pub use offset::{Offset, PositioningContext, get_offset};
pub use placement::{Alignment, ParsePlacementError, Placement, Side, rtl_mirror};
pub use tail::{TAIL_CLIP_PATH, TailEdge, TailGeometry};
pub use transform::{css_transform, get_transforms};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
