#![forbid(unsafe_code)]

//! Tether Runtime
//!
//! Stateful side of popup positioning: keeps a popup attached to its anchor
//! while the page scrolls and resizes.
//!
//! # Key Components
//!
//! - [`Positioner`] - open/close state machine driving the `tether_core` pipeline
//! - [`RectSource`] - live geometry supplied by the portal layer
//! - [`ListenerHost`] / [`ListenerGuard`] - scroll and resize listener lifecycle
//! - [`PlacementFallback`] - bottom→top flip with a debounced revert
//! - [`DirectionContext`] - RTL flag and reserved chrome offsets
//!
//! # How it fits in the system
//! `tether-core` is pure math. This crate owns time (every stateful call
//! takes `now: Instant`), listener registration and the popup lifecycle.
//! Types hold `Rc` handles and are meant for a single UI thread.

pub mod debug_trace;
pub mod direction;
pub mod fallback;
pub mod listeners;
pub mod positioner;

pub use direction::{DirectionContext, is_rtl_locale};
pub use fallback::{DEFAULT_REVERT_DELAY, PlacementFallback, overflows_viewport};
pub use listeners::{ListenerGuard, ListenerHost, ListenerId, ListenerKind, RecordingHost};
pub use positioner::{
    PendingRecompute, PopupLayout, Positioner, PositionerConfig, PositionerEvent,
    PositionerState, RectSource,
};
