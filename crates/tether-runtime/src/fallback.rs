#![forbid(unsafe_code)]

//! Dynamic bottom→top placement fallback with a debounced revert.
//!
//! Tooltips placed below their anchor flip above it when they would run past
//! the bottom of the viewport. Flipping back is debounced: once the overflow
//! clears, the requested placement is restored only after `revert_delay` has
//! passed with no new overflow. The revert is driven by [`PlacementFallback::tick`]
//! so the whole machine is deterministic under a supplied clock.
//!
//! # Decision Rule
//!
//! ```text
//! requested not Bottom*          → requested, state reset
//! overflow                       → flip_vertical(requested), pending revert cancelled
//! no overflow, flipped           → stay flipped, revert_at = now + delay (last write wins)
//! no overflow, not flipped       → requested
//! tick(now), now ≥ revert_at     → unflip
//! ```
//!
//! # Invariants
//!
//! 1. At most one revert is pending at a time.
//! 2. Overflow always cancels a pending revert.
//! 3. State belongs to one instance; two positioners never share a timer.

use std::time::{Duration, Instant};

use tether_core::{Placement, Side};

/// Default delay before a flipped placement reverts.
pub const DEFAULT_REVERT_DELAY: Duration = Duration::from_millis(100);

/// Whether a popup at `offset_y` would reach the bottom of the viewport.
#[must_use]
pub fn overflows_viewport(
    offset_y: f64,
    popup_height: f64,
    spacing_y: f64,
    viewport_height: f64,
) -> bool {
    offset_y + popup_height + spacing_y >= viewport_height
}

/// Instance-owned fallback state.
#[derive(Debug, Clone)]
pub struct PlacementFallback {
    revert_delay: Duration,
    flipped: bool,
    revert_at: Option<Instant>,
    flips: u64,
    reverts: u64,
}

impl Default for PlacementFallback {
    fn default() -> Self {
        Self::new(DEFAULT_REVERT_DELAY)
    }
}

impl PlacementFallback {
    /// Create a fallback that reverts after `revert_delay`.
    #[must_use]
    pub fn new(revert_delay: Duration) -> Self {
        Self {
            revert_delay,
            flipped: false,
            revert_at: None,
            flips: 0,
            reverts: 0,
        }
    }

    /// Decide the effective placement for this pass.
    ///
    /// `overflows` must be evaluated against the *requested* placement so a
    /// flipped popup does not immediately vote itself back.
    pub fn evaluate(&mut self, requested: Placement, overflows: bool, now: Instant) -> Placement {
        if requested.side() != Side::Bottom {
            self.reset();
            return requested;
        }

        if overflows {
            if !self.flipped {
                self.flips += 1;
                tracing::debug!(requested = %requested, "placement fallback engaged");
                crate::debug_trace!(
                    "fallback: flip {} -> {}",
                    requested,
                    requested.flip_vertical()
                );
            }
            self.flipped = true;
            self.revert_at = None;
        } else if self.flipped {
            self.revert_at = Some(now + self.revert_delay);
        }

        self.current(requested)
    }

    /// Apply a due revert. Returns `true` if the placement changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.revert_at {
            Some(at) if now >= at => {
                self.flipped = false;
                self.revert_at = None;
                self.reverts += 1;
                tracing::debug!("placement fallback reverted");
                crate::debug_trace!("fallback: revert");
                true
            }
            _ => false,
        }
    }

    /// Effective placement without re-evaluating overflow.
    #[must_use]
    pub fn current(&self, requested: Placement) -> Placement {
        if self.flipped && requested.side() == Side::Bottom {
            requested.flip_vertical()
        } else {
            requested
        }
    }

    /// Drop the flip and any pending revert.
    pub fn reset(&mut self) {
        self.flipped = false;
        self.revert_at = None;
    }

    /// Whether the popup is currently flipped.
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// When the pending revert is due, if any.
    #[must_use]
    pub fn revert_at(&self) -> Option<Instant> {
        self.revert_at
    }

    /// Total flips since creation.
    #[must_use]
    pub fn flip_count(&self) -> u64 {
        self.flips
    }

    /// Total reverts since creation.
    #[must_use]
    pub fn revert_count(&self) -> u64 {
        self.reverts
    }
}
