#![forbid(unsafe_code)]

//! Reactive popup positioner.
//!
//! [`Positioner`] keeps one popup attached to its anchor while the page
//! scrolls and resizes. It reads live geometry from a [`RectSource`], runs
//! the pure offset → transform → overflow → tail chain from `tether_core`,
//! and holds the document listeners for as long as the popup is open.
//!
//! # State Machine
//!
//! ```text
//!            open(now)                 pass done
//! Closed ──────────────▶ Positioning ──────────▶ Positioned
//!   ▲                        ▲                       │
//!   │                        └── handle/tick/run ────┤
//!   └──────────────────── close() / drop ────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Listeners exist exactly while the state is not `Closed`.
//! 2. A recompute performs at most `1 + max_remeasure_passes` passes.
//! 3. A [`PendingRecompute`] taken before `close()` never touches state.
//! 4. Reopening always recomputes from fresh geometry.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Anchor missing | `layout()` is `None`, listeners stay registered |
//! | Popup not yet measured | Raw offset, zero correction, untranslated tail |
//! | Event while closed | Ignored, returns `false` |
//! | Ticket after close or reopen | Ignored, returns `false` |

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tether_core::{
    Offset, Placement, PopupBox, PositioningContext, Rect, Spacing, TailGeometry, box_left,
    correct_overflow, css_transform, get_offset, get_transforms,
};

use crate::direction::DirectionContext;
use crate::fallback::{DEFAULT_REVERT_DELAY, PlacementFallback, overflows_viewport};
use crate::listeners::{ListenerGuard, ListenerHost};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Positioner behavior switches.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionerConfig {
    /// Delay before a flipped placement reverts.
    /// Default: 100ms
    pub fallback_revert_delay: Duration,

    /// Flip Bottom* placements to Top* near the viewport bottom.
    /// Default: false (enabled for tooltips)
    pub dynamic_placement: bool,

    /// Corrective passes allowed when the popup height changes mid-recompute.
    /// Default: 1
    pub max_remeasure_passes: u32,

    /// Skip the lower vertical clamp.
    pub ignore_max_offset_y: bool,

    /// Return raw anchor-relative offsets without clamping.
    pub offset_override: bool,
}

impl Default for PositionerConfig {
    fn default() -> Self {
        Self {
            fallback_revert_delay: DEFAULT_REVERT_DELAY,
            dynamic_placement: false,
            max_remeasure_passes: 1,
            ignore_max_offset_y: false,
            offset_override: false,
        }
    }
}

impl PositionerConfig {
    /// Configuration suited to tooltips: dynamic placement on.
    #[must_use]
    pub fn tooltip() -> Self {
        Self::default().dynamic_placement(true)
    }

    /// Set the revert delay.
    #[must_use]
    pub fn fallback_revert_delay(mut self, delay: Duration) -> Self {
        self.fallback_revert_delay = delay;
        self
    }

    /// Enable or disable the bottom→top fallback.
    #[must_use]
    pub fn dynamic_placement(mut self, enabled: bool) -> Self {
        self.dynamic_placement = enabled;
        self
    }

    /// Set the remeasure bound.
    #[must_use]
    pub fn max_remeasure_passes(mut self, passes: u32) -> Self {
        self.max_remeasure_passes = passes;
        self
    }

    /// Skip the lower vertical clamp.
    #[must_use]
    pub fn ignore_max_offset_y(mut self, ignore: bool) -> Self {
        self.ignore_max_offset_y = ignore;
        self
    }

    /// Disable clamping entirely.
    #[must_use]
    pub fn offset_override(mut self, enabled: bool) -> Self {
        self.offset_override = enabled;
        self
    }
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Live geometry provider (the portal layer).
pub trait RectSource {
    /// Anchor bounding rect, `None` while the anchor is not mounted.
    fn anchor_rect(&self) -> Option<Rect>;

    /// Optional dock element; its horizontal extent replaces the anchor's.
    fn dock_rect(&self) -> Option<Rect> {
        None
    }

    /// Rendered popup box, `None` before the first measurement.
    fn popup_box(&self) -> Option<PopupBox>;

    /// Document body rect.
    fn body_rect(&self) -> Rect;

    /// Visible viewport height.
    fn viewport_height(&self) -> f64;
}

/// Inputs that trigger repositioning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionerEvent {
    /// Document scroll. Scrolls originating inside the popup are ignored.
    Scroll { inside_popup: bool },
    /// The tracked root resized.
    Resize,
    /// The anchor moved or changed size.
    AnchorChanged,
    /// The dock element moved or changed size.
    DockChanged,
    /// New requested placement.
    PlacementChanged(Placement),
    /// New spacing.
    SpacingChanged(Spacing),
}

// ---------------------------------------------------------------------------
// State and output
// ---------------------------------------------------------------------------

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionerState {
    #[default]
    Closed,
    Positioning,
    Positioned,
}

impl PositionerState {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Positioning => "positioning",
            Self::Positioned => "positioned",
        }
    }
}

impl fmt::Display for PositionerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one positioning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupLayout {
    /// Effective placement (after any fallback flip).
    pub placement: Placement,
    pub is_rtl: bool,
    /// Clamped offset before overflow correction.
    pub offset: Offset,
    /// Horizontal position after overflow correction.
    pub corrected_x: f64,
    /// `corrected_x - offset.x`.
    pub correction: f64,
    /// Alignment transform (`translate(X%, Y%)` or empty).
    pub transform: String,
    pub tail: TailGeometry,
}

impl PopupLayout {
    /// Full CSS `transform` value for the popup.
    #[must_use]
    pub fn css(&self) -> String {
        css_transform(self.corrected_x, self.offset.y, self.placement, self.is_rtl)
    }
}

/// Deferred recompute handle.
///
/// Hosts that defer work (animation frames, timers) take a ticket with
/// [`Positioner::schedule`] and later hand it to
/// [`Positioner::run_pending`]. Tickets from a closed or reopened session
/// do nothing.
#[derive(Debug, Clone)]
pub struct PendingRecompute {
    alive: Rc<Cell<bool>>,
    generation: u64,
}

impl PendingRecompute {
    /// Whether the session that issued this ticket is still open.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.alive.get()
    }
}

// ---------------------------------------------------------------------------
// Positioner
// ---------------------------------------------------------------------------

/// Keeps one popup positioned relative to its anchor.
pub struct Positioner<S: RectSource> {
    config: PositionerConfig,
    source: S,
    host: Rc<dyn ListenerHost>,
    direction: DirectionContext,
    placement: Placement,
    spacing: Spacing,

    state: PositionerState,
    layout: Option<PopupLayout>,
    guard: Option<ListenerGuard>,
    fallback: PlacementFallback,

    alive: Rc<Cell<bool>>,
    generation: u64,

    recomputes: u64,
    remeasures: u64,
}

impl<S: RectSource> Positioner<S> {
    /// Create a closed positioner.
    pub fn new(source: S, host: Rc<dyn ListenerHost>, config: PositionerConfig) -> Self {
        let fallback = PlacementFallback::new(config.fallback_revert_delay);
        Self {
            config,
            source,
            host,
            direction: DirectionContext::LTR,
            placement: Placement::default(),
            spacing: Spacing::default(),
            state: PositionerState::Closed,
            layout: None,
            guard: None,
            fallback,
            alive: Rc::new(Cell::new(false)),
            generation: 0,
            recomputes: 0,
            remeasures: 0,
        }
    }

    /// Set the requested placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the anchor spacing.
    #[must_use]
    pub fn with_spacing(mut self, spacing: impl Into<Spacing>) -> Self {
        self.spacing = spacing.into();
        self
    }

    /// Set direction and chrome offsets.
    #[must_use]
    pub fn with_direction(mut self, direction: DirectionContext) -> Self {
        self.direction = direction;
        self
    }

    /// Change direction. Takes effect on the next pass.
    pub fn set_direction(&mut self, direction: DirectionContext) {
        self.direction = direction;
    }

    #[must_use]
    pub fn state(&self) -> PositionerState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != PositionerState::Closed
    }

    /// Latest layout, `None` while closed or without an anchor.
    #[must_use]
    pub fn layout(&self) -> Option<&PopupLayout> {
        self.layout.as_ref()
    }

    /// Requested placement (before any fallback flip).
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    #[must_use]
    pub fn config(&self) -> &PositionerConfig {
        &self.config
    }

    #[must_use]
    pub fn fallback(&self) -> &PlacementFallback {
        &self.fallback
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Positioning passes run so far, remeasures included.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Corrective passes run after a popup height change.
    #[must_use]
    pub fn remeasure_count(&self) -> u64 {
        self.remeasures
    }

    /// Open the popup: compute the first layout and register listeners.
    ///
    /// Opening an open positioner does nothing.
    pub fn open(&mut self, now: Instant) {
        if self.is_open() {
            return;
        }
        self.state = PositionerState::Positioning;
        self.generation += 1;
        self.alive = Rc::new(Cell::new(true));
        self.fallback.reset();
        self.layout = None;

        tracing::debug!(
            generation = self.generation,
            placement = %self.placement,
            rtl = self.direction.is_rtl,
            "positioner opened"
        );
        crate::debug_trace!("open: gen={} placement={}", self.generation, self.placement);

        self.recompute(now);
        self.guard = Some(ListenerGuard::acquire(Rc::clone(&self.host)));
        self.state = PositionerState::Positioned;
    }

    /// Feed an event. Returns `true` if a recompute ran.
    pub fn handle(&mut self, event: PositionerEvent, now: Instant) -> bool {
        if self.state != PositionerState::Positioned {
            return false;
        }
        match event {
            PositionerEvent::Scroll { inside_popup: true } => {
                tracing::trace!("scroll inside popup ignored");
                return false;
            }
            PositionerEvent::PlacementChanged(placement) => {
                self.placement = placement;
                self.fallback.reset();
            }
            PositionerEvent::SpacingChanged(spacing) => {
                self.spacing = spacing;
            }
            PositionerEvent::Scroll { .. }
            | PositionerEvent::Resize
            | PositionerEvent::AnchorChanged
            | PositionerEvent::DockChanged => {}
        }
        self.state = PositionerState::Positioning;
        self.recompute(now);
        self.state = PositionerState::Positioned;
        true
    }

    /// Advance timers. Returns `true` if a fallback revert recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != PositionerState::Positioned || !self.fallback.tick(now) {
            return false;
        }
        self.state = PositionerState::Positioning;
        self.recompute(now);
        self.state = PositionerState::Positioned;
        true
    }

    /// Close the popup and release everything it holds.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.alive.set(false);
        if let Some(guard) = self.guard.take() {
            guard.release();
        }
        self.layout = None;
        self.fallback.reset();
        self.state = PositionerState::Closed;

        tracing::debug!(generation = self.generation, "positioner closed");
        crate::debug_trace!("close: gen={}", self.generation);
    }

    /// Take a ticket for a deferred recompute.
    #[must_use]
    pub fn schedule(&self) -> PendingRecompute {
        PendingRecompute {
            alive: Rc::clone(&self.alive),
            generation: self.generation,
        }
    }

    /// Run a deferred recompute if its session is still open.
    pub fn run_pending(&mut self, ticket: PendingRecompute, now: Instant) -> bool {
        if !ticket.is_live()
            || ticket.generation != self.generation
            || self.state != PositionerState::Positioned
        {
            tracing::debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "stale recompute ignored"
            );
            return false;
        }
        self.state = PositionerState::Positioning;
        self.recompute(now);
        self.state = PositionerState::Positioned;
        true
    }

    fn recompute(&mut self, now: Instant) {
        let mut height = self.pass(now);
        let mut remaining = self.config.max_remeasure_passes;
        while remaining > 0 {
            let measured = measured_height(self.source.popup_box());
            if measured == height {
                break;
            }
            remaining -= 1;
            self.remeasures += 1;
            tracing::debug!(
                previous = ?height,
                measured = ?measured,
                "popup remeasured"
            );
            height = self.pass(now);
        }
    }

    /// One positioning pass. Returns the popup height it was computed with.
    fn pass(&mut self, now: Instant) -> Option<f64> {
        self.recomputes += 1;

        let anchor = self.source.anchor_rect();
        let popup = self.source.popup_box();
        let height = measured_height(popup);

        let Some(anchor_rect) = anchor else {
            self.layout = None;
            tracing::debug!("anchor missing, layout cleared");
            return height;
        };

        let base = self.direction.apply_to(
            PositioningContext::new(self.placement, anchor_rect, self.source.body_rect())
                .spacing(self.spacing)
                .dock(self.source.dock_rect())
                .popup(popup)
                .ignore_max_offset_y(self.config.ignore_max_offset_y)
                .offset_override(self.config.offset_override),
        );

        let placement = if self.config.dynamic_placement {
            let requested_offset = get_offset(&base);
            let overflows = overflows_viewport(
                requested_offset.y,
                base.popup_size().height,
                self.spacing.y,
                self.source.viewport_height(),
            );
            self.fallback.evaluate(self.placement, overflows, now)
        } else {
            self.placement
        };

        let ctx = base.placement(placement);
        let is_rtl = ctx.is_rtl;
        let offset = get_offset(&ctx);
        let popup_width = popup.map(|p| p.rect.width);
        let overflow = correct_overflow(placement, is_rtl, &offset, popup_width, ctx.left_offset);
        let placed = popup.map(|p| {
            Rect::new(
                box_left(placement, is_rtl, overflow.x, p.rect.width),
                offset.y,
                p.rect.width,
                p.rect.height,
            )
        });
        let tail = TailGeometry::resolve(
            placement,
            is_rtl,
            Some(&anchor_rect),
            placed.as_ref(),
            &overflow,
        );

        tracing::debug!(
            placement = %placement,
            x = overflow.x,
            y = offset.y,
            correction = overflow.correction,
            "layout recomputed"
        );
        crate::debug_trace!(
            "pass: placement={} x={} y={} correction={}",
            placement,
            overflow.x,
            offset.y,
            overflow.correction
        );

        self.layout = Some(PopupLayout {
            placement,
            is_rtl,
            offset,
            corrected_x: overflow.x,
            correction: overflow.correction,
            transform: get_transforms(placement, is_rtl),
            tail,
        });
        height
    }
}

fn measured_height(popup: Option<PopupBox>) -> Option<f64> {
    popup.map(|p| p.effective_size().height)
}

impl<S: RectSource> fmt::Debug for Positioner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Positioner")
            .field("state", &self.state)
            .field("placement", &self.placement)
            .field("generation", &self.generation)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl<S: RectSource> Drop for Positioner<S> {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}
