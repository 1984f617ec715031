#![forbid(unsafe_code)]

//! Scroll/resize listener lifecycle.
//!
//! An open popup needs a capture-phase scroll listener on the document (so it
//! hears scrolls of any ancestor) and a resize observer on the tracked root.
//! [`ListenerGuard`] registers both on acquire and removes every one of them
//! on drop, so there is no exit path that leaks a listener.
//!
//! # Invariants
//!
//! 1. Every id returned by the host during `acquire` is removed exactly once.
//! 2. Removal happens on explicit `release`, on drop, and on unwinding.

use std::cell::RefCell;
use std::rc::Rc;

/// Host-assigned listener handle.
pub type ListenerId = u64;

/// What a registered listener listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Document scroll listener; `capture` registers in the capture phase.
    Scroll { capture: bool },
    /// Resize observer on the tracked root element.
    Resize,
}

/// The host side of listener registration (DOM, native toolkit, test double).
///
/// Methods take `&self`: hosts are shared handles and keep their own interior
/// state.
pub trait ListenerHost {
    /// Register a document scroll listener.
    fn add_scroll_listener(&self, capture: bool) -> ListenerId;

    /// Observe size changes of the tracked root.
    fn observe_resize(&self) -> ListenerId;

    /// Remove a listener or observer previously returned by this host.
    fn remove_listener(&self, id: ListenerId);
}

/// RAII guard over the listeners of one open popup.
#[must_use = "dropping the guard removes the listeners"]
pub struct ListenerGuard {
    host: Rc<dyn ListenerHost>,
    registered: Vec<(ListenerId, ListenerKind)>,
}

impl ListenerGuard {
    /// Register the capture-phase scroll listener and the resize observer.
    pub fn acquire(host: Rc<dyn ListenerHost>) -> Self {
        let scroll = host.add_scroll_listener(true);
        let resize = host.observe_resize();
        tracing::debug!(scroll_id = scroll, resize_id = resize, "listeners acquired");
        Self {
            host,
            registered: vec![
                (scroll, ListenerKind::Scroll { capture: true }),
                (resize, ListenerKind::Resize),
            ],
        }
    }

    /// Listeners currently held.
    #[must_use]
    pub fn registered(&self) -> &[(ListenerId, ListenerKind)] {
        &self.registered
    }

    /// Remove all listeners now.
    pub fn release(self) {
        drop(self);
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("registered", &self.registered)
            .finish_non_exhaustive()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        for (id, kind) in self.registered.drain(..) {
            tracing::debug!(listener_id = id, kind = ?kind, "listener removed");
            self.host.remove_listener(id);
        }
    }
}

/// In-memory [`ListenerHost`] for headless hosts and tests.
///
/// Hands out sequential ids and records what is currently registered.
#[derive(Debug, Default)]
pub struct RecordingHost {
    state: RefCell<RecordingState>,
}

#[derive(Debug, Default)]
struct RecordingState {
    next_id: ListenerId,
    active: Vec<(ListenerId, ListenerKind)>,
    added: usize,
    removed: usize,
}

impl RecordingHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listeners currently registered.
    #[must_use]
    pub fn active(&self) -> Vec<(ListenerId, ListenerKind)> {
        self.state.borrow().active.clone()
    }

    /// Number of currently registered listeners.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.state.borrow().active.len()
    }

    /// Total registrations so far.
    #[must_use]
    pub fn added_count(&self) -> usize {
        self.state.borrow().added
    }

    /// Total removals so far.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.state.borrow().removed
    }

    fn add(&self, kind: ListenerKind) -> ListenerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.active.push((id, kind));
        state.added += 1;
        id
    }
}

impl ListenerHost for RecordingHost {
    fn add_scroll_listener(&self, capture: bool) -> ListenerId {
        self.add(ListenerKind::Scroll { capture })
    }

    fn observe_resize(&self) -> ListenerId {
        self.add(ListenerKind::Resize)
    }

    fn remove_listener(&self, id: ListenerId) {
        let mut state = self.state.borrow_mut();
        let before = state.active.len();
        state.active.retain(|(active, _)| *active != id);
        if state.active.len() != before {
            state.removed += 1;
        }
    }
}
