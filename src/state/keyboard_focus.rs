//! Keyboard Focus - Keyboard-vs-pointer focus classification.
//!
//! No input event says "this focus change came from the keyboard". The
//! classifier reconstructs that fact from timing: a `focus` that lands while
//! a qualifying keydown is recent, with no pointer-down since, was driven by
//! keyboard navigation.
//!
//! Because hosts deliver `keydown` and `focus` in either order depending on
//! device and platform, a single synchronous check is unreliable. Instead,
//! [`FocusClassifier::classify`] polls a bounded number of times
//! ([`FOCUS_CHECK_ATTEMPTS`] checks, [`FOCUS_CHECK_INTERVAL_MS`] apart) and
//! settles on the first check that confirms the keyboard signal.
//!
//! Process-wide input state lives in one classifier instance shared by every
//! surface. Writers are exactly: the two document listeners installed by
//! [`FocusClassifier::register_global_listeners`], and surfaces' own
//! mousedown handlers via [`FocusClassifier::suppress_keyboard_signal`].
//! Everything else only reads.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::host::HostView;
use crate::keys;
use crate::types::{NodeId, Timestamp};

use super::document::DocumentInput;
use super::timers::{TimerQueue, TimerToken};

// =============================================================================
// TUNING
// =============================================================================

/// Spacing between classification checks.
pub const FOCUS_CHECK_INTERVAL_MS: u64 = 40;

/// How many checks run before settling on a non-keyboard verdict.
pub const FOCUS_CHECK_ATTEMPTS: u32 = 5;

/// How long a qualifying keydown keeps counting as "recent".
///
/// Must comfortably cover the whole poll window, so a keydown that preceded
/// the focus event is still visible to the final check.
pub const RECENT_KEYDOWN_WINDOW_MS: u64 = 500;

// =============================================================================
// GLOBAL INPUT STATE
// =============================================================================

/// Process-wide input signals, shared by every in-flight classification.
struct GlobalInputState {
    /// Last qualifying keydown anywhere in the document.
    last_keydown_at: Cell<Option<Timestamp>>,
    /// True after any pointer-down, until the next qualifying keydown.
    suppressed: Cell<bool>,
    /// Idempotence guard for listener registration.
    registered: Cell<bool>,
}

impl GlobalInputState {
    fn signal_active(&self, now: Timestamp) -> bool {
        if self.suppressed.get() {
            return false;
        }
        match self.last_keydown_at.get() {
            Some(at) => now.saturating_sub(at) <= RECENT_KEYDOWN_WINDOW_MS,
            None => false,
        }
    }
}

// =============================================================================
// FOCUS CLASSIFIER
// =============================================================================

/// Decides whether the most recent focus on a node was keyboard-driven.
///
/// One instance per process, `Rc`-shared by every surface.
pub struct FocusClassifier {
    timers: Rc<TimerQueue>,
    host: Rc<dyn HostView>,
    input: Rc<GlobalInputState>,
}

impl FocusClassifier {
    /// Create a classifier. Listeners are not installed until
    /// [`register_global_listeners`](Self::register_global_listeners).
    pub fn new(timers: Rc<TimerQueue>, host: Rc<dyn HostView>) -> Rc<Self> {
        Rc::new(Self {
            timers,
            host,
            input: Rc::new(GlobalInputState {
                last_keydown_at: Cell::new(None),
                suppressed: Cell::new(false),
                registered: Cell::new(false),
            }),
        })
    }

    /// Install the two document-level listeners.
    ///
    /// Idempotent: safe to call from every surface's mount; registration
    /// happens once per classifier and is never torn down.
    pub fn register_global_listeners(&self, document: &DocumentInput) {
        if self.input.registered.get() {
            return;
        }
        self.input.registered.set(true);

        let input = self.input.clone();
        document.on_keydown(move |event| {
            if keys::is_focus_key(&event.key) {
                input.last_keydown_at.set(Some(event.timestamp));
                input.suppressed.set(false);
            }
        });

        let input = self.input.clone();
        document.on_pointer_down(move |_| {
            input.suppressed.set(true);
        });
    }

    /// Kill the keyboard signal after a pointer interaction.
    ///
    /// Surfaces call this from their own mousedown handling; the document
    /// pointer-down listener does the same for presses landing anywhere
    /// else. Cleared by the next qualifying keydown.
    pub fn suppress_keyboard_signal(&self) {
        self.input.suppressed.set(true);
    }

    /// Whether a qualifying keydown is recent and unsuppressed right now.
    pub fn keyboard_signal_active(&self) -> bool {
        self.input.signal_active(self.timers.now())
    }

    /// Schedule classification of a focus event that just landed on `node`.
    ///
    /// Polls up to [`FOCUS_CHECK_ATTEMPTS`] times. The first check that sees
    /// the node focused with the keyboard signal active resolves
    /// `on_decision(true)`. If every check fails, `on_decision(false)` fires
    /// only if the node still holds focus; a node that lost focus or was
    /// detached resolves silently with no callback at all.
    ///
    /// The returned handle cancels the remaining checks; callers must cancel
    /// it when the surface unmounts or a newer event supersedes the
    /// classification.
    pub fn classify(
        &self,
        node: NodeId,
        on_decision: impl Fn(bool) + 'static,
    ) -> PendingClassification {
        let check = Check {
            host: self.host.clone(),
            input: self.input.clone(),
            node,
            decision: Rc::new(on_decision),
            token_slot: Rc::new(Cell::new(None)),
            cancelled: Rc::new(Cell::new(false)),
        };
        let pending = PendingClassification {
            timers: Rc::downgrade(&self.timers),
            token_slot: check.token_slot.clone(),
            cancelled: check.cancelled.clone(),
        };
        check.schedule(&self.timers, 1);
        pending
    }
}

// =============================================================================
// POLLING CHECK
// =============================================================================

/// One in-flight classification, rescheduling itself until it settles.
struct Check {
    host: Rc<dyn HostView>,
    input: Rc<GlobalInputState>,
    node: NodeId,
    decision: Rc<dyn Fn(bool)>,
    token_slot: Rc<Cell<Option<TimerToken>>>,
    cancelled: Rc<Cell<bool>>,
}

impl Check {
    fn schedule(self, timers: &Rc<TimerQueue>, attempt: u32) {
        // The closure holds the queue weakly; a queue torn down with checks
        // still pending must not be kept alive by its own entries.
        let weak_timers = Rc::downgrade(timers);
        let slot = self.token_slot.clone();
        let token = timers.set_timeout(FOCUS_CHECK_INTERVAL_MS, move || {
            if self.cancelled.get() {
                return;
            }
            self.token_slot.set(None);
            let timers = match weak_timers.upgrade() {
                Some(timers) => timers,
                None => return,
            };
            if !self.host.is_attached(self.node) {
                // Node left the tree mid-classification: terminal negative,
                // no callback.
                return;
            }
            let focused = self.host.has_focus(self.node);
            if focused && self.input.signal_active(timers.now()) {
                (*self.decision)(true);
                return;
            }
            if attempt < FOCUS_CHECK_ATTEMPTS {
                self.schedule(&timers, attempt + 1);
            } else if focused {
                (*self.decision)(false);
            }
        });
        slot.set(Some(token));
    }
}

// =============================================================================
// PENDING CLASSIFICATION
// =============================================================================

/// Cancellation handle for an in-flight classification.
pub struct PendingClassification {
    timers: Weak<TimerQueue>,
    token_slot: Rc<Cell<Option<TimerToken>>>,
    cancelled: Rc<Cell<bool>>,
}

impl PendingClassification {
    /// Cancel the remaining checks. Idempotent; a classification that has
    /// already resolved is left alone.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(token) = self.token_slot.take() {
            if let Some(timers) = self.timers.upgrade() {
                timers.clear_timeout(token);
            }
        }
    }

    /// Whether [`cancel`](Self::cancel) was called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

// =============================================================================
// TESTS
// =============================================================================
