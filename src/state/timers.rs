//! Timer Queue - Cancellable scheduled callbacks on the host timebase.
//!
//! Single-threaded, host-pumped. The embedder advances the queue from its
//! event loop with the same millisecond timebase that stamps input events;
//! due callbacks run during [`advance_to`], in deadline order.
//!
//! # Example
//!
//! ```
//! use pressable::state::TimerQueue;
//!
//! let timers = TimerQueue::new();
//! let token = timers.set_timeout(40, || println!("fired"));
//!
//! // From the host event loop:
//! timers.advance_to(100); // runs the callback
//!
//! // Or cancel before it fires:
//! timers.clear_timeout(token);
//! ```
//!
//! [`advance_to`]: TimerQueue::advance_to

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::Timestamp;

// =============================================================================
// TYPES
// =============================================================================

/// Identifies a scheduled callback for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

struct Entry {
    token: TimerToken,
    deadline: Timestamp,
    callback: Box<dyn FnOnce()>,
}

struct QueueState {
    now: Timestamp,
    next_token: u64,
    entries: Vec<Entry>,
}

// =============================================================================
// TIMER QUEUE
// =============================================================================

/// One-shot timer service shared by the interaction systems.
///
/// Callbacks scheduled from a running callback participate in the same
/// `advance_to` pass if their deadline falls inside it.
pub struct TimerQueue {
    state: RefCell<QueueState>,
}

impl TimerQueue {
    /// Create a queue at time zero.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(QueueState {
                now: 0,
                next_token: 0,
                entries: Vec::new(),
            }),
        })
    }

    /// Current time on the host timebase (last pumped value, or the deadline
    /// of the callback currently running).
    pub fn now(&self) -> Timestamp {
        self.state.borrow().now
    }

    /// Schedule a one-shot callback `delay_ms` from now.
    pub fn set_timeout(&self, delay_ms: u64, callback: impl FnOnce() + 'static) -> TimerToken {
        let mut state = self.state.borrow_mut();
        let token = TimerToken(state.next_token);
        state.next_token += 1;
        let deadline = state.now + delay_ms;
        state.entries.push(Entry {
            token,
            deadline,
            callback: Box::new(callback),
        });
        token
    }

    /// Cancel a scheduled callback. Returns false if it already fired or was
    /// already cleared.
    pub fn clear_timeout(&self, token: TimerToken) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.entries.len();
        state.entries.retain(|entry| entry.token != token);
        state.entries.len() != before
    }

    /// Advance the clock to `now`, running every due callback in deadline
    /// order (ties broken by scheduling order).
    ///
    /// Re-entrant-safe: a running callback may schedule or clear timers; a
    /// newly scheduled callback whose deadline is within `now` runs in the
    /// same pass. A `now` in the past is a no-op.
    pub fn advance_to(&self, now: Timestamp) {
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.deadline <= now)
                    .min_by_key(|(_, entry)| (entry.deadline, entry.token.0))
                    .map(|(i, _)| i);
                match due {
                    Some(i) => {
                        let entry = state.entries.remove(i);
                        if entry.deadline > state.now {
                            state.now = entry.deadline;
                        }
                        Some(entry)
                    }
                    None => {
                        if now > state.now {
                            state.now = now;
                        }
                        None
                    }
                }
            };
            match next {
                Some(entry) => (entry.callback)(),
                None => break,
            }
        }
    }

    /// Number of outstanding timers.
    pub fn pending(&self) -> usize {
        self.state.borrow().entries.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_fires_in_deadline_order() {
        let timers = TimerQueue::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_a = order.clone();
        timers.set_timeout(50, move || order_a.borrow_mut().push("a"));
        let order_b = order.clone();
        timers.set_timeout(10, move || order_b.borrow_mut().push("b"));
        let order_c = order.clone();
        timers.set_timeout(30, move || order_c.borrow_mut().push("c"));

        timers.advance_to(100);
        assert_eq!(*order.borrow(), vec!["b", "c", "a"]);
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.now(), 100);
    }

    #[test]
    fn test_only_due_callbacks_fire() {
        let timers = TimerQueue::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        let fired_a = fired.clone();
        timers.set_timeout(10, move || fired_a.borrow_mut().push("a"));
        let fired_b = fired.clone();
        timers.set_timeout(200, move || fired_b.borrow_mut().push("b"));

        timers.advance_to(50);
        assert_eq!(*fired.borrow(), vec!["a"]);
        assert_eq!(timers.pending(), 1);

        timers.advance_to(200);
        assert_eq!(*fired.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_clear_timeout() {
        let timers = TimerQueue::new();
        let fired = Rc::new(RefCell::new(Vec::<&str>::new()));

        let fired_a = fired.clone();
        let token = timers.set_timeout(10, move || fired_a.borrow_mut().push("a"));

        assert!(timers.clear_timeout(token));
        assert!(!timers.clear_timeout(token));

        timers.advance_to(100);
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_same_deadline_keeps_scheduling_order() {
        let timers = TimerQueue::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_a = order.clone();
        timers.set_timeout(10, move || order_a.borrow_mut().push("a"));
        let order_b = order.clone();
        timers.set_timeout(10, move || order_b.borrow_mut().push("b"));

        timers.advance_to(10);
        assert_eq!(*order.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_callback_schedules_followup_in_same_pass() {
        let timers = TimerQueue::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_outer = order.clone();
        let timers_inner = timers.clone();
        timers.set_timeout(10, move || {
            order_outer.borrow_mut().push("first");
            let order_inner = order_outer.clone();
            timers_inner.set_timeout(10, move || order_inner.borrow_mut().push("second"));
        });

        timers.advance_to(100);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
        // The chained deadline was relative to the first callback's deadline.
        assert_eq!(timers.now(), 100);
    }

    #[test]
    fn test_callback_can_clear_sibling() {
        let timers = TimerQueue::new();
        let fired = Rc::new(RefCell::new(Vec::<&str>::new()));

        let fired_b = fired.clone();
        let victim = timers.set_timeout(20, move || fired_b.borrow_mut().push("b"));

        let fired_a = fired.clone();
        let timers_inner = timers.clone();
        timers.set_timeout(10, move || {
            fired_a.borrow_mut().push("a");
            timers_inner.clear_timeout(victim);
        });

        timers.advance_to(100);
        assert_eq!(*fired.borrow(), vec!["a"]);
    }

    #[test]
    fn test_advance_into_past_is_noop() {
        let timers = TimerQueue::new();
        timers.advance_to(100);

        let fired = Rc::new(RefCell::new(Vec::<&str>::new()));
        let fired_a = fired.clone();
        timers.set_timeout(10, move || fired_a.borrow_mut().push("a"));

        timers.advance_to(50);
        assert!(fired.borrow().is_empty());
        assert_eq!(timers.now(), 100);

        timers.advance_to(110);
        assert_eq!(*fired.borrow(), vec!["a"]);
    }
}
