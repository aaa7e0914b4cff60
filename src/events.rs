//! Event Types - Input events as delivered by the host.
//!
//! Plain owned structs. The host constructs these from its native event
//! objects and feeds them to the per-surface handlers on
//! [`PressSurface`](crate::state::PressSurface) and to the document-level
//! dispatch on [`DocumentInput`](crate::state::DocumentInput).
//!
//! All events carry a [`Timestamp`] on the host's monotonic timebase; the
//! same timebase must be used to pump [`TimerQueue`](crate::state::TimerQueue).

use crate::keys;
use crate::types::Timestamp;

// =============================================================================
// Modifiers
// =============================================================================

/// Keyboard modifier state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

// =============================================================================
// Keyboard
// =============================================================================

/// Keyboard event.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent {
    /// Canonical key name (e.g., "space", "enter", "tab"). See [`crate::keys`].
    pub key: String,
    /// When the host observed the event.
    pub timestamp: Timestamp,
    /// Modifier keys state.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event, normalizing the raw host key name.
    pub fn new(key: impl AsRef<str>, timestamp: Timestamp) -> Self {
        Self {
            key: keys::normalize_key(key.as_ref()),
            timestamp,
            modifiers: Modifiers::default(),
        }
    }

    /// Create a key event with modifiers.
    pub fn with_modifiers(key: impl AsRef<str>, timestamp: Timestamp, modifiers: Modifiers) -> Self {
        Self { modifiers, ..Self::new(key, timestamp) }
    }
}

// =============================================================================
// Pointer
// =============================================================================

/// Pointer event, used for mouse and touch alike.
///
/// Which kind it is follows from the handler it is delivered to
/// (`handle_mouse_down` vs `handle_touch_start`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// X coordinate in the surface's coordinate space.
    pub x: f32,
    /// Y coordinate in the surface's coordinate space.
    pub y: f32,
    /// When the host observed the event.
    pub timestamp: Timestamp,
    /// Modifier keys state.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a pointer event at the given coordinates.
    pub fn new(x: f32, y: f32, timestamp: Timestamp) -> Self {
        Self { x, y, timestamp, modifiers: Modifiers::default() }
    }
}

// =============================================================================
// Focus
// =============================================================================

/// Focus gained/lost event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusEvent {
    /// When the host observed the event.
    pub timestamp: Timestamp,
}

impl FocusEvent {
    /// Create a focus event.
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_normalizes() {
        let event = KeyEvent::new("Tab", 10);
        assert_eq!(event.key, "tab");
        assert_eq!(event.timestamp, 10);
        assert_eq!(event.modifiers, Modifiers::none());

        let event = KeyEvent::new(" ", 0);
        assert_eq!(event.key, "space");
    }

    #[test]
    fn test_key_event_with_modifiers() {
        let event = KeyEvent::with_modifiers("Tab", 5, Modifiers::shift());
        assert_eq!(event.key, "tab");
        assert!(event.modifiers.shift);
        assert!(!event.modifiers.ctrl);
    }

    #[test]
    fn test_pointer_event() {
        let event = PointerEvent::new(10.0, 20.0, 7);
        assert_eq!(event.x, 10.0);
        assert_eq!(event.y, 20.0);
        assert_eq!(event.timestamp, 7);
    }
}
