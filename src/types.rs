//! Core types shared across the crate.
//!
//! Small vocabulary types only. The interaction systems themselves live in
//! [`crate::state`]; the capability interfaces toward the host live in
//! [`crate::host`] and [`crate::ripple`].

// =============================================================================
// Handles and time
// =============================================================================

/// Opaque handle to a host-side node.
///
/// The host allocates these however it likes (the reference embedding uses
/// component indices); the crate only ever hands them back to the
/// [`crate::host::HostView`] queries.
pub type NodeId = usize;

/// Milliseconds on the host's monotonic timebase.
///
/// Every event carries one, and [`crate::state::TimerQueue`] is pumped with
/// the same timebase. The crate never reads a wall clock of its own.
pub type Timestamp = u64;

// =============================================================================
// Element kind
// =============================================================================

/// What the surface is rendered as, from the keyboard's point of view.
///
/// Only the keyboard-activation shim consults this: native buttons and
/// anchors already activate on space/enter, anything else needs the
/// synthetic click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    /// A native button element. Activates itself.
    Button,
    /// A native anchor/link element. Activates itself.
    Anchor,
    /// Any non-interactive element promoted to a pressable surface.
    #[default]
    Other,
}

impl ElementKind {
    /// Whether the element activates natively on space/enter.
    pub fn is_native_interactive(self) -> bool {
        matches!(self, Self::Button | Self::Anchor)
    }
}

// =============================================================================
// Surface Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Per-surface interaction state as a bitfield.
    ///
    /// Combine with bitwise OR: `SurfaceFlags::KEYBOARD_FOCUSED | SurfaceFlags::KEY_HELD`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SurfaceFlags: u8 {
        /// Focus was reached via keyboard navigation.
        const KEYBOARD_FOCUSED = 1 << 0;
        /// A pointer/touch-started ripple is live and owes a stop.
        const POINTER_ACTIVE = 1 << 1;
        /// A space-key-started ripple is live and owes a stop.
        const KEY_RIPPLE = 1 << 2;
        /// A focus pulsate is live.
        const FOCUS_PULSATE = 1 << 3;
        /// Space is held down (debounce guard for key repeat).
        const KEY_HELD = 1 << 4;
        /// Surface is disabled; interaction handlers are inert.
        const DISABLED = 1 << 5;
    }
}

impl SurfaceFlags {
    /// Flags describing a ripple animation that is currently live.
    pub const LIVE_RIPPLE: SurfaceFlags = SurfaceFlags::POINTER_ACTIVE
        .union(SurfaceFlags::KEY_RIPPLE)
        .union(SurfaceFlags::FOCUS_PULSATE);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_kind_native() {
        assert!(ElementKind::Button.is_native_interactive());
        assert!(ElementKind::Anchor.is_native_interactive());
        assert!(!ElementKind::Other.is_native_interactive());
        assert_eq!(ElementKind::default(), ElementKind::Other);
    }

    #[test]
    fn test_live_ripple_mask() {
        assert!(SurfaceFlags::LIVE_RIPPLE.contains(SurfaceFlags::POINTER_ACTIVE));
        assert!(SurfaceFlags::LIVE_RIPPLE.contains(SurfaceFlags::KEY_RIPPLE));
        assert!(SurfaceFlags::LIVE_RIPPLE.contains(SurfaceFlags::FOCUS_PULSATE));
        assert!(!SurfaceFlags::LIVE_RIPPLE.contains(SurfaceFlags::KEY_HELD));
        assert!(!SurfaceFlags::LIVE_RIPPLE.contains(SurfaceFlags::DISABLED));
    }
}
