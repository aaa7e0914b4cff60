//! # pressable
//!
//! Input-modality aware press interaction core for UI surfaces.
//!
//! A "pressable surface" is any rendered element that reacts to presses:
//! a button, a link, a plain container promoted to a control. This crate
//! owns the interaction half of that primitive: it turns raw pointer,
//! touch, and keyboard events into a unified activation notion and drives
//! an expanding-ripple feedback effect, while classifying every focus
//! change as keyboard- or pointer-driven.
//!
//! ## Architecture
//!
//! Two cooperating pieces form the core:
//!
//! - [`state::FocusClassifier`] - process-wide heuristic deciding whether
//!   the most recent focus landed via keyboard navigation, by correlating
//!   `focus` timing with recent qualifying keydowns.
//! - [`state::PressSurface`] - per-surface coordinator mapping the raw
//!   event stream (mouse, touch, key, focus, blur) plus the classifier's
//!   verdict onto ripple start/stop/pulsate calls.
//!
//! The host rendering layer stays behind two capability interfaces:
//! [`host::HostView`] answers node/focus queries, [`ripple::RippleEffect`]
//! paints the feedback. Event delivery and time are host-pumped:
//! per-surface events go to the `PressSurface::handle_*` methods,
//! document-level events to [`state::DocumentInput`], and the
//! [`state::TimerQueue`] is advanced with the same timebase that stamps
//! the events.
//!
//! ## Modules
//!
//! - [`types`] - Core types (NodeId, Timestamp, ElementKind, SurfaceFlags)
//! - [`keys`] - Canonical key names and normalization
//! - [`events`] - Input event structs
//! - [`host`] - Capability interface toward the rendering layer
//! - [`ripple`] - Capability interface toward the feedback renderer
//! - [`state`] - The interaction systems themselves

pub mod events;
pub mod host;
pub mod keys;
pub mod ripple;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use events::{FocusEvent, KeyEvent, Modifiers, PointerEvent};

pub use host::HostView;

pub use ripple::{RippleEffect, RippleOrigin, StopComplete};

pub use state::{
    // Timers
    TimerQueue, TimerToken,
    // Document input
    DocumentInput, ListenerId,
    // Focus classification
    FocusClassifier, PendingClassification,
    FOCUS_CHECK_ATTEMPTS, FOCUS_CHECK_INTERVAL_MS, RECENT_KEYDOWN_WINDOW_MS,
    // Surfaces
    PressSurface, SurfaceProps,
};
