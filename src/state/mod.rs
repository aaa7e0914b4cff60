//! State Module - Runtime interaction systems.
//!
//! This module contains the systems that turn raw input events into press
//! interaction state:
//!
//! - **Timers** - Cancellable scheduled callbacks, pumped by the host
//! - **Document** - Document-level listener registry and dispatch
//! - **Keyboard Focus** - Keyboard-vs-pointer focus classification
//! - **Surface** - Per-surface ripple/focus coordination

mod document;
mod keyboard_focus;
mod surface;
mod timers;

pub use document::*;
pub use keyboard_focus::*;
pub use surface::*;
pub use timers::*;
