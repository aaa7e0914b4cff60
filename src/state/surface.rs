//! Press Surface - Per-surface ripple and focus coordination.
//!
//! One [`PressSurface`] per rendered pressable element. It owns the ripple
//! lifecycle (start / stop / pulsate), reconciles it against focus and
//! activation events, and tracks whether the surface is keyboard-focused.
//!
//! Every handler performs its internal bookkeeping first and then forwards
//! the event to the caller-supplied callback, so user code always observes
//! consistent state and callbacks are never dropped (except by the
//! documented disabled suppression).
//!
//! # Example
//!
//! ```ignore
//! use pressable::state::{DocumentInput, FocusClassifier, PressSurface, TimerQueue};
//! use pressable::SurfaceProps;
//!
//! let timers = TimerQueue::new();
//! let document = DocumentInput::new();
//! let classifier = FocusClassifier::new(timers.clone(), host.clone());
//!
//! let surface = PressSurface::mount(
//!     node,
//!     SurfaceProps {
//!         focus_ripple: true,
//!         on_click: Some(Box::new(|_| println!("activated"))),
//!         ..Default::default()
//!     },
//!     Some(ripple),
//!     classifier,
//!     &document,
//!     host,
//! );
//!
//! // The host forwards raw events:
//! surface.handle_mouse_down(&event);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::events::{FocusEvent, KeyEvent, PointerEvent};
use crate::host::HostView;
use crate::keys;
use crate::ripple::{RippleEffect, RippleOrigin};
use crate::types::{ElementKind, NodeId, SurfaceFlags};

use super::document::DocumentInput;
use super::keyboard_focus::{FocusClassifier, PendingClassification};

// =============================================================================
// PROPS
// =============================================================================

/// Configuration and callbacks for a pressable surface.
///
/// Flags are consumed at mount; `disabled` can be changed later through
/// [`PressSurface::set_disabled`]. Callbacks are invoked after the internal
/// ripple/focus bookkeeping for the same event.
#[derive(Default)]
pub struct SurfaceProps {
    /// Ripples expand from the surface center instead of the press position.
    pub center_ripple: bool,
    /// Discard the ripple handle at mount; no feedback is ever drawn.
    pub disable_ripple: bool,
    /// Pulsate while keyboard-focused and ripple on space activation.
    pub focus_ripple: bool,
    /// Start out disabled.
    pub disabled: bool,
    /// What the surface renders as; drives the keyboard-activation shim.
    pub element: ElementKind,

    pub on_mouse_down: Option<Box<dyn Fn(&PointerEvent)>>,
    pub on_mouse_up: Option<Box<dyn Fn(&PointerEvent)>>,
    pub on_mouse_leave: Option<Box<dyn Fn(&PointerEvent)>>,
    pub on_touch_start: Option<Box<dyn Fn(&PointerEvent)>>,
    pub on_touch_end: Option<Box<dyn Fn(&PointerEvent)>>,
    pub on_focus: Option<Box<dyn Fn(&FocusEvent)>>,
    pub on_blur: Option<Box<dyn Fn(&FocusEvent)>>,
    /// Fired once focus is confirmed as keyboard-driven.
    pub on_keyboard_focus: Option<Box<dyn Fn(&FocusEvent)>>,
    pub on_key_down: Option<Box<dyn Fn(&KeyEvent)>>,
    pub on_key_up: Option<Box<dyn Fn(&KeyEvent)>>,
    /// Activation callback; invoked synthetically by the keyboard shim when
    /// space/enter is pressed on a non-native element.
    pub on_click: Option<Box<dyn Fn(&KeyEvent)>>,
}

// =============================================================================
// PRESS SURFACE
// =============================================================================

/// Interaction coordinator for one pressable surface.
pub struct PressSurface {
    node: NodeId,
    props: SurfaceProps,
    flags: Cell<SurfaceFlags>,
    /// Cleared by unmount; gates every late callback (ripple-stop
    /// completions, classifier decisions) against teardown.
    alive: Cell<bool>,
    warned_unfocusable: Cell<bool>,
    ripple: RefCell<Option<Rc<dyn RippleEffect>>>,
    pending: RefCell<Option<PendingClassification>>,
    classifier: Rc<FocusClassifier>,
    host: Rc<dyn HostView>,
    weak_self: Weak<PressSurface>,
}

impl PressSurface {
    /// Mount a surface for `node`.
    ///
    /// Registers the classifier's global listeners (idempotent across
    /// surfaces) and keeps the ripple handle unless `disable_ripple` is set
    /// or the host supplied none.
    pub fn mount(
        node: NodeId,
        props: SurfaceProps,
        ripple: Option<Rc<dyn RippleEffect>>,
        classifier: Rc<FocusClassifier>,
        document: &DocumentInput,
        host: Rc<dyn HostView>,
    ) -> Rc<Self> {
        classifier.register_global_listeners(document);
        let ripple = if props.disable_ripple { None } else { ripple };
        let mut flags = SurfaceFlags::empty();
        if props.disabled {
            flags |= SurfaceFlags::DISABLED;
        }
        Rc::new_cyclic(|weak_self| Self {
            node,
            props,
            flags: Cell::new(flags),
            alive: Cell::new(true),
            warned_unfocusable: Cell::new(false),
            ripple: RefCell::new(ripple),
            pending: RefCell::new(None),
            classifier,
            host,
            weak_self: weak_self.clone(),
        })
    }

    /// Tear the surface down: cancel any pending classification, drop the
    /// ripple handle, and block late completions from mutating state.
    /// Idempotent; also run on drop.
    pub fn unmount(&self) {
        if !self.alive.get() {
            return;
        }
        self.alive.set(false);
        self.cancel_pending_classification();
        *self.ripple.borrow_mut() = None;
        self.flags
            .set(self.flags.get().intersection(SurfaceFlags::DISABLED));
    }

    /// Imperatively move input focus to the surface's node.
    pub fn focus(&self) {
        if !self.interactive() {
            return;
        }
        self.host.request_focus(self.node);
    }

    /// Enable or disable the surface. Disabling forces keyboard focus off
    /// and makes every interaction handler inert until re-enabled.
    pub fn set_disabled(&self, disabled: bool) {
        if disabled == self.is_disabled() {
            return;
        }
        if disabled {
            self.cancel_pending_classification();
            self.set_flag(SurfaceFlags::KEYBOARD_FOCUSED, false);
            self.set_flag(SurfaceFlags::KEY_HELD, false);
            self.set_flag(SurfaceFlags::DISABLED, true);
        } else {
            self.set_flag(SurfaceFlags::DISABLED, false);
        }
    }

    /// Whether the surface currently counts as keyboard-focused.
    pub fn is_keyboard_focused(&self) -> bool {
        self.flags.get().contains(SurfaceFlags::KEYBOARD_FOCUSED)
    }

    /// Whether the surface is disabled.
    pub fn is_disabled(&self) -> bool {
        self.flags.get().contains(SurfaceFlags::DISABLED)
    }

    // =========================================================================
    // POINTER HANDLERS
    // =========================================================================

    /// Mouse pressed on the surface.
    ///
    /// Kills the keyboard signal (a pointer is driving now), clears any
    /// keyboard-focus state, and starts the press ripple.
    pub fn handle_mouse_down(&self, event: &PointerEvent) -> bool {
        if !self.interactive() {
            return false;
        }
        self.cancel_pending_classification();
        self.classifier.suppress_keyboard_signal();
        self.set_flag(SurfaceFlags::KEYBOARD_FOCUSED, false);
        if let Some(ripple) = self.ripple_handle() {
            self.clear_live_flags();
            ripple.start(self.origin_for(event));
            self.set_flag(SurfaceFlags::POINTER_ACTIVE, true);
        }
        if let Some(on_mouse_down) = &self.props.on_mouse_down {
            on_mouse_down(event);
        }
        false
    }

    /// Mouse released. Stops the press ripple started by the matching down.
    pub fn handle_mouse_up(&self, event: &PointerEvent) -> bool {
        if !self.interactive() {
            return false;
        }
        self.stop_pointer_ripple();
        if let Some(on_mouse_up) = &self.props.on_mouse_up {
            on_mouse_up(event);
        }
        false
    }

    /// Mouse left the surface.
    ///
    /// While keyboard-focused the leave is consumed instead of stopping the
    /// ripple, so a focus pulsate survives the cursor passing through.
    pub fn handle_mouse_leave(&self, event: &PointerEvent) -> bool {
        if !self.interactive() {
            return false;
        }
        let keyboard_focused = self.is_keyboard_focused();
        if !keyboard_focused {
            self.stop_pointer_ripple();
        }
        if let Some(on_mouse_leave) = &self.props.on_mouse_leave {
            on_mouse_leave(event);
        }
        keyboard_focused
    }

    /// Touch began on the surface. Starts the press ripple.
    pub fn handle_touch_start(&self, event: &PointerEvent) -> bool {
        if !self.interactive() {
            return false;
        }
        if let Some(ripple) = self.ripple_handle() {
            self.clear_live_flags();
            ripple.start(self.origin_for(event));
            self.set_flag(SurfaceFlags::POINTER_ACTIVE, true);
        }
        if let Some(on_touch_start) = &self.props.on_touch_start {
            on_touch_start(event);
        }
        false
    }

    /// Touch ended. Stops the press ripple started by the matching start.
    pub fn handle_touch_end(&self, event: &PointerEvent) -> bool {
        if !self.interactive() {
            return false;
        }
        self.stop_pointer_ripple();
        if let Some(on_touch_end) = &self.props.on_touch_end {
            on_touch_end(event);
        }
        false
    }

    // =========================================================================
    // FOCUS HANDLERS
    // =========================================================================

    /// Surface lost focus. Runs even while disabled so a surface disabled
    /// mid-interaction still cleans up.
    pub fn handle_blur(&self, event: &FocusEvent) -> bool {
        if !self.alive.get() {
            return false;
        }
        self.cancel_pending_classification();
        if self.flags.get().intersects(SurfaceFlags::LIVE_RIPPLE) {
            self.clear_live_flags();
            if let Some(ripple) = self.ripple_handle() {
                ripple.stop(None);
            }
        }
        self.set_flag(SurfaceFlags::KEYBOARD_FOCUSED, false);
        self.set_flag(SurfaceFlags::KEY_HELD, false);
        if let Some(on_blur) = &self.props.on_blur {
            on_blur(event);
        }
        false
    }

    /// Surface gained focus. Kicks off keyboard-vs-pointer classification;
    /// `on_focus` is forwarded regardless of how classification settles.
    pub fn handle_focus(&self, event: &FocusEvent) -> bool {
        if !self.interactive() {
            return false;
        }
        if self.host.is_attached(self.node) {
            self.cancel_pending_classification();
            let weak = self.weak_self.clone();
            let event = *event;
            let pending = self.classifier.classify(self.node, move |keyboard| {
                if !keyboard {
                    return;
                }
                if let Some(surface) = weak.upgrade() {
                    surface.keyboard_focus_confirmed(&event);
                }
            });
            *self.pending.borrow_mut() = Some(pending);
        } else if self.wants_keyboard_focus_styling() && !self.warned_unfocusable.get() {
            self.warned_unfocusable.set(true);
            tracing::warn!(
                node = self.node,
                "keyboard focus styling requested on a surface whose node cannot be \
                 resolved; classification disabled"
            );
        }
        if let Some(on_focus) = &self.props.on_focus {
            on_focus(event);
        }
        false
    }

    // =========================================================================
    // KEYBOARD HANDLERS
    // =========================================================================

    /// Key pressed while the surface has focus.
    ///
    /// Space while keyboard-focused restarts the ripple exactly once per
    /// hold (the running ripple fully stops before the new one starts).
    /// Space/enter on a non-native element consumes the event and invokes
    /// the activation callback synthetically.
    pub fn handle_key_down(&self, event: &KeyEvent) -> bool {
        if !self.interactive() {
            return false;
        }
        let flags = self.flags.get();
        if event.key == keys::SPACE
            && self.props.focus_ripple
            && flags.contains(SurfaceFlags::KEYBOARD_FOCUSED)
            && !flags.contains(SurfaceFlags::KEY_HELD)
        {
            if let Some(ripple) = self.ripple_handle() {
                self.set_flag(SurfaceFlags::KEY_HELD, true);
                if flags.intersects(SurfaceFlags::LIVE_RIPPLE) {
                    self.clear_live_flags();
                    let weak = self.weak_self.clone();
                    ripple.stop(Some(Box::new(move || {
                        if let Some(surface) = weak.upgrade() {
                            surface.restart_key_ripple();
                        }
                    })));
                } else {
                    ripple.start(RippleOrigin::Centered);
                    self.set_flag(SurfaceFlags::KEY_RIPPLE, true);
                }
            }
        }
        if let Some(on_key_down) = &self.props.on_key_down {
            on_key_down(event);
        }
        // Keyboard accessibility for elements that do not activate natively.
        if !self.props.element.is_native_interactive()
            && (event.key == keys::SPACE || event.key == keys::ENTER)
        {
            if let Some(on_click) = &self.props.on_click {
                on_click(event);
                return true;
            }
        }
        false
    }

    /// Key released.
    ///
    /// Releasing space while keyboard-focused stops the activation ripple
    /// and pulsates as confirmation; without a matching key-down guard the
    /// release is a no-op.
    pub fn handle_key_up(&self, event: &KeyEvent) -> bool {
        if !self.interactive() {
            return false;
        }
        let flags = self.flags.get();
        if event.key == keys::SPACE
            && flags.contains(SurfaceFlags::KEYBOARD_FOCUSED)
            && flags.contains(SurfaceFlags::KEY_HELD)
        {
            self.set_flag(SurfaceFlags::KEY_HELD, false);
            if let Some(ripple) = self.ripple_handle() {
                self.clear_live_flags();
                let weak = self.weak_self.clone();
                ripple.stop(Some(Box::new(move || {
                    if let Some(surface) = weak.upgrade() {
                        surface.pulsate_after_release();
                    }
                })));
            }
        }
        if let Some(on_key_up) = &self.props.on_key_up {
            on_key_up(event);
        }
        false
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    /// Classifier settled on "keyboard". May arrive after teardown or a
    /// disable; both are checked before any state moves.
    fn keyboard_focus_confirmed(&self, event: &FocusEvent) {
        if !self.interactive() {
            return;
        }
        self.set_flag(SurfaceFlags::KEYBOARD_FOCUSED, true);
        if self.props.focus_ripple {
            if let Some(ripple) = self.ripple_handle() {
                self.clear_live_flags();
                ripple.pulsate();
                self.set_flag(SurfaceFlags::FOCUS_PULSATE, true);
            }
        }
        if let Some(on_keyboard_focus) = &self.props.on_keyboard_focus {
            on_keyboard_focus(event);
        }
    }

    /// Completion of the stop issued on space keydown. Skipped if the key
    /// was already released or the surface went away.
    fn restart_key_ripple(&self) {
        if !self.interactive() || !self.flags.get().contains(SurfaceFlags::KEY_HELD) {
            return;
        }
        if let Some(ripple) = self.ripple_handle() {
            ripple.start(RippleOrigin::Centered);
            self.set_flag(SurfaceFlags::KEY_RIPPLE, true);
        }
    }

    /// Completion of the stop issued on space keyup.
    fn pulsate_after_release(&self) {
        if !self.interactive() || !self.is_keyboard_focused() {
            return;
        }
        if let Some(ripple) = self.ripple_handle() {
            ripple.pulsate();
            self.set_flag(SurfaceFlags::FOCUS_PULSATE, true);
        }
    }

    fn stop_pointer_ripple(&self) {
        if !self.flags.get().contains(SurfaceFlags::POINTER_ACTIVE) {
            return;
        }
        self.clear_live_flags();
        if let Some(ripple) = self.ripple_handle() {
            ripple.stop(None);
        }
    }

    fn origin_for(&self, event: &PointerEvent) -> RippleOrigin {
        if self.props.center_ripple {
            RippleOrigin::Centered
        } else {
            RippleOrigin::At { x: event.x, y: event.y }
        }
    }

    fn ripple_handle(&self) -> Option<Rc<dyn RippleEffect>> {
        self.ripple.borrow().clone()
    }

    fn cancel_pending_classification(&self) {
        if let Some(pending) = self.pending.borrow_mut().take() {
            pending.cancel();
        }
    }

    fn wants_keyboard_focus_styling(&self) -> bool {
        self.props.focus_ripple || self.props.on_keyboard_focus.is_some()
    }

    fn interactive(&self) -> bool {
        self.alive.get() && !self.is_disabled()
    }

    fn set_flag(&self, flag: SurfaceFlags, on: bool) {
        let mut flags = self.flags.get();
        flags.set(flag, on);
        self.flags.set(flags);
    }

    fn clear_live_flags(&self) {
        self.flags
            .set(self.flags.get().difference(SurfaceFlags::LIVE_RIPPLE));
    }
}

impl Drop for PressSurface {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// TESTS
// =============================================================================
