//! Document Input - Document-level listener registry.
//!
//! The host forwards every document-level keydown here, plus every
//! mousedown AND touchstart, regardless of which node they landed on. The
//! focus classifier installs its two global listeners through this registry;
//! embedders may hang additional listeners off it as well.
//!
//! # API
//!
//! - `on_keydown(listener)` / `remove_keydown(id)` - Subscribe to keydowns
//! - `on_pointer_down(listener)` / `remove_pointer_down(id)` - Subscribe to pointer downs
//! - `dispatch_keydown(event)` - Host entry point for document keydown
//! - `dispatch_pointer_down(event)` - Host entry point for document mousedown/touchstart
//!
//! # Example
//!
//! ```
//! use pressable::state::DocumentInput;
//! use pressable::events::KeyEvent;
//!
//! let document = DocumentInput::new();
//! let id = document.on_keydown(|event| println!("key: {}", event.key));
//!
//! document.dispatch_keydown(&KeyEvent::new("Tab", 0));
//!
//! document.remove_keydown(id);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::{KeyEvent, PointerEvent};

// =============================================================================
// TYPES
// =============================================================================

/// Identifies a registered listener for removal.
pub type ListenerId = usize;

struct Registry {
    keydown: Vec<(ListenerId, Rc<dyn Fn(&KeyEvent)>)>,
    pointer_down: Vec<(ListenerId, Rc<dyn Fn(&PointerEvent)>)>,
    next_id: ListenerId,
}

impl Registry {
    fn next_id(&mut self) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

// =============================================================================
// DOCUMENT INPUT
// =============================================================================

/// Fan-out point for document-level input events.
pub struct DocumentInput {
    registry: RefCell<Registry>,
}

impl DocumentInput {
    /// Create an empty registry.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            registry: RefCell::new(Registry {
                keydown: Vec::new(),
                pointer_down: Vec::new(),
                next_id: 0,
            }),
        })
    }

    /// Subscribe to document-level keydown events.
    pub fn on_keydown(&self, listener: impl Fn(&KeyEvent) + 'static) -> ListenerId {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id();
        registry.keydown.push((id, Rc::new(listener)));
        id
    }

    /// Remove a keydown listener. Returns false if the id was unknown.
    pub fn remove_keydown(&self, id: ListenerId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.keydown.len();
        registry.keydown.retain(|(listener_id, _)| *listener_id != id);
        registry.keydown.len() != before
    }

    /// Subscribe to document-level mousedown/touchstart events.
    pub fn on_pointer_down(&self, listener: impl Fn(&PointerEvent) + 'static) -> ListenerId {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id();
        registry.pointer_down.push((id, Rc::new(listener)));
        id
    }

    /// Remove a pointer-down listener. Returns false if the id was unknown.
    pub fn remove_pointer_down(&self, id: ListenerId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.pointer_down.len();
        registry.pointer_down.retain(|(listener_id, _)| *listener_id != id);
        registry.pointer_down.len() != before
    }

    /// Deliver a document-level keydown to every listener.
    ///
    /// The listener list is snapshotted first, so listeners may register or
    /// remove listeners during dispatch.
    pub fn dispatch_keydown(&self, event: &KeyEvent) {
        let listeners: Vec<Rc<dyn Fn(&KeyEvent)>> = self
            .registry
            .borrow()
            .keydown
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    /// Deliver a document-level mousedown/touchstart to every listener.
    pub fn dispatch_pointer_down(&self, event: &PointerEvent) {
        let listeners: Vec<Rc<dyn Fn(&PointerEvent)>> = self
            .registry
            .borrow()
            .pointer_down
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    /// Number of registered keydown listeners.
    pub fn keydown_listener_count(&self) -> usize {
        self.registry.borrow().keydown.len()
    }

    /// Number of registered pointer-down listeners.
    pub fn pointer_down_listener_count(&self) -> usize {
        self.registry.borrow().pointer_down.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_reaches_all_listeners() {
        let document = DocumentInput::new();
        let count = Rc::new(Cell::new(0));

        let count_a = count.clone();
        document.on_keydown(move |_| count_a.set(count_a.get() + 1));
        let count_b = count.clone();
        document.on_keydown(move |_| count_b.set(count_b.get() + 1));

        document.dispatch_keydown(&KeyEvent::new("Tab", 0));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_remove_listener() {
        let document = DocumentInput::new();
        let count = Rc::new(Cell::new(0));

        let count_a = count.clone();
        let id = document.on_keydown(move |_| count_a.set(count_a.get() + 1));
        assert_eq!(document.keydown_listener_count(), 1);

        assert!(document.remove_keydown(id));
        assert!(!document.remove_keydown(id));
        assert_eq!(document.keydown_listener_count(), 0);

        document.dispatch_keydown(&KeyEvent::new("Tab", 0));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_pointer_down_listeners_are_separate() {
        let document = DocumentInput::new();
        let keys = Rc::new(Cell::new(0));
        let pointers = Rc::new(Cell::new(0));

        let keys_inner = keys.clone();
        document.on_keydown(move |_| keys_inner.set(keys_inner.get() + 1));
        let pointers_inner = pointers.clone();
        document.on_pointer_down(move |_| pointers_inner.set(pointers_inner.get() + 1));

        document.dispatch_pointer_down(&PointerEvent::new(1.0, 2.0, 0));
        assert_eq!(keys.get(), 0);
        assert_eq!(pointers.get(), 1);
    }

    #[test]
    fn test_listener_may_remove_itself_during_dispatch() {
        let document = DocumentInput::new();
        let count = Rc::new(Cell::new(0));

        let document_inner = document.clone();
        let count_inner = count.clone();
        let id = Rc::new(Cell::new(0));
        let id_inner = id.clone();
        let registered = document.on_keydown(move |_| {
            count_inner.set(count_inner.get() + 1);
            document_inner.remove_keydown(id_inner.get());
        });
        id.set(registered);

        document.dispatch_keydown(&KeyEvent::new("a", 0));
        document.dispatch_keydown(&KeyEvent::new("a", 1));
        assert_eq!(count.get(), 1);
        assert_eq!(document.keydown_listener_count(), 0);
    }
}
