//! Host View - Capability interface toward the rendering layer.
//!
//! The crate never walks a node tree of its own. Everything it needs to know
//! about the host's nodes is behind [`HostView`]: whether a node handle still
//! resolves to a live node, whether that node holds input focus, and a way to
//! move focus imperatively.
//!
//! Implementations are expected to be cheap; the focus classifier calls
//! [`HostView::has_focus`] on every polling check.

use crate::types::NodeId;

/// Node and focus queries answered by the rendering layer.
pub trait HostView {
    /// Whether the handle still resolves to a node in the live tree.
    ///
    /// A handle whose node was removed must return false; the classifier
    /// treats that as a terminal negative and stops polling silently.
    fn is_attached(&self, node: NodeId) -> bool;

    /// Whether the node currently holds input focus.
    fn has_focus(&self, node: NodeId) -> bool;

    /// Imperatively move input focus to the node.
    fn request_focus(&self, node: NodeId);
}
