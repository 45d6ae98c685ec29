//! Host document seam.
//!
//! Sticky positioning needs only a handful of measurements from the host:
//! bounding boxes, scroll offsets, and a writable bottom padding on the
//! placeholder. Everything else about the DOM stays opaque.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

/// Stable identity of a host node; event sources are compared by id.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// Viewport-relative bounding box, as `getBoundingClientRect` reports it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Bottom edge, measured from the viewport top.
    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// The same box moved by `delta` on the block axis.
    #[must_use]
    pub fn shifted(self, delta: f64) -> Self {
        Self {
            top: self.top + delta,
            ..self
        }
    }
}

/// Read-only view of a host node.
///
/// Scroll metrics default to zero so nodes that never scroll only need to
/// provide an id and a bounding box.
pub trait HostNode {
    fn id(&self) -> NodeId;

    fn bounding_rect(&self) -> BoundingRect;

    /// Block-axis scroll offset of this node's own scrollport.
    fn scroll_top(&self) -> f64 {
        0.0
    }

    /// Total scrollable content height.
    fn scroll_height(&self) -> f64 {
        0.0
    }

    /// Offset from the top of the offset parent.
    fn offset_top(&self) -> f64 {
        0.0
    }

    /// Scroll offset of the offset parent.
    fn offset_parent_scroll_top(&self) -> f64 {
        0.0
    }
}

/// The in-flow node a sticky element leaves behind while it is pinned.
pub trait PlaceholderNode: HostNode {
    fn set_padding_bottom(&mut self, px: f64);

    fn padding_bottom(&self) -> f64;
}

/// Every measurement a [`SimNode`] reports.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMetrics {
    pub rect: BoundingRect,
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub offset_top: f64,
    pub offset_parent_scroll_top: f64,
    pub padding_bottom: f64,
}

/// In-memory host node.
///
/// Clones share the same metrics, so a driver can keep one handle and keep
/// moving the node after another handle has been mounted.
#[derive(Clone, Debug)]
pub struct SimNode {
    id: NodeId,
    metrics: Rc<RefCell<NodeMetrics>>,
}

impl SimNode {
    pub fn new(id: NodeId) -> Self {
        Self::with_metrics(id, NodeMetrics::default())
    }

    pub fn with_rect(id: NodeId, rect: BoundingRect) -> Self {
        Self::with_metrics(
            id,
            NodeMetrics {
                rect,
                ..NodeMetrics::default()
            },
        )
    }

    pub fn with_metrics(id: NodeId, metrics: NodeMetrics) -> Self {
        Self {
            id,
            metrics: Rc::new(RefCell::new(metrics)),
        }
    }

    /// Snapshot of the current metrics.
    pub fn metrics(&self) -> NodeMetrics {
        self.metrics.borrow().clone()
    }

    /// Mutate the shared metrics in place.
    pub fn update(&self, apply: impl FnOnce(&mut NodeMetrics)) {
        apply(&mut *self.metrics.borrow_mut());
    }

    pub fn set_rect(&self, rect: BoundingRect) {
        self.update(|metrics| metrics.rect = rect);
    }

    pub fn set_scroll_top(&self, scroll_top: f64) {
        self.update(|metrics| metrics.scroll_top = scroll_top);
    }

    pub fn set_offset_top(&self, offset_top: f64) {
        self.update(|metrics| metrics.offset_top = offset_top);
    }

    pub fn set_offset_parent_scroll_top(&self, scroll_top: f64) {
        self.update(|metrics| metrics.offset_parent_scroll_top = scroll_top);
    }

    /// A boxed handle sharing this node's metrics.
    pub fn boxed(&self) -> Box<Self> {
        Box::new(self.clone())
    }

    /// A shared, type-erased handle sharing this node's metrics.
    pub fn shared(&self) -> Rc<dyn HostNode> {
        Rc::new(self.clone())
    }
}

impl HostNode for SimNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn bounding_rect(&self) -> BoundingRect {
        self.metrics.borrow().rect
    }

    fn scroll_top(&self) -> f64 {
        self.metrics.borrow().scroll_top
    }

    fn scroll_height(&self) -> f64 {
        self.metrics.borrow().scroll_height
    }

    fn offset_top(&self) -> f64 {
        self.metrics.borrow().offset_top
    }

    fn offset_parent_scroll_top(&self) -> f64 {
        self.metrics.borrow().offset_parent_scroll_top
    }
}

impl PlaceholderNode for SimNode {
    fn set_padding_bottom(&mut self, px: f64) {
        self.metrics.borrow_mut().padding_bottom = px;
    }

    fn padding_bottom(&self) -> f64 {
        self.metrics.borrow().padding_bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_metrics() {
        let node = SimNode::with_rect(NodeId(1), BoundingRect::new(0.0, 10.0, 100.0, 50.0));
        let mut handle = node.clone();
        node.set_scroll_top(12.0);
        handle.set_padding_bottom(50.0);
        assert_eq!(handle.scroll_top(), 12.0);
        assert_eq!(node.padding_bottom(), 50.0);
        assert_eq!(handle.bounding_rect().bottom(), 50.0);
    }

    #[test]
    fn rect_edges() {
        let rect = BoundingRect::new(-20.0, 10.0, 100.0, 50.0);
        assert_eq!(rect.bottom(), 30.0);
        let moved = rect.shifted(20.0);
        assert_eq!(moved.top, 0.0);
        assert_eq!(moved.bottom(), 50.0);
        assert_eq!(moved.left, 10.0);
    }

    #[test]
    fn scroll_metrics_default_to_zero() {
        struct Bare;
        impl HostNode for Bare {
            fn id(&self) -> NodeId {
                NodeId(7)
            }
            fn bounding_rect(&self) -> BoundingRect {
                BoundingRect::default()
            }
        }
        assert_eq!(Bare.scroll_top(), 0.0);
        assert_eq!(Bare.offset_parent_scroll_top(), 0.0);
        assert_eq!(Bare.id().to_string(), "#7");
    }
}
