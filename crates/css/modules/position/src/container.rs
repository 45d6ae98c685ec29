//! Sticky container: measures its root node and fans geometry out to subscribers.

use crate::host::HostNode;
use core::cell::{Cell, RefCell};
use core::fmt;
use log::{debug, trace};
use std::rc::{Rc, Weak};

/// Geometry broadcast to every subscriber on each notification.
#[derive(Clone)]
pub struct ContainerEvent {
    /// Container top edge, from the viewport top.
    pub distance_from_top: f64,
    /// Container bottom edge, from the viewport top.
    pub distance_from_bottom: f64,
    /// Document body for window events, the container node for its own scroll.
    pub event_source: Rc<dyn HostNode>,
}

impl fmt::Debug for ContainerEvent {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ContainerEvent")
            .field("distance_from_top", &self.distance_from_top)
            .field("distance_from_bottom", &self.distance_from_bottom)
            .field("event_source", &self.event_source.id())
            .finish()
    }
}

/// Callback registered by a subscriber.
pub type ContainerHandler = Rc<dyn Fn(&ContainerEvent)>;

/// Where a notification came from.
#[derive(Clone)]
pub enum EventOrigin {
    /// A window-level event; carries the document body used as event source.
    Window(Rc<dyn HostNode>),
    /// The container scrolled its own content.
    Container,
}

impl fmt::Debug for EventOrigin {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(body) => formatter.debug_tuple("Window").field(&body.id()).finish(),
            Self::Container => formatter.write_str("Container"),
        }
    }
}

/// Window events a container listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Resize,
    Scroll,
    TouchStart,
    TouchMove,
    TouchEnd,
    PageShow,
    Load,
}

impl HostEvent {
    pub const ALL: [Self; 7] = [
        Self::Resize,
        Self::Scroll,
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
        Self::PageShow,
        Self::Load,
    ];

    /// DOM event name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Scroll => "scroll",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::PageShow => "pageshow",
            Self::Load => "load",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

/// Registry key handed out by [`StickyContainer::subscribe`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "sub-{}", self.0)
    }
}

/// Publisher side of sticky positioning.
pub struct StickyContainer {
    node: Rc<dyn HostNode>,
    subscribers: RefCell<Vec<(SubscriptionId, ContainerHandler)>>,
    next_id: Cell<u64>,
    pending_frame: RefCell<Option<EventOrigin>>,
}

impl StickyContainer {
    /// Create a container around its root node.
    pub fn new(node: Rc<dyn HostNode>) -> Rc<Self> {
        Rc::new(Self {
            node,
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            pending_frame: RefCell::new(None),
        })
    }

    /// The container's root node; relative stickies compare event sources against it.
    pub fn node(&self) -> &Rc<dyn HostNode> {
        &self.node
    }

    /// Append `handler` to the registry.
    ///
    /// The returned [`Subscription`] removes the entry when it is dropped or
    /// explicitly unsubscribed.
    pub fn subscribe(self: &Rc<Self>, handler: impl Fn(&ContainerEvent) + 'static) -> Subscription {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let handler: ContainerHandler = Rc::new(handler);
        self.subscribers.borrow_mut().push((id, handler));
        debug!(target: "css_position", "container {}: {id} subscribed ({} total)", self.node.id(), self.subscriber_count());
        Subscription {
            id,
            container: Rc::downgrade(self),
            active: true,
        }
    }

    /// Remove the entry registered under `id`. Returns whether one was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = {
            let mut subscribers = self.subscribers.borrow_mut();
            let before = subscribers.len();
            subscribers.retain(|(entry, _)| *entry != id);
            subscribers.len() != before
        };
        if removed {
            debug!(target: "css_position", "container {}: {id} unsubscribed ({} left)", self.node.id(), self.subscriber_count());
        }
        removed
    }

    /// Registered ids in registration order.
    pub fn subscriber_ids(&self) -> Vec<SubscriptionId> {
        self.subscribers.borrow().iter().map(|(id, _)| *id).collect()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    /// Measure the root node for a notification from `origin`.
    pub fn measure(&self, origin: &EventOrigin) -> ContainerEvent {
        let rect = self.node.bounding_rect();
        let event_source = match origin {
            EventOrigin::Window(body) => Rc::clone(body),
            EventOrigin::Container => Rc::clone(&self.node),
        };
        ContainerEvent {
            distance_from_top: rect.top,
            distance_from_bottom: rect.bottom(),
            event_source,
        }
    }

    /// Measure and invoke every handler synchronously, in registration order.
    ///
    /// Handlers registered or removed while this runs take effect from the
    /// next notification.
    pub fn notify(&self, origin: &EventOrigin) {
        let event = self.measure(origin);
        let handlers: Vec<ContainerHandler> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        trace!(target: "css_position", "container {}: notifying {} subscriber(s) with {event:?}", self.node.id(), handlers.len());
        for handler in handlers {
            handler(&event);
        }
    }

    /// Record a notification for the next frame.
    ///
    /// At most one notification is pending; events arriving before
    /// [`StickyContainer::flush_frame`] are dropped. Returns `true` when this
    /// call scheduled the frame.
    pub fn queue(&self, origin: EventOrigin) -> bool {
        let mut pending = self.pending_frame.borrow_mut();
        if pending.is_some() {
            return false;
        }
        *pending = Some(origin);
        true
    }

    /// Queue a notification for a host event.
    pub fn handle_host_event(&self, event: HostEvent, origin: EventOrigin) -> bool {
        let scheduled = self.queue(origin);
        trace!(target: "css_position", "container {}: {} (frame {})", self.node.id(), event.name(), if scheduled { "scheduled" } else { "already pending" });
        scheduled
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.borrow().is_some()
    }

    /// Deliver the pending notification, if any. Returns whether one was delivered.
    pub fn flush_frame(&self) -> bool {
        let pending = self.pending_frame.borrow_mut().take();
        pending.is_some_and(|origin| {
            self.notify(&origin);
            true
        })
    }
}

/// Deregistration capability returned by [`StickyContainer::subscribe`].
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: SubscriptionId,
    container: Weak<StickyContainer>,
    active: bool,
}

impl Subscription {
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the handler now. Returns whether an entry was removed.
    pub fn unsubscribe(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.container
            .upgrade()
            .is_some_and(|container| container.unsubscribe(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
