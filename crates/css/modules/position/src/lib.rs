//! CSS Positioned Layout Module Level 3 — script-driven sticky positioning.
//! Spec: <https://www.w3.org/TR/css-position-3/#sticky-pos>
//!
//! A [`StickyContainer`] measures its root node whenever the host reports a
//! scroll or resize and broadcasts the distances to every mounted [`Sticky`].
//! Each sticky element decides on its own whether it is pinned (`position:
//! fixed`) and pads a placeholder so the surrounding layout does not collapse.
//!
//! The host DOM is reached only through the [`HostNode`] and
//! [`PlaceholderNode`] traits; [`SimNode`] implements both in memory.

#![forbid(unsafe_code)]

pub mod config;
pub mod container;
pub mod host;
pub mod sticky;
pub mod style;

pub use config::StickyConfig;
pub use container::{
    ContainerEvent, ContainerHandler, EventOrigin, HostEvent, StickyContainer, Subscription,
    SubscriptionId,
};
pub use host::{BoundingRect, HostNode, NodeId, NodeMetrics, PlaceholderNode, SimNode};
pub use sticky::{MountError, RenderFn, Sticky, StickyProps, StickyState};
pub use style::{HARDWARE_ACCELERATION, Position, StickyStyle};
