//! Sticky element: the subscriber side of script-driven sticky positioning.
//!
//! This module handles:
//! - Mount-time validation (container present, render function present)
//! - The stick / unstick threshold against the container's edges
//! - Bottom compensation as the container's end scrolls into view
//! - Relative mode, where only the container's own scroll moves the element
//! - Placeholder padding so the in-flow layout keeps its height
//!
//! Spec: <https://www.w3.org/TR/css-position-3/#stickypos-insets>

use crate::config::StickyConfig;
use crate::container::{ContainerEvent, StickyContainer, Subscription, SubscriptionId};
use crate::host::{HostNode, PlaceholderNode};
use crate::style::{HARDWARE_ACCELERATION, StickyStyle};
use core::cell::RefCell;
use core::fmt;
use log::{debug, warn};
use serde::Serialize;
use std::rc::Rc;

/// Render function receiving the current state; the only accepted child of a [`Sticky`].
pub type RenderFn<R> = Box<dyn Fn(&StickyState) -> R>;

/// State owned by one sticky element.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyState {
    pub is_sticky: bool,
    /// `is_sticky` from the previous event.
    pub was_sticky: bool,
    pub style: StickyStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_height: Option<f64>,
}

impl StickyState {
    /// `true` on the event that pinned the element.
    pub fn became_sticky(&self) -> bool {
        self.is_sticky && !self.was_sticky
    }

    /// `true` on the event that released the element.
    pub fn became_unstuck(&self) -> bool {
        !self.is_sticky && self.was_sticky
    }
}

/// Mount-time failures; both are programmer errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountError {
    /// No enclosing [`StickyContainer`].
    MissingContainer,
    /// The child is not a render function.
    MissingRenderFn,
}

impl fmt::Display for MountError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContainer => {
                formatter.write_str("expected Sticky to be mounted within a StickyContainer")
            }
            Self::MissingRenderFn => {
                formatter.write_str("expected Sticky's child to be a render function")
            }
        }
    }
}

impl core::error::Error for MountError {}

/// Props accepted by [`Sticky::mount`].
pub struct StickyProps<R> {
    pub config: StickyConfig,
    pub children: Option<RenderFn<R>>,
}

impl<R> StickyProps<R> {
    pub const fn new(config: StickyConfig) -> Self {
        Self {
            config,
            children: None,
        }
    }

    #[must_use]
    pub fn with_children(mut self, render: impl Fn(&StickyState) -> R + 'static) -> Self {
        self.children = Some(Box::new(render));
        self
    }
}

impl<R> Default for StickyProps<R> {
    fn default() -> Self {
        Self::new(StickyConfig::default())
    }
}

/// Everything the container callback mutates.
struct StickyCore {
    config: StickyConfig,
    state: StickyState,
    /// Root node of the owning container.
    parent: Rc<dyn HostNode>,
    placeholder: Box<dyn PlaceholderNode>,
    content: Box<dyn HostNode>,
}

impl StickyCore {
    fn handle_container_event(&mut self, event: &ContainerEvent) {
        let config = self.config;
        let source = &event.event_source;

        // Relative stickies follow the container's own scrollport; events from
        // other scrollers may move them but never (un)stick them.
        let mut distance_from_top = event.distance_from_top;
        let mut preventing_state_change = false;
        if config.relative {
            preventing_state_change = source.id() != self.parent.id();
            distance_from_top =
                -(source.scroll_top() + source.offset_top()) + self.placeholder.offset_top();
        }

        let placeholder_rect = self.placeholder.bounding_rect();
        let calculated_height = self.content.bounding_rect().height;
        let bottom_difference =
            event.distance_from_bottom - config.bottom_offset - calculated_height;

        let was_sticky = self.state.is_sticky;
        let is_sticky = if preventing_state_change {
            was_sticky
        } else {
            distance_from_top <= -config.top_offset
                && event.distance_from_bottom > -config.bottom_offset
        };

        let bottom_edge = if config.relative {
            self.parent.scroll_height() - self.parent.scroll_top()
        } else {
            event.distance_from_bottom
        };
        let distance_from_bottom = bottom_edge - calculated_height;

        let mut style = if is_sticky {
            let top = if bottom_difference > 0.0 {
                if config.relative {
                    self.parent.offset_top() - self.parent.offset_parent_scroll_top()
                } else {
                    0.0
                }
            } else {
                bottom_difference
            };
            StickyStyle::fixed(top, placeholder_rect.left, placeholder_rect.width)
        } else {
            StickyStyle::default()
        };
        if !config.disable_hardware_acceleration {
            style.transform = Some(HARDWARE_ACCELERATION.to_owned());
        }

        if !config.disable_compensation {
            let padding = if is_sticky { calculated_height } else { 0.0 };
            self.placeholder.set_padding_bottom(padding);
        }

        if is_sticky != was_sticky {
            debug!(
                target: "css_position",
                "sticky {}: {} at distance_from_top={distance_from_top}",
                self.placeholder.id(),
                if is_sticky { "stuck" } else { "released" }
            );
        }

        self.state = StickyState {
            is_sticky,
            was_sticky,
            style,
            distance_from_top: Some(distance_from_top),
            distance_from_bottom: Some(distance_from_bottom),
            calculated_height: Some(calculated_height),
        };
    }
}

/// A mounted sticky element.
///
/// Dropping it (or calling [`Sticky::unmount`]) removes its handler from the container.
pub struct Sticky<R> {
    core: Rc<RefCell<StickyCore>>,
    render: RenderFn<R>,
    subscription: Subscription,
}

impl<R> Sticky<R> {
    /// Mount inside `container` and subscribe to its geometry events.
    ///
    /// `placeholder` stays in normal flow; `content` is the node the render
    /// function's output is attached to.
    ///
    /// # Errors
    /// [`MountError::MissingContainer`] without a container,
    /// [`MountError::MissingRenderFn`] without a render function.
    pub fn mount(
        container: Option<&Rc<StickyContainer>>,
        props: StickyProps<R>,
        placeholder: Box<dyn PlaceholderNode>,
        content: Box<dyn HostNode>,
    ) -> Result<Self, MountError> {
        let container = container.ok_or(MountError::MissingContainer)?;
        let render = props.children.ok_or(MountError::MissingRenderFn)?;

        let core = Rc::new(RefCell::new(StickyCore {
            config: props.config,
            state: StickyState::default(),
            parent: Rc::clone(container.node()),
            placeholder,
            content,
        }));
        let handler_core = Rc::downgrade(&core);
        let subscription = container.subscribe(move |event| {
            let Some(shared) = handler_core.upgrade() else {
                return;
            };
            let Ok(mut core) = shared.try_borrow_mut() else {
                warn!(target: "css_position", "sticky state busy; dropping {event:?}");
                return;
            };
            core.handle_container_event(event);
        });

        Ok(Self {
            core,
            render,
            subscription,
        })
    }

    /// Apply one geometry event; the container calls this through the subscription.
    pub fn handle_container_event(&self, event: &ContainerEvent) {
        self.core.borrow_mut().handle_container_event(event);
    }

    pub fn state(&self) -> StickyState {
        self.core.borrow().state.clone()
    }

    pub fn config(&self) -> StickyConfig {
        self.core.borrow().config
    }

    /// Call the render function with the current state.
    pub fn render(&self) -> R {
        let state = self.state();
        (self.render)(&state)
    }

    /// Current bottom padding on the placeholder.
    pub fn placeholder_padding(&self) -> f64 {
        self.core.borrow().placeholder.padding_bottom()
    }

    pub fn subscription_id(&self) -> SubscriptionId {
        self.subscription.id()
    }

    /// Deregister from the container. Returns whether the handler was still registered.
    pub fn unmount(self) -> bool {
        self.subscription.unsubscribe()
    }
}

impl<R> fmt::Debug for Sticky<R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Sticky")
            .field("subscription", &self.subscription)
            .field("state", &self.core.borrow().state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::EventOrigin;
    use crate::host::{BoundingRect, NodeId, SimNode};
    use crate::style::Position;

    struct Fixture {
        container: Rc<StickyContainer>,
        container_node: SimNode,
        body: Rc<dyn HostNode>,
        placeholder: SimNode,
    }

    fn fixture() -> Fixture {
        let container_node = SimNode::new(NodeId(1));
        Fixture {
            container: StickyContainer::new(container_node.shared()),
            container_node,
            body: SimNode::new(NodeId(0)).shared(),
            placeholder: SimNode::with_rect(NodeId(2), BoundingRect::new(0.0, 10.0, 100.0, 100.0)),
        }
    }

    fn mount(fixture: &Fixture, config: StickyConfig) -> Sticky<()> {
        let content = SimNode::with_rect(NodeId(3), BoundingRect::new(0.0, 10.0, 100.0, 100.0));
        Sticky::mount(
            Some(&fixture.container),
            StickyProps::new(config).with_children(|_| ()),
            fixture.placeholder.boxed(),
            content.boxed(),
        )
        .unwrap()
    }

    fn event(top: f64, bottom: f64, source: &Rc<dyn HostNode>) -> ContainerEvent {
        ContainerEvent {
            distance_from_top: top,
            distance_from_bottom: bottom,
            event_source: Rc::clone(source),
        }
    }

    fn expected_sticky_style(top: f64) -> StickyStyle {
        StickyStyle {
            transform: Some(HARDWARE_ACCELERATION.to_owned()),
            ..StickyStyle::fixed(top, 10.0, 100.0)
        }
    }

    #[test]
    fn mount_requires_container() {
        let result = Sticky::mount(
            None,
            StickyProps::default().with_children(|_| ()),
            SimNode::new(NodeId(2)).boxed(),
            SimNode::new(NodeId(3)).boxed(),
        );
        assert_eq!(result.err(), Some(MountError::MissingContainer));
    }

    #[test]
    fn mount_requires_render_fn() {
        let fixture = fixture();
        let result: Result<Sticky<()>, _> = Sticky::mount(
            Some(&fixture.container),
            StickyProps::default(),
            SimNode::new(NodeId(2)).boxed(),
            SimNode::new(NodeId(3)).boxed(),
        );
        assert_eq!(result.err(), Some(MountError::MissingRenderFn));
        assert!(fixture.container.is_empty());
    }

    #[test]
    fn registers_on_mount_and_unregisters_on_unmount() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::default());
        assert_eq!(fixture.container.subscriber_ids(), vec![sticky.subscription_id()]);
        assert!(sticky.unmount());
        assert!(fixture.container.is_empty());
    }

    #[test]
    fn starts_unstuck_with_empty_style() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::default());
        assert_eq!(sticky.state(), StickyState::default());
        assert!(sticky.state().style.is_empty());
    }

    #[test]
    fn sticks_at_zero_distance() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::default());
        sticky.handle_container_event(&event(0.0, 1000.0, &fixture.body));
        assert_eq!(
            sticky.state(),
            StickyState {
                is_sticky: true,
                was_sticky: false,
                style: expected_sticky_style(0.0),
                distance_from_top: Some(0.0),
                distance_from_bottom: Some(900.0),
                calculated_height: Some(100.0),
            }
        );
        assert_eq!(sticky.placeholder_padding(), 100.0);
        assert_eq!(sticky.state().style.position, Some(Position::Fixed));
    }

    #[test]
    fn stays_stuck_while_scrolling_further() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::default());
        sticky.handle_container_event(&event(-1.0, 999.0, &fixture.body));
        sticky.handle_container_event(&event(-2.0, 998.0, &fixture.body));
        let state = sticky.state();
        assert!(state.is_sticky);
        assert!(state.was_sticky);
        assert_eq!(state.style, expected_sticky_style(0.0));
        assert_eq!(state.distance_from_bottom, Some(898.0));
    }

    #[test]
    fn releases_when_container_top_is_below_viewport_top() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::default());
        sticky.handle_container_event(&event(-1.0, 999.0, &fixture.body));
        sticky.handle_container_event(&event(1.0, 1001.0, &fixture.body));
        let state = sticky.state();
        assert!(state.became_unstuck());
        assert_eq!(state.style, StickyStyle::accelerated());
        assert_eq!(state.distance_from_bottom, Some(901.0));
        assert_eq!(sticky.placeholder_padding(), 0.0);
    }

    #[test]
    fn compensates_top_near_container_bottom() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::default());
        sticky.handle_container_event(&event(-901.0, 99.0, &fixture.body));
        let state = sticky.state();
        assert!(state.is_sticky);
        assert_eq!(state.style, expected_sticky_style(-1.0));
        assert_eq!(state.distance_from_bottom, Some(-1.0));
        assert_eq!(sticky.placeholder_padding(), 100.0);
    }

    #[test]
    fn repeated_event_is_idempotent() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::default());
        sticky.handle_container_event(&event(-10.0, 500.0, &fixture.body));
        let first = sticky.state();
        sticky.handle_container_event(&event(-10.0, 500.0, &fixture.body));
        let second = sticky.state();
        assert_eq!(first.is_sticky, second.is_sticky);
        assert_eq!(first.style, second.style);
        assert!(second.was_sticky);
    }

    #[test]
    fn positive_top_offset_attaches_late() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::new().with_top_offset(1.0));
        sticky.handle_container_event(&event(0.0, 100.0, &fixture.body));
        assert!(!sticky.state().is_sticky);
        sticky.handle_container_event(&event(-1.0, 99.0, &fixture.body));
        assert!(sticky.state().is_sticky);
    }

    #[test]
    fn negative_top_offset_attaches_early() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::new().with_top_offset(-1.0));
        sticky.handle_container_event(&event(2.0, 99.0, &fixture.body));
        assert!(!sticky.state().is_sticky);
        sticky.handle_container_event(&event(1.0, 98.0, &fixture.body));
        assert!(sticky.state().is_sticky);
    }

    #[test]
    fn releases_once_container_bottom_passes_bottom_offset() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::new().with_bottom_offset(20.0));
        sticky.handle_container_event(&event(-980.0, -19.0, &fixture.body));
        assert!(sticky.state().is_sticky);
        assert_eq!(sticky.state().style.top, Some(-139.0));
        sticky.handle_container_event(&event(-1000.0, -20.0, &fixture.body));
        assert!(!sticky.state().is_sticky);
    }

    #[test]
    fn without_hardware_acceleration_has_no_transform() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::new().with_hardware_acceleration(false));
        sticky.handle_container_event(&event(1.0, 100.0, &fixture.body));
        assert!(!sticky.state().is_sticky);
        assert_eq!(sticky.state().style.transform, None);
        sticky.handle_container_event(&event(-1.0, 99.0, &fixture.body));
        assert!(sticky.state().is_sticky);
        assert_eq!(sticky.state().style.transform, None);
        sticky.handle_container_event(&event(5.0, 105.0, &fixture.body));
        assert!(sticky.state().style.is_empty());
    }

    #[test]
    fn without_compensation_leaves_placeholder_alone() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::new().with_compensation(false));
        sticky.handle_container_event(&event(-1.0, 99.0, &fixture.body));
        assert!(sticky.state().is_sticky);
        assert_eq!(sticky.placeholder_padding(), 0.0);
    }

    #[test]
    fn relative_ignores_foreign_event_sources() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::new().with_relative(true));
        let own = fixture.container.node();
        fixture.container_node.update(|metrics| metrics.scroll_height = 1000.0);

        sticky.handle_container_event(&event(100.0, 500.0, own));
        assert!(sticky.state().is_sticky);

        fixture.placeholder.set_offset_top(50.0);
        sticky.handle_container_event(&event(100.0, 500.0, &fixture.body));
        assert!(sticky.state().is_sticky);
        assert_eq!(sticky.state().distance_from_bottom, Some(900.0));
    }

    #[test]
    fn relative_follows_container_scroll() {
        let fixture = fixture();
        let sticky = mount(&fixture, StickyConfig::new().with_relative(true));
        let own = Rc::clone(fixture.container.node());
        fixture.placeholder.set_offset_top(1.0);

        sticky.handle_container_event(&event(100.0, 500.0, &own));
        assert!(!sticky.state().is_sticky);

        fixture.container_node.set_scroll_top(1.0);
        sticky.handle_container_event(&event(100.0, 500.0, &own));
        assert!(sticky.state().is_sticky);

        fixture.container_node.set_scroll_top(2.0);
        sticky.handle_container_event(&event(100.0, 500.0, &own));
        assert!(sticky.state().is_sticky);
        assert_eq!(sticky.state().distance_from_top, Some(-1.0));
    }

    #[test]
    fn render_receives_current_state() {
        let fixture = fixture();
        let content = SimNode::with_rect(NodeId(3), BoundingRect::new(0.0, 10.0, 100.0, 40.0));
        let sticky = Sticky::mount(
            Some(&fixture.container),
            StickyProps::default().with_children(|state: &StickyState| state.style.to_css()),
            fixture.placeholder.boxed(),
            content.boxed(),
        )
        .unwrap();
        assert_eq!(sticky.render(), "");

        fixture.container_node.set_rect(BoundingRect::new(-5.0, 0.0, 300.0, 1000.0));
        fixture.container.notify(&EventOrigin::Container);
        assert_eq!(
            sticky.render(),
            "position: fixed; top: 0px; left: 10px; width: 100px; transform: translateZ(0)"
        );
    }
}
