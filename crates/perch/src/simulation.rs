//! Replays a scroll through one sticky container, frame by frame.

use crate::config::SimulationConfig;
use anyhow::{Result, anyhow, bail};
use css_position::{
    BoundingRect, EventOrigin, HostEvent, NodeId, SimNode, Sticky, StickyContainer, StickyProps,
    StickyState,
};
use log::{debug, info};
use serde::Serialize;

const BODY: NodeId = NodeId(0);
const CONTAINER: NodeId = NodeId(1);
const PLACEHOLDER: NodeId = NodeId(2);
const CONTENT: NodeId = NodeId(3);

/// Horizontal box shared by the placeholder and the content.
const COLUMN_LEFT: f64 = 10.0;
const COLUMN_WIDTH: f64 = 300.0;

/// Distance between the container's top and the placeholder in its flow.
const PLACEHOLDER_INSET: f64 = 200.0;

/// One stick or release observed during the replay.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Pixels scrolled when it happened.
    pub scrolled: f64,
    pub is_sticky: bool,
    /// Inline style rendered for the content at that frame.
    pub css: String,
}

/// Outcome of a replay.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub frames: usize,
    pub transitions: Vec<Transition>,
    pub final_state: StickyState,
    pub final_padding: f64,
}

/// Scroll from the start position until the container has left the viewport.
///
/// Window mode moves the container's bounding box; relative mode scrolls
/// the container's own scrollport and keeps its box in place.
///
/// # Errors
/// Fails when the replay would need more than `max_frames` frames, or when
/// the sticky element cannot be mounted.
pub fn run(config: &SimulationConfig) -> Result<SimulationReport> {
    let distance = config.scroll_distance();
    let steps = (distance / config.scroll_step).ceil();
    if steps >= config.max_frames as f64 {
        bail!(
            "scrolling {distance}px in {}px steps exceeds {} frames (raise PERCH_MAX_FRAMES)",
            config.scroll_step,
            config.max_frames
        );
    }
    let steps = steps as usize;

    let body = SimNode::new(BODY);
    let container_rect = BoundingRect::new(
        config.start_offset,
        0.0,
        COLUMN_WIDTH + 2.0 * COLUMN_LEFT,
        config.container_height,
    );
    let container_node = SimNode::with_rect(CONTAINER, container_rect);
    container_node.update(|metrics| {
        metrics.scroll_height = config.container_height;
        metrics.offset_top = config.start_offset;
    });
    let placeholder = SimNode::with_rect(
        PLACEHOLDER,
        BoundingRect::new(config.start_offset, COLUMN_LEFT, COLUMN_WIDTH, 0.0),
    );
    placeholder.set_offset_top(config.start_offset + PLACEHOLDER_INSET);
    let content = SimNode::with_rect(
        CONTENT,
        BoundingRect::new(config.start_offset, COLUMN_LEFT, COLUMN_WIDTH, config.content_height),
    );

    let container = StickyContainer::new(container_node.shared());
    let sticky = Sticky::mount(
        Some(&container),
        StickyProps::new(config.sticky).with_children(|state: &StickyState| state.style.to_css()),
        placeholder.boxed(),
        content.boxed(),
    )
    .map_err(|err| anyhow!("mounting sticky element: {err}"))?;

    let origin = if config.sticky.relative {
        EventOrigin::Container
    } else {
        EventOrigin::Window(body.shared())
    };

    let mut transitions = Vec::new();
    for frame in 0..=steps {
        let scrolled = (frame as f64 * config.scroll_step).min(distance);
        if config.sticky.relative {
            container_node.set_scroll_top(scrolled);
        } else {
            container_node.set_rect(container_rect.shifted(-scrolled));
        }
        container.handle_host_event(HostEvent::Scroll, origin.clone());
        container.flush_frame();

        let state = sticky.state();
        debug!(target: "perch", "frame {frame}: scrolled={scrolled} sticky={} top={:?}", state.is_sticky, state.style.top);
        if state.became_sticky() || state.became_unstuck() {
            let css = sticky.render();
            info!(target: "perch", "scrolled {scrolled}px: {} [{css}]", if state.is_sticky { "stuck" } else { "released" });
            transitions.push(Transition {
                scrolled,
                is_sticky: state.is_sticky,
                css,
            });
        }
    }

    let report = SimulationReport {
        frames: steps + 1,
        transitions,
        final_state: sticky.state(),
        final_padding: sticky.placeholder_padding(),
    };
    sticky.unmount();
    Ok(report)
}
