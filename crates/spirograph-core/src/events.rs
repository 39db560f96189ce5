//! Typed event bus.
//!
//! The original host wired components through a stringly-typed aggregator;
//! here the topics are one enum and subscribers are explicit closures,
//! invoked synchronously in registration order.

use crate::shapes::{FixedShapeKind, HoleOptions};
use serde::{Deserialize, Serialize};

/// Which gear a selection event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GearRole {
    Fixed,
    Rotating,
}

/// Everything the host and the motion core tell each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A drag gesture started on the rotating gear.
    DragStart,
    /// The drag gesture ended.
    DragEnd,
    /// A gear was picked in the UI; sizes are shape-specific parameters.
    GearSelected {
        role: GearRole,
        kind: FixedShapeKind,
        sizes: Vec<f64>,
    },
    /// A pen hole was picked on the rotating gear.
    HoleSelected(HoleOptions),
}

type Handler = Box<dyn FnMut(&Event)>;

/// Synchronous publish/subscribe fan-out.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Handler>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&Event) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Deliver `event` to every subscriber, in registration order.
    pub fn publish(&mut self, event: &Event) {
        for handler in &mut self.handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}
