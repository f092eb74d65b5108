//! # Events Module
//!
//! Host input routing.
//!
//! ## Responsibilities
//! - **InputEvent**: Everything the host can report (wheel, touch, pointer, resize).
//! - **Dispatcher**: A table of (kind, predicate, handler) routes.
//! - **InputState**: What handlers may touch. Handlers only record input;
//!   the frame pipeline consumes it on the next tick.

use crate::types::NodeId;
use kurbo::{Point, Size};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse wheel deltas in pixels. Positive `dy` scrolls down.
    Wheel { dx: f64, dy: f64 },
    /// Touch drag delta in pixels. Positive `dy` scrolls down.
    Touch { dy: f64 },
    /// Pointer position in viewport (client) coordinates.
    PointerMove { x: f64, y: f64 },
    PointerEnter { node: NodeId },
    /// The pointer left the page.
    PointerExit,
    Resize { width: f64, height: f64 },
    ContentResized { height: f64 },
    /// Explicit request to recompute trigger ranges.
    Refresh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Wheel,
    Touch,
    PointerMove,
    PointerEnter,
    PointerExit,
    Resize,
    ContentResized,
    Refresh,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Wheel { .. } => EventKind::Wheel,
            InputEvent::Touch { .. } => EventKind::Touch,
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::PointerEnter { .. } => EventKind::PointerEnter,
            InputEvent::PointerExit => EventKind::PointerExit,
            InputEvent::Resize { .. } => EventKind::Resize,
            InputEvent::ContentResized { .. } => EventKind::ContentResized,
            InputEvent::Refresh => EventKind::Refresh,
        }
    }
}

/// Input sampled between two frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub wheel: f64,
    pub touch: f64,
    /// Latest pointer position reported this frame.
    pub pointer: Option<Point>,
    pub pointer_exited: bool,
    pub enters: Vec<NodeId>,
    pub viewport: Option<Size>,
    pub content_height: Option<f64>,
    pub refresh: bool,
}

impl InputState {
    /// Hands the accumulated input to the frame and starts a fresh sample.
    pub fn drain(&mut self) -> InputState {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == InputState::default()
    }
}

pub type Predicate = Box<dyn Fn(&InputEvent) -> bool + Send + Sync>;
pub type Handler = Box<dyn Fn(&InputEvent, &mut InputState) + Send + Sync>;

struct Route {
    kind: EventKind,
    predicate: Predicate,
    handler: Handler,
}

/// Routes host events to handlers by kind, in registration order.
#[derive(Default)]
pub struct Dispatcher {
    routes: Vec<Route>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route that runs `handler` for events of `kind` accepted by `predicate`.
    pub fn on(
        &mut self,
        kind: EventKind,
        predicate: impl Fn(&InputEvent) -> bool + Send + Sync + 'static,
        handler: impl Fn(&InputEvent, &mut InputState) + Send + Sync + 'static,
    ) {
        self.routes.push(Route {
            kind,
            predicate: Box::new(predicate),
            handler: Box::new(handler),
        });
    }

    /// Adds a route with no predicate.
    pub fn on_any(
        &mut self,
        kind: EventKind,
        handler: impl Fn(&InputEvent, &mut InputState) + Send + Sync + 'static,
    ) {
        self.on(kind, |_| true, handler);
    }

    /// Runs every matching route. Returns how many handled the event.
    pub fn dispatch(&self, event: &InputEvent, state: &mut InputState) -> usize {
        let kind = event.kind();
        let mut handled = 0;
        for route in self.routes.iter().filter(|r| r.kind == kind) {
            if (route.predicate)(event) {
                (route.handler)(event, state);
                handled += 1;
            }
        }
        handled
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Drops every route.
    pub fn clear(&mut self) {
        self.routes.clear();
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|r| r.kind))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_kind_and_predicate() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.on(
            EventKind::Wheel,
            |e| matches!(e, InputEvent::Wheel { dy, .. } if *dy != 0.0),
            |e, state| {
                if let InputEvent::Wheel { dy, .. } = e {
                    state.wheel += dy;
                }
            },
        );
        let mut state = InputState::default();
        assert_eq!(dispatcher.dispatch(&InputEvent::Wheel { dx: 5.0, dy: 0.0 }, &mut state), 0);
        assert_eq!(dispatcher.dispatch(&InputEvent::Wheel { dx: 0.0, dy: 40.0 }, &mut state), 1);
        assert_eq!(dispatcher.dispatch(&InputEvent::Wheel { dx: 0.0, dy: 60.0 }, &mut state), 1);
        assert_eq!(dispatcher.dispatch(&InputEvent::Touch { dy: 10.0 }, &mut state), 0);
        assert_eq!(state.wheel, 100.0);

        let sampled = state.drain();
        assert_eq!(sampled.wheel, 100.0);
        assert!(state.is_empty());
    }

    #[test]
    fn cleared_dispatcher_ignores_everything() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.on_any(EventKind::Refresh, |_, state| state.refresh = true);
        dispatcher.clear();
        let mut state = InputState::default();
        assert_eq!(dispatcher.dispatch(&InputEvent::Refresh, &mut state), 0);
        assert!(!state.refresh);
    }
}
