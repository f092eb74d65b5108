//! # Scroll Triggers
//!
//! Binds scroll ranges to animation playback.
//!
//! ## Responsibilities
//! - **Boundaries**: Resolves `"top 80%"`-style anchors against element geometry.
//! - **Edges**: Detects enter, leave, enter-back and leave-back exactly once per crossing.
//! - **Modes**: Once, scrub (continuous progress) and toggle (edge → playback action).
//! - **Refresh**: Recomputes every range at most once per frame, on request.

use crate::errors::{MotionError, MotionResult};
use crate::scene::SceneGraph;
use crate::scroll::ScrollState;
use crate::timeline::TimelineId;
use crate::types::NodeId;
use kurbo::Rect;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One end of a trigger's activation range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Boundary {
    /// Absolute scroll position in pixels.
    Scroll(f64),
    /// The scroll position at which the point `element` (fraction of the
    /// target's height) meets the point `viewport` (fraction of the viewport
    /// height), shifted by `offset` pixels.
    Anchor {
        element: f64,
        viewport: f64,
        offset: f64,
    },
    /// Pixels after the resolved start. Only meaningful as an end boundary.
    AfterStart(f64),
}

impl Boundary {
    /// `"top bottom"`: the target's top reaches the bottom of the viewport.
    pub const DEFAULT_START: Boundary = Boundary::Anchor {
        element: 0.0,
        viewport: 1.0,
        offset: 0.0,
    };

    /// `"bottom top"`: the target's bottom leaves through the top of the viewport.
    pub const DEFAULT_END: Boundary = Boundary::Anchor {
        element: 1.0,
        viewport: 0.0,
        offset: 0.0,
    };

    /// Parses `"top 80%"`, `"bottom top"`, `"center center"`, `"top -80"`,
    /// `"+=300"` or a plain pixel number.
    pub fn parse(input: &str) -> MotionResult<Boundary> {
        let text = input.trim();
        let invalid = || MotionError::InvalidBoundary(input.to_string());
        if let Some(rest) = text.strip_prefix("+=") {
            return rest.trim().parse().map(Boundary::AfterStart).map_err(|_| invalid());
        }
        if let Ok(px) = text.parse::<f64>() {
            return Ok(Boundary::Scroll(px));
        }
        let mut words = text.split_whitespace();
        let element = words.next().and_then(keyword_fraction).ok_or_else(invalid)?;
        let (viewport, offset) = match words.next() {
            None => (0.0, 0.0),
            Some(word) => match keyword_fraction(word) {
                Some(fraction) => (fraction, 0.0),
                None => (0.0, word.parse::<f64>().map_err(|_| invalid())?),
            },
        };
        if words.next().is_some() {
            return Err(invalid());
        }
        Ok(Boundary::Anchor {
            element,
            viewport,
            offset,
        })
    }

    /// Resolves to a scroll position. `None` when an anchor has no target geometry.
    pub fn resolve(&self, rect: Option<Rect>, viewport_height: f64, start: f64) -> Option<f64> {
        match *self {
            Boundary::Scroll(px) => Some(px),
            Boundary::AfterStart(px) => Some(start + px),
            Boundary::Anchor {
                element,
                viewport,
                offset,
            } => rect.map(|r| r.y0 + r.height() * element - viewport_height * viewport + offset),
        }
    }
}

fn keyword_fraction(word: &str) -> Option<f64> {
    match word {
        "top" => Some(0.0),
        "center" => Some(0.5),
        "bottom" => Some(1.0),
        _ => word
            .strip_suffix('%')
            .and_then(|pct| pct.parse::<f64>().ok())
            .map(|pct| pct / 100.0),
    }
}

impl FromStr for Boundary {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Boundary::parse(s)
    }
}

/// A state change of a trigger's range relative to the scroll position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Scrolling forward into the range.
    Enter,
    /// Scrolling forward past the end.
    Leave,
    /// Scrolling backward into the range from past the end.
    EnterBack,
    /// Scrolling backward out through the start.
    LeaveBack,
}

/// Playback command a toggle trigger issues on an edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Play,
    Pause,
    Resume,
    Reset,
    Restart,
    Complete,
    Reverse,
    None,
}

impl FromStr for Action {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Action::Play),
            "pause" => Ok(Action::Pause),
            "resume" => Ok(Action::Resume),
            "reset" => Ok(Action::Reset),
            "restart" => Ok(Action::Restart),
            "complete" => Ok(Action::Complete),
            "reverse" => Ok(Action::Reverse),
            "none" => Ok(Action::None),
            other => Err(MotionError::InvalidToggleActions(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Play => "play",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::Reset => "reset",
            Action::Restart => "restart",
            Action::Complete => "complete",
            Action::Reverse => "reverse",
            Action::None => "none",
        };
        f.write_str(name)
    }
}

/// Actions for enter, leave, enter-back and leave-back, in that order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: Action,
    pub on_leave: Action,
    pub on_enter_back: Action,
    pub on_leave_back: Action,
}

impl ToggleActions {
    /// `"play none none reverse"`: plays forward on enter and rewinds when
    /// scrolled back above the start, so every re-entry replays from the top.
    pub const REPLAY: ToggleActions = ToggleActions {
        on_enter: Action::Play,
        on_leave: Action::None,
        on_enter_back: Action::None,
        on_leave_back: Action::Reverse,
    };

    /// Parses four space-separated action names.
    pub fn parse(input: &str) -> MotionResult<ToggleActions> {
        let invalid = || MotionError::InvalidToggleActions(input.to_string());
        let actions = input
            .split_whitespace()
            .map(str::parse::<Action>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        match actions.as_slice() {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(ToggleActions {
                on_enter: *on_enter,
                on_leave: *on_leave,
                on_enter_back: *on_enter_back,
                on_leave_back: *on_leave_back,
            }),
            _ => Err(invalid()),
        }
    }

    pub fn action_for(&self, edge: Edge) -> Action {
        match edge {
            Edge::Enter => self.on_enter,
            Edge::Leave => self.on_leave,
            Edge::EnterBack => self.on_enter_back,
            Edge::LeaveBack => self.on_leave_back,
        }
    }
}

impl Default for ToggleActions {
    /// `"play none none none"`
    fn default() -> Self {
        ToggleActions {
            on_enter: Action::Play,
            on_leave: Action::None,
            on_enter_back: Action::None,
            on_leave_back: Action::None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TriggerMode {
    /// Fires `Enter` once with `Action::Play`, then unregisters itself.
    Once,
    /// Maps the scroll position onto animation progress every frame.
    Scrub,
    /// Maps each edge onto a playback action.
    Toggle(ToggleActions),
}

pub type EdgeCallback = Box<dyn FnMut(&ScrollState) + Send>;

/// Optional user callbacks, one per edge. Scrub triggers never call them.
#[derive(Default)]
pub struct TriggerCallbacks {
    pub on_enter: Option<EdgeCallback>,
    pub on_leave: Option<EdgeCallback>,
    pub on_enter_back: Option<EdgeCallback>,
    pub on_leave_back: Option<EdgeCallback>,
}

impl TriggerCallbacks {
    fn slot(&mut self, edge: Edge) -> &mut Option<EdgeCallback> {
        match edge {
            Edge::Enter => &mut self.on_enter,
            Edge::Leave => &mut self.on_leave,
            Edge::EnterBack => &mut self.on_enter_back,
            Edge::LeaveBack => &mut self.on_leave_back,
        }
    }
}

impl fmt::Debug for TriggerCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerCallbacks")
            .field("on_enter", &self.on_enter.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .field("on_enter_back", &self.on_enter_back.is_some())
            .field("on_leave_back", &self.on_leave_back.is_some())
            .finish()
    }
}

/// A binding between a scroll range and an animation.
#[derive(Debug)]
pub struct Trigger {
    /// Element whose geometry anchors the boundaries. `None` for pure scroll offsets.
    pub target: Option<NodeId>,
    pub start: Boundary,
    pub end: Boundary,
    pub mode: TriggerMode,
    pub animation: Option<TimelineId>,
    pub callbacks: TriggerCallbacks,
}

impl Trigger {
    /// Creates a trigger with the default `"top bottom"` → `"bottom top"` range.
    pub fn new(target: Option<NodeId>, mode: TriggerMode) -> Self {
        Self {
            target,
            start: Boundary::DEFAULT_START,
            end: Boundary::DEFAULT_END,
            mode,
            animation: None,
            callbacks: TriggerCallbacks::default(),
        }
    }

    pub fn with_range(mut self, start: Boundary, end: Boundary) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_start(mut self, start: Boundary) -> Self {
        self.start = start;
        self
    }

    pub fn with_animation(mut self, animation: TimelineId) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn on(mut self, edge: Edge, callback: impl FnMut(&ScrollState) + Send + 'static) -> Self {
        *self.callbacks.slot(edge) = Some(Box::new(callback));
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(pub u64);

/// Where the scroll position sits relative to a trigger's range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerState {
    Before,
    Active,
    After,
}

impl TriggerState {
    fn locate(position: f64, start: f64, end: f64) -> Self {
        if position < start {
            TriggerState::Before
        } else if position > end {
            TriggerState::After
        } else {
            TriggerState::Active
        }
    }
}

/// Edges crossed moving from `from` to `to`, in crossing order.
fn edges_between(from: TriggerState, to: TriggerState) -> &'static [Edge] {
    use TriggerState::*;
    match (from, to) {
        (Before, Active) => &[Edge::Enter],
        (Before, After) => &[Edge::Enter, Edge::Leave],
        (Active, After) => &[Edge::Leave],
        (After, Active) => &[Edge::EnterBack],
        (After, Before) => &[Edge::EnterBack, Edge::LeaveBack],
        (Active, Before) => &[Edge::LeaveBack],
        _ => &[],
    }
}

/// Maps a scroll position onto `[0, 1]` across `[start, end]`.
pub fn scrub_progress(position: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span <= 0.0 {
        return if position >= start { 1.0 } else { 0.0 };
    }
    ((position - start) / span).clamp(0.0, 1.0)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TriggerEvent {
    Edge { edge: Edge, action: Action },
    Scrub(f64),
}

/// One trigger outcome the page controller applies to timelines.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriggerFire {
    pub trigger: TriggerId,
    pub animation: Option<TimelineId>,
    pub event: TriggerEvent,
}

#[derive(Debug)]
struct Entry {
    trigger: Trigger,
    range: Option<(f64, f64)>,
    state: TriggerState,
}

#[derive(Debug, Default)]
pub struct TriggerRegistry {
    entries: BTreeMap<TriggerId, Entry>,
    next_id: u64,
    refresh_pending: bool,
    refreshes: u64,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trigger. Its range is resolved on the next update.
    pub fn register(&mut self, trigger: Trigger) -> TriggerId {
        let id = TriggerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                trigger,
                range: None,
                state: TriggerState::Before,
            },
        );
        self.refresh_pending = true;
        id
    }

    /// Removes a trigger. Returns false if it was not registered.
    pub fn unregister(&mut self, id: TriggerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.refresh_pending = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TriggerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Resolved `(start, end)` scroll range, once computed.
    pub fn range(&self, id: TriggerId) -> Option<(f64, f64)> {
        self.entries.get(&id).and_then(|e| e.range)
    }

    pub fn state(&self, id: TriggerId) -> Option<TriggerState> {
        self.entries.get(&id).map(|e| e.state)
    }

    /// Asks for every range to be recomputed. Requests coalesce until the next update.
    pub fn request_refresh(&mut self) {
        self.refresh_pending = true;
    }

    /// Number of range recomputations performed so far.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    fn refresh(&mut self, scene: &SceneGraph) {
        let viewport_height = scene
            .scroll_container()
            .map(|c| c.viewport.height)
            .unwrap_or(0.0);
        for entry in self.entries.values_mut() {
            let trigger = &entry.trigger;
            let rect = trigger.target.and_then(|id| scene.rect(id));
            entry.range = trigger
                .start
                .resolve(rect, viewport_height, 0.0)
                .and_then(|start| {
                    let end = trigger.end.resolve(rect, viewport_height, start)?;
                    Some((start, end.max(start)))
                });
        }
        self.refresh_pending = false;
        self.refreshes += 1;
        debug!(triggers = self.entries.len(), "[Trigger] ranges refreshed");
    }

    /// Evaluates every trigger against this frame's scroll state.
    ///
    /// Triggers whose target has left the document are skipped without
    /// changing their state.
    pub fn update(&mut self, scroll: &ScrollState, scene: &SceneGraph) -> Vec<TriggerFire> {
        if self.refresh_pending {
            self.refresh(scene);
        }
        let position = scroll.position;
        let mut fires = Vec::new();
        let mut finished = Vec::new();

        for (&id, entry) in self.entries.iter_mut() {
            if let Some(target) = entry.trigger.target {
                if !scene.contains(target) {
                    continue;
                }
            }
            let Some((start, end)) = entry.range else {
                continue;
            };
            let next = TriggerState::locate(position, start, end);
            let previous = std::mem::replace(&mut entry.state, next);
            let trigger = &mut entry.trigger;

            if trigger.mode == TriggerMode::Scrub {
                fires.push(TriggerFire {
                    trigger: id,
                    animation: trigger.animation,
                    event: TriggerEvent::Scrub(scrub_progress(position, start, end)),
                });
                continue;
            }

            for &edge in edges_between(previous, next) {
                if let Some(callback) = trigger.callbacks.slot(edge).as_mut() {
                    callback(scroll);
                }
                let action = match trigger.mode {
                    TriggerMode::Toggle(actions) => actions.action_for(edge),
                    TriggerMode::Once if edge == Edge::Enter => Action::Play,
                    _ => Action::None,
                };
                debug!(trigger = id.0, ?edge, %action, "[Trigger] edge");
                fires.push(TriggerFire {
                    trigger: id,
                    animation: trigger.animation,
                    event: TriggerEvent::Edge { edge, action },
                });
                if trigger.mode == TriggerMode::Once && edge == Edge::Enter {
                    finished.push(id);
                    break;
                }
            }
        }

        for id in finished {
            self.entries.remove(&id);
        }
        fires
    }
}
