//! # Timeline Module
//!
//! Sequenced property transitions.
//!
//! ## Responsibilities
//! - **Sequencing**: Resolves position parameters against the previous `to()` call.
//! - **Stagger**: Offsets each target of a multi-target call by `index * stagger`.
//! - **Playback**: Play, reverse, restart, seek and scrub-driven progress.
//! - **Rendering**: Writes eased values onto the scene graph.
//! - **Tweener**: Stand-alone overwrite tweens keyed by node and property.

use crate::animation::{lerp, EasingType};
use crate::errors::{MotionError, MotionResult};
use crate::scene::SceneGraph;
use crate::trigger::Action;
use crate::types::{NodeId, Property};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Where a `to()` call starts relative to the timeline.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Position {
    /// When the previous call ends.
    #[default]
    Sequential,
    /// Absolute time in seconds.
    At(f64),
    /// Seconds after the previous call ends (`"+=x"`, `">x"`).
    AfterPrevious(f64),
    /// Seconds before the previous call ends (`"-=x"`).
    BeforePreviousEnd(f64),
    /// Seconds after the previous call starts (`"<"`, `"<x"`).
    WithPrevious(f64),
}

impl Position {
    pub fn parse(input: &str) -> MotionResult<Position> {
        let text = input.trim();
        let invalid = || MotionError::InvalidPosition(input.to_string());
        let offset = |rest: &str| -> MotionResult<f64> {
            let rest = rest.trim();
            if rest.is_empty() {
                Ok(0.0)
            } else {
                rest.parse::<f64>().map_err(|_| invalid())
            }
        };
        if text.is_empty() {
            return Ok(Position::Sequential);
        }
        if let Some(rest) = text.strip_prefix("+=") {
            return offset(rest).map(Position::AfterPrevious);
        }
        if let Some(rest) = text.strip_prefix("-=") {
            return offset(rest).map(Position::BeforePreviousEnd);
        }
        if let Some(rest) = text.strip_prefix('>') {
            return offset(rest).map(Position::AfterPrevious);
        }
        if let Some(rest) = text.strip_prefix('<') {
            return offset(rest).map(Position::WithPrevious);
        }
        text.parse::<f64>().map(Position::At).map_err(|_| invalid())
    }

    /// Start time given the previous call's `(start, end)`.
    fn resolve(&self, previous: Option<(f64, f64)>) -> f64 {
        let (prev_start, prev_end) = previous.unwrap_or((0.0, 0.0));
        let start = match *self {
            Position::Sequential => prev_end,
            Position::At(t) => t,
            Position::AfterPrevious(offset) => prev_end + offset,
            Position::BeforePreviousEnd(overlap) => prev_end - overlap,
            Position::WithPrevious(offset) => prev_start + offset,
        };
        start.max(0.0)
    }
}

impl FromStr for Position {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::parse(s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Repeat {
    /// Extra cycles after the first; `Count(0)` plays once.
    Count(u32),
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Count(0)
    }
}

impl Repeat {
    fn cycles(&self) -> f64 {
        match self {
            Repeat::Count(n) => *n as f64 + 1.0,
            Repeat::Infinite => f64::INFINITY,
        }
    }
}

/// Raw (uneased) progress of a repeating tween at `local` seconds past its start.
///
/// With `yoyo`, odd cycles run backwards.
pub fn cycle_progress(local: f64, duration: f64, repeat: Repeat, yoyo: bool) -> f64 {
    let cycles = repeat.cycles();
    let ends_reversed = yoyo && cycles.is_finite() && (cycles as u64) % 2 == 0;
    if duration <= 0.0 {
        return match (local >= 0.0, ends_reversed) {
            (true, false) => 1.0,
            _ => 0.0,
        };
    }
    if local <= 0.0 {
        return 0.0;
    }
    if local >= duration * cycles {
        return if ends_reversed { 0.0 } else { 1.0 };
    }
    let scaled = local / duration;
    let iteration = scaled.floor();
    let fraction = scaled - iteration;
    if yoyo && (iteration as u64) % 2 == 1 {
        1.0 - fraction
    } else {
        fraction
    }
}

/// Target value of one property, with an optional explicit start value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PropTarget {
    pub property: Property,
    pub from: Option<f64>,
    pub to: f64,
}

/// Parameters of a `to()` call. Unset duration and ease fall back to the timeline defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TweenVars {
    pub props: Vec<PropTarget>,
    pub duration: Option<f64>,
    pub ease: Option<EasingType>,
    pub stagger: f64,
    pub delay: f64,
    pub repeat: Repeat,
    pub yoyo: bool,
}

impl TweenVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animates `property` from its current value to `to`.
    pub fn to(mut self, property: Property, to: f64) -> Self {
        self.props.push(PropTarget {
            property,
            from: None,
            to,
        });
        self
    }

    pub fn from_to(mut self, property: Property, from: f64, to: f64) -> Self {
        self.props.push(PropTarget {
            property,
            from: Some(from),
            to,
        });
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn ease(mut self, ease: EasingType) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = seconds;
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TweenDefaults {
    pub ease: EasingType,
    pub duration: f64,
}

impl Default for TweenDefaults {
    fn default() -> Self {
        Self {
            ease: EasingType::Power1Out,
            duration: 0.5,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TimelineOptions {
    /// Created paused; otherwise playback starts immediately.
    pub paused: bool,
    pub defaults: TweenDefaults,
}

/// A single target's transition inside a timeline.
#[derive(Clone, Debug)]
pub struct Tween {
    target: NodeId,
    props: Vec<PropTarget>,
    start: f64,
    duration: f64,
    ease: EasingType,
    repeat: Repeat,
    yoyo: bool,
    /// Start values, captured on first render past the start.
    from: Option<Vec<f64>>,
    last_progress: Option<f64>,
    abandoned: bool,
}

impl Tween {
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Start plus every repeat cycle.
    pub fn end(&self) -> f64 {
        self.start + self.duration.max(0.0) * self.repeat.cycles()
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    fn render(&mut self, time: f64, scene: &mut SceneGraph) {
        if self.abandoned {
            return;
        }
        let local = time - self.start;
        let reached = local > 0.0 || (self.duration <= 0.0 && local >= 0.0);
        if self.from.is_none() && !reached {
            return;
        }
        let progress = cycle_progress(local, self.duration, self.repeat, self.yoyo);
        if self.last_progress == Some(progress) {
            return;
        }
        if !scene.contains(self.target) {
            debug!(node = %self.target, "[Timeline] target detached, abandoning tween");
            self.abandoned = true;
            return;
        }
        let target = self.target;
        let from = self.from.get_or_insert_with(|| {
            self.props
                .iter()
                .map(|p| p.from.unwrap_or_else(|| scene.read(target, p.property).unwrap_or(0.0)))
                .collect()
        });
        let eased = self.ease.apply(progress);
        for (prop, start) in self.props.iter().zip(from.iter()) {
            scene.write(target, prop.property, lerp(*start, prop.to, eased));
        }
        self.last_progress = Some(progress);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PlayDirection {
    Forward,
    Backward,
}

/// An ordered composition of tweens sharing one playhead.
#[derive(Clone, Debug)]
pub struct Timeline {
    tweens: Vec<Tween>,
    defaults: TweenDefaults,
    playhead: f64,
    duration: f64,
    direction: PlayDirection,
    paused: bool,
    /// `(start, end)` of the previous `to()` call.
    last_call: Option<(f64, f64)>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(TimelineOptions::default())
    }
}

impl Timeline {
    pub fn new(options: TimelineOptions) -> Self {
        Self {
            tweens: Vec::new(),
            defaults: options.defaults,
            playhead: 0.0,
            duration: 0.0,
            direction: PlayDirection::Forward,
            paused: options.paused,
            last_call: None,
        }
    }

    /// Appends one tween per target. Target `k` starts `k * stagger` seconds
    /// after the resolved position plus delay.
    ///
    /// A call with no targets appends nothing and leaves the anchor for the
    /// next relative position unchanged.
    pub fn to(&mut self, targets: &[NodeId], vars: TweenVars, position: Position) -> &mut Self {
        if targets.is_empty() {
            debug!("[Timeline] to() with no targets ignored");
            return self;
        }
        let duration = vars.duration.unwrap_or(self.defaults.duration).max(0.0);
        let ease = vars.ease.unwrap_or(self.defaults.ease);
        let stagger = vars.stagger.max(0.0);
        let start = position.resolve(self.last_call) + vars.delay.max(0.0);

        let mut call_end = start;
        for (k, &target) in targets.iter().enumerate() {
            let tween = Tween {
                target,
                props: vars.props.clone(),
                start: start + k as f64 * stagger,
                duration,
                ease,
                repeat: vars.repeat,
                yoyo: vars.yoyo,
                from: None,
                last_progress: None,
                abandoned: false,
            };
            call_end = call_end.max(tween.end());
            self.tweens.push(tween);
        }
        self.last_call = Some((start, call_end));
        self.duration = self.duration.max(call_end);
        self
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Latest end time across all tweens.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn time(&self) -> f64 {
        self.playhead
    }

    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 || !self.duration.is_finite() {
            return if self.playhead > 0.0 { 1.0 } else { 0.0 };
        }
        (self.playhead / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_reversed(&self) -> bool {
        self.direction == PlayDirection::Backward
    }

    /// True while unpaused and not yet at the end it is heading for.
    pub fn is_active(&self) -> bool {
        if self.paused {
            return false;
        }
        match self.direction {
            PlayDirection::Forward => self.playhead < self.duration,
            PlayDirection::Backward => self.playhead > 0.0,
        }
    }

    /// Plays forward from the current playhead.
    pub fn play(&mut self) {
        self.direction = PlayDirection::Forward;
        self.paused = false;
    }

    /// Plays backward from the current playhead.
    pub fn reverse(&mut self) {
        self.direction = PlayDirection::Backward;
        self.paused = false;
    }

    pub fn restart(&mut self) {
        self.playhead = 0.0;
        self.play();
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Unpauses without changing direction.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Rewinds to the start and pauses.
    pub fn reset(&mut self) {
        self.playhead = 0.0;
        self.direction = PlayDirection::Forward;
        self.paused = true;
    }

    /// Jumps to the end.
    pub fn complete(&mut self) {
        if self.duration.is_finite() {
            self.playhead = self.duration;
        }
    }

    pub fn seek(&mut self, time: f64) {
        if time.is_finite() {
            self.playhead = time.clamp(0.0, self.duration);
        }
    }

    pub fn set_progress(&mut self, progress: f64) {
        if self.duration.is_finite() {
            self.seek(progress.clamp(0.0, 1.0) * self.duration);
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Play => self.play(),
            Action::Pause => self.pause(),
            Action::Resume => self.resume(),
            Action::Reset => self.reset(),
            Action::Restart => self.restart(),
            Action::Complete => self.complete(),
            Action::Reverse => self.reverse(),
            Action::None => {}
        }
    }

    /// Moves the playhead `dt` seconds in the current direction.
    pub fn advance(&mut self, dt: f64) {
        if self.paused || dt <= 0.0 {
            return;
        }
        self.playhead = match self.direction {
            PlayDirection::Forward => (self.playhead + dt).min(self.duration),
            PlayDirection::Backward => (self.playhead - dt).max(0.0),
        };
    }

    /// Writes every tween's value at the current playhead onto the scene.
    pub fn render(&mut self, scene: &mut SceneGraph) {
        let time = self.playhead;
        for tween in &mut self.tweens {
            tween.render(time, scene);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineId(pub u64);

/// Every live timeline on the page, addressed by id.
#[derive(Clone, Debug, Default)]
pub struct Timelines {
    timelines: BTreeMap<TimelineId, Timeline>,
    next_id: u64,
}

impl Timelines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timeline: Timeline) -> TimelineId {
        let id = TimelineId(self.next_id);
        self.next_id += 1;
        self.timelines.insert(id, timeline);
        id
    }

    pub fn get(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(&id)
    }

    pub fn get_mut(&mut self, id: TimelineId) -> Option<&mut Timeline> {
        self.timelines.get_mut(&id)
    }

    /// Stops and discards a timeline. Values it already wrote stay in place.
    pub fn kill(&mut self, id: TimelineId) -> Option<Timeline> {
        self.timelines.remove(&id)
    }

    pub fn clear(&mut self) {
        self.timelines.clear();
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn advance(&mut self, dt: f64) {
        for timeline in self.timelines.values_mut() {
            timeline.advance(dt);
        }
    }

    pub fn render(&mut self, scene: &mut SceneGraph) {
        for timeline in self.timelines.values_mut() {
            timeline.render(scene);
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct QuickTween {
    from: Option<f64>,
    to: f64,
    duration: f64,
    ease: EasingType,
    elapsed: f64,
}

/// Fire-and-forget tweens with overwrite semantics.
///
/// Starting a tween on a (node, property) pair replaces whatever was running
/// there; the new tween starts from the value currently on screen.
#[derive(Clone, Debug, Default)]
pub struct Tweener {
    tweens: BTreeMap<(NodeId, Property), QuickTween>,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to(
        &mut self,
        target: NodeId,
        property: Property,
        to: f64,
        duration: f64,
        ease: EasingType,
    ) {
        self.tweens.insert(
            (target, property),
            QuickTween {
                from: None,
                to,
                duration,
                ease,
                elapsed: 0.0,
            },
        );
    }

    /// Destination of the running tween on a pair, if any.
    pub fn destination(&self, target: NodeId, property: Property) -> Option<f64> {
        self.tweens.get(&(target, property)).map(|t| t.to)
    }

    pub fn is_animating(&self, target: NodeId) -> bool {
        self.tweens.keys().any(|(id, _)| *id == target)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn kill_target(&mut self, target: NodeId) {
        self.tweens.retain(|(id, _), _| *id != target);
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    pub fn advance(&mut self, dt: f64) {
        for tween in self.tweens.values_mut() {
            tween.elapsed += dt.max(0.0);
        }
    }

    /// Writes current values and drops finished or orphaned tweens.
    pub fn render(&mut self, scene: &mut SceneGraph) {
        self.tweens.retain(|&(target, property), tween| {
            let Some(current) = scene.read(target, property) else {
                return false;
            };
            let from = *tween.from.get_or_insert(current);
            let t = if tween.duration <= 0.0 {
                1.0
            } else {
                tween.elapsed / tween.duration
            };
            scene.write(target, property, lerp(from, tween.to, tween.ease.apply(t)));
            t < 1.0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Element;

    fn scene_with(n: usize) -> (SceneGraph, Vec<NodeId>) {
        let mut scene = SceneGraph::new();
        let style = crate::types::Style {
            opacity: 0.0,
            y: 50.0,
            ..Default::default()
        };
        let ids = (0..n)
            .map(|_| scene.add_node(Element::new("div").with_class("car-card").with_style(style)))
            .collect();
        (scene, ids)
    }

    #[test]
    fn parses_positions() {
        assert_eq!(Position::parse("").unwrap(), Position::Sequential);
        assert_eq!(Position::parse("-=0.6").unwrap(), Position::BeforePreviousEnd(0.6));
        assert_eq!(Position::parse("+=0.5").unwrap(), Position::AfterPrevious(0.5));
        assert_eq!(Position::parse(">").unwrap(), Position::AfterPrevious(0.0));
        assert_eq!(Position::parse("<").unwrap(), Position::WithPrevious(0.0));
        assert_eq!(Position::parse("<0.2").unwrap(), Position::WithPrevious(0.2));
        assert_eq!(Position::parse("1.5").unwrap(), Position::At(1.5));
        assert!(Position::parse("soon").is_err());
    }

    #[test]
    fn relative_positions_chain_off_the_previous_call() {
        let (_, ids) = scene_with(3);
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.to(&ids[0..1], TweenVars::new().to(Property::Opacity, 1.0).duration(1.2).delay(0.3), Position::Sequential)
            .to(&ids[1..2], TweenVars::new().to(Property::Opacity, 1.0).duration(1.0), Position::BeforePreviousEnd(0.6))
            .to(&ids[2..3], TweenVars::new().to(Property::Opacity, 1.0).duration(0.8), Position::BeforePreviousEnd(0.4));
        let starts: Vec<f64> = tl.tweens().iter().map(Tween::start).collect();
        assert!((starts[0] - 0.3).abs() < 1e-9);
        assert!((starts[1] - 0.9).abs() < 1e-9);
        assert!((starts[2] - 1.5).abs() < 1e-9);
        assert!((tl.duration() - 2.3).abs() < 1e-9);
    }

    #[test]
    fn stagger_offsets_each_target() {
        let (_, ids) = scene_with(5);
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.to(&ids, TweenVars::new().to(Property::Opacity, 1.0).duration(0.8).stagger(0.1), Position::At(2.0));
        let first = tl.tweens()[0].start();
        for (k, tween) in tl.tweens().iter().enumerate() {
            assert!((tween.start() - (first + k as f64 * 0.1)).abs() < 1e-9);
        }
        assert!((tl.duration() - 3.2).abs() < 1e-9);
    }

    #[test]
    fn renders_eased_values_and_captures_from_lazily() {
        let (mut scene, ids) = scene_with(1);
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.to(&ids, TweenVars::new().to(Property::Y, 0.0).duration(1.0).ease(EasingType::Linear), Position::At(0.5));
        tl.render(&mut scene);
        scene.write(ids[0], Property::Y, 80.0);
        tl.advance(1.0);
        tl.render(&mut scene);
        assert_eq!(scene.read(ids[0], Property::Y), Some(40.0));
        tl.advance(1.0);
        tl.render(&mut scene);
        assert_eq!(scene.read(ids[0], Property::Y), Some(0.0));
        assert!(!tl.is_active());
    }

    #[test]
    fn reverse_returns_to_start_values() {
        let (mut scene, ids) = scene_with(1);
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.to(&ids, TweenVars::new().to(Property::Opacity, 1.0).duration(0.5), Position::Sequential);
        tl.advance(0.1);
        tl.render(&mut scene);
        tl.advance(1.0);
        tl.render(&mut scene);
        assert_eq!(scene.read(ids[0], Property::Opacity), Some(1.0));
        tl.reverse();
        tl.advance(1.0);
        tl.render(&mut scene);
        assert_eq!(scene.read(ids[0], Property::Opacity), Some(0.0));
        assert_eq!(tl.progress(), 0.0);
        tl.reverse();
        assert!(!tl.is_active());
    }

    #[test]
    fn zero_duration_snaps() {
        let (mut scene, ids) = scene_with(1);
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.to(&ids, TweenVars::new().to(Property::Opacity, 1.0).duration(0.0), Position::Sequential);
        tl.render(&mut scene);
        assert_eq!(scene.read(ids[0], Property::Opacity), Some(1.0));
    }

    #[test]
    fn negative_timing_is_clamped() {
        let (mut scene, ids) = scene_with(3);
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.to(
            &ids,
            TweenVars::new()
                .to(Property::Opacity, 1.0)
                .duration(-1.0)
                .stagger(-0.2)
                .delay(-0.5),
            Position::At(1.0),
        );
        for tween in tl.tweens() {
            assert_eq!(tween.start(), 1.0);
            assert_eq!(tween.duration(), 0.0);
        }
        assert_eq!(tl.duration(), 1.0);

        tl.advance(0.5);
        tl.render(&mut scene);
        assert_eq!(scene.read(ids[2], Property::Opacity), Some(0.0));

        tl.advance(0.5);
        tl.render(&mut scene);
        for &id in &ids {
            assert_eq!(scene.read(id, Property::Opacity), Some(1.0));
        }
    }

    #[test]
    fn yoyo_cycles_back() {
        assert_eq!(cycle_progress(0.25, 1.0, Repeat::Count(1), true), 0.25);
        assert_eq!(cycle_progress(1.25, 1.0, Repeat::Count(1), true), 0.75);
        assert_eq!(cycle_progress(5.0, 1.0, Repeat::Count(1), true), 0.0);
        assert_eq!(cycle_progress(5.0, 1.0, Repeat::Count(2), true), 1.0);
        assert_eq!(cycle_progress(7.5, 1.0, Repeat::Infinite, false), 0.5);
    }

    #[test]
    fn detached_targets_are_abandoned() {
        let (mut scene, ids) = scene_with(2);
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.to(&ids, TweenVars::new().to(Property::Opacity, 1.0).duration(1.0), Position::Sequential);
        scene.destroy_node(ids[0]);
        tl.advance(0.5);
        tl.render(&mut scene);
        assert!(tl.tweens()[0].is_abandoned());
        assert!(!tl.tweens()[1].is_abandoned());
    }

    #[test]
    fn tweener_overwrites_from_the_current_value() {
        let (mut scene, ids) = scene_with(1);
        let mut tweener = Tweener::new();
        tweener.to(ids[0], Property::YPercent, -100.0, 1.0, EasingType::Linear);
        tweener.advance(0.5);
        tweener.render(&mut scene);
        assert_eq!(scene.read(ids[0], Property::YPercent), Some(-50.0));

        tweener.to(ids[0], Property::YPercent, 0.0, 1.0, EasingType::Linear);
        assert_eq!(tweener.len(), 1);
        tweener.advance(0.5);
        tweener.render(&mut scene);
        assert_eq!(scene.read(ids[0], Property::YPercent), Some(-25.0));
        tweener.advance(0.5);
        tweener.render(&mut scene);
        assert_eq!(scene.read(ids[0], Property::YPercent), Some(0.0));
        assert!(tweener.is_empty());
    }
}
