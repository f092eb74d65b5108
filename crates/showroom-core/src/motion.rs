//! Pointer-reactive motion for floating elements.
//!
//! Each floating element carries an endless idle float. Pointer entry layers a
//! velocity-seeded decay and a random rotational kick on top of it.

use crate::animation::EasingType;
use crate::scene::SceneGraph;
use crate::timeline::{cycle_progress, Repeat};
use crate::types::{NodeId, Property};
use kurbo::{Point, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Tuning for idle floating and pointer decay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Idle float travel in pixels (vertical).
    pub amplitude: f64,
    /// Seconds for one leg of the idle float.
    pub float_duration: f64,
    /// Pixels of displacement per unit of pointer velocity.
    pub gain: f64,
    /// Seconds for a decay to return to the baseline.
    pub decay_duration: f64,
    /// Exponential rate of the decay. Higher values settle sooner.
    pub friction: f64,
    /// Largest rotational kick in degrees.
    pub max_kick: f64,
    /// Seconds for the kick to swing out (and again to swing back).
    pub kick_duration: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            amplitude: 12.0,
            float_duration: 3.0,
            gain: 30.0,
            decay_duration: 1.2,
            friction: 4.0,
            max_kick: 12.0,
            kick_duration: 0.3,
        }
    }
}

/// Samples pointer movement once per frame.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    position: Option<Point>,
    last_sample: Option<Point>,
    velocity: Vec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_move(&mut self, position: Point) {
        self.position = Some(position);
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Velocity from the last sample.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Measures the pointer delta since the previous sample, normalised to a
    /// 60 Hz frame. No movement (or no pointer) yields zero.
    pub fn sample(&mut self, dt: f64) -> Vec2 {
        self.velocity = match (self.position, self.last_sample) {
            (Some(now), Some(before)) if dt > 0.0 => (now - before) / (dt * 60.0),
            _ => Vec2::ZERO,
        };
        self.last_sample = self.position;
        self.velocity
    }
}

/// Motion bookkeeping for one floating element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    /// Resting translation the element had when registered.
    pub base: Vec2,
    pub idle_offset: Vec2,
    /// Added on top of the idle offset.
    pub decay_offset: Vec2,
    /// Pointer velocity that seeded the current decay.
    pub velocity: Vec2,
    /// Seconds into the idle loop.
    pub idle_phase: f64,
    pub rotation: f64,
}

#[derive(Clone, Copy, Debug)]
struct Decay {
    initial: Vec2,
    elapsed: f64,
}

#[derive(Clone, Copy, Debug)]
struct Kick {
    angle: f64,
    elapsed: f64,
}

#[derive(Clone, Debug)]
struct Floating {
    state: MotionState,
    decay: Option<Decay>,
    kick: Option<Kick>,
}

/// Remaining fraction of a decay after `elapsed` of `duration` seconds.
///
/// Exponential in shape, rescaled so it is exactly 1 at the start and exactly
/// 0 at `duration`.
pub fn decay_factor(elapsed: f64, duration: f64, friction: f64) -> f64 {
    if duration <= 0.0 || elapsed >= duration {
        return 0.0;
    }
    if elapsed <= 0.0 {
        return 1.0;
    }
    let t = elapsed / duration;
    if friction.abs() < f64::EPSILON {
        return 1.0 - t;
    }
    let floor = (-friction).exp();
    ((-friction * t).exp() - floor) / (1.0 - floor)
}

/// Drives every floating element on the page.
#[derive(Clone, Debug)]
pub struct PointerMotion {
    config: MotionConfig,
    rng: StdRng,
    elements: BTreeMap<NodeId, Floating>,
    pending: Vec<NodeId>,
}

impl PointerMotion {
    pub fn new(config: MotionConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            elements: BTreeMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Starts idle floating for `node`, using its current translation as the baseline.
    pub fn add(&mut self, node: NodeId, scene: &SceneGraph) {
        let Some(style) = scene.style(node) else {
            return;
        };
        let state = MotionState {
            base: Vec2::new(style.x, style.y),
            ..Default::default()
        };
        self.elements.insert(
            node,
            Floating {
                state,
                decay: None,
                kick: None,
            },
        );
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.elements.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn state(&self, node: NodeId) -> Option<MotionState> {
        self.elements.get(&node).map(|f| f.state)
    }

    /// Queues a pointer-enter; it takes effect on the next `update`.
    pub fn queue_enter(&mut self, node: NodeId) {
        if self.elements.contains_key(&node) {
            self.pending.push(node);
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.pending.clear();
    }

    /// Seeds a decay and kick immediately, replacing any in flight.
    pub fn enter_with_velocity(&mut self, node: NodeId, velocity: Vec2) {
        let max_kick = self.config.max_kick;
        let angle = if max_kick > 0.0 {
            self.rng.gen_range(-max_kick..=max_kick)
        } else {
            0.0
        };
        let gain = self.config.gain;
        let Some(floating) = self.elements.get_mut(&node) else {
            return;
        };
        let initial = velocity * gain;
        floating.state.velocity = velocity;
        floating.state.decay_offset = initial;
        floating.decay = Some(Decay {
            initial,
            elapsed: 0.0,
        });
        floating.kick = Some(Kick { angle, elapsed: 0.0 });
        debug!(%node, x = initial.x, y = initial.y, angle, "[Motion] decay seeded");
    }

    /// Advances every element by `dt`, applies queued enters with `velocity`
    /// and writes the composed offsets onto the scene.
    pub fn update(&mut self, dt: f64, velocity: Vec2, scene: &mut SceneGraph) {
        self.elements.retain(|node, _| scene.contains(*node));
        let config = self.config;
        for floating in self.elements.values_mut() {
            advance(floating, dt, &config);
        }
        for node in std::mem::take(&mut self.pending) {
            self.enter_with_velocity(node, velocity);
        }
        for (&node, floating) in &self.elements {
            let s = &floating.state;
            let offset = s.base + s.idle_offset + s.decay_offset;
            scene.write(node, Property::X, offset.x);
            scene.write(node, Property::Y, offset.y);
            scene.write(node, Property::Rotation, s.rotation);
        }
    }
}

fn advance(floating: &mut Floating, dt: f64, config: &MotionConfig) {
    let dt = dt.max(0.0);
    let state = &mut floating.state;

    state.idle_phase += dt;
    let leg = cycle_progress(state.idle_phase, config.float_duration, Repeat::Infinite, true);
    state.idle_offset = Vec2::new(0.0, -config.amplitude * EasingType::SineInOut.apply(leg));

    if let Some(decay) = floating.decay.as_mut() {
        decay.elapsed += dt;
        let remaining = decay_factor(decay.elapsed, config.decay_duration, config.friction);
        state.decay_offset = decay.initial * remaining;
        if remaining == 0.0 {
            floating.decay = None;
            state.velocity = Vec2::ZERO;
        }
    }

    if let Some(kick) = floating.kick.as_mut() {
        kick.elapsed += dt;
        let swing = cycle_progress(kick.elapsed, config.kick_duration, Repeat::Count(1), true);
        state.rotation = kick.angle * EasingType::Power2Out.apply(swing);
        if kick.elapsed >= config.kick_duration * 2.0 {
            floating.kick = None;
            state.rotation = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Element;

    fn setup() -> (SceneGraph, NodeId, PointerMotion) {
        let mut scene = SceneGraph::new();
        let node = scene.add_node(Element::new("div").with_class("floating"));
        let mut motion = PointerMotion::new(MotionConfig::default(), Some(7));
        motion.add(node, &scene);
        (scene, node, motion)
    }

    #[test]
    fn tracker_normalises_to_sixty_hertz() {
        let mut tracker = PointerTracker::new();
        tracker.on_move(Point::new(100.0, 100.0));
        assert_eq!(tracker.sample(1.0 / 60.0), Vec2::ZERO);
        tracker.on_move(Point::new(180.0, 60.0));
        let v = tracker.sample(1.0 / 30.0);
        assert!((v.x - 40.0).abs() < 1e-9);
        assert!((v.y + 20.0).abs() < 1e-9);
        assert_eq!(tracker.sample(1.0 / 60.0), Vec2::ZERO);
    }

    #[test]
    fn decay_factor_hits_exact_endpoints() {
        assert_eq!(decay_factor(0.0, 1.2, 4.0), 1.0);
        assert_eq!(decay_factor(1.2, 1.2, 4.0), 0.0);
        let mid = decay_factor(0.6, 1.2, 4.0);
        assert!(mid > 0.0 && mid < 0.5);
        assert_eq!(decay_factor(0.6, 1.2, 0.0), 0.5);
    }

    #[test]
    fn idle_float_yoyos_around_the_baseline() {
        let (mut scene, node, mut motion) = setup();
        motion.update(1.5, Vec2::ZERO, &mut scene);
        assert!((scene.read(node, Property::Y).unwrap() + 6.0).abs() < 1e-9);
        motion.update(1.5, Vec2::ZERO, &mut scene);
        assert!((scene.read(node, Property::Y).unwrap() + 12.0).abs() < 1e-9);
        motion.update(3.0, Vec2::ZERO, &mut scene);
        assert!(scene.read(node, Property::Y).unwrap().abs() < 1e-9);
    }

    #[test]
    fn zero_velocity_enter_is_a_visual_no_op() {
        let (mut scene, node, mut motion) = setup();
        motion.queue_enter(node);
        motion.update(0.0, Vec2::ZERO, &mut scene);
        assert_eq!(motion.state(node).unwrap().decay_offset, Vec2::ZERO);
        assert_eq!(scene.read(node, Property::X), Some(0.0));
    }

    #[test]
    fn kick_stays_in_range_and_returns_to_neutral() {
        let (mut scene, node, mut motion) = setup();
        for _ in 0..20 {
            motion.enter_with_velocity(node, Vec2::ZERO);
            motion.update(0.3, Vec2::ZERO, &mut scene);
            assert!(motion.state(node).unwrap().rotation.abs() <= 12.0);
        }
        motion.update(0.3, Vec2::ZERO, &mut scene);
        assert_eq!(scene.read(node, Property::Rotation), Some(0.0));
    }

    #[test]
    fn detached_elements_are_dropped() {
        let (mut scene, node, mut motion) = setup();
        scene.destroy_node(node);
        motion.update(1.0 / 60.0, Vec2::ZERO, &mut scene);
        assert!(motion.is_empty());
    }
}
