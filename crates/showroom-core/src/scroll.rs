//! # Smooth Scroll
//!
//! Turns raw wheel and touch deltas into a continuously eased scroll position.
//!
//! ## Responsibilities
//! - **Target tracking**: Every input moves the target, clamped to the scroll bounds.
//! - **Easing**: Each input restarts an eased animation from the current position.
//! - **Publishing**: `update` produces the frame's `ScrollState` for triggers and the navbar.

use crate::animation::{lerp, EasingType};
use serde::{Deserialize, Serialize};

/// Sign of the last frame's scroll movement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

/// Scroll position published once per frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    /// Pixels from the top of the document, inside `[0, limit]`.
    pub position: f64,
    /// Position change during the last frame.
    pub velocity: f64,
    pub direction: Direction,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Seconds an eased scroll takes to reach its target.
    pub duration: f64,
    pub easing: EasingType,
    pub wheel_multiplier: f64,
    pub touch_multiplier: f64,
    /// When false, wheel input jumps straight to the target.
    pub smooth_wheel: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration: 1.2,
            easing: EasingType::ExpoOut,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
            smooth_wheel: true,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    elapsed: f64,
}

/// Eased scroll driver for a single vertical scroll container.
///
/// Without bounds (no scroll container on the page) every call is a no-op
/// and the published state stays at rest.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    config: ScrollConfig,
    bounds: Option<f64>,
    position: f64,
    target: f64,
    animation: Option<ScrollAnimation>,
    stopped: bool,
    state: ScrollState,
}

impl SmoothScroll {
    /// Creates a driver scrolling inside `[0, bounds]`.
    pub fn new(config: ScrollConfig, bounds: Option<f64>) -> Self {
        Self {
            config,
            bounds: bounds.map(|b| b.max(0.0)),
            position: 0.0,
            target: 0.0,
            animation: None,
            stopped: false,
            state: ScrollState::default(),
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn bounds(&self) -> Option<f64> {
        self.bounds
    }

    /// Replaces the scroll limit, clamping target and position into it.
    pub fn set_bounds(&mut self, bounds: Option<f64>) {
        self.bounds = bounds.map(|b| b.max(0.0));
        let Some(limit) = self.bounds else {
            self.animation = None;
            return;
        };
        self.target = self.target.clamp(0.0, limit);
        self.position = self.position.clamp(0.0, limit);
        if let Some(anim) = self.animation.as_mut() {
            anim.from = anim.from.clamp(0.0, limit);
            anim.to = self.target;
        }
    }

    /// Vertical wheel delta in pixels. Positive scrolls down.
    pub fn on_wheel(&mut self, delta_y: f64) {
        let delta = delta_y * self.config.wheel_multiplier;
        self.nudge(delta, !self.config.smooth_wheel);
    }

    /// Vertical touch drag delta in pixels. Positive scrolls down.
    pub fn on_touch(&mut self, delta_y: f64) {
        let delta = delta_y * self.config.touch_multiplier;
        self.nudge(delta, false);
    }

    fn nudge(&mut self, delta: f64, immediate: bool) {
        if self.stopped || !delta.is_finite() {
            return;
        }
        let target = self.target + delta;
        self.scroll_to(target, immediate);
    }

    /// Scrolls to an absolute position, eased unless `immediate`.
    pub fn scroll_to(&mut self, target: f64, immediate: bool) {
        let Some(limit) = self.bounds else {
            return;
        };
        if !target.is_finite() {
            return;
        }
        self.target = target.clamp(0.0, limit);
        if immediate || self.config.duration <= 0.0 {
            self.position = self.target;
            self.animation = None;
        } else if self.target == self.position {
            self.animation = None;
        } else {
            self.animation = Some(ScrollAnimation {
                from: self.position,
                to: self.target,
                elapsed: 0.0,
            });
        }
    }

    /// Ignores input until `start` is called. A running animation freezes in place.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.target = self.position;
        self.animation = None;
    }

    pub fn start(&mut self) {
        self.stopped = false;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// The state published by the last `update`.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Advances the eased animation by `dt` seconds and publishes the new state.
    pub fn update(&mut self, dt: f64) -> ScrollState {
        let previous = self.state.position;
        if let Some(mut anim) = self.animation.take() {
            anim.elapsed += dt.max(0.0);
            let t = anim.elapsed / self.config.duration;
            if t >= 1.0 {
                self.position = anim.to;
            } else {
                self.position = lerp(anim.from, anim.to, self.config.easing.apply(t));
                self.animation = Some(anim);
            }
        }
        let velocity = self.position - previous;
        let direction = if velocity > 0.0 {
            Direction::Down
        } else if velocity < 0.0 {
            Direction::Up
        } else {
            Direction::None
        };
        self.state = ScrollState {
            position: self.position,
            velocity,
            direction,
        };
        self.state
    }
}
