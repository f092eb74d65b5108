//! # Config Module
//!
//! Page configuration loaded from JSON.
//!
//! ## Responsibilities
//! - **Defaults**: Every field is optional; missing fields take the shipped page's values.
//! - **Sanitising**: Out-of-range values are clamped (and logged) instead of rejected.

use crate::animation::EasingType;
use crate::errors::MotionResult;
use crate::magnetic::MagneticConfig;
use crate::motion::MotionConfig;
use crate::navbar::NavbarConfig;
use crate::scroll::ScrollConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Selectors for the page sections the director wires up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub hero: String,
    pub hero_bg: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_cta: String,
    pub fleet: String,
    pub fleet_header: String,
    pub car_card: String,
    pub navbar: String,
    pub magnetic: String,
    pub floating: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            hero: ".hero".into(),
            hero_bg: ".hero-bg".into(),
            hero_title: ".hero-title".into(),
            hero_subtitle: ".hero-subtitle".into(),
            hero_cta: ".hero-cta".into(),
            fleet: "#fleet".into(),
            fleet_header: ".fleet-header".into(),
            car_card: ".car-card".into(),
            navbar: ".navbar".into(),
            magnetic: ".hero-cta, .btn".into(),
            floating: ".floating".into(),
        }
    }
}

/// Timings of the hero intro, section reveals and parallax.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub ease: EasingType,
    pub title_duration: f64,
    pub title_delay: f64,
    pub subtitle_duration: f64,
    /// Seconds the subtitle overlaps the end of the title.
    pub subtitle_overlap: f64,
    pub cta_duration: f64,
    pub cta_overlap: f64,
    pub header_duration: f64,
    pub card_duration: f64,
    pub card_stagger: f64,
    /// How far the hero background drifts, as a percentage of its height.
    pub parallax_y_percent: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            ease: EasingType::Power3Out,
            title_duration: 1.2,
            title_delay: 0.3,
            subtitle_duration: 1.0,
            subtitle_overlap: 0.6,
            cta_duration: 0.8,
            cta_overlap: 0.4,
            header_duration: 1.0,
            card_duration: 0.8,
            card_stagger: 0.1,
            parallax_y_percent: 30.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub scroll: ScrollConfig,
    pub navbar: NavbarConfig,
    pub motion: MotionConfig,
    pub magnetic: MagneticConfig,
    pub reveal: RevealConfig,
    pub selectors: SelectorConfig,
    /// Seconds after init before trigger ranges are recomputed once more.
    pub refresh_delay: f64,
    /// Seed for the rotational kick. Unset draws from entropy.
    pub seed: Option<u64>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            navbar: NavbarConfig::default(),
            motion: MotionConfig::default(),
            magnetic: MagneticConfig::default(),
            reveal: RevealConfig::default(),
            selectors: SelectorConfig::default(),
            refresh_delay: 0.5,
            seed: None,
        }
    }
}

impl PageConfig {
    pub fn from_json_str(json: &str) -> MotionResult<Self> {
        let mut config: PageConfig = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Clamps every numeric field into its usable range.
    pub fn sanitize(&mut self) {
        clamp_field("scroll.duration", &mut self.scroll.duration, 0.0, 10.0);
        clamp_field("scroll.wheel_multiplier", &mut self.scroll.wheel_multiplier, 0.0, 100.0);
        clamp_field("scroll.touch_multiplier", &mut self.scroll.touch_multiplier, 0.0, 100.0);
        clamp_field("navbar.threshold", &mut self.navbar.threshold, 0.0, f64::MAX);
        clamp_field("navbar.duration", &mut self.navbar.duration, 0.0, 10.0);
        clamp_field("motion.amplitude", &mut self.motion.amplitude, 0.0, 1000.0);
        clamp_field("motion.float_duration", &mut self.motion.float_duration, 0.01, 60.0);
        clamp_field("motion.gain", &mut self.motion.gain, 0.0, 1000.0);
        clamp_field("motion.decay_duration", &mut self.motion.decay_duration, 0.0, 60.0);
        clamp_field("motion.friction", &mut self.motion.friction, 0.0, 50.0);
        clamp_field("motion.max_kick", &mut self.motion.max_kick, 0.0, 180.0);
        clamp_field("motion.kick_duration", &mut self.motion.kick_duration, 0.0, 10.0);
        clamp_field("magnetic.strength", &mut self.magnetic.strength, 0.0, 1.0);
        clamp_field("magnetic.follow_duration", &mut self.magnetic.follow_duration, 0.0, 10.0);
        clamp_field("magnetic.return_duration", &mut self.magnetic.return_duration, 0.0, 10.0);
        clamp_field("reveal.title_duration", &mut self.reveal.title_duration, 0.0, 60.0);
        clamp_field("reveal.title_delay", &mut self.reveal.title_delay, 0.0, 60.0);
        clamp_field("reveal.subtitle_duration", &mut self.reveal.subtitle_duration, 0.0, 60.0);
        clamp_field("reveal.subtitle_overlap", &mut self.reveal.subtitle_overlap, 0.0, 60.0);
        clamp_field("reveal.cta_duration", &mut self.reveal.cta_duration, 0.0, 60.0);
        clamp_field("reveal.cta_overlap", &mut self.reveal.cta_overlap, 0.0, 60.0);
        clamp_field("reveal.header_duration", &mut self.reveal.header_duration, 0.0, 60.0);
        clamp_field("reveal.card_duration", &mut self.reveal.card_duration, 0.0, 60.0);
        clamp_field("reveal.card_stagger", &mut self.reveal.card_stagger, 0.0, 10.0);
        clamp_field("refresh_delay", &mut self.refresh_delay, 0.0, 60.0);
    }
}

fn clamp_field(name: &str, value: &mut f64, min: f64, max: f64) {
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != *value || value.is_nan() {
        warn!(field = name, value = *value, clamped, "[Config] value out of range, clamped");
        *value = clamped;
    }
}
