//! Magnetic buttons: a hovered button leans toward the pointer and springs
//! back elastically once the pointer leaves it.

use crate::animation::EasingType;
use crate::scene::SceneGraph;
use crate::timeline::Tweener;
use crate::types::{NodeId, Property};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagneticConfig {
    /// Fraction of the pointer's offset from the button centre the button follows.
    pub strength: f64,
    pub follow_duration: f64,
    pub follow_ease: EasingType,
    pub return_duration: f64,
    pub return_ease: EasingType,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: 0.3,
            follow_duration: 0.3,
            follow_ease: EasingType::Power2Out,
            return_duration: 0.5,
            return_ease: EasingType::ElasticOut {
                amplitude: 1.0,
                period: 0.3,
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MagneticButtons {
    config: MagneticConfig,
    buttons: Vec<NodeId>,
    hovered: BTreeSet<NodeId>,
}

impl MagneticButtons {
    pub fn new(config: MagneticConfig, buttons: Vec<NodeId>) -> Self {
        Self {
            config,
            buttons,
            hovered: BTreeSet::new(),
        }
    }

    pub fn buttons(&self) -> &[NodeId] {
        &self.buttons
    }

    pub fn is_hovered(&self, node: NodeId) -> bool {
        self.hovered.contains(&node)
    }

    pub fn clear(&mut self) {
        self.buttons.clear();
        self.hovered.clear();
    }

    /// Reacts to a pointer move. `None` means the pointer left the page.
    ///
    /// `pointer` is in viewport coordinates; layout rects are in document
    /// coordinates and are shifted up by `scroll` before hit testing.
    /// Hit testing uses the untransformed layout rect, so a button does not
    /// chase itself out from under the pointer.
    pub fn on_pointer(&mut self, pointer: Option<Point>, scroll: f64, scene: &SceneGraph, tweener: &mut Tweener) {
        let config = self.config;
        let offset = Vec2::new(0.0, scroll);
        self.buttons.retain(|id| scene.contains(*id));
        for &button in &self.buttons {
            let Some(rect) = scene.rect(button).map(|r| r - offset) else {
                continue;
            };
            match pointer.filter(|p| rect.contains(*p)) {
                Some(p) => {
                    let pull = (p - rect.center()) * config.strength;
                    tweener.to(button, Property::X, pull.x, config.follow_duration, config.follow_ease);
                    tweener.to(button, Property::Y, pull.y, config.follow_duration, config.follow_ease);
                    self.hovered.insert(button);
                }
                None => {
                    if self.hovered.remove(&button) {
                        tweener.to(button, Property::X, 0.0, config.return_duration, config.return_ease);
                        tweener.to(button, Property::Y, 0.0, config.return_duration, config.return_ease);
                    }
                }
            }
        }
    }
}
