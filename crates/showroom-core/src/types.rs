//! # Types Module
//!
//! Shared data types used across the engine.
//!
//! ## Responsibilities
//! - **NodeId**: Generational handle into the scene graph arena.
//! - **Property**: The animatable style channels.
//! - **Style**: The visual transform the engine writes onto elements.
//! - **Element**: Host-provided description of a document element.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A handle to a node in the scene graph.
///
/// The generation guards against a stale handle addressing a recycled slot
/// once its element has been removed from the document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub index: u32,
    pub generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Style channels that tweens can drive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Horizontal offset in pixels
    X,
    /// Vertical offset in pixels
    Y,
    /// Horizontal offset as a percentage of the element's own width
    XPercent,
    /// Vertical offset as a percentage of the element's own height
    YPercent,
    /// Rotation in degrees
    Rotation,
    /// Uniform scale factor (1.0 = normal)
    Scale,
    /// Opacity (0.0 to 1.0)
    Opacity,
}

impl Property {
    pub const ALL: [Property; 7] = [
        Property::X,
        Property::Y,
        Property::XPercent,
        Property::YPercent,
        Property::Rotation,
        Property::Scale,
        Property::Opacity,
    ];

    /// Canonical snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Property::X => "x",
            Property::Y => "y",
            Property::XPercent => "x_percent",
            Property::YPercent => "y_percent",
            Property::Rotation => "rotation",
            Property::Scale => "scale",
            Property::Opacity => "opacity",
        }
    }

    /// Parses a property name, accepting the camelCase spellings used by page scripts.
    pub fn parse(name: &str) -> Option<Property> {
        match name {
            "x" | "translate_x" => Some(Property::X),
            "y" | "translate_y" => Some(Property::Y),
            "x_percent" | "xPercent" => Some(Property::XPercent),
            "y_percent" | "yPercent" => Some(Property::YPercent),
            "rotation" | "rotate" => Some(Property::Rotation),
            "scale" => Some(Property::Scale),
            "opacity" | "alpha" => Some(Property::Opacity),
            _ => None,
        }
    }
}

/// The visual transform of an element as last written by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub x: f64,
    pub y: f64,
    pub x_percent: f64,
    pub y_percent: f64,
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            x_percent: 0.0,
            y_percent: 0.0,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl Style {
    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::X => self.x,
            Property::Y => self.y,
            Property::XPercent => self.x_percent,
            Property::YPercent => self.y_percent,
            Property::Rotation => self.rotation,
            Property::Scale => self.scale,
            Property::Opacity => self.opacity,
        }
    }

    pub fn set(&mut self, property: Property, value: f64) {
        let slot = match property {
            Property::X => &mut self.x,
            Property::Y => &mut self.y,
            Property::XPercent => &mut self.x_percent,
            Property::YPercent => &mut self.y_percent,
            Property::Rotation => &mut self.rotation,
            Property::Scale => &mut self.scale,
            Property::Opacity => &mut self.opacity,
        };
        *slot = value;
    }

    /// Effective vertical translation in pixels for an element of `height`.
    pub fn translate_y(&self, height: f64) -> f64 {
        self.y + self.y_percent / 100.0 * height
    }
}

/// Host description of a document element.
#[derive(Clone, Debug, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Layout box in document coordinates, ignoring any engine transform.
    pub rect: Rect,
    /// Initial style, usually the stylesheet's pre-animation state.
    pub style: Style,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}
