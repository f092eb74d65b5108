use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Scroll distance from the top below which the navbar never hides.
    pub threshold: f64,
    /// Seconds for the slide in or out.
    pub duration: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            duration: 0.3,
        }
    }
}

/// Hide-on-scroll-down, show-on-scroll-up rule for the page navbar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavbarVisibility {
    pub last_scroll: f64,
    pub hidden: bool,
    threshold: f64,
}

impl NavbarVisibility {
    pub fn new(threshold: f64) -> Self {
        Self {
            last_scroll: 0.0,
            hidden: false,
            threshold,
        }
    }

    /// Feeds a new scroll position. Returns the new `hidden` flag when it changed.
    pub fn update(&mut self, position: f64) -> Option<bool> {
        let hide = position > self.last_scroll && position > self.threshold;
        self.last_scroll = position;
        if hide == self.hidden {
            return None;
        }
        self.hidden = hide;
        Some(hide)
    }
}
