//! # API Module
//!
//! Aggregates all Rhai API sub-modules and provides a single registration point.
//!
//! ## Sub-modules
//! - **page**: Page creation, init, frames, card reveal, teardown
//! - **elements**: Element creation, geometry, detaching, style reads
//! - **input**: Wheel, touch, pointer and resize events

pub mod elements;
pub mod input;
pub mod page;

use crate::config::PageConfig;
use rhai::Engine;

/// Register all API functions with the Rhai engine.
pub fn register_all(engine: &mut Engine, config: PageConfig) {
    page::register(engine, config);
    elements::register(engine);
    input::register(engine);
}
