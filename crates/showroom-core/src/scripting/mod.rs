//! # Scripting Module
//!
//! Rhai scripting API bindings for the showroom engine.
//!
//! ## Responsibilities
//! - **Engine Setup**: Registers all types and functions with Rhai.
//! - **Page Creation**: `new_page` with optional JSON configuration.
//! - **Document**: `add_element`, `set_rect`, `detach`, `style`.
//! - **Input**: `wheel`, `touch`, `pointer_move`, `pointer_enter`, `pointer_leave`, `resize`.
//! - **Frames**: `advance` runs 60 Hz frames for a span of seconds.
//!
//! ## Pattern
//! All bindings follow: `engine.register_fn("name", |handle, ...| { ... })`
//!
//! ## Module Structure
//! - `types`: Handle types (PageHandle, NodeHandle)
//! - `utils`: Conversions between Rhai values and engine types
//! - `api/`: Sub-modules for page lifecycle, elements and input

mod api;
pub mod types;
pub mod utils;

pub use types::{NodeHandle, PageHandle};

use crate::config::PageConfig;
use rhai::Engine;

/// Registers the showroom API into the provided Rhai `Engine`.
///
/// Pages created by `new_page` without an explicit configuration use `config`.
pub fn register_rhai_api(engine: &mut Engine, config: PageConfig) {
    api::register_all(engine, config);
}
