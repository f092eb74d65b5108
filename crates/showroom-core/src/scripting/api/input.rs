//! # Input API
//!
//! Feeds host input into the page dispatcher. Events are consumed on the
//! next frame, so scripts call `advance` afterwards.

use crate::events::InputEvent;
use crate::scripting::types::{NodeHandle, PageHandle};
use rhai::Engine;

/// Register input Rhai functions.
pub fn register(engine: &mut Engine) {
    engine.register_fn("wheel", |page: &mut PageHandle, dy: f64| -> i64 {
        page.lock().dispatch(InputEvent::Wheel { dx: 0.0, dy }) as i64
    });

    engine.register_fn("touch", |page: &mut PageHandle, dy: f64| -> i64 {
        page.lock().dispatch(InputEvent::Touch { dy }) as i64
    });

    engine.register_fn("pointer_move", |page: &mut PageHandle, x: f64, y: f64| -> i64 {
        page.lock().dispatch(InputEvent::PointerMove { x, y }) as i64
    });

    engine.register_fn("pointer_enter", |node: &mut NodeHandle| -> i64 {
        let id = node.id;
        node.lock().dispatch(InputEvent::PointerEnter { node: id }) as i64
    });

    engine.register_fn("pointer_leave", |page: &mut PageHandle| -> i64 {
        page.lock().dispatch(InputEvent::PointerExit) as i64
    });

    engine.register_fn("resize", |page: &mut PageHandle, width: f64, height: f64| -> i64 {
        page.lock().dispatch(InputEvent::Resize { width, height }) as i64
    });

    engine.register_fn("content_height", |page: &mut PageHandle, height: f64| -> i64 {
        page.lock().dispatch(InputEvent::ContentResized { height }) as i64
    });

    engine.register_fn("scroll_to", |page: &mut PageHandle, target: f64| {
        page.lock().scroll_to(target, false);
    });

    engine.register_fn("jump_to", |page: &mut PageHandle, target: f64| {
        page.lock().scroll_to(target, true);
    });
}
