//! # Page API
//!
//! Page lifecycle for Rhai scripts.
//!
//! ## Responsibilities
//! - **Creation**: `new_page` with default or JSON configuration
//! - **Lifecycle**: `init`, `refresh`, `teardown`, `animate_car_cards`
//! - **Frames**: `advance`, `tick`
//! - **Queries**: `scroll_y`, `navbar_hidden`, `frame`

use crate::config::PageConfig;
use crate::director::PageDirector;
use crate::scene::SceneGraph;
use kurbo::Size;
use rhai::{Engine, EvalAltResult};
use tracing::info;

use crate::scripting::types::PageHandle;

const FRAME: f64 = 1.0 / 60.0;
/// Longest span one `advance` call may simulate.
const MAX_ADVANCE: f64 = 3600.0;

fn new_page(width: f64, height: f64, content_height: f64, config: PageConfig) -> PageHandle {
    let scene = SceneGraph::with_viewport(Size::new(width, height), content_height);
    PageHandle::new(PageDirector::new(scene, config))
}

/// Register page lifecycle Rhai functions.
pub fn register(engine: &mut Engine, config: PageConfig) {
    engine.register_type_with_name::<PageHandle>("Page");

    // Overload 1: configuration supplied by the host
    let base = config.clone();
    engine.register_fn("new_page", move |w: f64, h: f64, content: f64| {
        new_page(w, h, content, base.clone())
    });

    // Overload 2: inline JSON configuration
    engine.register_fn(
        "new_page",
        |w: f64, h: f64, content: f64, json: &str| -> Result<PageHandle, Box<EvalAltResult>> {
            let config = PageConfig::from_json_str(json).map_err(|e| e.to_string())?;
            Ok(new_page(w, h, content, config))
        },
    );

    engine.register_fn("init", |page: &mut PageHandle| {
        page.lock().init();
    });

    engine.register_fn("refresh", |page: &mut PageHandle| {
        page.lock().refresh();
    });

    engine.register_fn("teardown", |page: &mut PageHandle| {
        page.lock().teardown();
    });

    engine.register_fn("animate_car_cards", |page: &mut PageHandle| -> bool {
        page.lock().animate_car_cards().is_some()
    });

    engine.register_fn("tick", |page: &mut PageHandle, dt: f64| {
        page.lock().tick(dt);
    });

    // Runs 60 Hz frames covering `seconds`.
    engine.register_fn(
        "advance",
        |page: &mut PageHandle, seconds: f64| -> Result<(), Box<EvalAltResult>> {
            if !seconds.is_finite() || seconds > MAX_ADVANCE {
                return Err(format!("advance: {} s is outside 0..={} s", seconds, MAX_ADVANCE).into());
            }
            let frames = (seconds / FRAME).round().max(0.0) as u64;
            let mut d = page.lock();
            for _ in 0..frames {
                d.tick(FRAME);
            }
            Ok(())
        },
    );

    engine.register_fn("scroll_y", |page: &mut PageHandle| -> f64 {
        page.lock().scroll_state().position
    });

    engine.register_fn("navbar_hidden", |page: &mut PageHandle| -> bool {
        page.lock().navbar_hidden()
    });

    engine.register_fn("frame", |page: &mut PageHandle| -> i64 {
        page.lock().clock().frame() as i64
    });

    engine.register_fn("log", |message: &str| {
        info!("[Script] {}", message);
    });
}
