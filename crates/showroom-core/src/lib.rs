//! # Showroom Engine
//!
//! `showroom-core` is the frame-driven motion engine behind the car-rental
//! showroom page: eased smooth scrolling, scroll-bound section reveals,
//! sequenced timelines and pointer-reactive floating elements.
//!
//! There is no browser. The host mirrors its document into a [`SceneGraph`]
//! (elements, classes, layout rects), reports input through
//! [`PageDirector::dispatch`] and drives frames with [`PageDirector::tick`].
//! The engine only ever writes visual style values back onto the scene.
//!
//! ## Core Features
//!
//! *   **Smooth Scroll**: Wheel and touch deltas eased into a scroll position (`expo.out`).
//! *   **Scroll Triggers**: Enter, leave, enter-back and leave-back edges; scrub and toggle modes.
//! *   **Timelines**: Relative positions, stagger, repeat/yoyo, play/reverse/seek.
//! *   **Pointer Motion**: Idle float loops with velocity-seeded decay and a random kick.
//! *   **Scripting**: Built-in bindings for Rhai to drive a headless page from scenarios.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use showroom_core::{Element, InputEvent, PageConfig, PageDirector, SceneGraph};
//! use kurbo::{Rect, Size};
//!
//! let mut scene = SceneGraph::with_viewport(Size::new(1280.0, 800.0), 4000.0);
//! scene.add_node(Element::new("nav").with_class("navbar"));
//! scene.add_node(Element::new("section").with_id("fleet").with_rect(Rect::new(0.0, 1200.0, 1280.0, 2400.0)));
//!
//! let mut page = PageDirector::new(scene, PageConfig::default());
//! page.init();
//! page.dispatch(InputEvent::Wheel { dx: 0.0, dy: 400.0 });
//! for _ in 0..90 {
//!     page.tick(1.0 / 60.0);
//! }
//! ```

/// Easing curves.
pub mod animation;

/// The shared frame clock.
pub mod clock;

/// JSON page configuration.
pub mod config;

/// The page-lifetime controller.
pub mod director;

pub mod errors;

/// Host input events and the route table.
pub mod events;

pub mod magnetic;

/// Pointer-reactive floating motion.
pub mod motion;

pub mod navbar;

/// The host document mirror.
pub mod scene;

/// Rhai scripting API bindings.
pub mod scripting;

/// The smooth scroll driver.
pub mod scroll;

/// Tweens, timelines and the overwrite tweener.
pub mod timeline;

/// Scroll-bound triggers.
pub mod trigger;

/// Shared data structures used across the engine.
pub mod types;

pub use animation::EasingType;
pub use config::PageConfig;
pub use director::{FrameReport, PageDirector};
pub use errors::{MotionError, MotionResult};
pub use events::InputEvent;
pub use scene::SceneGraph;
pub use scroll::ScrollState;
pub use types::{Element, NodeId, Property, Style};
