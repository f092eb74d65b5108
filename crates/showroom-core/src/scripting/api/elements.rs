//! # Elements API
//!
//! Document construction and inspection from Rhai.

use crate::scripting::types::{NodeHandle, PageHandle};
use crate::scripting::utils::{element_from_map, style_to_map};
use crate::types::Property;
use kurbo::Rect;
use rhai::{Engine, EvalAltResult, Map};

/// Register element Rhai functions.
pub fn register(engine: &mut Engine) {
    engine.register_type_with_name::<NodeHandle>("Node");

    engine.register_fn("add_element", |page: &mut PageHandle, tag: &str, props: Map| {
        let id = page.lock().scene.add_node(element_from_map(tag, &props));
        NodeHandle {
            page: page.page.clone(),
            id,
        }
    });

    engine.register_fn("add_child", |parent: &mut NodeHandle, tag: &str, props: Map| {
        let id = {
            let mut d = parent.lock();
            let id = d.scene.add_node(element_from_map(tag, &props));
            d.scene.add_child(parent.id, id);
            id
        };
        NodeHandle {
            page: parent.page.clone(),
            id,
        }
    });

    engine.register_fn(
        "set_rect",
        |node: &mut NodeHandle, x: f64, y: f64, w: f64, h: f64| -> bool {
            let rect = Rect::new(x, y, x + w.max(0.0), y + h.max(0.0));
            node.lock().scene.set_rect(node.id, rect)
        },
    );

    // Removes the element (and its subtree) from the document.
    engine.register_fn("detach", |node: &mut NodeHandle| {
        node.lock().scene.destroy_node(node.id);
    });

    engine.register_fn("is_attached", |node: &mut NodeHandle| -> bool {
        node.lock().scene.contains(node.id)
    });

    engine.register_fn("style", |node: &mut NodeHandle| -> Map {
        node.lock()
            .scene
            .style(node.id)
            .map(|s| style_to_map(&s))
            .unwrap_or_default()
    });

    engine.register_fn(
        "prop",
        |node: &mut NodeHandle, name: &str| -> Result<f64, Box<EvalAltResult>> {
            let property =
                Property::parse(name).ok_or_else(|| format!("Unknown property '{}'", name))?;
            Ok(node.lock().scene.read(node.id, property).unwrap_or(0.0))
        },
    );

    engine.register_fn("query", |page: &mut PageHandle, selector: &str| -> rhai::Array {
        let nodes = page.lock().scene.query_selector_all(selector);
        nodes
            .into_iter()
            .map(|id| {
                rhai::Dynamic::from(NodeHandle {
                    page: page.page.clone(),
                    id,
                })
            })
            .collect()
    });
}
