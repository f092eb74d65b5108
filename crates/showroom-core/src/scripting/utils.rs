use crate::types::{Element, Property, Style};
use kurbo::Rect;
use rhai::{Array, Dynamic, Map};

/// Reads an int or float as `f64`.
pub fn as_number(value: &Dynamic) -> Option<f64> {
    value
        .as_float()
        .ok()
        .or_else(|| value.as_int().ok().map(|i| i as f64))
}

fn as_string(value: &Dynamic) -> Option<String> {
    value.clone().into_string().ok()
}

/// `[x, y, width, height]` → layout rect.
pub fn parse_rect(value: &Dynamic) -> Option<Rect> {
    let array = value.clone().try_cast::<Array>()?;
    let nums: Vec<f64> = array.iter().filter_map(as_number).collect();
    match nums.as_slice() {
        [x, y, w, h] => Some(Rect::new(*x, *y, x + w.max(0.0), y + h.max(0.0))),
        _ => None,
    }
}

/// Builds an element from `#{ id, class, rect, <style props> }`.
pub fn element_from_map(tag: &str, props: &Map) -> Element {
    let mut element = Element::new(tag);
    if let Some(id) = props.get("id").and_then(as_string) {
        element = element.with_id(&id);
    }
    if let Some(class) = props.get("class").and_then(as_string) {
        element = element.with_class(&class);
    }
    if let Some(rect) = props.get("rect").and_then(parse_rect) {
        element = element.with_rect(rect);
    }
    let mut style = Style::default();
    for (key, value) in props {
        if let (Some(prop), Some(v)) = (Property::parse(key.as_str()), as_number(value)) {
            style.set(prop, v);
        }
    }
    element.with_style(style)
}

pub fn style_to_map(style: &Style) -> Map {
    let mut map = Map::new();
    for prop in Property::ALL {
        map.insert(prop.name().into(), Dynamic::from_float(style.get(prop)));
    }
    map
}
