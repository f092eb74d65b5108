use crate::errors::MotionError;
use crate::types::{Element, NodeId, Property, Style};
use kurbo::{Rect, Size};
use tracing::debug;

/// A document element plus its relationships and the style the engine writes.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Host-supplied description (tag, id, classes, layout rect).
    pub element: Element,
    /// Indices of child nodes.
    pub children: Vec<NodeId>,
    /// Parent node, if attached below another element.
    pub parent: Option<NodeId>,
    /// Current visual style. Starts as `element.style`.
    pub style: Style,
}

impl SceneNode {
    pub fn new(element: Element) -> Self {
        let style = element.style;
        Self {
            element,
            children: Vec::new(),
            parent: None,
            style,
        }
    }
}

/// The scrollable root: viewport size and total document height.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollContainer {
    pub viewport: Size,
    pub content_height: f64,
}

impl ScrollContainer {
    /// Largest reachable scroll position.
    pub fn limit(&self) -> f64 {
        (self.content_height - self.viewport.height).max(0.0)
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

/// The host document mirrored as an arena of nodes.
///
/// The host inserts elements and keeps their geometry current; the engine
/// only reads geometry and writes `SceneNode::style`.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    /// Indices of nodes that have been removed and can be reused.
    free_indices: Vec<u32>,
    container: Option<ScrollContainer>,
}

impl SceneGraph {
    /// An empty document without a scroll container.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document scrolled inside a viewport of `viewport` size.
    pub fn with_viewport(viewport: Size, content_height: f64) -> Self {
        Self {
            container: Some(ScrollContainer {
                viewport,
                content_height,
            }),
            ..Self::default()
        }
    }

    pub fn scroll_container(&self) -> Option<ScrollContainer> {
        self.container
    }

    pub fn set_scroll_container(&mut self, container: Option<ScrollContainer>) {
        self.container = container;
    }

    /// Updates the viewport size; ignored without a scroll container.
    pub fn set_viewport(&mut self, viewport: Size) {
        if let Some(container) = self.container.as_mut() {
            container.viewport = viewport;
        }
    }

    pub fn set_content_height(&mut self, content_height: f64) {
        if let Some(container) = self.container.as_mut() {
            container.content_height = content_height.max(0.0);
        }
    }

    /// Adds a new element to the scene graph and returns its ID.
    pub fn add_node(&mut self, element: Element) -> NodeId {
        let node = SceneNode::new(element);
        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Recursively removes a node and its children from the document.
    ///
    /// Handles to removed nodes stay invalid even after their slot is reused.
    pub fn destroy_node(&mut self, id: NodeId) {
        let (parent_id, children_ids) = match self.get_node(id) {
            Some(node) => (node.parent, node.children.clone()),
            None => return,
        };

        if let Some(pid) = parent_id {
            self.remove_child(pid, id);
        }

        for child_id in children_ids {
            self.destroy_node(child_id);
        }

        let slot = &mut self.slots[id.index as usize];
        if slot.generation != id.generation || slot.node.take().is_none() {
            return;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free_indices.push(id.index);
    }

    /// Establishes a parent-child relationship between two nodes.
    ///
    /// Returns false when either node is gone or the link would form a cycle.
    /// A child that already has a parent is moved.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            debug!("[Scene] Rejected add_child: {} is {} or one of its ancestors", child, parent);
            return false;
        }
        if let Some(old) = self.get_node(child).and_then(|n| n.parent) {
            self.remove_child(old, child);
        }
        if let Some(p_node) = self.get_node_mut(parent) {
            p_node.children.push(child);
        }
        if let Some(c_node) = self.get_node_mut(child) {
            c_node.parent = Some(parent);
        }
        true
    }

    /// True when `ancestor` is `node` itself or sits above it in the tree.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get_node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Removes a child from a parent node's children list.
    /// Does NOT affect the child's `parent` field.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p_node) = self.get_node_mut(parent) {
            if let Some(pos) = p_node.children.iter().position(|&x| x == child) {
                p_node.children.remove(pos);
            }
        }
    }

    /// True while `id` refers to an element still in the document.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    pub fn get_node(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.get_node(id).map(|n| n.element.rect)
    }

    /// Updates the layout box of a node. Returns false for missing nodes.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> bool {
        match self.get_node_mut(id) {
            Some(node) => {
                node.element.rect = rect;
                true
            }
            None => false,
        }
    }

    pub fn style(&self, id: NodeId) -> Option<Style> {
        self.get_node(id).map(|n| n.style)
    }

    /// Reads one style channel of a live node.
    pub fn read(&self, id: NodeId, property: Property) -> Option<f64> {
        self.get_node(id).map(|n| n.style.get(property))
    }

    /// Writes one style channel. Returns false when the node is gone.
    pub fn write(&mut self, id: NodeId, property: Property, value: f64) -> bool {
        match self.get_node_mut(id) {
            Some(node) => {
                node.style.set(property, value);
                true
            }
            None => false,
        }
    }

    /// Live node handles in slot order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|_| NodeId {
                index: index as u32,
                generation: slot.generation,
            })
        })
    }

    /// Returns every live node matching `selector`.
    ///
    /// An unparsable selector matches nothing.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let list = match SelectorList::parse(selector) {
            Ok(list) => list,
            Err(e) => {
                debug!("{}", e);
                return Vec::new();
            }
        };
        self.node_ids()
            .filter(|id| {
                self.get_node(*id)
                    .map(|node| list.matches(&node.element))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Returns the first live node matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }
}

/// A compound selector: optional tag, optional id, any number of classes.
#[derive(Clone, Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|class| element.classes.iter().any(|c| c == class))
    }
}

fn is_marker(c: char) -> bool {
    c == '.' || c == '#'
}

/// Comma-separated list of compound selectors such as `".hero-cta, .btn"`.
#[derive(Clone, Debug, PartialEq)]
struct SelectorList(Vec<Compound>);

impl SelectorList {
    fn parse(input: &str) -> Result<Self, MotionError> {
        let invalid = || MotionError::InvalidSelector(input.to_string());
        let mut list = Vec::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() || part.contains(char::is_whitespace) {
                return Err(invalid());
            }
            let mut compound = Compound::default();
            let mut rest = part;
            let tag_end = rest.find(is_marker).unwrap_or(rest.len());
            if tag_end > 0 {
                compound.tag = Some(rest[..tag_end].to_string());
            }
            rest = &rest[tag_end..];
            while let Some(marker) = rest.chars().next() {
                let body = &rest[1..];
                let end = body.find(is_marker).unwrap_or(body.len());
                let name = &body[..end];
                if name.is_empty() {
                    return Err(invalid());
                }
                match marker {
                    '.' => compound.classes.push(name.to_string()),
                    '#' => compound.id = Some(name.to_string()),
                    _ => return Err(invalid()),
                }
                rest = &body[end..];
            }
            list.push(compound);
        }
        Ok(Self(list))
    }

    fn matches(&self, element: &Element) -> bool {
        self.0.iter().any(|c| c.matches(element))
    }
}
