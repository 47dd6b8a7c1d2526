//! Document abstraction
//!
//! [`Document`] is the boundary between the sticky menu state machine and
//! whatever actually holds the page: a browser DOM (see the
//! `stickup_platform_web` extension) or the in-memory [`MemoryDocument`]
//! used by tests and headless hosts.
//!
//! All calls are synchronous and happen on the thread running the scroll
//! handler.

use std::fmt;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::selector::{Compound, SelectorList, SimpleSelector};

/// Host document trait
///
/// Implemented by each platform backend to give the controller read access
/// to geometry and write access to classes and inline styles.
pub trait Document {
    /// Handle to an element in this document
    type Node: Clone + PartialEq + fmt::Debug;

    /// All elements matching `selector`, in document order
    ///
    /// Unsupported or invalid selectors match nothing.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Look up an element by its `id` attribute
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// The element's `id` attribute, if it has a non-empty one
    fn element_id(&self, node: &Self::Node) -> Option<String>;

    /// The next element sibling in document order
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Distance in pixels from the top of the document to the element's border box
    fn offset_top(&self, node: &Self::Node) -> i32;

    /// Content height of the element in pixels
    fn height(&self, node: &Self::Node) -> i32;

    /// Computed (resolved) value of a CSS property, e.g. `margin-top`
    fn computed_style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// Current vertical scroll offset of the viewport
    fn scroll_top(&self) -> i32;

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Set an inline style property
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);
}

new_key_type! {
    /// Element handle inside a [`MemoryDocument`]
    pub struct NodeId;
}

/// Description of an element to insert into a [`MemoryDocument`]
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    offset_top: i32,
    height: i32,
    computed: FxHashMap<String, String>,
}

impl ElementSpec {
    /// Create an element with the given tag name
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the document offset and height
    pub fn geometry(mut self, offset_top: i32, height: i32) -> Self {
        self.offset_top = offset_top;
        self.height = height;
        self
    }

    /// Set a computed style value (what the stylesheet resolves to)
    pub fn computed(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.computed.insert(property.into(), value.into());
        self
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    spec: ElementSpec,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    inline: FxHashMap<String, String>,
}

/// A self-contained document tree
///
/// Geometry is whatever the caller says it is; nothing is laid out. Inline
/// styles are recorded but do not feed back into geometry, matching how the
/// controller only reads baseline geometry at init.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: SlotMap<NodeId, ElementData>,
    roots: Vec<NodeId>,
    scroll_top: i32,
}

impl MemoryDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level element
    pub fn append(&mut self, spec: ElementSpec) -> NodeId {
        let id = self.insert(spec, None);
        self.roots.push(id);
        id
    }

    /// Append an element as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = self.insert(spec, Some(parent));
        if let Some(data) = self.nodes.get_mut(parent) {
            data.children.push(id);
        }
        id
    }

    fn insert(&mut self, spec: ElementSpec, parent: Option<NodeId>) -> NodeId {
        self.nodes.insert(ElementData {
            spec,
            parent,
            children: Vec::new(),
            inline: FxHashMap::default(),
        })
    }

    /// Move the viewport
    pub fn set_scroll_top(&mut self, scroll_top: i32) {
        self.scroll_top = scroll_top;
    }

    /// Change an element's geometry (simulates a reflow)
    pub fn set_geometry(&mut self, node: NodeId, offset_top: i32, height: i32) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.spec.offset_top = offset_top;
            data.spec.height = height;
        }
    }

    /// Read back an inline style property
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(node)?
            .inline
            .get(property)
            .map(String::as_str)
    }

    /// Class list of an element, in insertion order
    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.nodes
            .get(node)
            .map(|data| data.spec.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of elements in the document
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All elements in document (pre-order) order
    fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            order.push(node);
            if let Some(data) = self.nodes.get(node) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        order
    }

    fn matches_compound(&self, node: NodeId, compound: &Compound) -> bool {
        let Some(data) = self.nodes.get(node) else {
            return false;
        };
        compound.iter().all(|simple| match simple {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => data.spec.tag == *tag,
            SimpleSelector::Id(id) => data.spec.id.as_deref() == Some(id.as_str()),
            SimpleSelector::Class(class) => data.spec.classes.iter().any(|c| c == class),
        })
    }

    fn matches_complex(&self, node: NodeId, parts: &[Compound]) -> bool {
        let Some((last, rest)) = parts.split_last() else {
            return false;
        };
        if !self.matches_compound(node, last) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }

        let mut ancestor = self.nodes.get(node).and_then(|data| data.parent);
        while let Some(current) = ancestor {
            if self.matches_complex(current, rest) {
                return true;
            }
            ancestor = self.nodes.get(current).and_then(|data| data.parent);
        }
        false
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(list) = SelectorList::parse(selector) else {
            return Vec::new();
        };
        self.document_order()
            .into_iter()
            .filter(|&node| {
                list.selectors
                    .iter()
                    .any(|complex| self.matches_complex(node, complex))
            })
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|&node| self.nodes[node].spec.id.as_deref() == Some(id))
    }

    fn element_id(&self, node: &NodeId) -> Option<String> {
        self.nodes
            .get(*node)?
            .spec
            .id
            .clone()
            .filter(|id| !id.is_empty())
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let data = self.nodes.get(*node)?;
        let siblings = match data.parent {
            Some(parent) => &self.nodes.get(parent)?.children,
            None => &self.roots,
        };
        let position = siblings.iter().position(|n| n == node)?;
        siblings.get(position + 1).copied()
    }

    fn offset_top(&self, node: &NodeId) -> i32 {
        self.nodes.get(*node).map_or(0, |data| data.spec.offset_top)
    }

    fn height(&self, node: &NodeId) -> i32 {
        self.nodes.get(*node).map_or(0, |data| data.spec.height)
    }

    fn computed_style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.nodes.get(*node)?.spec.computed.get(property).cloned()
    }

    fn scroll_top(&self) -> i32 {
        self.scroll_top
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(*node) {
            if !data.spec.classes.iter().any(|c| c == class) {
                data.spec.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(*node) {
            data.spec.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes
            .get(*node)
            .is_some_and(|data| data.spec.classes.iter().any(|c| c == class))
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(*node) {
            data.inline.insert(property.to_string(), value.to_string());
        }
    }
}
