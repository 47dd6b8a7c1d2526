//! `Document` implementation over the browser DOM

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};

use stickup_core::document::Document;
use stickup_core::length;

use crate::error::{Result, WebError};

/// The page's live DOM
///
/// Offsets are document-relative: the bounding rect's top plus the current
/// vertical scroll. Heights are content heights (computed `height`), falling
/// back to the border box when the computed value is not in pixels.
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// Bind to the global window's document
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Milliseconds from `performance.now()`, or `0` when unavailable
    pub fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or(0.0)
    }
}

impl Document for WebDocument {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                tracing::debug!("querySelectorAll({:?}) failed: {:?}", selector, err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn element_id(&self, node: &Element) -> Option<String> {
        let id = node.id();
        (!id.is_empty()).then_some(id)
    }

    fn next_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn offset_top(&self, node: &Element) -> i32 {
        let scroll = self.window.scroll_y().unwrap_or(0.0);
        (node.get_bounding_client_rect().y() + scroll) as i32
    }

    fn height(&self, node: &Element) -> i32 {
        self.computed_style(node, "height")
            .and_then(|value| length::parse_px(&value))
            .unwrap_or_else(|| node.get_bounding_client_rect().height() as i32)
    }

    fn computed_style(&self, node: &Element, property: &str) -> Option<String> {
        let style = self.window.get_computed_style(node).ok().flatten()?;
        style
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn scroll_top(&self) -> i32 {
        self.window.scroll_y().map(|y| y as i32).unwrap_or(0)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            tracing::warn!("failed to add class {:?}: {:?}", class, err);
        }
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            tracing::warn!("failed to remove class {:?}: {:?}", class, err);
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            tracing::debug!("cannot style non-HTML element {:?}", node.tag_name());
            return;
        };
        if let Err(err) = element.style().set_property(property, value) {
            tracing::warn!("failed to set {}: {}: {:?}", property, value, err);
        }
    }
}
