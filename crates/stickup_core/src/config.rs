//! Validated configuration
//!
//! [`Configuration`] is built once from [`StickUpOptions`] and never
//! mutated afterwards. Problems found while resolving it are pushed as
//! diagnostics and replaced by safe fallbacks.

use crate::document::Document;
use crate::error::{Diagnostic, StickUpError};
use crate::length;
use crate::options::{
    StickUpOptions, TopMarginOption, DEFAULT_ACTIVE_CLASS, DEFAULT_MENU_CLASS,
    DEFAULT_STUCK_CLASS, DEFAULT_STUCK_TOP,
};

/// Immutable configuration produced at initialization
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Section ids in document order; empty means sticky-only
    pub sections: Vec<String>,
    /// Selector for navigation items, `None` means sticky-only
    pub item_selector: Option<String>,
    /// Class marking the active navigation item
    pub active_class: String,
    /// Offset added to the scroll position in the sticky comparison
    pub top_margin: i32,
    /// `top` applied to the menu while stuck
    pub stuck_top: i32,
    pub menu_class: String,
    pub stuck_class: String,
    /// Minimum milliseconds between handled scroll events
    pub throttle_ms: Option<f64>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            item_selector: None,
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            top_margin: 0,
            stuck_top: DEFAULT_STUCK_TOP,
            menu_class: DEFAULT_MENU_CLASS.to_string(),
            stuck_class: DEFAULT_STUCK_CLASS.to_string(),
            throttle_ms: None,
        }
    }
}

impl Configuration {
    /// Resolve options against the document
    ///
    /// `menu` is the element being made sticky; it is consulted for
    /// `topMargin: "auto"`.
    pub fn resolve<D: Document>(
        options: &StickUpOptions,
        doc: &D,
        menu: &D::Node,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Self {
        let mut sections = resolve_sections(options, doc, diagnostics);
        let mut item_selector = options.item_selector.clone();

        if options.wants_highlight() {
            if sections.is_empty() {
                diagnostics.push(Diagnostic::error(StickUpError::NoSections));
                item_selector = None;
            } else if item_selector.is_none() {
                diagnostics.push(Diagnostic::error(StickUpError::MissingItemSelector));
                sections.clear();
            }
        }

        let top_margin = resolve_top_margin(options.top_margin.as_ref(), doc, menu, diagnostics);

        let defaults = Self::default();
        Self {
            sections,
            item_selector,
            active_class: options.item_hover.clone().unwrap_or(defaults.active_class),
            top_margin,
            stuck_top: options.stuck_top.unwrap_or(defaults.stuck_top),
            menu_class: options.menu_class.clone().unwrap_or(defaults.menu_class),
            stuck_class: options.stuck_class.clone().unwrap_or(defaults.stuck_class),
            throttle_ms: options.throttle_ms.filter(|ms| ms.is_finite() && *ms > 0.0),
        }
    }

    /// Whether the active-item decision runs at all
    pub fn highlight_enabled(&self) -> bool {
        !self.sections.is_empty() && self.item_selector.is_some()
    }
}

/// Build the section id list
///
/// `parts` is taken verbatim when present; otherwise the ids of elements
/// matching `selector`, in document order. Matches without an id are
/// skipped with a warning.
pub fn resolve_sections<D: Document>(
    options: &StickUpOptions,
    doc: &D,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<String> {
    if let Some(parts) = &options.parts {
        return parts.clone();
    }

    let Some(selector) = &options.selector else {
        return Vec::new();
    };

    let mut sections = Vec::new();
    for (index, node) in doc.query_all(selector).iter().enumerate() {
        match doc.element_id(node) {
            Some(id) => sections.push(id),
            None => diagnostics.push(Diagnostic::warning(StickUpError::EmptySectionId { index })),
        }
    }
    sections
}

/// Resolve `topMargin` to pixels
///
/// Priority: `"auto"` reads the menu's computed `margin-top`; a string with
/// a leading integer (`"20px"`) uses it; a number is truncated; anything
/// else warns and falls back to `0`. A missing option is `0`.
pub fn resolve_top_margin<D: Document>(
    option: Option<&TopMarginOption>,
    doc: &D,
    menu: &D::Node,
    diagnostics: &mut Vec<Diagnostic>,
) -> i32 {
    let (parsed, raw) = match option {
        None => return 0,
        Some(TopMarginOption::Text(text)) if text == "auto" => {
            let computed = doc.computed_style(menu, "margin-top").unwrap_or_default();
            (length::parse_px(&computed), computed)
        }
        Some(TopMarginOption::Text(text)) => (length::parse_px(text), text.clone()),
        Some(TopMarginOption::Number(value)) => (length::number_to_px(*value), value.to_string()),
    };

    parsed.unwrap_or_else(|| {
        diagnostics.push(Diagnostic::warning(StickUpError::InvalidTopMargin { value: raw }));
        0
    })
}
