//! Sticky toggle
//!
//! The menu is stuck whenever its natural top is above the scroll offset
//! plus `topMargin`. The decision is recomputed on every tick and the full
//! style treatment for the resulting state is applied every time, so
//! applying it repeatedly at one offset leaves the document unchanged.

use crate::document::Document;
use crate::length::{self, px};

/// Whether the menu is currently pinned to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StickyState {
    /// In normal document flow
    #[default]
    Released,
    /// Fixed to the top of the viewport
    Stuck,
}

impl StickyState {
    /// Decide the state for a scroll offset
    ///
    /// Strict comparison: at `position + top_margin == natural_top` the
    /// menu is not stuck.
    pub fn evaluate(natural_top: i32, position: i32, top_margin: i32) -> Self {
        if natural_top < position.saturating_add(top_margin) {
            StickyState::Stuck
        } else {
            StickyState::Released
        }
    }

    pub fn is_stuck(self) -> bool {
        self == StickyState::Stuck
    }
}

/// Menu geometry recorded once at init
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuGeometry {
    /// The menu's offset from the top of the document before it ever sticks
    pub natural_top: i32,
    pub height: i32,
    pub margin_bottom: i32,
    /// `margin-top` of the element following the menu, restored on release
    pub sibling_margin_top: i32,
}

impl MenuGeometry {
    /// Measure the menu and its following sibling
    ///
    /// Unreadable margins count as `0`.
    pub fn measure<D: Document>(doc: &D, menu: &D::Node, sibling: Option<&D::Node>) -> Self {
        let margin = |node: &D::Node, property: &str| {
            doc.computed_style(node, property)
                .and_then(|value| length::parse_px(&value))
                .unwrap_or(0)
        };

        let geometry = Self {
            natural_top: doc.offset_top(menu),
            height: doc.height(menu),
            margin_bottom: margin(menu, "margin-bottom"),
            sibling_margin_top: sibling.map_or(0, |node| margin(node, "margin-top")),
        };
        tracing::debug!("menu geometry: {:?}", geometry);
        geometry
    }

    /// `margin-top` pushed onto the sibling while stuck, so content below
    /// does not jump up into the space the menu left
    pub fn stuck_sibling_margin(&self) -> i32 {
        self.height
            .saturating_add(self.margin_bottom)
            .saturating_add(self.sibling_margin_top)
    }
}

/// The elements and classes the sticky treatment touches
#[derive(Debug, Clone)]
pub struct StickyTarget<'a, N> {
    pub menu: &'a N,
    pub sibling: Option<&'a N>,
    pub stuck_class: &'a str,
    /// `top` applied while stuck, in pixels
    pub stuck_top: i32,
}

/// Apply the full style treatment for `state`
pub fn apply<D: Document>(
    doc: &mut D,
    target: &StickyTarget<'_, D::Node>,
    geometry: &MenuGeometry,
    state: StickyState,
) {
    match state {
        StickyState::Stuck => {
            doc.add_class(target.menu, target.stuck_class);
            if let Some(sibling) = target.sibling {
                doc.set_style(sibling, "margin-top", &px(geometry.stuck_sibling_margin()));
            }
            doc.set_style(target.menu, "position", "fixed");
            doc.set_style(target.menu, "top", &px(target.stuck_top));
        }
        StickyState::Released => {
            doc.remove_class(target.menu, target.stuck_class);
            if let Some(sibling) = target.sibling {
                doc.set_style(sibling, "margin-top", &px(geometry.sibling_margin_top));
            }
            doc.set_style(target.menu, "position", "relative");
            doc.set_style(target.menu, "top", "0");
        }
    }
}
