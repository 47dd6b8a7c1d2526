//! Sticky menu controller
//!
//! [`StickUp`] owns every piece of mutable state for one sticky menu: the
//! validated configuration, the scroll tracker, the section registry, the
//! sticky state and the active item. It is created once per menu and fed
//! every scroll event; each tick runs to completion before the next.
//!
//! # Example
//!
//! ```
//! use stickup_core::prelude::*;
//!
//! let mut doc = MemoryDocument::new();
//! let menu = doc.append(ElementSpec::new("nav").geometry(100, 40));
//! let list = doc.append_child(menu, ElementSpec::new("ul"));
//! for _ in 0..2 {
//!     doc.append_child(list, ElementSpec::new("li").class("menuItem"));
//! }
//! doc.append(ElementSpec::new("section").id("intro").geometry(140, 800));
//! doc.append(ElementSpec::new("section").id("usage").geometry(940, 800));
//!
//! let options = StickUpOptions::new()
//!     .parts(["intro", "usage"])
//!     .item_selector(".menuItem")
//!     .item_hover("active");
//! let mut stickup = StickUp::new(&mut doc, menu, &options);
//!
//! doc.set_scroll_top(950);
//! let tick = stickup.on_scroll(&mut doc);
//! assert!(tick.sticky.is_stuck());
//! assert_eq!(tick.active, Some(1));
//! ```

use crate::config::Configuration;
use crate::document::Document;
use crate::error::{Diagnostic, StickUpError};
use crate::highlight::{mark_active, select_active};
use crate::options::{StickUpOptions, DEFAULT_MENU_CLASS};
use crate::registry::SectionRegistry;
use crate::scroll::{ScrollDirection, ScrollState};
use crate::sticky::{self, MenuGeometry, StickyState, StickyTarget};
use crate::throttle::ScrollThrottle;

/// Snapshot of the decisions made by one scroll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Scroll offset the tick was evaluated at
    pub position: i32,
    pub direction: ScrollDirection,
    /// Active item index, `None` when highlighting is disabled
    pub active: Option<usize>,
    pub sticky: StickyState,
}

/// Controller for one sticky menu
pub struct StickUp<D: Document> {
    config: Configuration,
    menu: D::Node,
    sibling: Option<D::Node>,
    items: Vec<D::Node>,
    registry: SectionRegistry,
    geometry: MenuGeometry,
    scroll: ScrollState,
    sticky: StickyState,
    active: usize,
    highlight: bool,
    throttle: ScrollThrottle,
    diagnostics: Vec<Diagnostic>,
}

impl<D: Document> std::fmt::Debug for StickUp<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StickUp")
            .field("menu", &self.menu)
            .field("sections", &self.registry.len())
            .field("items", &self.items.len())
            .field("scroll", &self.scroll)
            .field("sticky", &self.sticky)
            .field("active", &self.active_index())
            .finish()
    }
}

impl<D: Document> StickUp<D> {
    /// Make `menu` sticky and, if configured, track its navigation items
    ///
    /// Never fails. Configuration problems are recorded in
    /// [`diagnostics`](Self::diagnostics) and disable only the affected
    /// behavior. Baseline menu geometry is measured here, once.
    pub fn new(doc: &mut D, menu: D::Node, options: &StickUpOptions) -> Self {
        // Styles keyed on the menu class apply to `topMargin: "auto"`
        let menu_class = options.menu_class.as_deref().unwrap_or(DEFAULT_MENU_CLASS);
        doc.add_class(&menu, menu_class);

        let mut diagnostics = Vec::new();
        let config = Configuration::resolve(options, &*doc, &menu, &mut diagnostics);

        let items = match &config.item_selector {
            Some(selector) if config.highlight_enabled() => doc.query_all(selector),
            _ => Vec::new(),
        };
        if config.highlight_enabled() && items.len() != config.sections.len() {
            diagnostics.push(Diagnostic::warning(StickUpError::ItemCountMismatch {
                sections: config.sections.len(),
                items: items.len(),
            }));
        }

        let sibling = doc.next_sibling(&menu);
        let geometry = MenuGeometry::measure(&*doc, &menu, sibling.as_ref());
        let registry = SectionRegistry::new(config.sections.clone());
        let throttle = ScrollThrottle::new(config.throttle_ms);

        let mut stickup = Self {
            config,
            menu,
            sibling,
            items,
            registry,
            geometry,
            scroll: ScrollState::default(),
            sticky: StickyState::Released,
            active: 0,
            highlight: false,
            throttle,
            diagnostics,
        };
        stickup.highlight = stickup.can_highlight();

        tracing::debug!(
            "stickup ready: {} sections, {} items, top margin {}px, highlight {}",
            stickup.registry.len(),
            stickup.items.len(),
            stickup.config.top_margin,
            stickup.highlight
        );
        stickup
    }

    fn can_highlight(&self) -> bool {
        self.config.highlight_enabled() && !self.registry.is_empty() && !self.items.is_empty()
    }

    /// Number of section/item pairs the highlight pass covers
    fn highlighted_count(&self) -> usize {
        self.registry.len().min(self.items.len())
    }

    /// Handle a scroll event, reading the offset from the document
    pub fn on_scroll(&mut self, doc: &mut D) -> Tick {
        let position = doc.scroll_top();
        self.tick(doc, position)
    }

    /// Handle a scroll event subject to the configured throttle
    ///
    /// Returns `None` when the event was suppressed.
    pub fn on_scroll_at(&mut self, doc: &mut D, now_ms: f64) -> Option<Tick> {
        if self.throttle.accept(now_ms) {
            Some(self.on_scroll(doc))
        } else {
            None
        }
    }

    /// Evaluate one tick at `position`
    ///
    /// Order: direction, active item, sticky toggle.
    pub fn tick(&mut self, doc: &mut D, position: i32) -> Tick {
        let direction = self.scroll.observe(position);
        let active = self.update_active(doc, direction, position);

        let state =
            StickyState::evaluate(self.geometry.natural_top, position, self.config.top_margin);
        if state != self.sticky {
            tracing::debug!("menu {:?} at {}px", state, position);
        }
        self.sticky = state;
        sticky::apply(doc, &self.target(), &self.geometry, self.sticky);

        let tick = Tick {
            position,
            direction,
            active,
            sticky: self.sticky,
        };
        tracing::trace!("{:?}", tick);
        tick
    }

    fn update_active(
        &mut self,
        doc: &mut D,
        direction: ScrollDirection,
        position: i32,
    ) -> Option<usize> {
        if !self.highlight {
            return None;
        }

        let count = self.highlighted_count();
        match self.registry.resolve(count, &*doc) {
            Ok(sections) => {
                self.active = select_active(direction, position, &sections, self.active);
                mark_active(doc, &self.items, self.active, &self.config.active_class);
                Some(self.active)
            }
            Err(err) => {
                self.highlight = false;
                if self.diagnostics.iter().any(|reported| reported.error == err) {
                    tracing::trace!("highlight still disabled: {}", err);
                } else {
                    self.diagnostics.push(Diagnostic::error(err));
                }
                None
            }
        }
    }

    fn target(&self) -> StickyTarget<'_, D::Node> {
        StickyTarget {
            menu: &self.menu,
            sibling: self.sibling.as_ref(),
            stuck_class: &self.config.stuck_class,
            stuck_top: self.config.stuck_top,
        }
    }

    /// Re-measure all geometry after a reflow
    ///
    /// Drops cached section geometry and records the menu baseline again
    /// with the menu temporarily released, then decides the sticky state
    /// afresh at the last scroll offset. Highlighting that was disabled by a
    /// missing section is retried on the next tick; an error that persists
    /// is not reported again.
    pub fn remeasure(&mut self, doc: &mut D) {
        self.registry.invalidate();

        sticky::apply(doc, &self.target(), &self.geometry, StickyState::Released);
        self.geometry = MenuGeometry::measure(&*doc, &self.menu, self.sibling.as_ref());
        self.sticky = StickyState::evaluate(
            self.geometry.natural_top,
            self.scroll.position,
            self.config.top_margin,
        );
        sticky::apply(doc, &self.target(), &self.geometry, self.sticky);

        self.highlight = self.can_highlight();
        self.throttle.reset();
    }

    // =========================================================================
    // Query current state
    // =========================================================================

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Everything reported so far, init problems first
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn menu(&self) -> &D::Node {
        &self.menu
    }

    /// Navigation items, in document order
    pub fn items(&self) -> &[D::Node] {
        &self.items
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn menu_geometry(&self) -> &MenuGeometry {
        &self.geometry
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn sticky_state(&self) -> StickyState {
        self.sticky
    }

    pub fn is_stuck(&self) -> bool {
        self.sticky.is_stuck()
    }

    /// Whether the active-item decision currently runs
    pub fn highlight_enabled(&self) -> bool {
        self.highlight
    }

    /// Active item index, `None` when highlighting is disabled
    pub fn active_index(&self) -> Option<usize> {
        self.highlight.then_some(self.active)
    }
}
