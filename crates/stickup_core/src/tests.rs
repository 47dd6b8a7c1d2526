//! End-to-end scenarios driving [`StickUp`] over a [`MemoryDocument`]

use crate::prelude::*;

/// Route controller logs to the test harness; `RUST_LOG=stickup_core=trace` shows ticks
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Page {
    doc: MemoryDocument,
    menu: NodeId,
    content: NodeId,
    items: Vec<NodeId>,
}

/// A nav menu with one item per section, followed by a `main` holding the sections
fn page(menu_top: i32, sections: &[(&str, i32, i32)]) -> Page {
    init_tracing();
    let mut doc = MemoryDocument::new();
    let menu = doc.append(
        ElementSpec::new("nav")
            .id("menu")
            .geometry(menu_top, 50)
            .computed("margin-top", "12px")
            .computed("margin-bottom", "10px"),
    );
    let list = doc.append_child(menu, ElementSpec::new("ul"));
    let items = sections
        .iter()
        .map(|_| doc.append_child(list, ElementSpec::new("li").class("menuItem")))
        .collect();
    let content = doc.append(ElementSpec::new("main").computed("margin-top", "20px"));
    for (id, top, height) in sections {
        doc.append_child(
            content,
            ElementSpec::new("section")
                .id(*id)
                .class("part")
                .geometry(*top, *height),
        );
    }

    Page {
        doc,
        menu,
        content,
        items,
    }
}

fn spy_options() -> StickUpOptions {
    StickUpOptions::new()
        .selector(".part")
        .item_selector("#menu .menuItem")
        .item_hover("active")
}

fn active_items(page: &Page) -> Vec<usize> {
    page.items
        .iter()
        .enumerate()
        .filter(|(_, item)| page.doc.has_class(item, "active"))
        .map(|(index, _)| index)
        .collect()
}

type ElementState = (Vec<String>, Vec<Option<String>>);

fn snapshot(doc: &MemoryDocument, nodes: &[NodeId]) -> Vec<ElementState> {
    nodes
        .iter()
        .map(|&node| {
            let classes = doc.classes(node).into_iter().map(str::to_string).collect();
            let styles = ["position", "top", "margin-top"]
                .iter()
                .map(|property| doc.style(node, property).map(str::to_string))
                .collect();
            (classes, styles)
        })
        .collect()
}

// =========================================================================
// Scroll direction
// =========================================================================

#[test]
fn test_direction_follows_every_pair() {
    let mut page = page(500, &[]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &StickUpOptions::default());

    let expected = [
        (0, ScrollDirection::Up),
        (10, ScrollDirection::Down),
        (10, ScrollDirection::Up),
        (5, ScrollDirection::Up),
        (700, ScrollDirection::Down),
        (699, ScrollDirection::Up),
    ];
    for (position, direction) in expected {
        assert_eq!(stickup.tick(&mut page.doc, position).direction, direction);
    }
    assert_eq!(stickup.scroll_state().previous_position, 700);
}

// =========================================================================
// Sticky toggle
// =========================================================================

#[test]
fn test_sticky_threshold_boundary() {
    let mut page = page(500, &[]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &StickUpOptions::default());

    assert_eq!(stickup.tick(&mut page.doc, 499).sticky, StickyState::Released);
    // Strict comparison: 500 < 500 + 0 does not hold
    assert_eq!(stickup.tick(&mut page.doc, 500).sticky, StickyState::Released);
    assert_eq!(stickup.tick(&mut page.doc, 501).sticky, StickyState::Stuck);
    assert_eq!(stickup.tick(&mut page.doc, 500).sticky, StickyState::Released);
}

#[test]
fn test_sticky_applies_and_restores_layout() {
    let mut page = page(500, &[]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &StickUpOptions::default());
    assert!(page.doc.has_class(&page.menu, "stuckMenu"));

    stickup.tick(&mut page.doc, 900);
    assert!(page.doc.has_class(&page.menu, "isStuck"));
    assert_eq!(page.doc.style(page.menu, "position"), Some("fixed"));
    assert_eq!(page.doc.style(page.menu, "top"), Some("60px"));
    // height 50 + margin-bottom 10 + original margin-top 20
    assert_eq!(page.doc.style(page.content, "margin-top"), Some("80px"));

    stickup.tick(&mut page.doc, 100);
    assert!(!page.doc.has_class(&page.menu, "isStuck"));
    assert!(page.doc.has_class(&page.menu, "stuckMenu"));
    assert_eq!(page.doc.style(page.menu, "position"), Some("relative"));
    assert_eq!(page.doc.style(page.menu, "top"), Some("0"));
    assert_eq!(page.doc.style(page.content, "margin-top"), Some("20px"));
}

#[test]
fn test_sticky_is_idempotent_at_unchanged_position() {
    for position in [100, 800] {
        let mut page = page(500, &[("a", 0, 1000), ("b", 1000, 1000)]);
        let mut stickup = StickUp::new(&mut page.doc, page.menu, &spy_options());
        let watched = [page.menu, page.content];

        let first = stickup.tick(&mut page.doc, position);
        let before = snapshot(&page.doc, &watched);
        let second = stickup.tick(&mut page.doc, position);

        assert_eq!(first.sticky, second.sticky);
        assert_eq!(snapshot(&page.doc, &watched), before);
    }
}

#[test]
fn test_top_margin_shifts_sticky_threshold() {
    let mut page = page(500, &[]);
    let options = StickUpOptions::new().top_margin("20px");
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &options);

    assert!(!stickup.tick(&mut page.doc, 480).sticky.is_stuck());
    assert!(stickup.tick(&mut page.doc, 481).sticky.is_stuck());
}

#[test]
fn test_missing_sibling_only_moves_menu() {
    let mut doc = MemoryDocument::new();
    let menu = doc.append(ElementSpec::new("nav").geometry(10, 30));
    let mut stickup = StickUp::new(&mut doc, menu, &StickUpOptions::new().stuck_top(0));

    assert!(stickup.tick(&mut doc, 50).sticky.is_stuck());
    assert_eq!(doc.style(menu, "position"), Some("fixed"));
    assert_eq!(doc.style(menu, "top"), Some("0px"));
}

// =========================================================================
// topMargin resolution
// =========================================================================

#[test]
fn test_top_margin_parsing() {
    let cases: [(TopMarginOption, i32, usize); 4] = [
        ("20px".into(), 20, 0),
        ("auto".into(), 12, 0),
        ("abc".into(), 0, 1),
        (TopMarginOption::Number(15.0), 15, 0),
    ];

    for (value, expected, warnings) in cases {
        let mut page = page(500, &[]);
        let options = StickUpOptions::new().top_margin(value.clone());
        let stickup = StickUp::new(&mut page.doc, page.menu, &options);

        assert_eq!(stickup.config().top_margin, expected, "{:?}", value);
        assert_eq!(stickup.diagnostics().len(), warnings, "{:?}", value);
        assert!(stickup
            .diagnostics()
            .iter()
            .all(|d| d.severity == Severity::Warning));
    }
}

// =========================================================================
// Active item
// =========================================================================

#[test]
fn test_single_active_item_after_every_tick() {
    let mut page = page(100, &[("a", 200, 800), ("b", 1000, 800), ("c", 1800, 800)]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &spy_options());
    assert!(stickup.diagnostics().is_empty());

    let down = (0..3000).step_by(37);
    let up = (0..3000).rev().step_by(41);
    for position in down.chain(up) {
        let tick = stickup.tick(&mut page.doc, position);
        let active = active_items(&page);
        assert_eq!(active.len(), 1, "at {}", position);
        assert_eq!(tick.active, Some(active[0]), "at {}", position);
    }
}

#[test]
fn test_near_top_floor_rule() {
    let mut page = page(2500, &[("a", 0, 1000), ("b", 1000, 1000)]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &spy_options());

    assert_eq!(stickup.tick(&mut page.doc, 1000).active, Some(1));
    assert_eq!(stickup.tick(&mut page.doc, 1500).active, Some(1));

    let tick = stickup.tick(&mut page.doc, 10);
    assert_eq!(tick.direction, ScrollDirection::Up);
    assert_eq!(tick.active, Some(0));
    assert_eq!(active_items(&page), vec![0]);
}

#[test]
fn test_near_top_floor_wins_over_short_first_section() {
    // With a 30px first section, b's 40% rule already fires at 10px
    let mut page = page(2500, &[("a", 0, 30), ("b", 30, 1000)]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &spy_options());

    stickup.tick(&mut page.doc, 1500);
    let tick = stickup.tick(&mut page.doc, 10);
    assert_eq!(tick.direction, ScrollDirection::Up);
    assert_eq!(tick.active, Some(0));
    assert_eq!(active_items(&page), vec![0]);
}

#[test]
fn test_downward_window_activation() {
    let mut page = page(2500, &[("a", 0, 1000), ("b", 1000, 1000)]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &spy_options());

    let expected = [
        (100, 0),
        (900, 0),
        (950, 0),
        (951, 1),
        (1049, 1),
        // Leaving the window does not deactivate while moving down
        (1050, 1),
        (1400, 1),
    ];
    for (position, active) in expected {
        let tick = stickup.tick(&mut page.doc, position);
        assert_eq!(tick.direction, ScrollDirection::Down);
        assert_eq!(tick.active, Some(active), "at {}", position);
    }
    assert_eq!(active_items(&page), vec![1]);
}

#[test]
fn test_upward_forty_percent_rule() {
    let mut page = page(2500, &[("a", 0, 1000), ("b", 1000, 1000)]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &spy_options());

    stickup.tick(&mut page.doc, 1900);
    assert_eq!(stickup.tick(&mut page.doc, 601).active, Some(1));
    assert_eq!(stickup.tick(&mut page.doc, 600).active, Some(0));
}

#[test]
fn test_custom_active_class() {
    let mut page = page(2500, &[("a", 0, 1000), ("b", 1000, 1000)]);
    let options = StickUpOptions::new()
        .parts(["a", "b"])
        .item_selector(".menuItem")
        .item_hover("current");
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &options);

    stickup.tick(&mut page.doc, 1000);
    assert!(page.doc.has_class(&page.items[1], "current"));
    assert!(!page.doc.has_class(&page.items[0], "current"));
    assert!(active_items(&page).is_empty());
}

// =========================================================================
// Degraded modes
// =========================================================================

#[test]
fn test_sticky_only_without_options() {
    let mut page = page(500, &[("a", 0, 1000)]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &StickUpOptions::default());

    assert!(stickup.diagnostics().is_empty());
    assert!(!stickup.highlight_enabled());

    let tick = stickup.tick(&mut page.doc, 600);
    assert_eq!(tick.active, None);
    assert!(tick.sticky.is_stuck());
    assert!(active_items(&page).is_empty());
}

#[test]
fn test_no_sections_reports_error_and_keeps_sticky() {
    let mut page = page(500, &[]);
    let options = StickUpOptions::new()
        .selector(".nothing")
        .item_selector(".menuItem");
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &options);

    assert_eq!(stickup.diagnostics().len(), 1);
    assert_eq!(stickup.diagnostics()[0].error, StickUpError::NoSections);
    assert!(stickup.diagnostics()[0].is_error());

    let tick = stickup.tick(&mut page.doc, 600);
    assert_eq!(tick.active, None);
    assert!(tick.sticky.is_stuck());
}

#[test]
fn test_missing_section_is_reported_once() {
    let mut page = page(50, &[("a", 0, 1000), ("b", 1000, 1000)]);
    let options = StickUpOptions::new()
        .parts(["a", "ghost"])
        .item_selector(".menuItem");
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &options);
    assert!(stickup.diagnostics().is_empty());
    assert!(stickup.highlight_enabled());

    let tick = stickup.tick(&mut page.doc, 100);
    assert_eq!(tick.active, None);
    assert!(tick.sticky.is_stuck());
    assert_eq!(
        stickup.diagnostics(),
        &[Diagnostic {
            severity: Severity::Error,
            error: StickUpError::MissingSection {
                id: "ghost".to_string()
            },
        }]
    );

    stickup.tick(&mut page.doc, 200);
    assert_eq!(stickup.diagnostics().len(), 1);
    assert!(!stickup.highlight_enabled());
    assert_eq!(stickup.active_index(), None);
}

#[test]
fn test_missing_section_survives_remeasure_without_new_reports() {
    let mut page = page(50, &[("a", 0, 1000), ("b", 1000, 1000)]);
    let options = StickUpOptions::new()
        .parts(["a", "ghost"])
        .item_selector(".menuItem");
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &options);

    for position in [100, 300, 500, 700, 900] {
        stickup.tick(&mut page.doc, position);
        stickup.remeasure(&mut page.doc);
        assert!(stickup.highlight_enabled());
    }
    stickup.tick(&mut page.doc, 1100);
    assert!(!stickup.highlight_enabled());
    assert_eq!(stickup.diagnostics().len(), 1);
}

#[test]
fn test_item_count_mismatch_highlights_common_prefix() {
    let mut page = page(2500, &[("a", 0, 1000), ("b", 1000, 1000), ("c", 2000, 1000)]);
    let options = StickUpOptions::new()
        .parts(["a", "b"])
        .item_selector(".menuItem");
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &options);

    assert_eq!(
        stickup.diagnostics()[0].error,
        StickUpError::ItemCountMismatch {
            sections: 2,
            items: 3
        }
    );
    assert!(!stickup.diagnostics()[0].is_error());

    // Section c is not tracked, so its window never fires
    stickup.tick(&mut page.doc, 1000);
    assert_eq!(stickup.tick(&mut page.doc, 2000).active, Some(1));
    assert_eq!(stickup.registry().len(), 2);
}

// =========================================================================
// Re-measure, throttle, JSON options
// =========================================================================

#[test]
fn test_remeasure_picks_up_reflow() {
    let mut page = page(500, &[("a", 600, 500), ("b", 1100, 500)]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &spy_options());

    assert_eq!(stickup.tick(&mut page.doc, 600).active, Some(0));
    assert!(stickup.is_stuck());

    // Reflow: cached geometry is still used until remeasured
    let b = page.doc.element_by_id("b").unwrap();
    page.doc.set_geometry(b, 2000, 500);
    page.doc.set_geometry(page.menu, 800, 50);
    assert_eq!(stickup.tick(&mut page.doc, 1100).active, Some(1));
    assert_eq!(stickup.menu_geometry().natural_top, 500);

    stickup.remeasure(&mut page.doc);
    assert_eq!(stickup.registry().cached(1), None);
    assert_eq!(stickup.menu_geometry().natural_top, 800);
    assert!(stickup.is_stuck());
    assert_eq!(page.doc.style(page.menu, "position"), Some("fixed"));

    assert_eq!(stickup.tick(&mut page.doc, 1000).active, Some(0));
    assert_eq!(stickup.tick(&mut page.doc, 2000).active, Some(1));
    assert_eq!(stickup.registry().cached(1).map(|g| g.offset_top), Some(2000));
}

#[test]
fn test_remeasure_reevaluates_sticky_state() {
    let mut page = page(500, &[]);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &StickUpOptions::default());
    assert!(stickup.tick(&mut page.doc, 600).sticky.is_stuck());

    // Content above the menu grew: at 600 the menu now sits below the threshold
    page.doc.set_geometry(page.menu, 900, 50);
    stickup.remeasure(&mut page.doc);
    assert!(!stickup.is_stuck());
    assert!(!page.doc.has_class(&page.menu, "isStuck"));
    assert_eq!(page.doc.style(page.menu, "position"), Some("relative"));
    assert_eq!(page.doc.style(page.content, "margin-top"), Some("20px"));

    page.doc.set_geometry(page.menu, 100, 50);
    stickup.remeasure(&mut page.doc);
    assert!(stickup.is_stuck());
    assert_eq!(page.doc.style(page.menu, "position"), Some("fixed"));
}

/// [`MemoryDocument`] plus one stylesheet rule: elements carrying `class`
/// compute `margin-top` to `margin_top`
struct ClassRuleDocument {
    inner: MemoryDocument,
    class: &'static str,
    margin_top: &'static str,
}

impl Document for ClassRuleDocument {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.inner.query_all(selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.inner.element_by_id(id)
    }

    fn element_id(&self, node: &NodeId) -> Option<String> {
        self.inner.element_id(node)
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.inner.next_sibling(node)
    }

    fn offset_top(&self, node: &NodeId) -> i32 {
        self.inner.offset_top(node)
    }

    fn height(&self, node: &NodeId) -> i32 {
        self.inner.height(node)
    }

    fn computed_style(&self, node: &NodeId, property: &str) -> Option<String> {
        if property == "margin-top" && self.inner.has_class(node, self.class) {
            return Some(self.margin_top.to_string());
        }
        self.inner.computed_style(node, property)
    }

    fn scroll_top(&self) -> i32 {
        self.inner.scroll_top()
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        self.inner.add_class(node, class);
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.inner.remove_class(node, class);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.inner.has_class(node, class)
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        self.inner.set_style(node, property, value);
    }
}

#[test]
fn test_auto_top_margin_sees_menu_class_styles() {
    let page = page(500, &[]);
    let mut doc = ClassRuleDocument {
        inner: page.doc,
        class: "stuckMenu",
        margin_top: "35px",
    };
    let options = StickUpOptions::new().top_margin("auto");
    let mut stickup = StickUp::new(&mut doc, page.menu, &options);

    assert_eq!(stickup.config().top_margin, 35);
    assert!(!stickup.tick(&mut doc, 465).sticky.is_stuck());
    assert!(stickup.tick(&mut doc, 466).sticky.is_stuck());
}

#[test]
fn test_throttled_events_are_dropped() {
    let mut page = page(500, &[]);
    let options = StickUpOptions::new().throttle_ms(16.0);
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &options);

    assert!(stickup.on_scroll_at(&mut page.doc, 0.0).is_some());

    page.doc.set_scroll_top(600);
    assert_eq!(stickup.on_scroll_at(&mut page.doc, 5.0), None);
    assert!(!stickup.is_stuck());

    let tick = stickup.on_scroll_at(&mut page.doc, 16.0).unwrap();
    assert_eq!(tick.position, 600);
    assert!(tick.sticky.is_stuck());
}

#[test]
fn test_json_options_end_to_end() {
    let mut page = page(500, &[("intro", 0, 1000), ("usage", 1000, 1000)]);
    let options = StickUpOptions::from_json(
        r#"{
            "parts": ["intro", "usage"],
            "itemSelector": "nav li",
            "itemHover": "current",
            "topMargin": "auto",
            "stuckTop": 0,
            "stuckClass": "pinned"
        }"#,
    )
    .unwrap();
    let mut stickup = StickUp::new(&mut page.doc, page.menu, &options);
    assert!(stickup.diagnostics().is_empty());
    assert_eq!(stickup.config().top_margin, 12);

    page.doc.set_scroll_top(1000);
    let tick = stickup.on_scroll(&mut page.doc);
    assert_eq!(tick.active, Some(1));
    assert!(page.doc.has_class(&page.items[1], "current"));
    assert!(page.doc.has_class(&page.menu, "pinned"));
    assert!(!page.doc.has_class(&page.menu, "isStuck"));
    assert_eq!(page.doc.style(page.menu, "top"), Some("0px"));
}
