//! Active navigation item selection
//!
//! Two rules, chosen by scroll direction:
//!
//! - **Down**: a section becomes active while the scroll offset is inside a
//!   ±50px window around its top. Outside every window the previous item
//!   stays active.
//! - **Up**: a section becomes active once the offset passes 40% of its
//!   height above its top. Within 50px of the page top the first item is
//!   active no matter which sections matched.
//!
//! Sections are visited in ascending index order and a later match always
//! overwrites an earlier one in the same tick, so the highest matching
//! index wins. The top floor is applied after the pass.

use crate::document::Document;
use crate::registry::SectionGeometry;
use crate::scroll::ScrollDirection;

/// Half-width of the activation window used while scrolling down
pub const DOWN_WINDOW_PX: i32 = 50;

/// Fraction of a section's height above its top that activates it while scrolling up
pub const UP_LEAD_FRACTION: f64 = 0.4;

/// Offsets below this keep the first item active while scrolling up
pub const TOP_FLOOR_PX: i32 = 50;

fn in_down_window(position: i32, section: &SectionGeometry) -> bool {
    section.offset_top - DOWN_WINDOW_PX < position && position < section.offset_top + DOWN_WINDOW_PX
}

fn past_up_threshold(position: i32, section: &SectionGeometry) -> bool {
    let test_view = f64::from(section.offset_top) - UP_LEAD_FRACTION * f64::from(section.height);
    f64::from(position) > test_view
}

/// Pick the active item index for this tick
///
/// `current` is the item active before the tick and is kept when no rule
/// fires.
pub fn select_active(
    direction: ScrollDirection,
    position: i32,
    sections: &[SectionGeometry],
    current: usize,
) -> usize {
    let mut active = current;
    for (index, section) in sections.iter().enumerate() {
        match direction {
            ScrollDirection::Down => {
                if in_down_window(position, section) {
                    active = index;
                }
            }
            ScrollDirection::Up => {
                if past_up_threshold(position, section) {
                    active = index;
                }
            }
        }
    }
    if direction == ScrollDirection::Up && position < TOP_FLOOR_PX {
        active = 0;
    }
    active
}

/// Put the active marker on exactly one item
///
/// Clears `class` from every item, then applies it to `items[active]`.
pub fn mark_active<D: Document>(doc: &mut D, items: &[D::Node], active: usize, class: &str) {
    for item in items {
        doc.remove_class(item, class);
    }
    if let Some(item) = items.get(active) {
        doc.add_class(item, class);
    }
}
