//! StickUp Core
//!
//! Scroll-driven state machine for a sticky navigation menu:
//!
//! - **Sticky toggle**: pins the menu to the viewport once it is scrolled
//!   past its natural position, and pushes the following element down so
//!   the page does not jump
//! - **Scroll spy**: marks the navigation item whose section is in view,
//!   using direction-dependent rules
//! - **Document abstraction**: everything talks to the page through the
//!   [`Document`] trait, so the same controller runs in a browser or over
//!   the in-memory [`MemoryDocument`]
//!
//! # Example
//!
//! ```rust
//! use stickup_core::prelude::*;
//!
//! let mut doc = MemoryDocument::new();
//! let menu = doc.append(
//!     ElementSpec::new("nav")
//!         .geometry(500, 50)
//!         .computed("margin-bottom", "10px"),
//! );
//! let content = doc.append(ElementSpec::new("main").computed("margin-top", "0px"));
//!
//! let mut stickup = StickUp::new(&mut doc, menu, &StickUpOptions::default());
//!
//! stickup.tick(&mut doc, 499);
//! assert!(!stickup.is_stuck());
//!
//! stickup.tick(&mut doc, 501);
//! assert!(stickup.is_stuck());
//! assert_eq!(doc.style(content, "margin-top"), Some("60px"));
//! ```

pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod highlight;
pub mod length;
pub mod options;
pub mod registry;
pub mod scroll;
pub mod selector;
pub mod sticky;
pub mod throttle;

#[cfg(test)]
mod tests;

pub use config::Configuration;
pub use controller::{StickUp, Tick};
pub use document::{Document, ElementSpec, MemoryDocument, NodeId};
pub use error::{Diagnostic, Result, Severity, StickUpError};
pub use options::{StickUpOptions, TopMarginOption};
pub use registry::{SectionGeometry, SectionRegistry};
pub use scroll::{ScrollDirection, ScrollState};
pub use sticky::{MenuGeometry, StickyState};
pub use throttle::ScrollThrottle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::controller::{StickUp, Tick};
    pub use crate::document::{Document, ElementSpec, MemoryDocument, NodeId};
    pub use crate::error::{Diagnostic, Severity, StickUpError};
    pub use crate::options::{StickUpOptions, TopMarginOption};
    pub use crate::scroll::ScrollDirection;
    pub use crate::sticky::StickyState;
}
