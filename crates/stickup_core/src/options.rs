//! User-facing options
//!
//! The shape mirrors the options object a page passes when enabling a
//! sticky menu, so it can be decoded straight from JSON:
//!
//! ```
//! use stickup_core::options::{StickUpOptions, TopMarginOption};
//!
//! let options = StickUpOptions::from_json(r#"{
//!     "parts": ["intro", "features", "pricing"],
//!     "itemSelector": ".menuItem",
//!     "itemHover": "active",
//!     "topMargin": "auto"
//! }"#).unwrap();
//!
//! assert_eq!(options.parts.as_ref().map(Vec::len), Some(3));
//! assert_eq!(options.top_margin, Some(TopMarginOption::Text("auto".into())));
//! ```

use serde::Deserialize;

use crate::error::Result;

/// Default class marking the managed menu element
pub const DEFAULT_MENU_CLASS: &str = "stuckMenu";

/// Default class marking the menu while it is stuck
pub const DEFAULT_STUCK_CLASS: &str = "isStuck";

/// Default class marking the active navigation item
pub const DEFAULT_ACTIVE_CLASS: &str = "active";

/// Default `top` applied to the menu while stuck, in pixels
pub const DEFAULT_STUCK_TOP: i32 = 60;

/// Raw `topMargin` value as supplied by the page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TopMarginOption {
    /// A bare number of pixels
    Number(f64),
    /// `"auto"`, a length like `"20px"`, or anything else (rejected later)
    Text(String),
}

impl From<i32> for TopMarginOption {
    fn from(value: i32) -> Self {
        TopMarginOption::Number(value as f64)
    }
}

impl From<&str> for TopMarginOption {
    fn from(value: &str) -> Self {
        TopMarginOption::Text(value.to_string())
    }
}

/// Options for enabling a sticky menu
///
/// Everything is optional. With no section source (`parts` or `selector`)
/// and no `itemSelector`, the menu only sticks and nothing is highlighted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickUpOptions {
    /// Explicit ordered list of section ids; wins over `selector`
    pub parts: Option<Vec<String>>,
    /// Selector whose matches' ids become the section list
    pub selector: Option<String>,
    /// Selector for the navigation items, matched 1:1 by index with sections
    pub item_selector: Option<String>,
    /// Class applied to the active navigation item
    pub item_hover: Option<String>,
    /// Offset added to the scroll position when deciding to stick
    pub top_margin: Option<TopMarginOption>,
    /// `top` applied to the menu while stuck, in pixels
    pub stuck_top: Option<i32>,
    /// Class applied to the menu at init
    pub menu_class: Option<String>,
    /// Class toggled on the menu while stuck
    pub stuck_class: Option<String>,
    /// Minimum milliseconds between handled scroll events
    pub throttle_ms: Option<f64>,
}

impl StickUpOptions {
    /// Create empty options (sticky-only behavior)
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode options from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn parts<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parts = Some(parts.into_iter().map(Into::into).collect());
        self
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn item_selector(mut self, selector: impl Into<String>) -> Self {
        self.item_selector = Some(selector.into());
        self
    }

    pub fn item_hover(mut self, class: impl Into<String>) -> Self {
        self.item_hover = Some(class.into());
        self
    }

    pub fn top_margin(mut self, value: impl Into<TopMarginOption>) -> Self {
        self.top_margin = Some(value.into());
        self
    }

    pub fn stuck_top(mut self, top: i32) -> Self {
        self.stuck_top = Some(top);
        self
    }

    pub fn menu_class(mut self, class: impl Into<String>) -> Self {
        self.menu_class = Some(class.into());
        self
    }

    pub fn stuck_class(mut self, class: impl Into<String>) -> Self {
        self.stuck_class = Some(class.into());
        self
    }

    pub fn throttle_ms(mut self, ms: f64) -> Self {
        self.throttle_ms = Some(ms);
        self
    }

    /// Whether any highlight-related option was given
    pub(crate) fn wants_highlight(&self) -> bool {
        self.parts.is_some() || self.selector.is_some() || self.item_selector.is_some()
    }
}
