//! StickUp error and diagnostic types
//!
//! Nothing in this crate is fatal to the surrounding page. Initialization
//! collects problems into [`Diagnostic`] values and disables only the
//! affected behavior; the scroll handler logs and degrades the same way.

use std::fmt;

use thiserror::Error;

/// Errors produced while configuring or running a sticky menu
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StickUpError {
    /// Neither `parts` nor `selector` produced a single section id
    #[error("no sections resolved: `parts` is empty and `selector` matched nothing")]
    NoSections,

    /// Sections were configured but there is no way to find the navigation items
    #[error("sections configured without an `itemSelector`")]
    MissingItemSelector,

    /// `topMargin` could not be interpreted as a pixel value
    #[error("invalid topMargin {value:?}, falling back to 0")]
    InvalidTopMargin { value: String },

    /// A section id does not resolve to any element in the document
    #[error("section #{id} not found in document")]
    MissingSection { id: String },

    /// The navigation item count differs from the section count
    #[error("{sections} sections but {items} navigation items; highlighting the first {}", highlighted(.sections, .items))]
    ItemCountMismatch { sections: usize, items: usize },

    /// An element matched by `selector` carries no id
    #[error("element {index} matched by selector has no id, skipped")]
    EmptySectionId { index: usize },

    /// Options could not be decoded
    #[error("invalid options: {0}")]
    Options(String),
}

impl From<serde_json::Error> for StickUpError {
    fn from(err: serde_json::Error) -> Self {
        StickUpError::Options(err.to_string())
    }
}

fn highlighted(sections: &usize, items: &usize) -> usize {
    (*sections).min(*items)
}

/// Result type for StickUp operations
pub type Result<T> = std::result::Result<T, StickUpError>;

/// Severity level for a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A behavior was disabled
    Error,
    /// A fallback was used, behavior continues
    Warning,
}

/// A non-fatal problem reported during initialization or at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub error: StickUpError,
}

impl Diagnostic {
    pub fn error(error: StickUpError) -> Self {
        tracing::error!("stickup: {}", error);
        Self {
            severity: Severity::Error,
            error,
        }
    }

    pub fn warning(error: StickUpError) -> Self {
        tracing::warn!("stickup: {}", error);
        Self {
            severity: Severity::Warning,
            error,
        }
    }

    /// Check if this diagnostic disabled a behavior
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.error)
    }
}
