//! Section registry
//!
//! Maps each tracked section to its geometry. Geometry is measured the first
//! time a section is needed and cached until [`SectionRegistry::invalidate`]
//! is called; nothing observes layout on its own, so a host that reflows the
//! page must invalidate (or call `StickUp::remeasure`) to pick up new
//! offsets.

use crate::document::Document;
use crate::error::{Result, StickUpError};

/// Cached measurement of one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionGeometry {
    /// Distance from the top of the document, in pixels
    pub offset_top: i32,
    /// Height of the section, in pixels
    pub height: i32,
}

/// Registry of section ids and their lazily measured geometry
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    ids: Vec<String>,
    cache: Vec<Option<SectionGeometry>>,
}

impl SectionRegistry {
    /// Create a registry for the given ids, in document order
    pub fn new(ids: Vec<String>) -> Self {
        let cache = vec![None; ids.len()];
        Self { ids, cache }
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Cached geometry, without measuring
    pub fn cached(&self, index: usize) -> Option<SectionGeometry> {
        self.cache.get(index).copied().flatten()
    }

    /// Geometry of the section at `index`, measuring it on first use
    ///
    /// Fails with [`StickUpError::MissingSection`] if the id does not
    /// resolve to an element. Nothing is cached on failure.
    pub fn geometry<D: Document>(&mut self, index: usize, doc: &D) -> Result<SectionGeometry> {
        if let Some(geometry) = self.cached(index) {
            return Ok(geometry);
        }

        let Some(id) = self.ids.get(index) else {
            return Err(StickUpError::MissingSection {
                id: format!("<index {}>", index),
            });
        };
        let node = doc
            .element_by_id(id)
            .ok_or_else(|| StickUpError::MissingSection { id: id.clone() })?;

        let geometry = SectionGeometry {
            offset_top: doc.offset_top(&node),
            height: doc.height(&node),
        };
        tracing::trace!("measured section #{}: {:?}", id, geometry);

        self.cache[index] = Some(geometry);
        Ok(geometry)
    }

    /// Geometry of the first `count` sections, in order
    ///
    /// Stops at the first section that cannot be resolved.
    pub fn resolve<D: Document>(&mut self, count: usize, doc: &D) -> Result<Vec<SectionGeometry>> {
        (0..count.min(self.len()))
            .map(|index| self.geometry(index, doc))
            .collect()
    }

    /// Drop all cached geometry; the next lookup measures again
    pub fn invalidate(&mut self) {
        self.cache.iter_mut().for_each(|entry| *entry = None);
    }
}
