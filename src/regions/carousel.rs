use std::sync::{Arc, Weak};

use crate::catalog::Catalog;
use crate::engine::Slideshow;
use crate::view::{ElementHandle, RegionHandle, ViewAdapter};

/// Thumbnail strip synchronizer.
///
/// Owns the side table mapping catalog index to entry element, so no data
/// ever rides on the view objects themselves. Click triggers navigate the
/// owning engine unless the clicked entry is already active.
pub struct CarouselSync {
    region: RegionHandle,
    active_class: String,
    entries: Vec<ElementHandle>,
    view: Arc<dyn ViewAdapter>,
}

impl CarouselSync {
    pub(crate) fn new(
        region: RegionHandle,
        catalog: &Catalog,
        view: Arc<dyn ViewAdapter>,
        active_class: &str,
        show: Weak<Slideshow>,
    ) -> Self {
        // Clear whatever the host page left in the strip before populating.
        view.remove_all_children(region, Box::new(|| {}));
        let mut entries = Vec::with_capacity(catalog.len());
        for (index, record) in catalog.iter().enumerate() {
            let show = show.clone();
            let entry = view.create_carousel_entry(
                record,
                index,
                Box::new(move || {
                    if let Some(show) = show.upgrade() {
                        show.carousel_navigate(index);
                    }
                }),
            );
            view.insert_element(region, entry);
            entries.push(entry);
        }
        Self {
            region,
            active_class: active_class.to_string(),
            entries,
            view,
        }
    }

    /// Clear the active marker everywhere, then mark the entry at `index`.
    pub(crate) fn sync_active(&self, index: usize) {
        self.view
            .mark_active(&self.entries, Some(index), &self.active_class);
    }

    /// Index of the entry currently carrying the active marker, if any.
    /// Reads the view, so entries marked by the host page count too.
    pub fn active_index(&self) -> Option<usize> {
        self.view.active_entry(&self.entries, &self.active_class)
    }

    pub fn entries(&self) -> &[ElementHandle] {
        &self.entries
    }

    pub fn region(&self) -> RegionHandle {
        self.region
    }
}
