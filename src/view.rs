//! The seam between the engine and whatever actually renders.
//!
//! The core never touches a DOM: it asks a [`ViewAdapter`] to fade a region,
//! insert an element, or swap text, and learns about asynchronous completion
//! through callbacks. Handles are opaque; only the adapter that minted them
//! can interpret them.

use std::time::Duration;

use crate::catalog::ImageRecord;
use crate::config::Easing;

pub mod headless;

/// Opaque handle to a named visual area (image, carousel, title, caption).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionHandle(pub u64);

/// Opaque handle to a single element inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Continuation invoked once an asynchronous view operation settles.
pub type Completion = Box<dyn FnOnce() + Send>;

/// Trigger bound to a carousel entry.
pub type ClickHandler = Box<dyn Fn() + Send + Sync>;

/// Rendering capability consumed by the engine and region synchronizers.
///
/// Fades report completion through their callback; a zero duration may
/// complete inline. `remove_all_children` must invoke its callback exactly
/// once, synchronously when the region is already empty. Image elements are
/// created fully transparent so the engine controls the fade-in.
pub trait ViewAdapter: Send + Sync {
    fn fade_to(
        &self,
        region: RegionHandle,
        opacity: f32,
        easing: Easing,
        duration: Duration,
        on_complete: Completion,
    );

    /// Immediate opacity set, no animation.
    fn set_opacity(&self, region: RegionHandle, opacity: f32);

    fn insert_element(&self, region: RegionHandle, element: ElementHandle);

    fn remove_all_children(&self, region: RegionHandle, on_complete: Completion);

    fn has_children(&self, region: RegionHandle) -> bool;

    fn set_text(&self, region: RegionHandle, text: &str);

    /// Create an image element, optionally wrapped in a link.
    fn create_image_element(&self, url: &str, alt: &str, link: Option<&str>) -> ElementHandle;

    /// Create a thumbnail entry with a bound click trigger.
    fn create_carousel_entry(
        &self,
        record: &ImageRecord,
        index: usize,
        on_click: ClickHandler,
    ) -> ElementHandle;

    /// Clear `class` from every entry, then set it on `entries[active]`.
    fn mark_active(&self, entries: &[ElementHandle], active: Option<usize>, class: &str);

    /// Position of the entry currently carrying `class`, if any.
    fn active_entry(&self, entries: &[ElementHandle], class: &str) -> Option<usize>;

    /// Best-effort, fire-and-forget image preload.
    fn preload_image(&self, url: &str);
}
