//! In-memory view adapter.
//!
//! Tracks regions, elements, classes, and opacity instead of rendering, and
//! logs every operation via `tracing`. Zero-duration fades complete inline;
//! timed fades complete after a `tokio::time::sleep`, so a runtime must be
//! running. Used by the demo binary and by the integration tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::catalog::ImageRecord;
use crate::config::Easing;

use super::{ClickHandler, Completion, ElementHandle, RegionHandle, ViewAdapter};

#[derive(Debug, Default)]
struct RegionState {
    label: String,
    opacity: f32,
    text: String,
    children: Vec<ElementHandle>,
    inserts: u64,
}

#[derive(Default)]
struct ElementState {
    image_url: Option<String>,
    alt: String,
    link: Option<String>,
    classes: Vec<String>,
    on_click: Option<Arc<dyn Fn() + Send + Sync>>,
}

#[derive(Default)]
struct Inner {
    regions: HashMap<RegionHandle, RegionState>,
    elements: HashMap<ElementHandle, ElementState>,
    preloaded: Vec<String>,
}

impl Inner {
    fn region_mut(&mut self, region: RegionHandle) -> &mut RegionState {
        self.regions.entry(region).or_default()
    }

    fn label(&self, region: RegionHandle) -> String {
        self.regions
            .get(&region)
            .map(|r| r.label.clone())
            .unwrap_or_else(|| format!("region-{}", region.0))
    }
}

pub struct HeadlessView {
    inner: Arc<Mutex<Inner>>,
    next_id: AtomicU64,
}

impl HeadlessView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            next_id: AtomicU64::new(1),
        })
    }

    fn mint(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Declare a named region and return its handle.
    pub fn region(&self, label: &str) -> RegionHandle {
        let handle = RegionHandle(self.mint());
        self.inner.lock().regions.insert(
            handle,
            RegionState {
                label: label.to_string(),
                opacity: 1.0,
                ..RegionState::default()
            },
        );
        handle
    }

    /// Fire the click trigger bound to an element, as a user would.
    pub fn click(&self, element: ElementHandle) {
        let handler = self
            .inner
            .lock()
            .elements
            .get(&element)
            .and_then(|el| el.on_click.clone());
        if let Some(handler) = handler {
            handler();
        }
    }

    /// Attach a class out-of-band, as a server-rendered page might.
    pub fn add_class(&self, element: ElementHandle, class: &str) {
        if let Some(el) = self.inner.lock().elements.get_mut(&element) {
            el.classes.push(class.to_string());
        }
    }

    /// URL of the first image element currently in the region.
    pub fn displayed_image(&self, region: RegionHandle) -> Option<String> {
        let inner = self.inner.lock();
        let state = inner.regions.get(&region)?;
        state
            .children
            .iter()
            .filter_map(|child| inner.elements.get(child))
            .find_map(|el| el.image_url.clone())
    }

    /// Link wrapping the first image element in the region, if any.
    pub fn displayed_link(&self, region: RegionHandle) -> Option<String> {
        let inner = self.inner.lock();
        let state = inner.regions.get(&region)?;
        state
            .children
            .iter()
            .filter_map(|child| inner.elements.get(child))
            .find_map(|el| el.link.clone())
    }

    pub fn text(&self, region: RegionHandle) -> String {
        self.inner
            .lock()
            .regions
            .get(&region)
            .map(|r| r.text.clone())
            .unwrap_or_default()
    }

    pub fn opacity(&self, region: RegionHandle) -> f32 {
        self.inner
            .lock()
            .regions
            .get(&region)
            .map(|r| r.opacity)
            .unwrap_or_default()
    }

    /// Total elements ever inserted into the region.
    pub fn insert_count(&self, region: RegionHandle) -> u64 {
        self.inner
            .lock()
            .regions
            .get(&region)
            .map(|r| r.inserts)
            .unwrap_or_default()
    }

    pub fn preloaded(&self) -> Vec<String> {
        self.inner.lock().preloaded.clone()
    }

    /// How many of `entries` carry `class`.
    pub fn class_count(&self, entries: &[ElementHandle], class: &str) -> usize {
        let inner = self.inner.lock();
        entries
            .iter()
            .filter_map(|entry| inner.elements.get(entry))
            .filter(|el| el.classes.iter().any(|c| c == class))
            .count()
    }
}

impl ViewAdapter for HeadlessView {
    fn fade_to(
        &self,
        region: RegionHandle,
        opacity: f32,
        easing: Easing,
        duration: Duration,
        on_complete: Completion,
    ) {
        {
            let inner = self.inner.lock();
            debug!(region = %inner.label(region), opacity, %easing, ?duration, "fade");
        }
        if duration.is_zero() {
            self.inner.lock().region_mut(region).opacity = opacity;
            on_complete();
            return;
        }
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            sleep(duration).await;
            inner.lock().region_mut(region).opacity = opacity;
            on_complete();
        });
    }

    fn set_opacity(&self, region: RegionHandle, opacity: f32) {
        self.inner.lock().region_mut(region).opacity = opacity;
    }

    fn insert_element(&self, region: RegionHandle, element: ElementHandle) {
        let mut inner = self.inner.lock();
        debug!(region = %inner.label(region), ?element, "insert");
        let state = inner.region_mut(region);
        state.children.push(element);
        state.inserts += 1;
    }

    fn remove_all_children(&self, region: RegionHandle, on_complete: Completion) {
        let removed = {
            let mut inner = self.inner.lock();
            let removed = std::mem::take(&mut inner.region_mut(region).children);
            for child in &removed {
                inner.elements.remove(child);
            }
            removed.len()
        };
        debug!(?region, removed, "cleared region");
        on_complete();
    }

    fn has_children(&self, region: RegionHandle) -> bool {
        self.inner
            .lock()
            .regions
            .get(&region)
            .is_some_and(|r| !r.children.is_empty())
    }

    fn set_text(&self, region: RegionHandle, text: &str) {
        let mut inner = self.inner.lock();
        debug!(region = %inner.label(region), text, "set text");
        inner.region_mut(region).text = text.to_string();
    }

    fn create_image_element(&self, url: &str, alt: &str, link: Option<&str>) -> ElementHandle {
        let handle = ElementHandle(self.mint());
        debug!(url, alt, ?link, "image element");
        self.inner.lock().elements.insert(
            handle,
            ElementState {
                image_url: Some(url.to_string()),
                alt: alt.to_string(),
                link: link.map(str::to_string),
                ..ElementState::default()
            },
        );
        handle
    }

    fn create_carousel_entry(
        &self,
        record: &ImageRecord,
        index: usize,
        on_click: ClickHandler,
    ) -> ElementHandle {
        let handle = ElementHandle(self.mint());
        debug!(index, thumbnail = ?record.thumbnail, "carousel entry");
        self.inner.lock().elements.insert(
            handle,
            ElementState {
                image_url: record.thumbnail.clone(),
                alt: record
                    .title
                    .clone()
                    .unwrap_or_else(|| "Thumbnail".to_string()),
                link: None,
                classes: Vec::new(),
                on_click: Some(Arc::from(on_click)),
            },
        );
        handle
    }

    fn mark_active(&self, entries: &[ElementHandle], active: Option<usize>, class: &str) {
        let mut inner = self.inner.lock();
        for entry in entries {
            if let Some(el) = inner.elements.get_mut(entry) {
                el.classes.retain(|c| c != class);
            }
        }
        if let Some(index) = active
            && let Some(entry) = entries.get(index)
            && let Some(el) = inner.elements.get_mut(entry)
        {
            el.classes.push(class.to_string());
        }
    }

    fn active_entry(&self, entries: &[ElementHandle], class: &str) -> Option<usize> {
        let inner = self.inner.lock();
        entries.iter().position(|entry| {
            inner
                .elements
                .get(entry)
                .is_some_and(|el| el.classes.iter().any(|c| c == class))
        })
    }

    fn preload_image(&self, url: &str) {
        debug!(url, "preload");
        self.inner.lock().preloaded.push(url.to_string());
    }
}
