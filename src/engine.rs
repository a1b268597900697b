//! The slideshow state machine.
//!
//! Owns the current slide, sequences transitions across the image region and
//! the auxiliary synchronizers, and coordinates the auto-advance timer with
//! manual navigation. All waits are callback-based; no method blocks.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::catalog::{Catalog, ImageRecord};
use crate::config::SlideshowOptions;
use crate::error::Error;
use crate::regions::carousel::CarouselSync;
use crate::regions::text::{TextSource, TextSync};
use crate::registry::ShowRegistry;
use crate::scheduler::AutoAdvance;
use crate::view::{Completion, ElementHandle, RegionHandle, ViewAdapter};

/// Region handles wired to one slideshow instance. Only the image region is
/// required; the rest enable their synchronizers when present.
#[derive(Debug, Clone, Copy)]
pub struct Regions {
    pub image: RegionHandle,
    pub carousel: Option<RegionHandle>,
    pub title: Option<RegionHandle>,
    pub caption: Option<RegionHandle>,
}

#[derive(Debug, Default)]
struct EngineState {
    current_index: Option<usize>,
    /// Epoch of the most recently requested transition.
    issued: u64,
    /// Highest epoch whose teardown continuation has run.
    settled: u64,
}

/// One slideshow instance.
///
/// Construct within a tokio runtime: the scheduler and any timed fades
/// spawn tasks. The catalog is only ever read; the registry holds a
/// non-owning reference for page-wide pause/resume.
pub struct Slideshow {
    catalog: Arc<Catalog>,
    options: SlideshowOptions,
    regions: Regions,
    view: Arc<dyn ViewAdapter>,
    state: Mutex<EngineState>,
    auto: Mutex<AutoAdvance>,
    carousel: Option<CarouselSync>,
    title: Option<TextSync>,
    caption: Option<TextSync>,
}

impl Slideshow {
    pub fn new(
        catalog: Arc<Catalog>,
        regions: Regions,
        options: SlideshowOptions,
        view: Arc<dyn ViewAdapter>,
        registry: &ShowRegistry,
    ) -> Result<Arc<Self>, Error> {
        if options.auto_show_first_slide && catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        let show = Arc::new_cyclic(|weak| {
            let carousel = regions.carousel.map(|region| {
                CarouselSync::new(
                    region,
                    &catalog,
                    Arc::clone(&view),
                    &options.carousel_active_class,
                    weak.clone(),
                )
            });
            let title = regions.title.map(|region| {
                TextSync::new(
                    region,
                    TextSource::Title,
                    Arc::clone(&view),
                    options.transition,
                    options.transition_duration,
                )
            });
            let caption = regions.caption.map(|region| {
                TextSync::new(
                    region,
                    TextSource::Caption,
                    Arc::clone(&view),
                    options.transition,
                    options.transition_duration,
                )
            });
            Slideshow {
                catalog,
                options,
                regions,
                view,
                state: Mutex::new(EngineState::default()),
                auto: Mutex::new(AutoAdvance::new()),
                carousel,
                title,
                caption,
            }
        });
        if show.options.auto_show_first_slide {
            if !show.options.keep_initial_slide {
                show.show_image_with(0, false, false);
            }
            if show.options.start_show {
                show.start_show();
            }
        }
        registry.register(&show);
        for record in show.catalog.iter() {
            show.view.preload_image(&record.image);
        }
        Ok(show)
    }

    /// Navigate to the slide at `index`. Returns false when the index is out
    /// of range (a caller bug, tolerated rather than escalated).
    pub fn show_image(self: &Arc<Self>, index: usize, animate: bool) -> bool {
        self.show_image_with(index, animate, true)
    }

    fn show_image_with(self: &Arc<Self>, index: usize, animate: bool, reset_timer: bool) -> bool {
        let Some(record) = self.catalog.get(index) else {
            warn!(index, "navigation to out-of-range slide ignored");
            return false;
        };
        let epoch = {
            let mut state = self.state.lock();
            state.issued += 1;
            state.issued
        };
        debug!(index, animate, "showing slide");
        let alt = record
            .title
            .clone()
            .unwrap_or_else(|| "Slideshow Image".to_string());
        let element = self
            .view
            .create_image_element(&record.image, &alt, record.link.as_deref());
        let this = Arc::clone(self);
        self.teardown_image_region(Box::new(move || {
            this.complete_transition(epoch, index, element, animate);
        }));
        // The auxiliary regions are issued synchronously; their own fades
        // settle on their own time.
        if let Some(carousel) = &self.carousel {
            carousel.sync_active(index);
        }
        if let Some(title) = &self.title {
            title.sync(record);
        }
        if let Some(caption) = &self.caption {
            caption.sync(record);
        }
        if reset_timer {
            self.reset_timer_if_running();
        }
        true
    }

    /// Fade out and clear the image region, then run `on_done`. An already
    /// empty region is cleared synchronously, skipping the fade.
    fn teardown_image_region(&self, on_done: Completion) {
        let region = self.regions.image;
        if !self.view.has_children(region) {
            self.view.remove_all_children(region, on_done);
            return;
        }
        let view = Arc::clone(&self.view);
        self.view.fade_to(
            region,
            0.0,
            self.options.transition,
            self.options.transition_duration,
            Box::new(move || {
                view.remove_all_children(region, on_done);
            }),
        );
    }

    /// Insert step of a transition. A continuation whose epoch has been
    /// superseded by a later `show_image` drops its element instead of
    /// inserting, so `current_index` always reflects the latest request.
    fn complete_transition(
        self: Arc<Self>,
        epoch: u64,
        index: usize,
        element: ElementHandle,
        animate: bool,
    ) {
        {
            let mut state = self.state.lock();
            state.settled = state.settled.max(epoch);
            if epoch != state.issued {
                debug!(index, "transition superseded before insert");
                return;
            }
            state.current_index = Some(index);
        }
        self.view.insert_element(self.regions.image, element);
        if animate {
            self.view.fade_to(
                self.regions.image,
                1.0,
                self.options.transition,
                self.options.transition_duration,
                Box::new(|| {}),
            );
        } else {
            self.view.set_opacity(self.regions.image, 1.0);
        }
    }

    /// Index of the current slide. Falls back to the carousel's marked
    /// entry before the first engine-driven render.
    pub fn current_index(&self) -> Option<usize> {
        self.state.lock().current_index.or_else(|| {
            self.carousel
                .as_ref()
                .and_then(CarouselSync::active_index)
        })
    }

    pub fn current_record(&self) -> Option<&ImageRecord> {
        self.current_index().and_then(|index| self.catalog.get(index))
    }

    /// True while a requested transition has not yet inserted or been
    /// superseded.
    pub fn transition_in_flight(&self) -> bool {
        let state = self.state.lock();
        state.settled != state.issued
    }

    /// Advance to the next slide in catalog order, wrapping at the end.
    /// Returns false on an empty catalog.
    pub fn show_next_image(self: &Arc<Self>) -> bool {
        self.show_next_with(true)
    }

    fn show_next_with(self: &Arc<Self>, reset_timer: bool) -> bool {
        if self.catalog.is_empty() {
            return false;
        }
        let next = match self.current_index() {
            Some(current) => self.skip_repeat(current, self.catalog.next(current)),
            None => 0,
        };
        self.show_image_with(next, true, reset_timer)
    }

    /// Avoid showing the same rendered image twice in a row when adjacent
    /// catalog entries share an image URL.
    fn skip_repeat(&self, current: usize, next: usize) -> usize {
        if self.catalog.len() > 1
            && next != current
            && let (Some(cur), Some(nxt)) = (self.catalog.get(current), self.catalog.get(next))
            && cur.image == nxt.image
        {
            return self.catalog.next(next);
        }
        next
    }

    fn tick_fn(self: &Arc<Self>) -> impl Fn() + Send + 'static {
        let weak = Arc::downgrade(self);
        move || {
            if let Some(show) = weak.upgrade() {
                show.show_next_with(false);
            }
        }
    }

    /// Start (or restart) the auto-advance scheduler.
    pub fn start_show(self: &Arc<Self>) {
        let tick = self.tick_fn();
        self.auto.lock().start(self.options.slide_duration, tick);
    }

    /// Pause a running show. No-op when idle or already paused.
    pub fn pause_show(&self) {
        self.auto.lock().pause();
    }

    /// Resume a paused show for a full period. No-op unless the show was
    /// started at some point.
    pub fn resume_show(self: &Arc<Self>) {
        let tick = self.tick_fn();
        self.auto.lock().resume(self.options.slide_duration, tick);
    }

    fn reset_timer_if_running(self: &Arc<Self>) {
        let tick = self.tick_fn();
        self.auto
            .lock()
            .restart_if_running(self.options.slide_duration, tick);
    }

    pub fn auto_advance_active(&self) -> bool {
        self.auto.lock().is_running()
    }

    pub(crate) fn carousel_navigate(self: &Arc<Self>, index: usize) {
        // Clicking the already-active entry must not retrigger a transition.
        if self
            .carousel
            .as_ref()
            .and_then(CarouselSync::active_index)
            == Some(index)
        {
            return;
        }
        self.show_image(index, true);
    }

    pub fn carousel(&self) -> Option<&CarouselSync> {
        self.carousel.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
