use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use crate::engine::Slideshow;

/// Process-wide set of live slideshows, for page-level pause/resume (e.g.
/// wired to tab visibility by the embedding application).
///
/// Owned by the embedder and passed into each engine at construction, so
/// tests can use isolated registries. Entries are non-owning and append-only;
/// dropped engines are skipped when iterating.
#[derive(Default)]
pub struct ShowRegistry {
    shows: Mutex<Vec<Weak<Slideshow>>>,
}

impl ShowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, show: &Arc<Slideshow>) {
        self.shows.lock().push(Arc::downgrade(show));
    }

    /// Pause every live show, in registration order. A no-op in one show
    /// never blocks the rest.
    pub fn pause_all(&self) {
        let live = self.live();
        debug!(count = live.len(), "pausing all shows");
        for show in live {
            show.pause_show();
        }
    }

    /// Resume every live show that was ever started.
    pub fn resume_all(&self) {
        let live = self.live();
        debug!(count = live.len(), "resuming all shows");
        for show in live {
            show.resume_show();
        }
    }

    /// Number of registered shows still alive.
    pub fn len(&self) -> usize {
        self.shows
            .lock()
            .iter()
            .filter(|show| show.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live(&self) -> Vec<Arc<Slideshow>> {
        self.shows.lock().iter().filter_map(Weak::upgrade).collect()
    }
}
