use std::sync::Arc;
use std::time::Duration;

use crate::catalog::ImageRecord;
use crate::config::Easing;
use crate::view::{RegionHandle, ViewAdapter};

/// Which record field a text region renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Title,
    Caption,
}

/// Title/caption synchronizer: fade out, swap text once the fade completes,
/// fade back in.
pub struct TextSync {
    region: RegionHandle,
    source: TextSource,
    easing: Easing,
    duration: Duration,
    view: Arc<dyn ViewAdapter>,
}

impl TextSync {
    pub(crate) fn new(
        region: RegionHandle,
        source: TextSource,
        view: Arc<dyn ViewAdapter>,
        easing: Easing,
        duration: Duration,
    ) -> Self {
        Self {
            region,
            source,
            easing,
            duration,
            view,
        }
    }

    /// Text is always refreshed, even to empty, so a record without the
    /// field never shows the previous record's text.
    pub(crate) fn sync(&self, record: &ImageRecord) {
        let text = match self.source {
            TextSource::Title => record.title.clone(),
            TextSource::Caption => record.caption.clone(),
        }
        .unwrap_or_default();
        let view = Arc::clone(&self.view);
        let (region, easing, duration) = (self.region, self.easing, self.duration);
        self.view.fade_to(
            region,
            0.0,
            easing,
            duration,
            Box::new(move || {
                view.set_text(region, &text);
                view.fade_to(region, 1.0, easing, duration, Box::new(|| {}));
            }),
        );
    }
}
