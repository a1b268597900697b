use serde::Deserialize;

/// One slide, as supplied by the caller.
///
/// Identity is positional: the engine addresses records by catalog index, so
/// duplicate-content entries remain distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageRecord {
    pub image: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl ImageRecord {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            thumbnail: None,
            title: None,
            caption: None,
            link: None,
        }
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }
}

/// Ordered slide list backing one slideshow instance. Fixed for the lifetime
/// of the engine; the engine only ever reads it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<ImageRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ImageRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Successor index, wrapping at the end of the catalog.
    ///
    /// Must not be called on an empty catalog.
    pub fn next(&self, index: usize) -> usize {
        debug_assert!(!self.records.is_empty());
        (index + 1) % self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter()
    }
}
