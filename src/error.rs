use thiserror::Error;

/// Library error type for slideshow construction and show-file loading.
#[derive(Debug, Error)]
pub enum Error {
    /// Construction asked for an automatic first render with no slides.
    #[error("slideshow catalog is empty")]
    EmptyCatalog,

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde show-file error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
