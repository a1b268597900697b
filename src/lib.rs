//! Slide rotation engine for embedding in a host page.
//!
//! The core is the slideshow state machine: which slide is current, how
//! navigation requests resolve, and how a transition fans out across the
//! image, carousel, title, and caption regions. Rendering is delegated to a
//! [`view::ViewAdapter`]; auto-advance runs on a per-instance timer, and a
//! [`registry::ShowRegistry`] supports page-wide pause/resume.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
mod scheduler;
pub mod regions {
    pub mod carousel;
    pub mod text;
}
pub mod view;

pub use catalog::{Catalog, ImageRecord};
pub use config::{Easing, SlideshowOptions};
pub use engine::{Regions, Slideshow};
pub use error::Error;
pub use registry::ShowRegistry;
