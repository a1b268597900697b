use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::ensure;
use serde::Deserialize;
use serde::de::{self, Deserializer};

use crate::catalog::ImageRecord;
use crate::error::Error;

/// Engine options. All fields have defaults, so `{}` is a valid document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SlideshowOptions {
    /// Marker class used to find and set the active carousel entry.
    #[serde(default = "SlideshowOptions::default_carousel_active_class")]
    pub carousel_active_class: String,
    /// Render the first slide immediately on construction.
    #[serde(default = "SlideshowOptions::default_auto_show_first_slide")]
    pub auto_show_first_slide: bool,
    /// Easing curve handed to the view adapter for every fade.
    #[serde(default)]
    pub transition: Easing,
    #[serde(
        default = "SlideshowOptions::default_transition_duration",
        with = "humantime_serde"
    )]
    pub transition_duration: Duration,
    /// Auto-advance period.
    #[serde(
        default = "SlideshowOptions::default_slide_duration",
        with = "humantime_serde"
    )]
    pub slide_duration: Duration,
    /// Suppress the automatic first render, leaving whatever the host page
    /// already put in the image region.
    #[serde(default)]
    pub keep_initial_slide: bool,
    /// Start the auto-advance scheduler immediately.
    #[serde(default)]
    pub start_show: bool,
}

impl Default for SlideshowOptions {
    fn default() -> Self {
        Self {
            carousel_active_class: Self::default_carousel_active_class(),
            auto_show_first_slide: Self::default_auto_show_first_slide(),
            transition: Easing::default(),
            transition_duration: Self::default_transition_duration(),
            slide_duration: Self::default_slide_duration(),
            keep_initial_slide: false,
            start_show: false,
        }
    }
}

impl SlideshowOptions {
    fn default_carousel_active_class() -> String {
        "active".to_string()
    }

    const fn default_auto_show_first_slide() -> bool {
        true
    }

    const fn default_transition_duration() -> Duration {
        Duration::from_millis(100)
    }

    const fn default_slide_duration() -> Duration {
        Duration::from_millis(4000)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            !self.carousel_active_class.is_empty(),
            "carousel-active-class must not be empty"
        );
        ensure!(
            self.slide_duration > Duration::ZERO,
            "slide-duration must be positive"
        );
        Ok(())
    }
}

/// Opacity easing curve. Evaluation is offered for adapters that tween
/// frame-by-frame; adapters that delegate to a native animator may only
/// forward the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicEaseIn,
    CubicEaseOut,
    CubicEaseInOut,
}

impl Easing {
    const ALL: &'static [Self] = &[
        Self::Linear,
        Self::CubicEaseIn,
        Self::CubicEaseOut,
        Self::CubicEaseInOut,
    ];
    const NAMES: &'static [&'static str] = &[
        "linear",
        "cubic-ease-in",
        "cubic-ease-out",
        "cubic-ease-in-out",
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::CubicEaseIn => "cubic-ease-in",
            Self::CubicEaseOut => "cubic-ease-out",
            Self::CubicEaseInOut => "cubic-ease-in-out",
        }
    }

    /// Curve value at normalized time `t` in `[0, 1]`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicEaseIn => t * t * t,
            Self::CubicEaseOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicEaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::CubicEaseInOut
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        for easing in Self::ALL {
            if raw == easing.as_str() {
                return Ok(*easing);
            }
        }
        Err(de::Error::unknown_variant(&raw, Self::NAMES))
    }
}

/// On-disk description of a show: the slide list plus engine options.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShowFile {
    pub slides: Vec<ImageRecord>,
    #[serde(default)]
    pub options: SlideshowOptions,
}

pub fn from_yaml_file(path: &Path) -> Result<ShowFile, Error> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&raw)?)
}
