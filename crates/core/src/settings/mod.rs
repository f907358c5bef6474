//! Configuration for the meter and the ambient logging stack.
//!
//! Settings are stored as TOML with kebab-case keys. Every field has a
//! default, so a partial file (or no file at all) yields a usable
//! configuration:
//!
//! ```toml
//! [meter]
//! level-count = 5
//! swipe-threshold = 10.0
//! haptic-pulse-ms = 5
//! corridor = "narrowest"
//!
//! [logging]
//! level = "debug"
//! ```

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LEVEL_COUNT: usize = 5;
pub const MIN_LEVEL_COUNT: usize = 3;
pub const MAX_LEVEL_COUNT: usize = 256;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub meter: MeterSettings,
    pub logging: LoggingSettings,
}

/// Which rung supplies the horizontal bounds of the touch corridor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorridorSource {
    /// The topmost rung, which is also the narrowest.
    #[default]
    Narrowest,
    /// The level 0 rung, which spans nearly the full container width.
    Widest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MeterSettings {
    /// Number of discrete levels.
    pub level_count: usize,
    /// Vertical distance between two pointer events above which the
    /// gesture counts as a swipe.
    pub swipe_threshold: f32,
    /// Duration of the haptic pulse fired on every level change.
    pub haptic_pulse_ms: u64,
    /// Corner radius hint handed to the rendering surface.
    pub corner_radius: f32,
    /// Width of the narrowest rung relative to the container, before
    /// stroke adjustments.
    pub min_width_ratio: f32,
    /// Stroke width used to derive the margin, before it gets refined
    /// from the rung height.
    pub stroke_estimate: f32,
    pub corridor: CorridorSource,
}

impl Default for MeterSettings {
    fn default() -> Self {
        MeterSettings {
            level_count: DEFAULT_LEVEL_COUNT,
            swipe_threshold: 10.0,
            haptic_pulse_ms: 5,
            corner_radius: 60.0,
            min_width_ratio: 0.5,
            stroke_estimate: 5.0,
            corridor: CorridorSource::default(),
        }
    }
}

impl MeterSettings {
    pub fn haptic_pulse(&self) -> Duration {
        Duration::from_millis(self.haptic_pulse_ms)
    }

    /// Checks the values that would otherwise surface as a corrupt layout or
    /// a gesture classifier that never fires.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_LEVEL_COUNT..=MAX_LEVEL_COUNT).contains(&self.level_count) {
            return Err(SettingsError::LevelCount {
                got: self.level_count,
                min: MIN_LEVEL_COUNT,
                max: MAX_LEVEL_COUNT,
            });
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(SettingsError::SwipeThreshold(self.swipe_threshold));
        }
        if !(0.0..1.0).contains(&self.min_width_ratio) {
            return Err(SettingsError::MinWidthRatio(self.min_width_ratio));
        }
        if !self.stroke_estimate.is_finite() || self.stroke_estimate < 0.0 {
            return Err(SettingsError::StrokeEstimate(self.stroke_estimate));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(SettingsError::CornerRadius(self.corner_radius));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    pub level: String,
    /// Number of run log files to keep (0 keeps all of them).
    pub max_files: usize,
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: true,
            level: "info".to_string(),
            max_files: 3,
            directory: PathBuf::from("logs"),
        }
    }
}
