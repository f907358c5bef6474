use thiserror::Error;

/// Rejections raised while deriving a rung layout.
///
/// Every variant describes a configuration that would otherwise produce a
/// corrupt layout. Callers are expected to surface these at setup time
/// rather than clamp the inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("a meter needs at least {min} levels, got {got}")]
    TooFewLevels { got: usize, min: usize },
    #[error("a meter supports at most {max} levels, got {got}")]
    TooManyLevels { got: usize, max: usize },
    #[error("container must have a positive size, got {width}x{height}")]
    InvalidContainer { width: f32, height: f32 },
}

/// Failure reported by a haptic feedback sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HapticError {
    #[error("haptic feedback is unavailable on this device")]
    Unavailable,
}

/// Invalid values found in the meter settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("level-count must lie in [{min}, {max}], got {got}")]
    LevelCount { got: usize, min: usize, max: usize },
    #[error("swipe-threshold must be a non-negative number, got {0}")]
    SwipeThreshold(f32),
    #[error("min-width-ratio must lie in [0, 1), got {0}")]
    MinWidthRatio(f32),
    #[error("stroke-estimate must be a non-negative number, got {0}")]
    StrokeEstimate(f32),
    #[error("corner-radius must be a non-negative number, got {0}")]
    CornerRadius(f32),
}
