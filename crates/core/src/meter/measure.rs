//! Container size resolution.
//!
//! The host tells the meter how much room it gets on each axis. When an axis
//! is left unconstrained the meter claims the whole display along it.

/// Source of the display dimensions, in layout units.
pub trait DisplayMetrics {
    fn dims(&self) -> (f32, f32);
}

impl DisplayMetrics for (f32, f32) {
    fn dims(&self) -> (f32, f32) {
        *self
    }
}

/// Constraint imposed by the host on one axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MeasureSpec {
    Unspecified,
    Exactly(f32),
    AtMost(f32),
}

impl MeasureSpec {
    fn resolve(self, display: f32) -> f32 {
        match self {
            MeasureSpec::Unspecified => display,
            MeasureSpec::Exactly(size) | MeasureSpec::AtMost(size) => size,
        }
    }
}

/// Returns the `(width, height)` the meter lays itself out in.
pub fn resolve_size(
    metrics: &dyn DisplayMetrics,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
) -> (f32, f32) {
    let (display_width, display_height) = metrics.dims();
    (
        width_spec.resolve(display_width),
        height_spec.resolve(display_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unspecified_axes_use_display() {
        let display = (1080.0, 1920.0);
        assert_eq!(
            resolve_size(&display, MeasureSpec::Unspecified, MeasureSpec::Unspecified),
            (1080.0, 1920.0)
        );
    }

    #[test]
    fn test_specified_axes_override_display() {
        let display = (1080.0, 1920.0);
        assert_eq!(
            resolve_size(&display, MeasureSpec::Exactly(400.0), MeasureSpec::AtMost(900.0)),
            (400.0, 900.0)
        );
        assert_eq!(
            resolve_size(&display, MeasureSpec::Unspecified, MeasureSpec::Exactly(600.0)),
            (1080.0, 600.0)
        );
    }
}
