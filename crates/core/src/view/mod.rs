//! Host-facing side of the meter.

pub mod meter;

pub use meter::MeterView;

use crate::meter::RungPaint;

/// Anything able to draw the meter.
///
/// The surface receives the rungs in stored order with their fill state,
/// plus the corner radius to round them with. Colors and strokes are its own
/// business.
pub trait RenderSurface {
    fn paint(&mut self, rungs: &[RungPaint], corner_radius: f32);
}
