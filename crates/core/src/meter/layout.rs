//! Rung layout derivation.
//!
//! A meter of `N` levels is drawn as `N` horizontally centered rungs whose
//! width shrinks by a constant step from level 0 to level `N - 1`:
//!
//! ```text
//!        ┌──────────┐          level N-1 (stored first)
//!        └──────────┘
//!      ┌──────────────┐
//!      └──────────────┘
//!    ┌──────────────────┐
//!    └──────────────────┘
//!  ┌──────────────────────┐    level 0 (stored last)
//!  └──────────────────────┘
//! ```
//!
//! Vertical proportions come from splitting the container height into
//! `3N - 1` margin units: every rung is two units tall and consecutive rungs
//! are one unit apart. The stroke width used to inset the stack is first
//! estimated, then refined once from the rung height. The refinement is a
//! single pass; iterating it changes the geometry.

use crate::error::LayoutError;
use crate::geom::{Point, Rectangle};
use crate::settings::{CorridorSource, MeterSettings, MAX_LEVEL_COUNT, MIN_LEVEL_COUNT};

/// One selectable band of the meter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rung {
    pub level_index: usize,
    pub bounds: Rectangle,
}

/// What the rendering surface needs to paint a rung.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RungPaint {
    pub level_index: usize,
    pub bounds: Rectangle,
    pub filled: bool,
}

/// Cumulative fill: the selected level and every level above it are filled.
pub fn is_level_filled(current_level: usize, level_index: usize) -> bool {
    current_level <= level_index
}

/// The full set of rungs computed for one container size.
///
/// Rungs are stored top-to-bottom, so the first rung is level `N - 1` and the
/// last one is level 0. A layout is never edited in place; a new container
/// size gets a new layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RungLayout {
    rungs: Vec<Rung>,
    container: (f32, f32),
    margin: f32,
    rung_height: f32,
    stroke_width: f32,
}

/// Computes the rungs for a container with the default meter proportions.
pub fn compute_rungs(
    container_width: f32,
    container_height: f32,
    level_count: usize,
) -> Result<RungLayout, LayoutError> {
    let settings = MeterSettings {
        level_count,
        ..Default::default()
    };
    compute_rungs_with(container_width, container_height, &settings)
}

/// Computes the rungs for a container using the proportions in `settings`.
pub fn compute_rungs_with(
    container_width: f32,
    container_height: f32,
    settings: &MeterSettings,
) -> Result<RungLayout, LayoutError> {
    let levels = settings.level_count;
    if levels < MIN_LEVEL_COUNT {
        return Err(LayoutError::TooFewLevels {
            got: levels,
            min: MIN_LEVEL_COUNT,
        });
    }
    if levels > MAX_LEVEL_COUNT {
        return Err(LayoutError::TooManyLevels {
            got: levels,
            max: MAX_LEVEL_COUNT,
        });
    }

    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(container_width) || !valid(container_height) {
        return Err(LayoutError::InvalidContainer {
            width: container_width,
            height: container_height,
        });
    }

    let margin =
        (container_height - 2.0 * settings.stroke_estimate) / (3 * levels - 1) as f32;
    let rung_height = 2.0 * margin;
    let stroke_width = rung_height / 9.0;

    let min_width = container_width * settings.min_width_ratio;
    let width_delta = (container_width - min_width) / (levels - 2) as f32;

    // Rungs left without width or height are still laid out. Their bounds
    // are empty, so hit testing never lands on them.
    let mut rungs = Vec::with_capacity(levels);
    let mut width = container_width - 2.0 * stroke_width;
    for i in 0..levels {
        if i > 0 {
            width -= width_delta;
        }

        let left = (container_width - width) / 2.0;
        let top = i as f32 * (rung_height + margin) + stroke_width;
        rungs.push(Rung {
            level_index: i,
            bounds: rect![left, top, left + width, top + rung_height],
        });
    }
    rungs.reverse();

    tracing::debug!(
        width = container_width,
        height = container_height,
        levels,
        margin,
        rung_height,
        stroke_width,
        width_delta,
        "computed rung layout"
    );

    Ok(RungLayout {
        rungs,
        container: (container_width, container_height),
        margin,
        rung_height,
        stroke_width,
    })
}

impl RungLayout {
    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    pub fn level_count(&self) -> usize {
        self.rungs.len()
    }

    pub fn max_level(&self) -> usize {
        self.rungs.len() - 1
    }

    pub fn container(&self) -> (f32, f32) {
        self.container
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn rung_height(&self) -> f32 {
        self.rung_height
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// The rung of the highest level, which is the narrowest one.
    pub fn topmost(&self) -> &Rung {
        &self.rungs[0]
    }

    /// The level 0 rung, which is the widest one.
    pub fn bottommost(&self) -> &Rung {
        &self.rungs[self.rungs.len() - 1]
    }

    pub fn rung(&self, level: usize) -> Option<&Rung> {
        let index = self.max_level().checked_sub(level)?;
        self.rungs.get(index)
    }

    /// The area in which pointer events are considered inside the meter.
    ///
    /// It spans the whole stack vertically. Horizontally it is bounded by the
    /// rung named by `source`.
    pub fn corridor(&self, source: CorridorSource) -> Rectangle {
        let horizontal = match source {
            CorridorSource::Narrowest => self.topmost(),
            CorridorSource::Widest => self.bottommost(),
        };
        Rectangle::new(
            pt!(horizontal.bounds.min.x, self.bottommost().bounds.min.y),
            pt!(horizontal.bounds.max.x, self.topmost().bounds.max.y),
        )
    }

    /// Corridor containment includes every edge of the corridor.
    pub fn in_corridor(&self, pt: Point, source: CorridorSource) -> bool {
        let corridor = self.corridor(source);
        pt.y >= corridor.min.y
            && pt.y <= corridor.max.y
            && pt.x >= corridor.min.x
            && pt.x <= corridor.max.x
    }

    /// Returns the level of the first stored rung including `pt`, if any.
    ///
    /// Points in the gaps between rungs hit nothing.
    pub fn hit_test(&self, pt: Point) -> Option<usize> {
        self.rungs
            .iter()
            .find(|rung| rung.bounds.includes(pt))
            .map(|rung| rung.level_index)
    }

    /// Pairs every rung, in stored order, with its fill state for `current_level`.
    pub fn paint_list(&self, current_level: usize) -> Vec<RungPaint> {
        self.rungs
            .iter()
            .map(|rung| RungPaint {
                level_index: rung.level_index,
                bounds: rung.bounds,
                filled: is_level_filled(current_level, rung.level_index),
            })
            .collect()
    }
}
