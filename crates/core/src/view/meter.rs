//! The meter view: owns the rung layout, the interaction state and the
//! haptic sink, and tells the rendering surface what to paint.
//!
//! # Event Flow
//!
//! 1. The host measures the view, which computes a fresh [`RungLayout`]
//! 2. Pointer events go through [`MeterView::handle_pointer`]
//! 3. Each level change fires one haptic pulse and marks the view dirty
//! 4. The host checks [`MeterView::take_dirty`] and calls [`MeterView::render`]
//!
//! # Example
//!
//! ```
//! use rung_meter_core::haptic::RecordingHaptics;
//! use rung_meter_core::meter::{PointerAction, PointerEvent};
//! use rung_meter_core::settings::MeterSettings;
//! use rung_meter_core::view::MeterView;
//! use rung_meter_core::pt;
//!
//! let haptics = RecordingHaptics::new();
//! let mut meter = MeterView::new(MeterSettings::default(), Box::new(haptics.clone()))?;
//! meter.resize(1000.0, 2000.0)?;
//!
//! let target = pt!(500, 1000);
//! meter.handle_pointer(Some(PointerEvent::new(PointerAction::Down, target)));
//! meter.handle_pointer(Some(PointerEvent::new(PointerAction::Up, target)));
//!
//! assert_eq!(meter.current_level(), 2);
//! assert_eq!(haptics.count(), 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::RenderSurface;
use crate::error::{LayoutError, SettingsError};
use crate::haptic::{pulse_best_effort, HapticFeedback};
use crate::meter::{
    compute_rungs_with, resolve_size, DisplayMetrics, GestureRules, InteractionState,
    MeasureSpec, PointerEvent, RungLayout, RungPaint,
};
use crate::settings::MeterSettings;

pub struct MeterView {
    settings: MeterSettings,
    rules: GestureRules,
    layout: Option<RungLayout>,
    state: InteractionState,
    haptics: Box<dyn HapticFeedback>,
    dirty: bool,
}

impl MeterView {
    /// Creates a meter with no layout yet. Invalid settings are rejected here
    /// so that a misconfigured meter never becomes interactive.
    pub fn new(
        settings: MeterSettings,
        haptics: Box<dyn HapticFeedback>,
    ) -> Result<MeterView, SettingsError> {
        settings.validate()?;

        Ok(MeterView {
            rules: GestureRules::from(&settings),
            settings,
            layout: None,
            state: InteractionState::default(),
            haptics,
            dirty: false,
        })
    }

    /// Picks the container size from the host constraints and lays the
    /// rungs out in it.
    pub fn measure(
        &mut self,
        metrics: &dyn DisplayMetrics,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
    ) -> Result<(f32, f32), LayoutError> {
        let (width, height) = resolve_size(metrics, width_spec, height_spec);
        self.resize(width, height)?;
        Ok((width, height))
    }

    /// Replaces the layout with one computed for `width` x `height`.
    ///
    /// On failure the previous layout is dropped as well: it no longer
    /// matches the container, and pointer events are ignored until the next
    /// successful resize.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), LayoutError> {
        self.layout = None;
        self.dirty = true;

        let layout = compute_rungs_with(width, height, &self.settings).inspect_err(|e| {
            tracing::error!(error = %e, width, height, "can't lay out meter");
        })?;
        self.layout = Some(layout);
        Ok(())
    }

    /// Feeds one pointer event to the meter. Events are always consumed.
    pub fn handle_pointer(&mut self, event: Option<PointerEvent>) -> bool {
        let Some(layout) = self.layout.as_ref() else {
            return true;
        };

        tracing::trace!(?event, "pointer event");
        let transition = self.state.handle(layout, event, &self.rules);
        self.state = transition.state;

        if let Some(change) = transition.change {
            tracing::info!(from = change.from, to = change.to, "meter level changed");
            pulse_best_effort(self.haptics.as_mut(), self.settings.haptic_pulse());
            self.dirty = true;
        }

        true
    }

    pub fn current_level(&self) -> usize {
        self.state.current_level
    }

    /// Selects `level` without haptic feedback, e.g. to restore a value the
    /// host kept around. Returns `false` for a level the meter doesn't have.
    pub fn set_level(&mut self, level: usize) -> bool {
        if level >= self.settings.level_count {
            return false;
        }
        if level != self.state.current_level {
            self.state.current_level = level;
            self.dirty = true;
        }
        true
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn layout(&self) -> Option<&RungLayout> {
        self.layout.as_ref()
    }

    pub fn settings(&self) -> &MeterSettings {
        &self.settings
    }

    pub fn corner_radius(&self) -> f32 {
        self.settings.corner_radius
    }

    pub fn paint_list(&self) -> Vec<RungPaint> {
        self.layout
            .as_ref()
            .map(|layout| layout.paint_list(self.state.current_level))
            .unwrap_or_default()
    }

    /// Returns whether a redraw was requested since the last call, and
    /// clears the request.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.paint(&self.paint_list(), self.corner_radius());
    }
}
