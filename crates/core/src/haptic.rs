//! Haptic feedback sinks.
//!
//! A pulse is a fire-and-forget request. Whatever the sink reports back is
//! only logged; it never decides whether a level change happens.

use crate::error::HapticError;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub trait HapticFeedback {
    fn pulse(&mut self, duration: Duration) -> Result<(), HapticError>;
}

/// Sends a pulse and logs a failure instead of returning it.
pub fn pulse_best_effort(sink: &mut dyn HapticFeedback, duration: Duration) {
    if let Err(e) = sink.pulse(duration) {
        tracing::warn!(error = %e, duration_ms = duration.as_millis() as u64, "haptic pulse dropped");
    }
}

/// For hosts without a vibration motor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl HapticFeedback for NoHaptics {
    fn pulse(&mut self, _duration: Duration) -> Result<(), HapticError> {
        Ok(())
    }
}

/// Keeps every pulse it receives. It can be told to fail each one to mimic
/// a device where the feature is missing.
#[derive(Debug, Default, Clone)]
pub struct RecordingHaptics {
    pulses: Rc<RefCell<Vec<Duration>>>,
    failing: bool,
}

impl RecordingHaptics {
    pub fn new() -> RecordingHaptics {
        RecordingHaptics::default()
    }

    pub fn failing() -> RecordingHaptics {
        RecordingHaptics {
            failing: true,
            ..Default::default()
        }
    }

    /// Pulses seen by this sink or any of its clones.
    pub fn pulses(&self) -> Vec<Duration> {
        self.pulses.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.pulses.borrow().len()
    }
}

impl HapticFeedback for RecordingHaptics {
    fn pulse(&mut self, duration: Duration) -> Result<(), HapticError> {
        self.pulses.borrow_mut().push(duration);
        if self.failing {
            return Err(HapticError::Unavailable);
        }
        Ok(())
    }
}
