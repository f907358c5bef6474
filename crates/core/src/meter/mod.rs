//! Layout and gesture logic of the rung meter.
//!
//! - [`layout`]: derives the rungs from a container size
//! - [`gesture`]: maps pointer events to level changes
//! - [`measure`]: picks the container size from host constraints

pub mod gesture;
pub mod layout;
pub mod measure;

pub use gesture::{
    GesturePhase, GestureRules, InteractionState, LevelChanged, PointerAction, PointerEvent,
    SwipeDirection, Transition,
};
pub use layout::{compute_rungs, compute_rungs_with, is_level_filled, Rung, RungLayout, RungPaint};
pub use measure::{resolve_size, DisplayMetrics, MeasureSpec};
