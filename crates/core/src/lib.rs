//! Rung meter core: a discrete level selector drawn as a stack of rungs that
//! narrow toward the top, selected by tapping or dragging.
//!
//! - [`meter::layout`] derives the rungs from the container size
//! - [`meter::gesture`] turns pointer events into level changes
//! - [`view::MeterView`] ties both to a haptic sink and a render surface

#[macro_use]
pub mod geom;

pub mod error;
pub mod haptic;
pub mod helpers;
pub mod logging;
pub mod meter;
pub mod settings;
pub mod view;
