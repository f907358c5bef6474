//! Pointer traces: recorded from a file or generated from a scenario.

use anyhow::{Context, Error};
use clap::ValueEnum;
use rung_meter_core::geom::Point;
use rung_meter_core::meter::{PointerAction, PointerEvent, RungLayout};
use rung_meter_core::pt;
use serde::Deserialize;
use std::path::Path;

/// Distance between two generated move events. Large enough to count as a
/// swipe with the default threshold, small enough to land in every rung.
const SWIPE_STEP: f32 = 25.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Tap the middle rung.
    Tap,
    /// Drag from level 0 up to the highest level.
    Swipe,
    /// Tap left of the corridor.
    Outside,
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum TraceAction {
    Down,
    Move,
    Up,
}

/// One recorded event. Leaving out a coordinate records an event without
/// payload.
#[derive(Debug, Deserialize)]
struct TraceEvent {
    action: TraceAction,
    x: Option<f32>,
    y: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TraceFile {
    #[serde(default, rename = "event")]
    events: Vec<TraceEvent>,
}

impl TraceEvent {
    fn into_pointer_event(self) -> Option<PointerEvent> {
        let action = match self.action {
            TraceAction::Down => PointerAction::Down,
            TraceAction::Move => PointerAction::Move,
            TraceAction::Up => PointerAction::Up,
        };
        Some(PointerEvent::new(action, pt!(self.x?, self.y?)))
    }
}

pub fn parse_trace(content: &str) -> Result<Vec<Option<PointerEvent>>, Error> {
    let file: TraceFile = toml::from_str(content).context("can't parse pointer trace")?;
    Ok(file
        .events
        .into_iter()
        .map(TraceEvent::into_pointer_event)
        .collect())
}

pub fn load_trace(path: &Path) -> Result<Vec<Option<PointerEvent>>, Error> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("can't read pointer trace {}", path.display()))?;
    parse_trace(&content).with_context(|| format!("in {}", path.display()))
}

fn rung_center(layout: &RungLayout, level: usize) -> Point {
    layout
        .rung(level)
        .map(|rung| {
            let bounds = rung.bounds;
            pt!(bounds.center_x(), (bounds.min.y + bounds.max.y) / 2.0)
        })
        .unwrap_or_default()
}

pub fn scenario_events(scenario: Scenario, layout: &RungLayout) -> Vec<Option<PointerEvent>> {
    let event = |action, pt| Some(PointerEvent::new(action, pt));

    match scenario {
        Scenario::Tap => {
            let target = rung_center(layout, layout.max_level() / 2);
            vec![
                event(PointerAction::Down, target),
                event(PointerAction::Up, target),
            ]
        }
        Scenario::Swipe => {
            let start = rung_center(layout, 0);
            let end = rung_center(layout, layout.max_level());
            let mut events = vec![event(PointerAction::Down, start)];
            let mut y = start.y;
            while y < end.y {
                y = (y + SWIPE_STEP).min(end.y);
                events.push(event(PointerAction::Move, pt!(start.x, y)));
            }
            events.push(event(PointerAction::Up, end));
            events
        }
        Scenario::Outside => {
            let topmost = layout.topmost().bounds;
            let target = pt!(topmost.min.x - 1.0, rung_center(layout, 0).y);
            vec![
                event(PointerAction::Down, target),
                event(PointerAction::Up, target),
            ]
        }
    }
}
