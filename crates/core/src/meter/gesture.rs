//! Pointer handling for the meter.
//!
//! The meter turns a stream of down/move/up pointer events into discrete
//! level changes. The rules, applied to every event in order:
//!
//! 1. **Corridor**: events outside the meter's corridor are consumed without
//!    touching the state.
//! 2. **Hit test**: the event position resolves to the level of the rung it
//!    falls in, or to nothing when it lands in a gap.
//! 3. **Down** selects nothing. It only starts tracking.
//! 4. **Move** flags a swipe once the vertical distance to the previous event
//!    exceeds the swipe threshold, and commits the touched level right away
//!    (live drag).
//! 5. **Up** commits the touched level only when no swipe was flagged during
//!    the gesture (tap). It then forgets the swipe and the previous position.
//!
//! The handlers are pure: they take the state by value and hand back the next
//! state along with the level change to act upon, if any.

use super::layout::RungLayout;
use crate::geom::Point;
use crate::settings::{CorridorSource, MeterSettings};

/// Direction of the last large vertical motion within a gesture.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SwipeDirection {
    #[default]
    None,
    Up,
    Down,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Tracking,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(action: PointerAction, position: Point) -> PointerEvent {
        PointerEvent { action, position }
    }
}

/// Emitted whenever the selected level is committed to a new value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LevelChanged {
    pub from: usize,
    pub to: usize,
}

/// Constants steering the tap/swipe classification.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GestureRules {
    pub swipe_threshold: f32,
    pub corridor: CorridorSource,
}

impl Default for GestureRules {
    fn default() -> Self {
        GestureRules::from(&MeterSettings::default())
    }
}

impl From<&MeterSettings> for GestureRules {
    fn from(settings: &MeterSettings) -> Self {
        GestureRules {
            swipe_threshold: settings.swipe_threshold,
            corridor: settings.corridor,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct InteractionState {
    pub current_level: usize,
    pub previous_pointer_y: f32,
    pub swipe: SwipeDirection,
    pub phase: GesturePhase,
}

/// Outcome of feeding one pointer event to the state machine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transition {
    pub state: InteractionState,
    pub change: Option<LevelChanged>,
}

impl Transition {
    fn unchanged(state: InteractionState) -> Transition {
        Transition {
            state,
            change: None,
        }
    }
}

impl InteractionState {
    pub fn with_level(current_level: usize) -> InteractionState {
        InteractionState {
            current_level,
            ..Default::default()
        }
    }

    /// Dispatches `event` to the matching handler. An absent event is
    /// consumed without effect.
    pub fn handle(
        self,
        layout: &RungLayout,
        event: Option<PointerEvent>,
        rules: &GestureRules,
    ) -> Transition {
        let Some(event) = event else {
            return Transition::unchanged(self);
        };

        match event.action {
            PointerAction::Down => self.pointer_down(layout, event.position, rules),
            PointerAction::Move => self.pointer_move(layout, event.position, rules),
            PointerAction::Up => self.pointer_up(layout, event.position, rules),
        }
    }

    pub fn pointer_down(self, layout: &RungLayout, pt: Point, rules: &GestureRules) -> Transition {
        if !layout.in_corridor(pt, rules.corridor) {
            return Transition::unchanged(self);
        }

        Transition::unchanged(InteractionState {
            previous_pointer_y: pt.y,
            phase: GesturePhase::Tracking,
            ..self
        })
    }

    pub fn pointer_move(self, layout: &RungLayout, pt: Point, rules: &GestureRules) -> Transition {
        if !layout.in_corridor(pt, rules.corridor) {
            return Transition::unchanged(self);
        }

        let mut state = self;
        let dy = pt.y - state.previous_pointer_y;
        if dy.abs() > rules.swipe_threshold {
            state.swipe = if dy > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            };
        }

        let mut change = None;
        if let Some(touched) = layout.hit_test(pt) {
            if touched != state.current_level {
                change = state.commit(layout, touched);
            }
        }

        state.previous_pointer_y = pt.y;
        state.phase = GesturePhase::Tracking;

        Transition { state, change }
    }

    pub fn pointer_up(self, layout: &RungLayout, pt: Point, rules: &GestureRules) -> Transition {
        if !layout.in_corridor(pt, rules.corridor) {
            return Transition::unchanged(self);
        }

        let mut state = self;
        let mut change = None;
        if state.swipe == SwipeDirection::None {
            if let Some(touched) = layout.hit_test(pt) {
                if touched != state.current_level {
                    change = state.commit(layout, touched);
                }
            }
        }

        state.swipe = SwipeDirection::None;
        state.previous_pointer_y = 0.0;
        state.phase = GesturePhase::Idle;

        Transition { state, change }
    }

    /// Moves the selection to `level`. Levels the layout doesn't have are
    /// ignored.
    fn commit(&mut self, layout: &RungLayout, level: usize) -> Option<LevelChanged> {
        if level > layout.max_level() {
            return None;
        }

        let change = LevelChanged {
            from: self.current_level,
            to: level,
        };
        self.current_level = level;
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::layout::compute_rungs;

    fn layout() -> RungLayout {
        compute_rungs(1000.0, 2000.0, 5).unwrap()
    }

    fn center(layout: &RungLayout, level: usize) -> Point {
        let bounds = layout.rung(level).unwrap().bounds;
        pt!(bounds.center_x(), (bounds.min.y + bounds.max.y) / 2.0)
    }

    fn run(
        layout: &RungLayout,
        mut state: InteractionState,
        events: &[PointerEvent],
    ) -> (InteractionState, Vec<LevelChanged>) {
        let rules = GestureRules::default();
        let mut changes = Vec::new();
        for event in events {
            let transition = state.handle(layout, Some(*event), &rules);
            state = transition.state;
            changes.extend(transition.change);
        }
        (state, changes)
    }

    fn down(pt: Point) -> PointerEvent {
        PointerEvent::new(PointerAction::Down, pt)
    }

    fn move_to(pt: Point) -> PointerEvent {
        PointerEvent::new(PointerAction::Move, pt)
    }

    fn up(pt: Point) -> PointerEvent {
        PointerEvent::new(PointerAction::Up, pt)
    }

    #[test]
    fn test_tap_commits_on_release() {
        let layout = layout();
        let target = center(&layout, 2);

        let (state, changes) = run(
            &layout,
            InteractionState::default(),
            &[down(target), up(target)],
        );

        assert_eq!(state.current_level, 2);
        assert_eq!(changes, vec![LevelChanged { from: 0, to: 2 }]);
        assert_eq!(state.swipe, SwipeDirection::None);
        assert_eq!(state.previous_pointer_y, 0.0);
        assert_eq!(state.phase, GesturePhase::Idle);
    }

    #[test]
    fn test_down_never_commits() {
        let layout = layout();
        let rules = GestureRules::default();
        let target = center(&layout, 3);

        let transition = InteractionState::default().pointer_down(&layout, target, &rules);

        assert_eq!(transition.change, None);
        assert_eq!(transition.state.current_level, 0);
        assert_eq!(transition.state.phase, GesturePhase::Tracking);
        assert_eq!(transition.state.previous_pointer_y, target.y);
    }

    #[test]
    fn test_small_moves_commit_live_and_tap_release_does_not_repeat() {
        let layout = layout();
        let target = center(&layout, 1);
        let nudged = pt!(target.x + 3.0, target.y + 4.0);

        let (state, changes) = run(
            &layout,
            InteractionState::default(),
            &[down(target), move_to(nudged), up(nudged)],
        );

        assert_eq!(state.current_level, 1);
        assert_eq!(changes, vec![LevelChanged { from: 0, to: 1 }]);
    }

    #[test]
    fn test_swipe_commits_each_rung_while_moving() {
        let layout = layout();
        let start = center(&layout, 0);
        let end = center(&layout, 4);

        let mut events = vec![down(start)];
        let steps = 40;
        for step in 1..=steps {
            let y = start.y + (end.y - start.y) * step as f32 / steps as f32;
            events.push(move_to(pt!(start.x, y)));
        }
        events.push(up(end));

        let (state, changes) = run(&layout, InteractionState::default(), &events);

        assert_eq!(state.current_level, 4);
        let levels: Vec<usize> = changes.iter().map(|c| c.to).collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
        assert_eq!(state.swipe, SwipeDirection::None);
    }

    #[test]
    fn test_release_after_swipe_is_suppressed() {
        let layout = layout();
        let rules = GestureRules::default();
        let start = center(&layout, 0);

        // Drag far enough to flag a swipe while staying in level 0, then
        // release over another rung without any move landing on it.
        let nearby = pt!(start.x, start.y + 30.0);
        let mut state = InteractionState::default();
        state = state.pointer_down(&layout, start, &rules).state;
        let transition = state.pointer_move(&layout, nearby, &rules);
        assert_eq!(transition.change, None);
        assert_eq!(transition.state.swipe, SwipeDirection::Down);

        let release = transition
            .state
            .pointer_up(&layout, center(&layout, 3), &rules);
        assert_eq!(release.change, None);
        assert_eq!(release.state.current_level, 0);
        assert_eq!(release.state.swipe, SwipeDirection::None);
    }

    #[test]
    fn test_swipe_direction_follows_sign_and_sticks() {
        let layout = layout();
        let rules = GestureRules::default();
        let start = center(&layout, 2);

        let mut state = InteractionState::default()
            .pointer_down(&layout, start, &rules)
            .state;
        state = state
            .pointer_move(&layout, pt!(start.x, start.y - 20.0), &rules)
            .state;
        assert_eq!(state.swipe, SwipeDirection::Up);

        // A small step back does not clear the flag.
        state = state
            .pointer_move(&layout, pt!(start.x, start.y - 15.0), &rules)
            .state;
        assert_eq!(state.swipe, SwipeDirection::Up);

        state = state
            .pointer_move(&layout, pt!(start.x, start.y + 10.0), &rules)
            .state;
        assert_eq!(state.swipe, SwipeDirection::Down);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let layout = layout();
        let rules = GestureRules::default();

        let state = InteractionState::default()
            .pointer_down(&layout, pt!(500, 1000), &rules)
            .state
            .pointer_move(&layout, pt!(500, 1010), &rules)
            .state;
        assert_eq!(state.swipe, SwipeDirection::None);

        let state = state.pointer_move(&layout, pt!(500, 1020.5), &rules).state;
        assert_eq!(state.swipe, SwipeDirection::Down);
    }

    #[test]
    fn test_events_outside_corridor_are_ignored() {
        let layout = layout();
        let corridor = layout.corridor(CorridorSource::Narrowest);
        let middle_y = (corridor.min.y + corridor.max.y) / 2.0;
        let outside = [
            pt!(corridor.min.x - 1.0, middle_y),
            pt!(corridor.max.x + 1.0, middle_y),
            pt!(500.0, corridor.min.y - 1.0),
            pt!(500.0, corridor.max.y + 1.0),
            // Inside the level 0 rung, but outside the narrow corridor.
            pt!(layout.bottommost().bounds.min.x + 5.0, center(&layout, 0).y),
        ];

        let initial = InteractionState {
            current_level: 3,
            previous_pointer_y: 42.0,
            swipe: SwipeDirection::None,
            phase: GesturePhase::Idle,
        };
        for pt in outside {
            let (state, changes) = run(&layout, initial, &[down(pt), move_to(pt), up(pt)]);
            assert_eq!(state, initial);
            assert!(changes.is_empty());
        }
    }

    #[test]
    fn test_wide_corridor_accepts_level_zero_edges() {
        let layout = layout();
        let rules = GestureRules {
            corridor: CorridorSource::Widest,
            ..Default::default()
        };
        let edge = pt!(layout.bottommost().bounds.min.x + 5.0, center(&layout, 0).y);

        let state = InteractionState::with_level(2);
        let state = state.pointer_down(&layout, edge, &rules).state;
        let transition = state.pointer_up(&layout, edge, &rules);

        assert_eq!(transition.change, Some(LevelChanged { from: 2, to: 0 }));
    }

    #[test]
    fn test_gap_touch_never_commits() {
        let layout = layout();
        let lower = layout.rung(1).unwrap().bounds;
        let upper = layout.rung(2).unwrap().bounds;
        let gap = pt!(500.0, (lower.max.y + upper.min.y) / 2.0);

        let (state, changes) = run(
            &layout,
            InteractionState::default(),
            &[down(gap), move_to(gap), up(gap)],
        );

        assert!(changes.is_empty());
        assert_eq!(state.current_level, 0);
    }

    #[test]
    fn test_touching_current_level_is_not_a_change() {
        let layout = layout();
        let target = center(&layout, 2);

        let (state, changes) = run(
            &layout,
            InteractionState::with_level(2),
            &[down(target), move_to(target), up(target)],
        );

        assert!(changes.is_empty());
        assert_eq!(state.current_level, 2);
    }

    #[test]
    fn test_absent_event_is_consumed() {
        let layout = layout();
        let state = InteractionState {
            current_level: 1,
            previous_pointer_y: 12.0,
            swipe: SwipeDirection::Down,
            phase: GesturePhase::Tracking,
        };

        let transition = state.handle(&layout, None, &GestureRules::default());

        assert_eq!(transition.state, state);
        assert_eq!(transition.change, None);
    }

    #[test]
    fn test_commit_rejects_levels_beyond_layout() {
        let layout = layout();
        let mut state = InteractionState::default();

        assert_eq!(state.commit(&layout, 5), None);
        assert_eq!(state.current_level, 0);
        assert_eq!(
            state.commit(&layout, 4),
            Some(LevelChanged { from: 0, to: 4 })
        );
        assert_eq!(state.current_level, 4);
    }

    #[test]
    fn test_current_level_persists_across_gestures() {
        let layout = layout();
        let first = center(&layout, 3);
        let (state, _) = run(
            &layout,
            InteractionState::default(),
            &[down(first), up(first)],
        );
        assert_eq!(state.current_level, 3);

        let gap_free = center(&layout, 1);
        let (state, changes) = run(&layout, state, &[down(gap_free), up(gap_free)]);
        assert_eq!(state.current_level, 1);
        assert_eq!(changes, vec![LevelChanged { from: 3, to: 1 }]);
    }
}
