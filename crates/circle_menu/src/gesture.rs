use crate::error::MenuError;
use crate::events::MenuEvent;
use crate::geometry::{self, Point, Size, ThirdQuadrant, Viewport};
use crate::settings::MenuSettings;
use crate::state::{DivisionCount, RotationState};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

/// How a pointer move is turned into a rotation step.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DeltaMode {
    /// Plain difference of the two angles. Crossing the 0/360 seam jumps by almost a turn.
    #[default]
    #[strum(serialize = "raw")]
    Raw,
    /// Shortest signed distance between the two angles.
    #[strum(serialize = "shortest")]
    Shortest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start_angle: f64,
    down: Point,
    rotation_before: f64,
    applied: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging(Drag),
}

/// Side effects of one pointer event.
///
/// `rotation` must be applied by the host to its displayed circle, about the viewport center,
/// on top of whatever rotation it already shows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureOutcome {
    pub rotation: Option<f64>,
    pub event: Option<MenuEvent>,
}

impl GestureOutcome {
    fn rotate(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            event: None,
        }
    }
}

pub struct GestureController {
    state: RotationState,
    viewport: Viewport,
    phase: Phase,
    delta_mode: DeltaMode,
    third_quadrant: ThirdQuadrant,
}

impl GestureController {
    pub fn new(divisions: DivisionCount) -> Self {
        Self {
            state: RotationState::new(divisions),
            viewport: Viewport::default(),
            phase: Phase::Idle,
            delta_mode: DeltaMode::default(),
            third_quadrant: ThirdQuadrant::default(),
        }
    }

    pub fn from_settings(settings: &MenuSettings) -> Result<Self, MenuError> {
        let mut controller = Self::new(settings.division_count()?);
        controller.apply_settings(settings)?;
        Ok(controller)
    }

    /// Reconfigures the menu in place. The viewport stays as it is.
    pub fn apply_settings(&mut self, settings: &MenuSettings) -> Result<(), MenuError> {
        self.configure(settings.division_count()?);
        if let Some(top) = settings.initial_top {
            self.set_initial_top(top);
        }
        self.set_snap_enabled(settings.snap);
        self.delta_mode = settings.delta_mode;
        self.third_quadrant = settings.third_quadrant;
        Ok(())
    }

    /// Resets rotation and selection. Any drag in flight is dropped.
    pub fn configure(&mut self, divisions: DivisionCount) {
        self.state.set_division_count(divisions);
        self.phase = Phase::Idle;
    }

    pub fn set_initial_top(&mut self, index: usize) {
        self.state.set_alternate_top(index);
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.state.set_snap_enabled(enabled);
    }

    pub fn set_delta_mode(&mut self, mode: DeltaMode) {
        self.delta_mode = mode;
    }

    pub fn set_third_quadrant(&mut self, formula: ThirdQuadrant) {
        self.third_quadrant = formula;
    }

    pub fn report_viewport_size(&mut self, width: f64, height: f64) -> bool {
        self.viewport.report(width, height)
    }

    pub fn selected_index(&self) -> usize {
        self.state.selected_index()
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn delta_mode(&self) -> DeltaMode {
        self.delta_mode
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    fn angle_at(&self, size: Size, point: Point) -> f64 {
        geometry::angle_of_point(point, size, self.third_quadrant)
    }

    pub fn on_pointer_down(&mut self, point: Point) -> GestureOutcome {
        let Some(size) = self.viewport.size() else {
            log::debug!("Pointer down before viewport size is known");
            return GestureOutcome::default();
        };
        let start_angle = self.angle_at(size, point);

        self.phase = match self.phase {
            // a second down without an up restarts from the new point
            Phase::Dragging(drag) => Phase::Dragging(Drag {
                start_angle,
                down: point,
                ..drag
            }),
            Phase::Idle => Phase::Dragging(Drag {
                start_angle,
                down: point,
                rotation_before: self.state.accumulated_rotation(),
                applied: 0.0,
            }),
        };
        log::debug!("Drag started at {:?} ({:.2} deg)", point, start_angle);

        GestureOutcome::default()
    }

    pub fn on_pointer_move(&mut self, point: Point) -> GestureOutcome {
        let (Phase::Dragging(drag), Some(size)) = (&mut self.phase, self.viewport.size()) else {
            return GestureOutcome::default();
        };

        let current_angle = geometry::angle_of_point(point, size, self.third_quadrant);
        let delta = match self.delta_mode {
            DeltaMode::Raw => drag.start_angle - current_angle,
            DeltaMode::Shortest => geometry::shortest_delta(drag.start_angle - current_angle),
        };
        drag.start_angle = current_angle;
        drag.applied += delta;

        self.state.apply_rotation_delta(delta);
        log::trace!("Rotated by {:.2} deg", delta);

        GestureOutcome::rotate(delta)
    }

    pub fn on_pointer_up(&mut self, point: Point) -> GestureOutcome {
        let (Phase::Dragging(drag), Some(size)) = (self.phase, self.viewport.size()) else {
            log::debug!("Pointer up without a drag in progress");
            return GestureOutcome::default();
        };
        self.phase = Phase::Idle;

        let leftover = self.state.settle();
        let selected = self.state.selected_index();

        let tapped = drag.down == point
            && geometry::is_in_top_region(point, size, self.state.division_count());
        let event = if tapped {
            MenuEvent::Clicked(selected)
        } else {
            MenuEvent::SelectionChanged(selected)
        };
        log::debug!(
            "Drag ended: top {} selected {} ({:?})",
            self.state.top_division(),
            selected,
            event
        );

        GestureOutcome {
            rotation: leftover,
            event: Some(event),
        }
    }

    /// Drops the drag in flight as if it never happened.
    ///
    /// The returned rotation undoes everything the drag applied to the visual.
    pub fn on_pointer_cancel(&mut self) -> GestureOutcome {
        let Phase::Dragging(drag) = self.phase else {
            return GestureOutcome::default();
        };
        self.phase = Phase::Idle;
        self.state.restore_rotation(drag.rotation_before);
        log::debug!("Drag cancelled, reverting {:.2} deg", drag.applied);

        GestureOutcome::rotate(-drag.applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MenuListener;

    const SIDE: f64 = 200.0;

    fn controller(count: u32) -> GestureController {
        let mut c = GestureController::new(DivisionCount::new(count).unwrap());
        assert!(c.report_viewport_size(SIDE, SIDE));
        c
    }

    /// View-space point on a circle of radius 80 around the center, at `degrees`.
    fn at(degrees: f64) -> Point {
        let t = degrees.to_radians();
        Point::new(SIDE / 2.0 + 80.0 * t.cos(), SIDE / 2.0 - 80.0 * t.sin())
    }

    fn angle(point: Point) -> f64 {
        geometry::angle_of_point(point, Size::new(SIDE, SIDE), ThirdQuadrant::Reflected)
    }

    #[derive(Default)]
    struct Recorder {
        selections: Vec<usize>,
        clicks: Vec<usize>,
    }

    impl MenuListener for Recorder {
        fn on_selection_change(&mut self, index: usize) {
            self.selections.push(index);
        }

        fn on_clicked(&mut self, index: usize) {
            self.clicks.push(index);
        }
    }

    #[test]
    fn test_events_ignored_until_viewport_known() {
        let mut c = GestureController::new(DivisionCount::new(4).unwrap());

        assert_eq!(c.on_pointer_down(at(0.0)), GestureOutcome::default());
        assert!(!c.is_dragging());
        assert_eq!(c.on_pointer_up(at(0.0)), GestureOutcome::default());
    }

    #[test]
    fn test_tap_in_top_sector_clicks() {
        let mut c = controller(4);
        let mut recorder = Recorder::default();
        let top = Point::new(100.0, 20.0);

        assert_eq!(c.on_pointer_down(top), GestureOutcome::default());
        let outcome = c.on_pointer_up(top);

        outcome.event.unwrap().dispatch(&mut recorder);
        assert_eq!(recorder.clicks, vec![0]);
        assert!(recorder.selections.is_empty());
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_tap_outside_top_sector_selects() {
        let mut c = controller(4);
        let east = Point::new(180.0, 100.0);

        c.on_pointer_down(east);
        let outcome = c.on_pointer_up(east);

        assert_eq!(outcome.event, Some(MenuEvent::SelectionChanged(0)));
    }

    #[test]
    fn test_drag_selects() {
        let mut c = controller(4);

        c.on_pointer_down(Point::new(200.0, 100.0));
        let step = c.on_pointer_move(Point::new(100.0, 0.0));
        assert!((step.rotation.unwrap() + 90.0).abs() < 1e-9);
        assert_eq!(step.event, None);

        // -45 - 90 = -135 -> 225: two sectors crossed
        let outcome = c.on_pointer_up(Point::new(100.0, 0.0));
        assert_eq!(outcome.event, Some(MenuEvent::SelectionChanged(1)));
        assert!(outcome.rotation.unwrap().abs() < 1e-9);
        assert_eq!(c.state().top_division(), 2);
        assert_eq!(c.selected_index(), 1);
    }

    #[test]
    fn test_drag_back_to_start_still_selects_when_outside_top() {
        let mut c = controller(4);

        c.on_pointer_down(at(10.0));
        c.on_pointer_move(at(60.0));
        c.on_pointer_move(at(10.0));
        let outcome = c.on_pointer_up(at(10.0));

        assert_eq!(outcome.event, Some(MenuEvent::SelectionChanged(0)));
        assert!((c.state().accumulated_rotation() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_moves_accumulate_incrementally() {
        let mut c = controller(8);
        c.set_snap_enabled(false);
        let before = c.state().accumulated_rotation();

        c.on_pointer_down(at(20.0));
        let mut total = 0.0;
        for a in [30.0, 45.0, 70.0, 50.0] {
            total += c.on_pointer_move(at(a)).rotation.unwrap();
        }

        assert!((total - (angle(at(20.0)) - angle(at(50.0)))).abs() < 1e-9);
        assert!((c.state().accumulated_rotation() - (before + total)).abs() < 1e-9);
    }

    #[test]
    fn test_snap_corrects_residual() {
        let mut c = controller(4);

        c.on_pointer_down(at(100.0));
        c.on_pointer_move(at(70.0));
        // 30 clockwise is less than half a sector: snap back to where it started
        let outcome = c.on_pointer_up(at(70.0));

        let leftover = outcome.rotation.unwrap();
        assert!((leftover + 30.0).abs() < 1e-9, "{leftover}");
        assert_eq!(c.state().accumulated_rotation(), 45.0);
        assert_eq!(outcome.event, Some(MenuEvent::SelectionChanged(0)));
    }

    #[test]
    fn test_no_snap_leaves_residual() {
        let mut c = controller(4);
        c.set_snap_enabled(false);

        c.on_pointer_down(at(100.0));
        c.on_pointer_move(at(80.0));
        let outcome = c.on_pointer_up(at(80.0));

        assert_eq!(outcome.rotation, None);
        let residual = c.state().accumulated_rotation();
        assert!((residual - 65.0).abs() < 1e-9, "{residual}");
    }

    #[test]
    fn test_raw_delta_jumps_across_seam() {
        let mut c = controller(4);

        c.on_pointer_down(at(350.0));
        let delta = c.on_pointer_move(at(10.0)).rotation.unwrap();

        assert!((delta - (angle(at(350.0)) - angle(at(10.0)))).abs() < 1e-9);
        assert!(delta > 300.0);
    }

    #[test]
    fn test_shortest_delta_across_seam() {
        let mut c = controller(4);
        c.set_delta_mode(DeltaMode::Shortest);

        c.on_pointer_down(at(350.0));
        let delta = c.on_pointer_move(at(10.0)).rotation.unwrap();

        assert!((delta + 20.0).abs() < 1e-9, "{delta}");
    }

    #[test]
    fn test_cancel_restores_pre_drag_state() {
        let mut c = controller(4);
        c.on_pointer_down(at(0.0));
        c.on_pointer_up(at(0.0));
        let top = c.state().top_division();
        let selected = c.selected_index();
        let before = c.state().accumulated_rotation();

        c.on_pointer_down(at(10.0));
        let a = c.on_pointer_move(at(80.0)).rotation.unwrap();
        let b = c.on_pointer_move(at(150.0)).rotation.unwrap();
        let outcome = c.on_pointer_cancel();

        assert_eq!(outcome.event, None);
        assert!((outcome.rotation.unwrap() + a + b).abs() < 1e-9);
        assert_eq!(c.state().accumulated_rotation(), before);
        assert_eq!(c.state().top_division(), top);
        assert_eq!(c.selected_index(), selected);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_idle_moves_and_ups_are_ignored() {
        let mut c = controller(4);

        assert_eq!(c.on_pointer_move(at(45.0)), GestureOutcome::default());
        assert_eq!(c.on_pointer_up(at(45.0)), GestureOutcome::default());
        assert_eq!(c.on_pointer_cancel(), GestureOutcome::default());
        assert_eq!(c.state().accumulated_rotation(), -45.0);
    }

    #[test]
    fn test_repeated_taps_are_not_deduplicated() {
        let mut c = controller(4);
        let mut recorder = Recorder::default();
        let top = Point::new(100.0, 30.0);

        for _ in 0..3 {
            c.on_pointer_down(top);
            if let Some(event) = c.on_pointer_up(top).event {
                event.dispatch(&mut recorder);
            }
        }

        assert_eq!(recorder.clicks, vec![0, 0, 0]);
    }

    #[test]
    fn test_release_without_movement_keeps_selection() {
        let mut c = controller(6);
        let p = at(200.0);

        c.on_pointer_down(p);
        c.on_pointer_up(p);
        assert_eq!(c.selected_index(), 0);
        let top = c.state().top_division();

        c.on_pointer_down(p);
        c.on_pointer_up(p);
        assert_eq!(c.state().top_division(), top);
        assert_eq!(c.selected_index(), 0);
    }

    #[test]
    fn test_initial_top_and_reconfigure() {
        let mut c = controller(4);
        c.set_initial_top(2);
        assert_eq!(c.selected_index(), 2);
        c.set_initial_top(9);
        assert_eq!(c.selected_index(), 2);

        c.on_pointer_down(at(0.0));
        c.configure(DivisionCount::new(8).unwrap());
        assert!(!c.is_dragging());
        assert_eq!(c.selected_index(), 0);
        assert_eq!(c.state().division_angle(), 45);
        assert!(c.viewport().is_known());
    }

    #[test]
    fn test_from_settings() {
        let settings = MenuSettings {
            divisions: 6,
            initial_top: Some(4),
            snap: false,
            delta_mode: DeltaMode::Shortest,
            third_quadrant: ThirdQuadrant::Direct,
        };

        let c = GestureController::from_settings(&settings).unwrap();
        assert_eq!(c.state().division_angle(), 60);
        assert_eq!(c.selected_index(), 4);
        assert!(!c.state().snap_enabled());
        assert_eq!(c.delta_mode(), DeltaMode::Shortest);

        let bad = MenuSettings {
            divisions: 0,
            ..settings
        };
        assert!(GestureController::from_settings(&bad).is_err());
    }
}
