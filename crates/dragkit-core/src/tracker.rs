//! Position tracking: maps drag deltas onto a clamped, offset-aware position.

use crate::limits::MovementLimits;
use crate::spring::{SpringBack, SpringSpec};
use kurbo::{Point, Rect, Size, Vec2};
use std::time::Duration;

/// Movement (per axis, from touch-down) a touch must exceed to become a drag.
pub const DEAD_ZONE: f64 = 2.0;

/// Default width/height before the host reports a measured size.
pub const DEFAULT_RENDER_SIZE: f64 = 36.0;

/// Snapshot taken when a drag is granted. Lives only until release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Bounds of the widget at grant time.
    pub start_bounds: Rect,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Dragging(DragSession),
    Reversing(SpringBack),
}

/// Observable tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// At rest.
    Idle,
    /// Following a captured touch.
    Dragging,
    /// Springing back to the origin after release.
    Reversing,
}

/// Owns a widget's offset and moves it in response to grant/move/release.
///
/// The visual translation is `committed + live`: `committed` is the offset
/// folded in by earlier drags (always zero when reversing on release) and
/// `live` is the clamped delta of the current drag or the spring's value.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    origin: Point,
    size: Size,
    limits: MovementLimits,
    should_reverse: bool,
    disabled: bool,
    spring: SpringSpec,
    committed: Vec2,
    live: Vec2,
    phase: Phase,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new(Point::ZERO)
    }
}

impl PositionTracker {
    /// Create a tracker resting at `origin` with the default render size.
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            size: Size::new(DEFAULT_RENDER_SIZE, DEFAULT_RENDER_SIZE),
            limits: MovementLimits::NONE,
            should_reverse: false,
            disabled: false,
            spring: SpringSpec::default(),
            committed: Vec2::ZERO,
            live: Vec2::ZERO,
            phase: Phase::Idle,
        }
    }

    /// Set the initial size (before any layout report).
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the movement limits.
    pub fn with_limits(mut self, limits: MovementLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Spring back to the origin on release instead of committing.
    pub fn with_reverse(mut self, should_reverse: bool) -> Self {
        self.should_reverse = should_reverse;
        self
    }

    /// Set the spring used for spring-back.
    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    /// Disable gesture capture.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Rest position.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Move the rest position. Takes effect for bounds on the next grant.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Last measured size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Record a measured size. An active drag keeps its snapshot.
    pub fn set_size(&mut self, size: Size) {
        if size != self.size {
            log::debug!("Tracker size {:?} -> {:?}", self.size, size);
        }
        self.size = size;
    }

    /// Movement limits.
    pub fn limits(&self) -> MovementLimits {
        self.limits
    }

    /// Replace the movement limits.
    pub fn set_limits(&mut self, limits: MovementLimits) {
        self.limits = limits;
    }

    /// Whether releases spring back instead of committing.
    pub fn should_reverse(&self) -> bool {
        self.should_reverse
    }

    /// Switch between commit-on-release and spring-back-on-release.
    ///
    /// Switching to spring-back springs the committed offset home, at once
    /// when idle or on release when a drag is in progress. Switching
    /// back mid-spring commits wherever the spring has got to.
    pub fn set_should_reverse(&mut self, should_reverse: bool) {
        if self.should_reverse == should_reverse {
            return;
        }
        self.should_reverse = should_reverse;

        if should_reverse {
            // Mid-drag, the session bounds still include the committed
            // offset; release folds it in
            if !matches!(self.phase, Phase::Dragging(_)) {
                self.start_reversing();
            }
        } else if matches!(self.phase, Phase::Reversing(_)) {
            // Stop where the spring is and keep it
            self.commit_offset();
            self.phase = Phase::Idle;
        }
    }

    /// Whether gesture capture is suppressed.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Suppress or allow gesture capture.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Current observable state.
    pub fn state(&self) -> TrackerState {
        match self.phase {
            Phase::Idle => TrackerState::Idle,
            Phase::Dragging(_) => TrackerState::Dragging,
            Phase::Reversing(_) => TrackerState::Reversing,
        }
    }

    /// The active drag session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            Phase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Offset persisted by earlier drags.
    pub fn committed_offset(&self) -> Vec2 {
        self.committed
    }

    /// Translation to apply to the widget.
    pub fn position(&self) -> Vec2 {
        self.committed + self.live
    }

    /// Absolute rectangle from origin, committed offset and measured size.
    pub fn bounds(&self) -> Rect {
        let top_left = self.origin + self.committed;
        Rect::from_origin_size(top_left, self.size)
    }

    /// Classify a touch: true once it has moved past the dead zone.
    pub fn should_capture(&self, delta: Vec2) -> bool {
        !self.disabled && (delta.x.abs() > DEAD_ZONE || delta.y.abs() > DEAD_ZONE)
    }

    /// Fold the live offset into the committed offset and continue from zero.
    pub fn commit_offset(&mut self) {
        self.committed += self.live;
        self.live = Vec2::ZERO;
    }

    /// Start a drag session, cancelling any spring-back in flight.
    pub fn grant(&mut self) {
        if let Phase::Reversing(spring) = &self.phase {
            log::debug!("Spring-back interrupted at {:?}", spring.position());
        }
        if !self.should_reverse {
            self.commit_offset();
        }
        let session = DragSession {
            start_bounds: self.bounds(),
        };
        log::debug!("Drag granted, start bounds {:?}", session.start_bounds);
        self.phase = Phase::Dragging(session);
    }

    /// Apply a gesture delta (since grant). Returns the new position, or
    /// `None` if no drag session exists.
    pub fn drag_to(&mut self, delta: Vec2) -> Option<Vec2> {
        let Phase::Dragging(session) = &self.phase else {
            log::debug!("Ignoring drag delta {:?} outside a drag session", delta);
            return None;
        };
        self.live = self.limits.clamp_delta(delta, session.start_bounds);
        Some(self.position())
    }

    /// End the drag session: commit, or start springing back.
    pub fn release(&mut self) -> TrackerState {
        if !matches!(self.phase, Phase::Dragging(_)) {
            log::debug!("Ignoring release outside a drag session");
            return self.state();
        }

        if self.should_reverse {
            self.start_reversing();
        } else {
            self.commit_offset();
            self.phase = Phase::Idle;
            log::debug!("Drag committed at {:?}", self.committed);
        }
        self.state()
    }

    /// Advance a spring-back by `dt`. Returns the new position while reversing.
    pub fn tick(&mut self, dt: Duration) -> Option<Vec2> {
        let Phase::Reversing(spring) = &mut self.phase else {
            return None;
        };
        self.live = spring.advance(dt);
        if spring.is_settled() {
            self.live = Vec2::ZERO;
            self.phase = Phase::Idle;
            log::debug!("Spring-back settled");
        }
        Some(self.position())
    }

    fn start_reversing(&mut self) {
        self.live += self.committed;
        self.committed = Vec2::ZERO;
        let spring = SpringBack::to_origin(self.live, self.spring);
        if spring.is_settled() {
            self.live = Vec2::ZERO;
            self.phase = Phase::Idle;
        } else {
            log::debug!("Springing back from {:?}", self.live);
            self.phase = Phase::Reversing(spring);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn settle(tracker: &mut PositionTracker) {
        for _ in 0..2000 {
            if tracker.tick(FRAME).is_none() {
                return;
            }
        }
        panic!("spring never settled");
    }

    #[test]
    fn test_unclamped_drag_follows_delta() {
        let mut tracker = PositionTracker::new(Point::new(10.0, 20.0));
        tracker.grant();
        for &(dx, dy) in &[(3.0, 0.0), (-250.0, 99.5), (1e6, -1e6)] {
            let pos = tracker.drag_to(Vec2::new(dx, dy)).unwrap();
            assert_eq!(pos, Vec2::new(dx, dy));
        }
    }

    #[test]
    fn test_max_x_scenario() {
        let mut tracker = PositionTracker::new(Point::ZERO)
            .with_size(Size::new(36.0, 36.0))
            .with_limits(MovementLimits {
                max_x: Some(50.0),
                ..Default::default()
            });
        tracker.grant();
        let pos = tracker.drag_to(Vec2::new(100.0, 0.0)).unwrap();
        assert!((pos.x - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_min_and_y_limits() {
        let mut tracker = PositionTracker::new(Point::new(100.0, 100.0))
            .with_limits(MovementLimits::new(Some(80.0), Some(60.0), None, Some(200.0)));
        tracker.grant();

        let pos = tracker.drag_to(Vec2::new(-500.0, -500.0)).unwrap();
        assert!((pos.x - -20.0).abs() < f64::EPSILON);
        assert!((pos.y - -40.0).abs() < f64::EPSILON);

        let pos = tracker.drag_to(Vec2::new(0.0, 500.0)).unwrap();
        assert!((pos.y - 64.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_repeated_move_is_idempotent() {
        let mut tracker = PositionTracker::default().with_limits(MovementLimits {
            max_x: Some(50.0),
            ..Default::default()
        });
        tracker.grant();
        let first = tracker.drag_to(Vec2::new(70.0, 5.0));
        let second = tracker.drag_to(Vec2::new(70.0, 5.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_dead_zone() {
        let tracker = PositionTracker::default();
        assert!(!tracker.should_capture(Vec2::new(2.0, -2.0)));
        assert!(!tracker.should_capture(Vec2::new(-1.5, 0.0)));
        assert!(tracker.should_capture(Vec2::new(2.01, 0.0)));
        assert!(tracker.should_capture(Vec2::new(0.0, -3.0)));
    }

    #[test]
    fn test_disabled_never_captures() {
        let tracker = PositionTracker::default().with_disabled(true);
        assert!(!tracker.should_capture(Vec2::new(500.0, 500.0)));
    }

    #[test]
    fn test_move_without_session_is_ignored() {
        let mut tracker = PositionTracker::default();
        assert_eq!(tracker.drag_to(Vec2::new(30.0, 30.0)), None);
        assert_eq!(tracker.position(), Vec2::ZERO);
        assert_eq!(tracker.release(), TrackerState::Idle);
    }

    #[test]
    fn test_commit_is_cumulative() {
        let mut tracker = PositionTracker::new(Point::new(5.0, 5.0));

        tracker.grant();
        tracker.drag_to(Vec2::new(20.0, 10.0));
        assert_eq!(tracker.release(), TrackerState::Idle);
        assert_eq!(tracker.position(), Vec2::new(20.0, 10.0));

        tracker.grant();
        let start = tracker.session().unwrap().start_bounds;
        assert_eq!(start, Rect::new(25.0, 15.0, 61.0, 51.0));

        let pos = tracker.drag_to(Vec2::new(-5.0, 1.0)).unwrap();
        assert_eq!(pos, Vec2::new(15.0, 11.0));
        tracker.release();
        assert_eq!(tracker.committed_offset(), Vec2::new(15.0, 11.0));
    }

    #[test]
    fn test_limits_apply_to_committed_position() {
        let mut tracker = PositionTracker::new(Point::ZERO).with_limits(MovementLimits {
            max_x: Some(50.0),
            ..Default::default()
        });

        tracker.grant();
        tracker.drag_to(Vec2::new(10.0, 0.0));
        tracker.release();

        tracker.grant();
        let pos = tracker.drag_to(Vec2::new(100.0, 0.0)).unwrap();
        assert!((pos.x - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reverse_springs_home() {
        let mut tracker = PositionTracker::new(Point::new(40.0, 40.0)).with_reverse(true);

        tracker.grant();
        tracker.drag_to(Vec2::new(60.0, -30.0));
        assert_eq!(tracker.release(), TrackerState::Reversing);

        let first = tracker.tick(FRAME).unwrap();
        assert!(first.hypot() < Vec2::new(60.0, -30.0).hypot());

        settle(&mut tracker);
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.position(), Vec2::ZERO);
    }

    #[test]
    fn test_reverse_grant_uses_original_bounds() {
        let mut tracker = PositionTracker::new(Point::new(40.0, 40.0)).with_reverse(true);
        let original = tracker.bounds();

        tracker.grant();
        tracker.drag_to(Vec2::new(60.0, -30.0));
        tracker.release();
        tracker.tick(FRAME);

        // Interrupt the spring mid-flight
        tracker.grant();
        assert_eq!(tracker.state(), TrackerState::Dragging);
        assert_eq!(tracker.session().unwrap().start_bounds, original);

        let pos = tracker.drag_to(Vec2::new(5.0, 5.0)).unwrap();
        assert_eq!(pos, Vec2::new(5.0, 5.0));
        assert_eq!(tracker.tick(FRAME), None);
    }

    #[test]
    fn test_grant_keeps_spring_value_until_first_move() {
        let mut tracker = PositionTracker::default().with_reverse(true);
        tracker.grant();
        tracker.drag_to(Vec2::new(100.0, 0.0));
        tracker.release();
        let mid = tracker.tick(FRAME).unwrap();

        tracker.grant();
        assert_eq!(tracker.position(), mid);
    }

    #[test]
    fn test_size_change_applies_on_next_grant() {
        let mut tracker = PositionTracker::new(Point::ZERO).with_limits(MovementLimits {
            max_x: Some(100.0),
            ..Default::default()
        });

        tracker.grant();
        tracker.set_size(Size::new(80.0, 80.0));
        let pos = tracker.drag_to(Vec2::new(500.0, 0.0)).unwrap();
        assert!((pos.x - 64.0).abs() < f64::EPSILON);
        tracker.release();

        tracker.grant();
        assert_eq!(tracker.session().unwrap().start_bounds.width(), 80.0);
        let pos = tracker.drag_to(Vec2::new(500.0, 0.0)).unwrap();
        assert!((pos.x - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_switching_to_reverse_springs_committed_offset_home() {
        let mut tracker = PositionTracker::default();
        tracker.grant();
        tracker.drag_to(Vec2::new(30.0, 30.0));
        tracker.release();

        tracker.set_should_reverse(true);
        assert_eq!(tracker.state(), TrackerState::Reversing);
        assert_eq!(tracker.committed_offset(), Vec2::ZERO);
        assert_eq!(tracker.position(), Vec2::new(30.0, 30.0));

        settle(&mut tracker);
        assert_eq!(tracker.position(), Vec2::ZERO);
        assert_eq!(tracker.bounds().origin(), Point::ZERO);
    }

    #[test]
    fn test_switching_to_reverse_mid_drag_keeps_clamp() {
        let mut tracker = PositionTracker::new(Point::new(100.0, 0.0))
            .with_limits(MovementLimits::new(None, None, Some(200.0), None));
        tracker.grant();
        tracker.drag_to(Vec2::new(-50.0, 0.0));
        tracker.release();

        tracker.grant();
        tracker.set_should_reverse(true);
        assert_eq!(tracker.state(), TrackerState::Dragging);
        let pos = tracker.drag_to(Vec2::new(1000.0, 0.0)).unwrap();
        assert!((pos.x - 64.0).abs() < f64::EPSILON);
        let right = tracker.origin().x + pos.x + tracker.size().width;
        assert!(right <= 200.0);

        assert_eq!(tracker.release(), TrackerState::Reversing);
        assert_eq!(tracker.committed_offset(), Vec2::ZERO);
        assert!((tracker.position().x - 64.0).abs() < f64::EPSILON);
        settle(&mut tracker);
        assert_eq!(tracker.position(), Vec2::ZERO);
    }

    #[test]
    fn test_switching_off_reverse_mid_spring_commits() {
        let mut tracker = PositionTracker::default().with_reverse(true);
        tracker.grant();
        tracker.drag_to(Vec2::new(40.0, 0.0));
        tracker.release();
        tracker.tick(FRAME);
        let midway = tracker.position();
        assert!(midway.x > 0.0 && midway.x < 40.0);

        tracker.set_should_reverse(false);
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.committed_offset(), midway);
        assert_eq!(tracker.tick(FRAME), None);
        assert_eq!(tracker.position(), midway);
    }

    #[test]
    fn test_release_at_origin_in_reverse_mode_is_idle() {
        let mut tracker = PositionTracker::default().with_reverse(true);
        tracker.grant();
        assert_eq!(tracker.release(), TrackerState::Idle);
    }
}
