//! Movement limits and the hard clamp applied to drag deltas.

use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Optional absolute screen-coordinate constraints on where a widget's
/// bounds may travel.
///
/// `min_x <= max_x` and `min_y <= max_y` are expected but not checked;
/// inverted limits produce degenerate clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementLimits {
    /// Leftmost allowed `bounds.x0`.
    pub min_x: Option<f64>,
    /// Topmost allowed `bounds.y0`.
    pub min_y: Option<f64>,
    /// Rightmost allowed `bounds.x1`.
    pub max_x: Option<f64>,
    /// Bottommost allowed `bounds.y1`.
    pub max_y: Option<f64>,
}

impl MovementLimits {
    /// No limits on either axis.
    pub const NONE: Self = Self {
        min_x: None,
        min_y: None,
        max_x: None,
        max_y: None,
    };

    /// Create limits from optional edges.
    pub fn new(
        min_x: Option<f64>,
        min_y: Option<f64>,
        max_x: Option<f64>,
        max_y: Option<f64>,
    ) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Check if any edge is constrained.
    pub fn is_constrained(&self) -> bool {
        self.min_x.is_some() || self.min_y.is_some() || self.max_x.is_some() || self.max_y.is_some()
    }

    /// Clamp a raw gesture delta so that `start_bounds` translated by the
    /// result stays inside the limits.
    ///
    /// Travel past an edge has no further effect until the pointer comes
    /// back into the permitted region.
    pub fn clamp_delta(&self, delta: Vec2, start_bounds: Rect) -> Vec2 {
        let lo_x = self.min_x.map_or(f64::NEG_INFINITY, |min| min - start_bounds.x0);
        let hi_x = self.max_x.map_or(f64::INFINITY, |max| max - start_bounds.x1);
        let lo_y = self.min_y.map_or(f64::NEG_INFINITY, |min| min - start_bounds.y0);
        let hi_y = self.max_y.map_or(f64::INFINITY, |max| max - start_bounds.y1);

        Vec2::new(clamp(delta.x, lo_x, hi_x), clamp(delta.y, lo_y, hi_y))
    }
}

/// `max(lo, min(v, hi))`.
///
/// Unlike `f64::clamp` this never panics when `lo > hi`; the lower bound wins.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(v.min(hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_at_origin() -> Rect {
        Rect::new(0.0, 0.0, 36.0, 36.0)
    }

    #[test]
    fn test_no_limits_passthrough() {
        let limits = MovementLimits::NONE;
        for &(dx, dy) in &[(0.0, 0.0), (1e9, -1e9), (-37.5, 12.25)] {
            let out = limits.clamp_delta(Vec2::new(dx, dy), square_at_origin());
            assert_eq!(out, Vec2::new(dx, dy));
        }
    }

    #[test]
    fn test_max_x_clamp() {
        let limits = MovementLimits {
            max_x: Some(50.0),
            ..Default::default()
        };
        let out = limits.clamp_delta(Vec2::new(100.0, 0.0), square_at_origin());
        assert!((out.x - 14.0).abs() < f64::EPSILON);

        // Further travel has no further effect
        let out = limits.clamp_delta(Vec2::new(10_000.0, 0.0), square_at_origin());
        assert!((out.x - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_min_x_clamp() {
        let limits = MovementLimits {
            min_x: Some(-20.0),
            ..Default::default()
        };
        let bounds = Rect::new(10.0, 0.0, 46.0, 36.0);
        let out = limits.clamp_delta(Vec2::new(-500.0, 3.0), bounds);
        assert!((out.x - -30.0).abs() < f64::EPSILON);
        assert!((out.y - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_y_axis_clamps() {
        let limits = MovementLimits {
            min_y: Some(0.0),
            max_y: Some(100.0),
            ..Default::default()
        };
        let bounds = Rect::new(0.0, 10.0, 36.0, 46.0);

        let down = limits.clamp_delta(Vec2::new(0.0, 80.0), bounds);
        assert!((down.y - 54.0).abs() < f64::EPSILON);

        let up = limits.clamp_delta(Vec2::new(0.0, -80.0), bounds);
        assert!((up.y - -10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_within_limits_unchanged() {
        let limits = MovementLimits::new(Some(-100.0), Some(-100.0), Some(100.0), Some(100.0));
        let out = limits.clamp_delta(Vec2::new(20.0, -30.0), square_at_origin());
        assert_eq!(out, Vec2::new(20.0, -30.0));
    }

    #[test]
    fn test_reentering_region_tracks_again() {
        let limits = MovementLimits {
            max_x: Some(50.0),
            ..Default::default()
        };
        let past = limits.clamp_delta(Vec2::new(300.0, 0.0), square_at_origin());
        let back = limits.clamp_delta(Vec2::new(5.0, 0.0), square_at_origin());
        assert!((past.x - 14.0).abs() < f64::EPSILON);
        assert!((back.x - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_limits_do_not_panic() {
        let limits = MovementLimits {
            min_x: Some(100.0),
            max_x: Some(0.0),
            ..Default::default()
        };
        let out = limits.clamp_delta(Vec2::new(5.0, 0.0), square_at_origin());
        assert!((out.x - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_constrained() {
        assert!(!MovementLimits::NONE.is_constrained());
        assert!(MovementLimits::new(None, None, None, Some(1.0)).is_constrained());
    }
}
