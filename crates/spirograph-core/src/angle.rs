//! Angle normalization and multi-turn rotation tracking.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Reduce any finite angle into the canonical range (-180, 180] degrees.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = ((angle % 360.0) + 360.0) % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Angle of `pointer` as seen from `pivot`, in canonical degrees.
///
/// A pointer sitting exactly on the pivot yields `atan2(0, 0) == 0`.
pub fn pointer_angle(pointer: Point, pivot: Point) -> f64 {
    let raw = (pointer.y - pivot.y).atan2(pointer.x - pivot.x);
    normalize_degrees(raw.to_degrees())
}

/// Unwraps a stream of wrapped angle samples into a continuous multi-turn angle.
///
/// Crossings of the +/-180 seam are detected by comparing each sample against
/// the previous one: a jump from below -90 to above +90 is a backward crossing,
/// the mirror jump a forward one. This assumes consecutive samples are never
/// more than 180 degrees apart; faster sampling gaps silently miscount turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationTracker {
    /// Signed number of full turns accumulated so far.
    pub turns: i32,
    /// Most recent wrapped sample, if any.
    pub last_wrapped: Option<f64>,
}

impl RotationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one wrapped sample and return the unwrapped absolute angle.
    pub fn track(&mut self, wrapped: f64) -> f64 {
        if let Some(prev) = self.last_wrapped {
            if prev < -90.0 && wrapped > 90.0 {
                self.turns -= 1;
            } else if prev > 90.0 && wrapped < -90.0 {
                self.turns += 1;
            }
        }
        self.last_wrapped = Some(wrapped);
        wrapped + f64::from(self.turns) * 360.0
    }

    /// Forget all accumulated turns and the last sample.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        for a in [-1e6, -720.5, -540.0, -180.0, -0.0, 0.0, 90.0, 180.0, 359.9, 720.25, 1e6] {
            let n = normalize_degrees(a);
            assert!(n > -180.0 && n <= 180.0, "normalize({a}) = {n} out of range");
        }
    }

    #[test]
    fn test_normalize_idempotent() {
        for a in [-1234.5, -180.0, -90.0, 0.0, 45.0, 180.0, 181.0, 540.0, 9999.0] {
            let once = normalize_degrees(a);
            let twice = normalize_degrees(once);
            assert!((once - twice).abs() < 1e-12, "normalize not idempotent at {a}");
        }
    }

    #[test]
    fn test_normalize_known_values() {
        assert!((normalize_degrees(540.0) - 180.0).abs() < 1e-12);
        assert!((normalize_degrees(-180.0) - 180.0).abs() < 1e-12);
        assert!((normalize_degrees(181.0) + 179.0).abs() < 1e-12);
        assert!((normalize_degrees(-190.0) - 170.0).abs() < 1e-12);
        assert_eq!(normalize_degrees(0.0), 0.0);
    }

    #[test]
    fn test_pointer_angle_quadrants() {
        let pivot = Point::new(10.0, 10.0);
        assert!((pointer_angle(Point::new(20.0, 10.0), pivot) - 0.0).abs() < 1e-12);
        assert!((pointer_angle(Point::new(10.0, 20.0), pivot) - 90.0).abs() < 1e-12);
        assert!((pointer_angle(Point::new(0.0, 10.0), pivot) - 180.0).abs() < 1e-12);
        assert!((pointer_angle(Point::new(10.0, 0.0), pivot) + 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_at_pivot_is_zero() {
        let p = Point::new(3.0, -4.0);
        assert_eq!(pointer_angle(p, p), 0.0);
    }

    #[test]
    fn test_wrap_backward_crossing_decrements() {
        let mut tracker = RotationTracker::new();
        tracker.track(-170.0);
        let abs = tracker.track(170.0);
        assert_eq!(tracker.turns, -1);
        assert!((abs + 190.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_forward_crossing_increments() {
        let mut tracker = RotationTracker::new();
        tracker.track(170.0);
        let abs = tracker.track(-170.0);
        assert_eq!(tracker.turns, 1);
        assert!((abs - 190.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_crossing_leaves_turns_alone() {
        let mut tracker = RotationTracker::new();
        for pair in [(-80.0, 80.0), (80.0, -80.0), (10.0, 20.0), (-10.0, -20.0), (100.0, 95.0)] {
            tracker.reset();
            tracker.track(pair.0);
            tracker.track(pair.1);
            assert_eq!(tracker.turns, 0, "pair {pair:?} should not change turns");
        }
    }

    #[test]
    fn test_continuous_sweep_accumulates_turns() {
        let mut tracker = RotationTracker::new();
        let mut last = 0.0;
        // Two and a half forward turns in 30-degree wrapped samples.
        for i in 1..=30 {
            last = tracker.track(normalize_degrees(i as f64 * 30.0));
        }
        assert_eq!(tracker.turns, 2);
        assert!((last - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut tracker = RotationTracker::new();
        tracker.track(170.0);
        tracker.track(-170.0);
        tracker.reset();
        assert_eq!(tracker.turns, 0);
        assert!(tracker.last_wrapped.is_none());
    }
}
