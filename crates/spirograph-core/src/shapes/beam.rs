//! Rolling around the outside of a beam.
//!
//! The beam's contact path is a stadium: two straight edges of equal length
//! joined by semicircular ends. The absolute angle parameterizes progress
//! around that path, one full turn per 360 degrees.

use super::{pen_point, tooth_phase, GearOptions, HoleOptions, Rotator, ShapeError, TransformInfo, GEAR_MODULE};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// A fixed beam, described by its contact path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamOptions {
    /// Length of each straight edge.
    pub length: f64,
    /// Radius of the semicircular ends.
    pub end_radius: f64,
}

impl BeamOptions {
    pub fn new(length: f64, end_radius: f64) -> Result<Self, ShapeError> {
        if length < 0.0 {
            return Err(ShapeError::Length(length));
        }
        if end_radius <= 0.0 {
            return Err(ShapeError::Radius(end_radius));
        }
        Ok(Self { length, end_radius })
    }

    /// Build a beam from tooth counts: teeth along one straight edge and
    /// teeth around one semicircular end, on the shared module.
    pub fn with_tooth_counts(edge_teeth: u32, end_teeth: u32) -> Result<Self, ShapeError> {
        if end_teeth == 0 {
            return Err(ShapeError::ToothCount(0));
        }
        let circular_pitch = PI * GEAR_MODULE;
        Self::new(
            f64::from(edge_teeth) * circular_pitch,
            f64::from(end_teeth) * circular_pitch / PI,
        )
    }

    /// Total length of the contact path.
    pub fn perimeter(&self) -> f64 {
        2.0 * self.length + TAU * self.end_radius
    }
}

/// Rotation function for a fixed beam.
#[derive(Debug, Clone)]
pub struct BeamRotator {
    fixed: BeamOptions,
}

impl BeamRotator {
    pub fn new(fixed: BeamOptions) -> Self {
        Self { fixed }
    }

    pub fn fixed(&self) -> &BeamOptions {
        &self.fixed
    }

    /// Gear center and accumulated tangent turn at contact arc length `s`,
    /// for a gear of pitch radius `r`. `s` must be in `[0, perimeter)`.
    ///
    /// The path runs counterclockwise: left-to-right along the bottom edge,
    /// around the right end, right-to-left along the top, around the left end.
    fn center_at(&self, s: f64, r: f64) -> (Point, f64) {
        let len = self.fixed.length;
        let rho = self.fixed.end_radius;
        let half = len / 2.0;
        let arc = PI * rho;

        if s < len {
            (Point::new(-half + s, -(rho + r)), 0.0)
        } else if s < len + arc {
            let alpha = (s - len) / rho;
            let beta = -PI / 2.0 + alpha;
            let (sin, cos) = beta.sin_cos();
            (Point::new(half + (rho + r) * cos, (rho + r) * sin), alpha)
        } else if s < 2.0 * len + arc {
            let t = s - len - arc;
            (Point::new(half - t, rho + r), PI)
        } else {
            let alpha = (s - 2.0 * len - arc) / rho;
            let beta = PI / 2.0 + alpha;
            let (sin, cos) = beta.sin_cos();
            (Point::new(-half + (rho + r) * cos, (rho + r) * sin), PI + alpha)
        }
    }
}

impl Rotator for BeamRotator {
    fn rotate(
        &self,
        gear: &GearOptions,
        angle_degrees: f64,
        hole: &HoleOptions,
        tooth_offset: u32,
    ) -> TransformInfo {
        let perimeter = self.fixed.perimeter();
        let s_total = angle_degrees / 360.0 * perimeter;
        let loops = (s_total / perimeter).floor();
        let s = s_total - loops * perimeter;

        let (center, tangent_turn) = self.center_at(s, gear.pitch_radius);
        // Rolling outside a convex path: spin is the rolled arc over the
        // gear radius plus the turning of the path tangent.
        let spin = s_total / gear.pitch_radius
            + loops * TAU
            + tangent_turn
            + tooth_phase(gear, tooth_offset);
        TransformInfo {
            center,
            angle: spin.to_degrees(),
            pen: pen_point(center, spin, hole),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn setup() -> (BeamRotator, GearOptions) {
        let beam = BeamOptions::with_tooth_counts(40, 12).unwrap();
        let gear = GearOptions::with_tooth_count(30).unwrap();
        (BeamRotator::new(beam), gear)
    }

    #[test]
    fn test_perimeter() {
        let beam = BeamOptions::new(50.0, 10.0).unwrap();
        assert!((beam.perimeter() - (100.0 + TAU * 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_start_of_path_is_bottom_left() {
        let (rotator, gear) = setup();
        let info = rotator.rotate(&gear, 0.0, &HoleOptions::CENTER, 0);
        let expected_y = -(rotator.fixed().end_radius + gear.pitch_radius);
        assert!((info.center.x + rotator.fixed().length / 2.0).abs() < 1e-9);
        assert!((info.center.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn test_full_turn_returns_to_start() {
        let (rotator, gear) = setup();
        let hole = HoleOptions::new(Vec2::new(5.0, -2.0));
        let a = rotator.rotate(&gear, 17.0, &hole, 3);
        let b = rotator.rotate(&gear, 17.0 + 360.0, &hole, 3);
        assert!((a.center - b.center).hypot() < 1e-9);
        assert!((b.angle - a.angle - (rotator.fixed().perimeter() / gear.pitch_radius).to_degrees() - 360.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_path_is_continuous() {
        let (rotator, gear) = setup();
        let mut prev = rotator.rotate(&gear, 0.0, &HoleOptions::CENTER, 0);
        // Half a degree of path parameter moves the contact point perimeter/720;
        // on the end arcs the center is faster by (end_radius + r) / end_radius.
        let bound = rotator.fixed().perimeter() / 720.0
            * (1.0 + gear.pitch_radius / rotator.fixed().end_radius)
            + 1e-9;
        for i in 1..=720 {
            let info = rotator.rotate(&gear, f64::from(i) * 0.5, &HoleOptions::CENTER, 0);
            let step = (info.center - prev.center).hypot();
            assert!(step < bound, "jump at sample {i}: {step}");
            prev = info;
        }
    }

    #[test]
    fn test_negative_angles_walk_the_path_backward() {
        let (rotator, gear) = setup();
        let forward = rotator.rotate(&gear, -90.0, &HoleOptions::CENTER, 0);
        let wrapped = rotator.rotate(&gear, 270.0, &HoleOptions::CENTER, 0);
        assert!((forward.center - wrapped.center).hypot() < 1e-9);
    }

    #[test]
    fn test_beam_validation() {
        assert_eq!(BeamOptions::new(-1.0, 5.0), Err(ShapeError::Length(-1.0)));
        assert_eq!(BeamOptions::new(10.0, 0.0), Err(ShapeError::Radius(0.0)));
        assert_eq!(BeamOptions::with_tooth_counts(10, 0), Err(ShapeError::ToothCount(0)));
    }
}
