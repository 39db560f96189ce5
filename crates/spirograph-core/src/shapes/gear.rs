//! Rolling around the outside of a fixed gear (epitrochoid).

use super::{pen_point, tooth_phase, GearOptions, HoleOptions, Rotator, TransformInfo};
use kurbo::Point;

/// Rotation function for a plain fixed gear.
#[derive(Debug, Clone)]
pub struct GearRotator {
    fixed: GearOptions,
}

impl GearRotator {
    pub fn new(fixed: GearOptions) -> Self {
        Self { fixed }
    }

    pub fn fixed(&self) -> &GearOptions {
        &self.fixed
    }
}

impl Rotator for GearRotator {
    fn rotate(
        &self,
        gear: &GearOptions,
        angle_degrees: f64,
        hole: &HoleOptions,
        tooth_offset: u32,
    ) -> TransformInfo {
        let orbit = angle_degrees.to_radians();
        let dist = self.fixed.pitch_radius + gear.pitch_radius;
        let center = Point::new(dist * orbit.cos(), dist * orbit.sin());
        // External rolling: the gear spins in the orbit direction, scaled by
        // the ratio of the orbit radius to its own pitch radius.
        let spin = orbit * dist / gear.pitch_radius + tooth_phase(gear, tooth_offset);
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

    fn setup() -> (GearRotator, GearOptions) {
        let fixed = GearOptions::with_tooth_count(96).unwrap();
        let rotating = GearOptions::with_tooth_count(48).unwrap();
        (GearRotator::new(fixed), rotating)
    }

    #[test]
    fn test_center_orbits_at_summed_radii() {
        let (rotator, gear) = setup();
        let info = rotator.rotate(&gear, 0.0, &HoleOptions::CENTER, 0);
        assert!((info.center.x - 72.0).abs() < 1e-9); // 48 + 24
        assert!(info.center.y.abs() < 1e-9);

        let quarter = rotator.rotate(&gear, 90.0, &HoleOptions::CENTER, 0);
        assert!(quarter.center.x.abs() < 1e-9);
        assert!((quarter.center.y - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_hole_pen_rides_the_center() {
        let (rotator, gear) = setup();
        let info = rotator.rotate(&gear, 33.0, &HoleOptions::CENTER, 0);
        assert!((info.pen - info.center).hypot() < 1e-9);
    }

    #[test]
    fn test_tooth_offset_spins_pen_only() {
        let (rotator, gear) = setup();
        let hole = HoleOptions::new(Vec2::new(10.0, 0.0));
        let a = rotator.rotate(&gear, 15.0, &hole, 0);
        let b = rotator.rotate(&gear, 15.0, &hole, 12); // a quarter of 48 teeth
        assert!((a.center - b.center).hypot() < 1e-9);
        assert!((b.angle - a.angle - 90.0).abs() < 1e-9);
        assert!((a.pen - b.pen).hypot() > 1.0);
    }

    #[test]
    fn test_spin_ratio() {
        let (rotator, gear) = setup();
        // dist/r = 72/24 = 3: one orbit degree is three spin degrees.
        let info = rotator.rotate(&gear, 10.0, &HoleOptions::CENTER, 0);
        assert!((info.angle - 30.0).abs() < 1e-9);
    }
}
