//! Rolling inside a fixed ring gear (hypotrochoid).

use super::{pen_point, tooth_phase, GearOptions, HoleOptions, Rotator, ShapeError, TransformInfo, GEAR_MODULE};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A ring gear: teeth on the inside of an annulus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingGearOptions {
    pub tooth_count: u32,
    /// Radius of the pitch circle the rotating gear rolls on.
    pub pitch_radius: f64,
    /// Outer rim radius, for hosts that draw the ring.
    pub outer_radius: f64,
}

impl RingGearOptions {
    pub fn with_tooth_count(tooth_count: u32) -> Result<Self, ShapeError> {
        if tooth_count == 0 {
            return Err(ShapeError::ToothCount(0));
        }
        let pitch_radius = GEAR_MODULE * f64::from(tooth_count) / 2.0;
        Ok(Self {
            tooth_count,
            pitch_radius,
            outer_radius: pitch_radius + 4.0 * GEAR_MODULE,
        })
    }
}

/// Rotation function for a fixed ring gear.
///
/// The rotating gear is expected to be smaller than the ring; larger gears
/// are an upstream precondition violation, not checked here.
#[derive(Debug, Clone)]
pub struct RingGearRotator {
    fixed: RingGearOptions,
}

impl RingGearRotator {
    pub fn new(fixed: RingGearOptions) -> Self {
        Self { fixed }
    }

    pub fn fixed(&self) -> &RingGearOptions {
        &self.fixed
    }
}

impl Rotator for RingGearRotator {
    fn rotate(
        &self,
        gear: &GearOptions,
        angle_degrees: f64,
        hole: &HoleOptions,
        tooth_offset: u32,
    ) -> TransformInfo {
        let orbit = angle_degrees.to_radians();
        let dist = self.fixed.pitch_radius - gear.pitch_radius;
        let center = Point::new(dist * orbit.cos(), dist * orbit.sin());
        // Internal rolling: the gear counter-spins against the orbit.
        let spin = -orbit * dist / gear.pitch_radius + tooth_phase(gear, tooth_offset);
        TransformInfo {
            center,
            angle: spin.to_degrees(),
            pen: pen_point(center, spin, hole),
        }
    }
}
