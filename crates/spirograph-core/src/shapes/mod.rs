//! Gear shapes and rotation geometry.
//!
//! The motion state machine only sees the [`Rotator`] seam: a rotation
//! function from `(gear, absolute angle, hole, tooth offset)` to a
//! [`TransformInfo`] pose. One rotator exists per fixed-shape variant.

mod beam;
mod gear;
mod ring;

pub use beam::{BeamOptions, BeamRotator};
pub use gear::GearRotator;
pub use ring::{RingGearOptions, RingGearRotator};

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use thiserror::Error;

/// Logical units of pitch diameter per tooth. All gears share it so that
/// equal tooth spacing meshes across shapes.
pub const GEAR_MODULE: f64 = 1.0;

/// Shape construction errors.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("tooth count must be a positive integer, got {0}")]
    ToothCount(i64),
    #[error("radius must be positive, got {0}")]
    Radius(f64),
    #[error("beam length must not be negative, got {0}")]
    Length(f64),
    #[error("{shape} takes {expected} size parameter(s), got {got}")]
    SizeCount {
        shape: &'static str,
        expected: usize,
        got: usize,
    },
}

/// The fixed shape the rotating gear meshes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixedShapeKind {
    Gear,
    RingGear,
    Beam,
}

/// A toothed gear: tooth count, derived radii, and its pen holes.
///
/// Immutable once built; reconfiguration replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearOptions {
    pub tooth_count: u32,
    pub pitch_radius: f64,
    pub outer_radius: f64,
    pub holes: Vec<HoleOptions>,
}

impl GearOptions {
    /// Build a gear from its tooth count. Radii follow the shared module;
    /// pen holes are laid out on an inward spiral from the rim.
    pub fn with_tooth_count(tooth_count: u32) -> Result<Self, ShapeError> {
        if tooth_count == 0 {
            return Err(ShapeError::ToothCount(0));
        }
        let pitch_radius = GEAR_MODULE * f64::from(tooth_count) / 2.0;
        Ok(Self {
            tooth_count,
            pitch_radius,
            outer_radius: pitch_radius + GEAR_MODULE,
            holes: hole_spiral(pitch_radius),
        })
    }

    /// The hole selected by default after a gear swap.
    pub fn default_hole(&self) -> HoleOptions {
        self.holes.first().copied().unwrap_or(HoleOptions::CENTER)
    }

    /// Angular size of one tooth, in degrees.
    pub fn tooth_step_degrees(&self) -> f64 {
        360.0 / f64::from(self.tooth_count)
    }
}

/// A pen hole, as an offset from the gear center in the gear's own frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleOptions {
    pub offset: Vec2,
}

impl HoleOptions {
    pub const CENTER: Self = Self { offset: Vec2::ZERO };

    pub fn new(offset: Vec2) -> Self {
        Self { offset }
    }
}

/// One pose of the rotating gear: where its center sits, how far it has
/// spun about its own axis, and where the selected pen hole ended up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformInfo {
    /// Gear center in logical coordinates.
    pub center: Point,
    /// Gear spin about its own axis, in degrees.
    pub angle: f64,
    /// Pen tip in logical coordinates.
    pub pen: Point,
}

/// Rotation function over one fixed-shape variant.
///
/// `angle_degrees` is the unwrapped absolute angle; `tooth_offset` is the
/// meshing phase in whole teeth and must already be reduced modulo the
/// gear's tooth count.
pub trait Rotator {
    fn rotate(
        &self,
        gear: &GearOptions,
        angle_degrees: f64,
        hole: &HoleOptions,
        tooth_offset: u32,
    ) -> TransformInfo;
}

/// Build the rotator for a fixed shape from raw size parameters, as they
/// arrive on a gear-selection event.
pub fn build_rotator(
    kind: FixedShapeKind,
    sizes: &[f64],
) -> Result<Box<dyn Rotator>, ShapeError> {
    match kind {
        FixedShapeKind::Gear => {
            let teeth = tooth_count_param("fixed gear", sizes, 0, 1)?;
            Ok(Box::new(GearRotator::new(GearOptions::with_tooth_count(teeth)?)))
        }
        FixedShapeKind::RingGear => {
            let teeth = tooth_count_param("ring gear", sizes, 0, 1)?;
            Ok(Box::new(RingGearRotator::new(RingGearOptions::with_tooth_count(teeth)?)))
        }
        FixedShapeKind::Beam => {
            let edge = tooth_count_param("beam", sizes, 0, 2)?;
            let end = tooth_count_param("beam", sizes, 1, 2)?;
            Ok(Box::new(BeamRotator::new(BeamOptions::with_tooth_counts(edge, end)?)))
        }
    }
}

fn tooth_count_param(
    shape: &'static str,
    sizes: &[f64],
    index: usize,
    expected: usize,
) -> Result<u32, ShapeError> {
    let raw = *sizes.get(index).ok_or(ShapeError::SizeCount {
        shape,
        expected,
        got: sizes.len(),
    })?;
    let teeth = raw as i64;
    if teeth < 1 || raw.fract() != 0.0 {
        return Err(ShapeError::ToothCount(teeth));
    }
    Ok(teeth as u32)
}

/// Extra spin contributed by the meshing phase, in radians.
pub(crate) fn tooth_phase(gear: &GearOptions, tooth_offset: u32) -> f64 {
    f64::from(tooth_offset) * TAU / f64::from(gear.tooth_count)
}

/// Pen position for a gear centered at `center` spun by `spin` radians.
pub(crate) fn pen_point(center: Point, spin: f64, hole: &HoleOptions) -> Point {
    let (sin, cos) = spin.sin_cos();
    Point::new(
        center.x + hole.offset.x * cos - hole.offset.y * sin,
        center.y + hole.offset.x * sin + hole.offset.y * cos,
    )
}

fn hole_spiral(pitch_radius: f64) -> Vec<HoleOptions> {
    const RADIAL_STEP: f64 = 2.5 * GEAR_MODULE;
    const ANGULAR_STEP_DEG: f64 = 25.0;

    let mut holes = Vec::new();
    let mut radius = pitch_radius - 2.0 * GEAR_MODULE;
    let mut angle_deg: f64 = 0.0;
    while radius >= 3.0 * GEAR_MODULE {
        let rad = angle_deg.to_radians();
        holes.push(HoleOptions::new(Vec2::new(radius * rad.cos(), radius * rad.sin())));
        radius -= RADIAL_STEP;
        angle_deg += ANGULAR_STEP_DEG;
    }
    if holes.is_empty() {
        // Tiny gears still get a pen hole.
        holes.push(HoleOptions::CENTER);
    }
    holes
}
