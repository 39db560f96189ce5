//! Logical/canvas coordinate mapping.
//!
//! The motion core works in a logical frame: y-up, origin at the fixed
//! shape's center. The output canvas is y-down with the origin at its
//! top-left corner. The viewport converts between the two.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Maps logical coordinates onto an output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Output canvas size in pixels.
    pub canvas_size: Size,
    /// Canvas pixels per logical unit.
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(1000.0, 1000.0),
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(canvas_size: Size, scale: f64) -> Self {
        Self { canvas_size, scale }
    }

    /// Canvas point of the logical origin.
    pub fn canvas_center(&self) -> Point {
        Point::new(self.canvas_size.width / 2.0, self.canvas_size.height / 2.0)
    }

    /// Convert a logical point (y-up, centered) to canvas pixels (y-down).
    pub fn to_canvas(&self, logical: Point) -> Point {
        let center = self.canvas_center();
        Point::new(
            center.x + logical.x * self.scale,
            center.y - logical.y * self.scale,
        )
    }

    /// Convert a canvas pixel position back into the logical frame.
    pub fn to_logical(&self, canvas: Point) -> Point {
        let center = self.canvas_center();
        Point::new(
            (canvas.x - center.x) / self.scale,
            (center.y - canvas.y) / self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_canvas_center() {
        let vp = Viewport::new(Size::new(800.0, 600.0), 2.0);
        let c = vp.to_canvas(Point::ZERO);
        assert!((c.x - 400.0).abs() < f64::EPSILON);
        assert!((c.y - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_y_axis_flips() {
        let vp = Viewport::new(Size::new(100.0, 100.0), 1.0);
        let up = vp.to_canvas(Point::new(0.0, 10.0));
        assert!((up.y - 40.0).abs() < f64::EPSILON); // above center on screen
    }

    #[test]
    fn test_roundtrip_conversion() {
        let vp = Viewport::new(Size::new(640.0, 480.0), 1.75);
        let original = Point::new(-37.25, 112.5);
        let back = vp.to_logical(vp.to_canvas(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }
}
