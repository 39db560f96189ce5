//! Stroke emission seam.
//!
//! The motion core never draws; it hands pen segments (already in canvas
//! coordinates) to whatever sink the host wires in.

use kurbo::Point;

/// Receives consecutive pen segments while the pen is down.
pub trait StrokeSink {
    fn draw_segment(&mut self, from: Point, to: Point);
}

/// Sink that collects segments into memory.
///
/// Hosts can flush the collected polyline to their renderer each frame;
/// tests inspect it directly.
#[derive(Debug, Clone, Default)]
pub struct PolylineSink {
    pub segments: Vec<(Point, Point)>,
}

impl PolylineSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

impl StrokeSink for PolylineSink {
    fn draw_segment(&mut self, from: Point, to: Point) {
        self.segments.push((from, to));
    }
}

/// Sink that discards everything, for headless pose updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StrokeSink for NullSink {
    fn draw_segment(&mut self, _from: Point, _to: Point) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_sink_collects_in_order() {
        let mut sink = PolylineSink::new();
        sink.draw_segment(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        sink.draw_segment(Point::new(1.0, 0.0), Point::new(1.0, 1.0));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.segments[1].0, Point::new(1.0, 0.0));
        sink.clear();
        assert!(sink.is_empty());
    }
}
