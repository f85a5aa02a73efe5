use std::f64::consts::TAU;

use crate::color::Argb;
use crate::geometry::{DirtyRect, LogicalPoint};
use crate::raster::Raster;
use crate::stroke::{LineCap, PenStroke, stroke_polyline};

/// Segments per unit of arc length; keeps chords under a pixel.
const SEGMENTS_PER_PIXEL: f64 = 1.0;
const MIN_SEGMENTS: usize = 4;
const MAX_SEGMENTS: usize = 2048;

/// A circular arc stroked around a TurtleSpace center.
///
/// `start` is the heading in radians of the arc's first point as seen from
/// the center; `extent` is signed radians, negative sweeping clockwise.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcOp {
    center: LogicalPoint,
    radius: f64,
    start: f64,
    extent: f64,
    color: Argb,
    pen: PenStroke,
}

impl ArcOp {
    pub fn new(center: LogicalPoint, radius: f64, start: f64, extent: f64, color: Argb, width: u32) -> Self {
        Self {
            center,
            radius: radius.abs(),
            start,
            extent: extent.clamp(-TAU, TAU),
            color,
            pen: PenStroke { width: width.max(1), pattern: None, cap: LineCap::Butt },
        }
    }

    pub fn with_pattern(mut self, pattern: Option<Vec<f32>>) -> Self {
        self.pen.pattern = pattern;
        self
    }

    pub fn center(&self) -> LogicalPoint {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    fn polyline(&self, cx: f64, cy: f64) -> Vec<(f64, f64)> {
        let n = ((self.extent.abs() * self.radius * SEGMENTS_PER_PIXEL).ceil() as usize)
            .clamp(MIN_SEGMENTS, MAX_SEGMENTS);
        (0..=n)
            .map(|i| {
                let theta = self.start + self.extent * (i as f64 / n as f64);
                // image Y grows downward
                (cx + self.radius * theta.cos(), cy - self.radius * theta.sin())
            })
            .collect()
    }

    pub fn apply(&self, image: &mut dyn Raster) -> Option<DirtyRect> {
        if self.extent == 0.0 || self.radius == 0.0 {
            return None;
        }
        let (w, h) = (image.width(), image.height());
        let (cx, cy) = (self.center.image_x(w), self.center.image_y(h));
        let reach = self.radius + f64::from(self.pen.width) / 2.0 + 1.0;
        let clip = DirtyRect::covering(cx - reach, cy - reach, cx + reach, cy + reach, w, h)?;

        stroke_polyline(image, &self.polyline(cx, cy), &self.pen, 0.0, self.color, clip).then_some(clip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE_OPAQUE;
    use image::RgbaImage;
    use std::f64::consts::{FRAC_PI_2, PI};

    const BLUE: Argb = 0xff00_00ff;

    fn white(side: u32) -> RgbaImage {
        RgbaImage::from_pixel(side, side, image::Rgba([255, 255, 255, 255]))
    }

    fn painted(img: &RgbaImage) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..img.height() {
            for x in 0..img.width() {
                if img.argb(x, y) == BLUE {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_full_circle_stays_on_ring() {
        let mut img = white(100);
        let op = ArcOp::new(LogicalPoint::ORIGIN, 20.0, FRAC_PI_2, -TAU, BLUE, 1);
        let rect = op.apply(&mut img).unwrap();
        let px = painted(&img);
        assert!(px.len() > 80);
        for (x, y) in px {
            let d = (x as f64 + 0.5 - 50.0).hypot(y as f64 + 0.5 - 50.0);
            assert!((18.0..=22.0).contains(&d), "pixel ({x},{y}) at distance {d}");
            assert!(rect.contains(x, y));
        }
    }

    #[test]
    fn test_clockwise_quarter_from_north() {
        let mut img = white(100);
        // starts at the top of the circle and sweeps clockwise to the east
        ArcOp::new(LogicalPoint::ORIGIN, 30.0, FRAC_PI_2, -FRAC_PI_2, BLUE, 2).apply(&mut img);
        for (x, y) in painted(&img) {
            assert!(x >= 48 && y <= 52, "pixel ({x},{y}) outside the north-east quadrant");
        }
    }

    #[test]
    fn test_degenerate_arcs_touch_nothing() {
        let mut img = white(50);
        assert_eq!(ArcOp::new(LogicalPoint::ORIGIN, 10.0, 0.0, 0.0, BLUE, 1).apply(&mut img), None);
        assert_eq!(ArcOp::new(LogicalPoint::ORIGIN, 0.0, 0.0, PI, BLUE, 1).apply(&mut img), None);
        assert!(painted(&img).is_empty());
    }

    #[test]
    fn test_huge_radius_does_not_overflow() {
        let mut img = white(16);
        let op = ArcOp::new(LogicalPoint::ORIGIN, 1e19, 0.0, FRAC_PI_2, BLUE, 2);
        assert!(op.apply(&mut img).is_none_or(|r| r.right() <= 16 && r.bottom() <= 16));
    }

    #[test]
    fn test_extent_is_clamped() {
        let op = ArcOp::new(LogicalPoint::ORIGIN, 5.0, 0.0, -10.0 * PI, BLUE, 1);
        assert_eq!(op.extent(), -TAU);
        let mut img = white(40);
        op.apply(&mut img);
        assert_eq!(img.argb(0, 0), WHITE_OPAQUE);
    }
}
