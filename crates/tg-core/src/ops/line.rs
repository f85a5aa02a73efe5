use crate::color::Argb;
use crate::geometry::{DirtyRect, LogicalPoint};
use crate::raster::Raster;
use crate::stroke::{LineCap, PenStroke, stroke_polyline};

/// A straight pen stroke between two TurtleSpace points.
///
/// Endpoints are stored left to right (then bottom to top for vertical
/// lines) so that the same segment renders identically whichever end it was
/// drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct LineOp {
    start: LogicalPoint,
    end: LogicalPoint,
    color: Argb,
    pen: PenStroke,
}

impl LineOp {
    pub fn new(from: LogicalPoint, to: LogicalPoint, color: Argb, width: u32) -> Self {
        let swap = from.x() > to.x() || (from.x() == to.x() && from.y() > to.y());
        let (start, end) = if swap { (to, from) } else { (from, to) };
        Self {
            start,
            end,
            color,
            pen: PenStroke { width: width.max(1), pattern: None, cap: LineCap::Butt },
        }
    }

    /// Dash pattern of alternating on/off lengths; `None` strokes solid.
    pub fn with_pattern(mut self, pattern: Option<Vec<f32>>) -> Self {
        self.pen.pattern = pattern;
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.pen.cap = cap;
        self
    }

    pub fn endpoints(&self) -> (LogicalPoint, LogicalPoint) {
        (self.start, self.end)
    }

    pub fn color(&self) -> Argb {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.pen.width
    }

    pub fn pattern(&self) -> Option<&[f32]> {
        self.pen.pattern.as_deref()
    }

    pub fn cap(&self) -> LineCap {
        self.pen.cap
    }

    pub fn apply(&self, image: &mut dyn Raster) -> Option<DirtyRect> {
        let (w, h) = (image.width(), image.height());
        let (x1, y1) = (self.start.image_x(w), self.start.image_y(h));
        let (x2, y2) = (self.end.image_x(w), self.end.image_y(h));
        let half = f64::from(self.pen.width) / 2.0;
        // one pixel of slack, plus half a pen past each end for round and square caps
        let pad = 1.0 + if self.pen.cap == LineCap::Butt { 0.0 } else { half.ceil() };
        let clip = DirtyRect::covering(
            x1.min(x2) - half - pad,
            y1.min(y2) - half - pad,
            x1.max(x2) + half + pad,
            y1.max(y2) + half + pad,
            w,
            h,
        )?;

        // stroke only the part of the segment near the clip, keeping the dash phase
        let margin = f64::from(self.pen.width) + 2.0;
        let lo = (f64::from(clip.x) - margin, f64::from(clip.y) - margin);
        let hi = (f64::from(clip.right()) + margin, f64::from(clip.bottom()) + margin);
        let (t0, t1) = clip_segment((x1, y1), (x2, y2), lo, hi)?;
        let at = |t: f64| (x1 + t * (x2 - x1), y1 + t * (y2 - y1));
        let from = if t0 == 0.0 { (x1, y1) } else { at(t0) };
        let to = if t1 == 1.0 { (x2, y2) } else { at(t1) };
        let skipped = t0 * (x2 - x1).hypot(y2 - y1);

        stroke_polyline(image, &[from, to], &self.pen, skipped, self.color, clip).then_some(clip)
    }
}

/// Liang-Barsky clip of segment `a`..`b` to the box `lo`..`hi`; returns the
/// parameter range that lies inside.
fn clip_segment(a: (f64, f64), b: (f64, f64), lo: (f64, f64), hi: (f64, f64)) -> Option<(f64, f64)> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, a.0 - lo.0), (dx, hi.0 - a.0), (-dy, a.1 - lo.1), (dy, hi.1 - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    (t0 <= t1).then_some((t0, t1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE_OPAQUE;
    use image::RgbaImage;

    fn white(w: u32, h: u32) -> RgbaImage {
        let mut img = RgbaImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set_argb(x, y, WHITE_OPAQUE);
            }
        }
        img
    }

    const RED: Argb = 0xffff_0000;

    #[test]
    fn test_endpoints_are_normalized() {
        let a = LogicalPoint::new(10.0, 5.0);
        let b = LogicalPoint::new(-10.0, -5.0);
        assert_eq!(LineOp::new(a, b, RED, 1).endpoints(), (b, a));
        assert_eq!(LineOp::new(b, a, RED, 1).endpoints(), (b, a));
        let up = LogicalPoint::new(0.0, 30.0);
        assert_eq!(LineOp::new(up, LogicalPoint::ORIGIN, RED, 1).endpoints(), (LogicalPoint::ORIGIN, up));
    }

    #[test]
    fn test_horizontal_line_pixels() {
        let mut img = white(100, 100);
        let op = LineOp::new(LogicalPoint::new(-20.0, 0.5), LogicalPoint::new(20.0, 0.5), RED, 1);
        let rect = op.apply(&mut img).unwrap();
        assert_eq!(img.argb(50, 49), RED);
        assert_eq!(img.argb(35, 49), RED);
        assert_eq!(img.argb(50, 45), WHITE_OPAQUE);
        assert_eq!(img.argb(80, 49), WHITE_OPAQUE);
        assert!(rect.contains(30, 49) && rect.contains(69, 49));
    }

    #[test]
    fn test_reversed_line_is_pixel_identical() {
        let a = LogicalPoint::new(-30.0, -12.0);
        let b = LogicalPoint::new(25.0, 40.0);
        let mut one = white(100, 100);
        let mut two = white(100, 100);
        let r1 = LineOp::new(a, b, RED, 3).apply(&mut one);
        let r2 = LineOp::new(b, a, RED, 3).apply(&mut two);
        assert_eq!(r1, r2);
        assert_eq!(one, two);
    }

    #[test]
    fn test_dashed_line_leaves_gaps() {
        let mut img = white(100, 100);
        let op = LineOp::new(LogicalPoint::new(-40.0, 0.5), LogicalPoint::new(40.0, 0.5), RED, 1)
            .with_pattern(Some(vec![3.0, 3.0]));
        op.apply(&mut img);
        let painted = (10..90).filter(|&x| img.argb(x, 49) == RED).count();
        assert!(painted > 20 && painted < 60, "painted {painted}");
    }

    #[test]
    fn test_huge_line_is_clipped_to_image() {
        let mut img = white(8, 8);
        let op = LineOp::new(LogicalPoint::ORIGIN, LogicalPoint::new(1e19, 0.0), RED, 2);
        let rect = op.apply(&mut img).unwrap();
        assert!(rect.right() <= 8 && rect.bottom() <= 8);
        assert_eq!(img.argb(7, 3), RED);
        let far = LineOp::new(LogicalPoint::new(-1e12, -2.0), LogicalPoint::new(1e12, -2.0), RED, 2);
        assert_eq!(far.apply(&mut img), Some(DirtyRect::new(0, 4, 8, 4)));
        assert_eq!((img.argb(0, 5), img.argb(7, 6)), (RED, RED));
        let extreme = LineOp::new(LogicalPoint::new(-1e300, 0.0), LogicalPoint::new(1e300, 3.0), RED, 2);
        assert!(extreme.apply(&mut img).is_none_or(|r| r.right() <= 8 && r.bottom() <= 8));
    }

    #[test]
    fn test_clip_segment() {
        assert_eq!(clip_segment((0.0, 0.0), (10.0, 0.0), (2.0, -1.0), (5.0, 1.0)), Some((0.2, 0.5)));
        assert_eq!(clip_segment((0.0, 5.0), (10.0, 5.0), (0.0, 0.0), (10.0, 2.0)), None);
        assert_eq!(clip_segment((1.0, 1.0), (2.0, 2.0), (0.0, 0.0), (4.0, 4.0)), Some((0.0, 1.0)));
    }

    #[test]
    fn test_line_off_canvas_touches_nothing() {
        let mut img = white(20, 20);
        let op = LineOp::new(LogicalPoint::new(100.0, 100.0), LogicalPoint::new(120.0, 100.0), RED, 1);
        assert_eq!(op.apply(&mut img), None);
    }
}
