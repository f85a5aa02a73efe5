//! TurtleSpace geometry.
//!
//! TurtleSpace has its origin at the canvas center with Y increasing upward.
//! Headings are radians in `[0, 2π)` measured counter-clockwise from east;
//! the user-facing compass convention is degrees clockwise from north.

use std::f64::consts::TAU;

/// Normalize an angle in radians into `[0, 2π)`.
pub fn normalize_radians(radians: f64) -> f64 {
    let r = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if r >= TAU { 0.0 } else { r }
}

/// Convert a compass heading (degrees, 0 = north, clockwise) to radians.
pub fn compass_to_radians(degrees: f64) -> f64 {
    let math_degrees = (450.0 - degrees.rem_euclid(360.0)).rem_euclid(360.0);
    normalize_radians(math_degrees.to_radians())
}

/// Convert a heading in radians back to compass degrees in `[0, 360)`.
pub fn radians_to_compass(radians: f64) -> f64 {
    let degrees = (450.0 - normalize_radians(radians).to_degrees()).rem_euclid(360.0);
    if degrees > 360.0 - 1e-9 { 0.0 } else { degrees }
}

/// An immutable point in TurtleSpace.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LogicalPoint {
    x: f64,
    y: f64,
}

impl LogicalPoint {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Fractional image column of this point on a raster `image_width` wide.
    pub fn image_x(&self, image_width: u32) -> f64 {
        f64::from(image_width) / 2.0 + self.x
    }

    /// Fractional image row of this point on a raster `image_height` tall.
    pub fn image_y(&self, image_height: u32) -> f64 {
        f64::from(image_height) / 2.0 - self.y
    }

    /// Column of the pixel containing this point.
    pub fn pixel_x(&self, image_width: u32) -> i64 {
        self.image_x(image_width).floor() as i64
    }

    /// Row of the pixel containing this point.
    pub fn pixel_y(&self, image_height: u32) -> i64 {
        self.image_y(image_height).floor() as i64
    }

    /// The point `distance` units away along `heading` (radians).
    pub fn other_end_point(&self, heading: f64, distance: f64) -> Self {
        Self::new(self.x + distance * heading.cos(), self.y + distance * heading.sin())
    }

    /// Heading in radians that points from `self` toward `to`.
    ///
    /// Returns 0 (east) when both points coincide.
    pub fn radians_towards(&self, to: LogicalPoint) -> f64 {
        normalize_radians((to.y - self.y).atan2(to.x - self.x))
    }

    pub fn distance_to(&self, other: LogicalPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// An axis-aligned image-space rectangle touched by a drawing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DirtyRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Clip a signed rectangle to a `image_width` x `image_height` image.
    ///
    /// Returns `None` when nothing of the rectangle lies on the image.
    pub fn clipped(x: i64, y: i64, width: i64, height: i64, image_width: u32, image_height: u32) -> Option<Self> {
        let left = x.max(0);
        let top = y.max(0);
        let right = x.saturating_add(width).min(i64::from(image_width));
        let bottom = y.saturating_add(height).min(i64::from(image_height));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Pixel rectangle covering fractional image-space bounds, clipped to a
    /// `image_width` x `image_height` image.
    ///
    /// Bounds are clamped before any integer conversion, so arbitrarily
    /// distant geometry is safe. Returns `None` when nothing is on the image.
    pub fn covering(left: f64, top: f64, right: f64, bottom: f64, image_width: u32, image_height: u32) -> Option<Self> {
        let (w, h) = (f64::from(image_width), f64::from(image_height));
        let left = left.floor().clamp(0.0, w);
        let top = top.floor().clamp(0.0, h);
        let right = right.ceil().clamp(0.0, w);
        let bottom = bottom.ceil().clamp(0.0, h);
        // NaN bounds fail both comparisons
        if !(right > left && bottom > top) {
            return None;
        }
        Some(Self {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Check if this rect is valid (non-zero size).
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &DirtyRect) -> DirtyRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        DirtyRect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_compass_round_trip() {
        assert!(close(compass_to_radians(0.0), FRAC_PI_2));
        assert!(close(compass_to_radians(90.0), 0.0));
        assert!(close(compass_to_radians(180.0), 3.0 * FRAC_PI_2));
        assert!(close(compass_to_radians(-90.0), PI));
        assert!(close(radians_to_compass(FRAC_PI_2), 0.0));
        assert!(close(radians_to_compass(0.0), 90.0));
        assert!(close(radians_to_compass(PI), 270.0));
    }

    #[test]
    fn test_normalize_radians() {
        assert!(close(normalize_radians(-FRAC_PI_2), 3.0 * FRAC_PI_2));
        assert!(close(normalize_radians(5.0 * PI), PI));
        assert_eq!(normalize_radians(TAU), 0.0);
        let tiny = normalize_radians(-1e-18);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn test_image_mapping() {
        let p = LogicalPoint::new(-10.0, 20.0);
        assert_eq!(p.image_x(100), 40.0);
        assert_eq!(p.image_y(100), 30.0);
        let q = LogicalPoint::new(0.5, -0.5);
        assert_eq!((q.pixel_x(20), q.pixel_y(20)), (10, 10));
    }

    #[test]
    fn test_other_end_point_and_towards() {
        let p = LogicalPoint::ORIGIN.other_end_point(FRAC_PI_2, 100.0);
        assert!(close(p.x(), 0.0) && close(p.y(), 100.0));
        assert!(close(LogicalPoint::ORIGIN.radians_towards(LogicalPoint::new(-5.0, 0.0)), PI));
        assert_eq!(LogicalPoint::ORIGIN.radians_towards(LogicalPoint::ORIGIN), 0.0);
    }

    #[test]
    fn test_dirty_rect_clip_and_union() {
        assert_eq!(DirtyRect::clipped(-3, -3, 5, 5, 10, 10), Some(DirtyRect::new(0, 0, 2, 2)));
        assert_eq!(DirtyRect::clipped(8, 8, 5, 5, 10, 10), Some(DirtyRect::new(8, 8, 2, 2)));
        assert_eq!(DirtyRect::clipped(10, 0, 5, 5, 10, 10), None);
        let u = DirtyRect::new(0, 0, 2, 2).union(&DirtyRect::new(5, 6, 1, 1));
        assert_eq!(u, DirtyRect::new(0, 0, 6, 7));
        assert!(u.contains(5, 6) && !u.contains(6, 6));
    }

    #[test]
    fn test_dirty_rect_covering_far_bounds() {
        assert_eq!(DirtyRect::covering(2.5, 3.2, 4.1, 6.0, 10, 10), Some(DirtyRect::new(2, 3, 3, 3)));
        assert_eq!(DirtyRect::covering(-1e300, 4.0, 1e300, 5.0, 10, 10), Some(DirtyRect::new(0, 4, 10, 1)));
        assert_eq!(DirtyRect::covering(f64::NEG_INFINITY, 0.0, -1.0, 10.0, 10, 10), None);
        assert_eq!(DirtyRect::covering(f64::NAN, 0.0, 5.0, 5.0, 10, 10), None);
    }
}
