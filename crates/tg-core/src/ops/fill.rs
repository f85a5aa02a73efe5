use crate::color::{Argb, OPAQUE, rgb};
use crate::geometry::{DirtyRect, LogicalPoint};
use crate::raster::Raster;

/// Flood fill of the 4-connected region sharing the RGB under a point.
///
/// Alpha is ignored when matching and kept per pixel when recoloring.
#[derive(Clone, Debug, PartialEq)]
pub struct FillOp {
    point: LogicalPoint,
    color: Argb,
}

impl FillOp {
    pub fn new(point: LogicalPoint, color: Argb) -> Self {
        Self { point, color }
    }

    pub fn point(&self) -> LogicalPoint {
        self.point
    }

    pub fn color(&self) -> Argb {
        self.color
    }

    pub fn apply(&self, image: &mut dyn Raster) -> Option<DirtyRect> {
        let (w, h) = (image.width(), image.height());
        let (sx, sy) = (self.point.pixel_x(w), self.point.pixel_y(h));
        if !image.contains(sx, sy) {
            return None;
        }
        let (sx, sy) = (sx as u32, sy as u32);
        let target = rgb(image.argb(sx, sy));
        let replacement = rgb(self.color);
        if target == replacement {
            return None;
        }

        let matches = |img: &dyn Raster, x: u32, y: u32| rgb(img.argb(x, y)) == target;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (sx, sy, sx, sy);
        let mut seeds = vec![(sx, sy)];

        while let Some((x, y)) = seeds.pop() {
            if !matches(&*image, x, y) {
                continue;
            }
            let mut left = x;
            while left > 0 && matches(&*image, left - 1, y) {
                left -= 1;
            }
            let mut right = x;
            while right + 1 < w && matches(&*image, right + 1, y) {
                right += 1;
            }
            for px in left..=right {
                let old = image.argb(px, y);
                image.set_argb(px, y, (old & OPAQUE) | replacement);
            }
            min_x = min_x.min(left);
            max_x = max_x.max(right);
            min_y = min_y.min(y);
            max_y = max_y.max(y);

            let neighbours = [y.checked_sub(1), (y + 1 < h).then_some(y + 1)];
            for ny in neighbours.into_iter().flatten() {
                let mut px = left;
                while px <= right {
                    if matches(&*image, px, ny) {
                        seeds.push((px, ny));
                        while px <= right && matches(&*image, px, ny) {
                            px += 1;
                        }
                    } else {
                        px += 1;
                    }
                }
            }
        }

        Some(DirtyRect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK_OPAQUE, WHITE_OPAQUE};
    use image::{Rgba, RgbaImage};

    const GREEN: Argb = 0xff00_ff00;

    fn boxed() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        for i in 5..=14 {
            img.set_argb(i, 5, BLACK_OPAQUE);
            img.set_argb(i, 14, BLACK_OPAQUE);
            img.set_argb(5, i, BLACK_OPAQUE);
            img.set_argb(14, i, BLACK_OPAQUE);
        }
        img
    }

    #[test]
    fn test_fill_enclosed_region() {
        let mut img = boxed();
        let rect = FillOp::new(LogicalPoint::new(0.5, -0.5), GREEN).apply(&mut img).unwrap();
        assert_eq!(rect, DirtyRect::new(6, 6, 8, 8));
        let filled = img.pixels().filter(|p| p.0 == [0, 255, 0, 255]).count();
        assert_eq!(filled, 64);
        assert_eq!(img.argb(5, 5), BLACK_OPAQUE);
        assert_eq!(img.argb(2, 2), WHITE_OPAQUE);
    }

    #[test]
    fn test_fill_outside_reaches_edges() {
        let mut img = boxed();
        let rect = FillOp::new(LogicalPoint::new(-9.5, 9.5), GREEN).apply(&mut img).unwrap();
        assert_eq!(rect, DirtyRect::new(0, 0, 20, 20));
        assert_eq!(img.argb(10, 10), WHITE_OPAQUE);
        assert_eq!(img.argb(19, 19), GREEN);
    }

    #[test]
    fn test_fill_same_color_is_noop() {
        let mut img = boxed();
        let before = img.clone();
        // alpha differs, RGB matches
        assert_eq!(FillOp::new(LogicalPoint::new(0.5, -0.5), 0x80ff_ffff).apply(&mut img), None);
        assert_eq!(img, before);
    }

    #[test]
    fn test_fill_keeps_alpha() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 100]));
        FillOp::new(LogicalPoint::ORIGIN, GREEN).apply(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 100]);
    }

    #[test]
    fn test_fill_outside_image() {
        let mut img = boxed();
        assert_eq!(FillOp::new(LogicalPoint::new(50.0, 0.0), GREEN).apply(&mut img), None);
    }
}
