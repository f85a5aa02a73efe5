use std::fmt;
use std::sync::Arc;

use crate::color::Argb;
use crate::geometry::{DirtyRect, LogicalPoint};
use crate::raster::Raster;
use crate::text::TextRasterizer;

/// Coverage at or above this draws the pixel; labels are not anti-aliased.
const COVERAGE_THRESHOLD: u8 = 128;

/// Text drawn with its baseline's left end at a TurtleSpace point.
#[derive(Clone)]
pub struct LabelOp {
    text: String,
    point: LogicalPoint,
    font: Arc<dyn TextRasterizer>,
    color: Argb,
}

impl fmt::Debug for LabelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelOp")
            .field("text", &self.text)
            .field("point", &self.point)
            .field("color", &format_args!("{:#010x}", self.color))
            .finish_non_exhaustive()
    }
}

impl LabelOp {
    pub fn new(text: impl Into<String>, point: LogicalPoint, font: Arc<dyn TextRasterizer>, color: Argb) -> Self {
        Self { text: text.into(), point, font, color }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn point(&self) -> LogicalPoint {
        self.point
    }

    pub fn apply(&self, image: &mut dyn Raster) -> Option<DirtyRect> {
        if self.text.is_empty() {
            return None;
        }
        let (w, h) = (image.width(), image.height());
        let (ox, oy) = (self.point.pixel_x(w), self.point.pixel_y(h));
        let metrics = self.font.measure(&self.text);
        let rect = DirtyRect::clipped(
            ox,
            oy.saturating_sub(i64::from(metrics.ascent)),
            i64::from(metrics.width),
            i64::from(metrics.height()),
            w,
            h,
        )?;

        for glyph in self.font.rasterize(&self.text) {
            let gx = ox + i64::from(glyph.left);
            let gy = oy + i64::from(glyph.top);
            for (i, &coverage) in glyph.coverage.iter().enumerate() {
                if coverage < COVERAGE_THRESHOLD {
                    continue;
                }
                let x = gx + (i as u32 % glyph.width) as i64;
                let y = gy + (i as u32 / glyph.width) as i64;
                if image.contains(x, y) {
                    image.set_argb(x as u32, y as u32, self.color);
                }
            }
        }
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE_OPAQUE;
    use crate::text::BlockGlyphs;
    use image::{Rgba, RgbaImage};

    const RED: Argb = 0xffff_0000;

    #[test]
    fn test_label_rect_and_pixels() {
        let mut img = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
        let op = LabelOp::new("AB", LogicalPoint::ORIGIN, Arc::new(BlockGlyphs::new(10)), RED);
        let rect = op.apply(&mut img).unwrap();
        assert_eq!(rect, DirtyRect::new(50, 40, 12, 12));
        // glyph cells sit above the baseline
        assert_eq!(img.argb(50, 40), RED);
        assert_eq!(img.argb(50, 49), RED);
        assert_eq!(img.argb(50, 50), WHITE_OPAQUE);
        // the last column of each cell is spacing
        assert_eq!(img.argb(55, 45), WHITE_OPAQUE);
        assert_eq!(img.argb(56, 45), RED);
    }

    #[test]
    fn test_empty_label() {
        let mut img = RgbaImage::new(10, 10);
        let op = LabelOp::new("", LogicalPoint::ORIGIN, Arc::new(BlockGlyphs::new(10)), RED);
        assert_eq!(op.apply(&mut img), None);
    }

    #[test]
    fn test_label_clipped_at_edge() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        let op = LabelOp::new("WIDE LABEL", LogicalPoint::new(5.0, 0.0), Arc::new(BlockGlyphs::new(6)), RED);
        let rect = op.apply(&mut img).unwrap();
        assert_eq!(rect.right(), 20);
        assert!(format!("{op:?}").contains("WIDE LABEL"));
    }

    #[test]
    fn test_label_far_off_image() {
        let mut img = RgbaImage::new(10, 10);
        let op = LabelOp::new("AB", LogicalPoint::new(1e300, -1e300), Arc::new(BlockGlyphs::new(10)), RED);
        assert_eq!(op.apply(&mut img), None);
        let op = LabelOp::new("AB", LogicalPoint::new(-1e300, 1e300), Arc::new(BlockGlyphs::new(10)), RED);
        assert_eq!(op.apply(&mut img), None);
    }
}
