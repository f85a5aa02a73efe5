use crate::color::alpha;
use crate::geometry::{DirtyRect, LogicalPoint};
use crate::raster::{PixelRect, Raster};

/// Copy a pixel block onto the image, skipping fully transparent pixels.
///
/// The top-left corner must land on the image. A block running past the
/// right or bottom edge is cut to the image, and the source is read
/// sequentially over the cut area, wrapping to its start when exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct SetPixelsOp {
    top_left: LogicalPoint,
    pixels: PixelRect,
}

impl SetPixelsOp {
    pub fn new(top_left: LogicalPoint, pixels: PixelRect) -> Self {
        Self { top_left, pixels }
    }

    pub fn top_left(&self) -> LogicalPoint {
        self.top_left
    }

    pub fn pixels(&self) -> &PixelRect {
        &self.pixels
    }

    pub fn apply(&self, image: &mut dyn Raster) -> Option<DirtyRect> {
        let (w, h) = (image.width(), image.height());
        let x0 = self.top_left.pixel_x(w);
        let y0 = self.top_left.pixel_y(h);
        if !image.contains(x0, y0) {
            return None;
        }
        let (x0, y0) = (x0 as u32, y0 as u32);
        let clip = DirtyRect::new(
            x0,
            y0,
            self.pixels.width().min(w - x0),
            self.pixels.height().min(h - y0),
        );

        let data = self.pixels.pixels();
        let mut cursor = data.iter().copied().cycle();
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let Some(pixel) = cursor.next() else {
                    return Some(clip);
                };
                if alpha(pixel) != 0 {
                    image.set_argb(x, y, pixel);
                }
            }
        }
        Some(clip)
    }
}
