//! Raster access used by the graphics operations.

use image::{Rgba, RgbaImage};

use crate::color::{Argb, from_rgba, to_rgba};
use crate::error::{Result, TgError};

/// A mutable pixel grid addressed in image space (origin top-left).
///
/// Callers keep coordinates inside `width() x height()`.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn argb(&self, x: u32, y: u32) -> Argb;
    fn set_argb(&mut self, x: u32, y: u32, pixel: Argb);

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width()) && y < i64::from(self.height())
    }

    /// Copy a block of pixels; positions off the raster read as transparent.
    fn read_block(&self, x: i64, y: i64, width: u32, height: u32) -> Vec<Argb> {
        let mut out = Vec::with_capacity(width as usize * height as usize);
        for row in 0..i64::from(height) {
            for col in 0..i64::from(width) {
                let (px, py) = (x + col, y + row);
                out.push(if self.contains(px, py) { self.argb(px as u32, py as u32) } else { 0 });
            }
        }
        out
    }
}

impl Raster for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn argb(&self, x: u32, y: u32) -> Argb {
        from_rgba(self.get_pixel(x, y).0)
    }

    fn set_argb(&mut self, x: u32, y: u32, pixel: Argb) {
        self.put_pixel(x, y, Rgba(to_rgba(pixel)));
    }
}

/// A row-major block of ARGB pixels with a fixed width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    width: u32,
    pixels: Vec<Argb>,
}

impl PixelRect {
    /// Height is `pixels.len() / width`; trailing partial rows are ignored.
    pub fn new(width: u32, pixels: Vec<Argb>) -> Result<Self> {
        if width == 0 {
            return Err(TgError::ZeroWidth);
        }
        if pixels.len() < width as usize {
            return Err(TgError::ShortPixelData { width, len: pixels.len() });
        }
        Ok(Self { width, pixels })
    }

    /// Build from an RGBA image.
    pub fn from_image(image: &RgbaImage) -> Result<Self> {
        let pixels = image.pixels().map(|p| from_rgba(p.0)).collect();
        Self::new(image.width(), pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        (self.pixels.len() / self.width as usize) as u32
    }

    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`; out-of-range positions read as transparent.
    pub fn get(&self, x: u32, y: u32) -> Argb {
        if x >= self.width || y >= self.height() {
            return 0;
        }
        self.pixels[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_image_raster() {
        let mut img = RgbaImage::new(4, 3);
        img.set_argb(1, 2, 0xff11_2233);
        assert_eq!(img.get_pixel(1, 2).0, [0x11, 0x22, 0x33, 0xff]);
        assert_eq!(img.argb(1, 2), 0xff11_2233);
        assert!(img.contains(3, 2));
        assert!(!img.contains(4, 0) && !img.contains(-1, 0));
        let block = img.read_block(0, 1, 2, 2);
        assert_eq!(block, vec![0, 0, 0, 0xff11_2233]);
    }

    #[test]
    fn test_pixel_rect_validation() {
        assert!(matches!(PixelRect::new(0, vec![1]), Err(TgError::ZeroWidth)));
        assert!(matches!(PixelRect::new(3, vec![1, 2]), Err(TgError::ShortPixelData { width: 3, len: 2 })));
        let rect = PixelRect::new(2, vec![1, 2, 3, 4, 5]).unwrap();
        assert_eq!((rect.width(), rect.height()), (2, 2));
        assert_eq!(rect.get(1, 1), 4);
        assert_eq!(rect.get(2, 0), 0);
    }
}
