//! The sprite pixel buffer.
//!
//! A sprite keeps its shape in a square base buffer drawn facing east
//! (heading 0) and derives the pixels shown for the current heading from it.
//! The square is large enough for the shape's diagonal, so rotation never
//! clips.

use std::f64::consts::{FRAC_PI_2, PI};

use tg_core::color::{alpha, opaque, rgb};
use tg_core::{Argb, PixelRect, RGB_MASK, TRANSPARENT, WHITE_OPAQUE, normalize_radians};

use crate::painter::ShapePainter;

/// Heading changes smaller than this (radians) leave the sprite untouched.
pub const HEADING_TOLERANCE: f64 = 0.001;
/// Pixel sources are cropped to this size.
pub const MAX_SOURCE_WIDTH: u32 = 400;
pub const MAX_SOURCE_HEIGHT: u32 = 600;

/// How a sprite's pixels follow its heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RotationStyle {
    /// Rotate through every heading.
    #[default]
    Rotate,
    /// Never change the image.
    NoRotate,
    /// Image faces east; mirrored while the heading points west of north/south.
    FlipFacingRight,
    /// Image faces west; mirrored while the heading points east of north/south.
    FlipFacingLeft,
}

/// Even side length whose square holds a `width` x `height` image at any rotation.
pub fn side_for(width: u32, height: u32) -> u32 {
    let diagonal = f64::from(width).hypot(f64::from(height)).ceil() as u32;
    diagonal + diagonal % 2
}

/// True for headings in the east half, compass 0 through 180 degrees.
fn right_side(heading: f64) -> bool {
    heading <= FRAC_PI_2 || heading >= 3.0 * FRAC_PI_2
}

/// The 4-connected region reachable from `seeds` through pixels accepted by `inside`.
fn flood_region(side: u32, seeds: &[usize], inside: impl Fn(usize) -> bool) -> Vec<bool> {
    let n = side as usize;
    let mut region = vec![false; n * n];
    let mut stack: Vec<usize> = seeds.iter().copied().filter(|&i| inside(i)).collect();
    while let Some(i) = stack.pop() {
        if region[i] {
            continue;
        }
        region[i] = true;
        let (x, y) = (i % n, i / n);
        let neighbours = [
            (x > 0).then(|| i - 1),
            (x + 1 < n).then(|| i + 1),
            (y > 0).then(|| i - n),
            (y + 1 < n).then(|| i + n),
        ];
        for j in neighbours.into_iter().flatten() {
            if !region[j] && inside(j) {
                stack.push(j);
            }
        }
    }
    region
}

/// Make the white background reachable from the buffer edges transparent.
fn clear_background(side: u32, pixels: &mut [Argb]) {
    let n = side as usize;
    let mut edges = Vec::with_capacity(4 * n);
    for i in 0..n {
        edges.extend([i, (n - 1) * n + i, i * n, i * n + n - 1]);
    }
    let background = flood_region(side, &edges, |i| rgb(pixels[i]) == RGB_MASK);
    for (pixel, _) in pixels.iter_mut().zip(&background).filter(|(_, bg)| **bg) {
        *pixel = TRANSPARENT;
    }
}

/// Region sharing the exact color of the pixel just up-left of the buffer center.
fn fill_mask(side: u32, pixels: &[Argb]) -> Vec<bool> {
    let c = (side / 2).saturating_sub(1) as usize;
    let seed = c * side as usize + c;
    let target = pixels[seed];
    if alpha(target) == 0 {
        tracing::debug!(side, "shape center is transparent, nothing recolorable");
        return vec![false; pixels.len()];
    }
    flood_region(side, &[seed], |i| pixels[i] == target)
}

/// A square ARGB sprite with a base image and the pixels for its heading.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteBuffer {
    side: u32,
    base: Vec<Argb>,
    current: Vec<Argb>,
    fill_mask: Option<Vec<bool>>,
    color: Option<Argb>,
    style: RotationStyle,
    heading: f64,
}

impl SpriteBuffer {
    /// Build from an image drawn facing north, on a white background.
    ///
    /// The sprite is not recolorable.
    pub fn from_pixels(source: &PixelRect, style: RotationStyle) -> Self {
        let width = source.width().min(MAX_SOURCE_WIDTH);
        let height = source.height().min(MAX_SOURCE_HEIGHT);
        let side = side_for(width, height);
        let n = side as usize;
        let mut base = vec![WHITE_OPAQUE; n * n];

        let heading = match style {
            RotationStyle::Rotate => {
                // rotate right a quarter turn so the art faces east
                let left = ((side - height) / 2) as usize;
                let top = ((side - width) / 2) as usize;
                for r in 0..height {
                    for c in 0..width {
                        let dest_col = left + (height - 1 - r) as usize;
                        let dest_row = top + c as usize;
                        base[dest_row * n + dest_col] = source.get(c, r);
                    }
                }
                FRAC_PI_2
            }
            RotationStyle::NoRotate | RotationStyle::FlipFacingRight | RotationStyle::FlipFacingLeft => {
                let left = ((side - width) / 2) as usize;
                let top = ((side - height) / 2) as usize;
                for r in 0..height {
                    for c in 0..width {
                        base[(top + r as usize) * n + left + c as usize] = source.get(c, r);
                    }
                }
                if style == RotationStyle::FlipFacingLeft { PI } else { 0.0 }
            }
        };
        clear_background(side, &mut base);

        let mut sprite = Self {
            side,
            base,
            current: Vec::new(),
            fill_mask: None,
            color: None,
            style,
            heading,
        };
        sprite.update_pixels();
        sprite
    }

    /// Build a recolorable, fully rotating sprite whose east-facing outline is
    /// drawn by `paint` onto a white square sized for `width` x `height`.
    pub fn from_painter(
        width: u32,
        height: u32,
        color: Argb,
        heading: f64,
        paint: impl FnOnce(&mut ShapePainter<'_>),
    ) -> Self {
        let side = side_for(width, height);
        let mut base = vec![WHITE_OPAQUE; (side * side) as usize];
        paint(&mut ShapePainter::new(side, &mut base));
        clear_background(side, &mut base);
        let mask = fill_mask(side, &base);

        let mut sprite = Self {
            side,
            base,
            current: Vec::new(),
            fill_mask: Some(mask),
            color: None,
            style: RotationStyle::Rotate,
            heading: normalize_radians(heading),
        };
        sprite.recolor(opaque(color));
        sprite.update_pixels();
        sprite
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Pixels for the current heading, row-major `side x side`.
    pub fn pixels(&self) -> &[Argb] {
        &self.current
    }

    /// The east-facing base image.
    pub fn base_pixels(&self) -> &[Argb] {
        &self.base
    }

    pub fn fill_mask(&self) -> Option<&[bool]> {
        self.fill_mask.as_deref()
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn rotation_style(&self) -> RotationStyle {
        self.style
    }

    pub fn color(&self) -> Option<Argb> {
        self.color
    }

    pub fn is_recolorable(&self) -> bool {
        self.fill_mask.is_some()
    }

    /// Point the sprite along `heading` (radians).
    ///
    /// Returns true only when the visible pixels changed.
    pub fn set_heading(&mut self, heading: f64) -> bool {
        let heading = normalize_radians(heading);
        if (heading - self.heading).abs() < HEADING_TOLERANCE {
            return false;
        }
        let previous = std::mem::replace(&mut self.heading, heading);
        match self.style {
            RotationStyle::NoRotate => false,
            RotationStyle::Rotate => {
                self.update_pixels();
                true
            }
            RotationStyle::FlipFacingRight | RotationStyle::FlipFacingLeft => {
                if right_side(previous) == right_side(heading) {
                    return false;
                }
                self.update_pixels();
                true
            }
        }
    }

    /// Recolor the interior of a built-in shape.
    ///
    /// Returns false for user images and when the color is unchanged.
    pub fn set_color(&mut self, color: Argb) -> bool {
        let color = opaque(color);
        if !self.is_recolorable() || self.color == Some(color) {
            return false;
        }
        self.recolor(color);
        self.update_pixels();
        true
    }

    fn recolor(&mut self, color: Argb) {
        if let Some(mask) = &self.fill_mask {
            for (pixel, _) in self.base.iter_mut().zip(mask).filter(|(_, m)| **m) {
                *pixel = color;
            }
        }
        self.color = Some(color);
    }

    fn update_pixels(&mut self) {
        let facing_base = match self.style {
            RotationStyle::Rotate => {
                self.current = self.rotated();
                return;
            }
            RotationStyle::NoRotate => true,
            RotationStyle::FlipFacingRight => right_side(self.heading),
            RotationStyle::FlipFacingLeft => !right_side(self.heading),
        };
        self.current = if facing_base { self.base.clone() } else { self.mirrored() };
    }

    fn mirrored(&self) -> Vec<Argb> {
        self.base
            .chunks(self.side as usize)
            .flat_map(|row| row.iter().rev().copied())
            .collect()
    }

    /// Sample each destination pixel from the base through the inverse rotation.
    fn rotated(&self) -> Vec<Argb> {
        let side = i64::from(self.side);
        let center = side / 2;
        let (sin, cos) = self.heading.sin_cos();
        let mut out = vec![TRANSPARENT; self.base.len()];
        for row in 0..side {
            // odd, center-relative coordinates keep the pixel grid symmetric
            let row_prime = (2 * (row - center) + 1) as f64;
            for col in 0..side {
                let col_prime = (2 * (col - center) + 1) as f64;
                let src_x = (col_prime * cos - row_prime * sin).round_ties_even() as i64;
                let src_y = (col_prime * sin + row_prime * cos).round_ties_even() as i64;
                let src_col = (src_x - 1) / 2 + center;
                let src_row = (src_y - 1) / 2 + center;
                if (0..side).contains(&src_col) && (0..side).contains(&src_row) {
                    out[(row * side + col) as usize] = self.base[(src_row * side + src_col) as usize];
                }
            }
        }
        out
    }

    fn columns_rows(&self) -> Option<((u32, u32), (u32, u32))> {
        let n = self.side;
        let mut bounds: Option<((u32, u32), (u32, u32))> = None;
        for (i, _) in self.current.iter().enumerate().filter(|(_, p)| alpha(**p) != 0) {
            let (x, y) = (i as u32 % n, i as u32 / n);
            bounds = Some(match bounds {
                None => ((x, x), (y, y)),
                Some(((x0, x1), (y0, y1))) => ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y))),
            });
        }
        bounds
    }

    /// Width of the visible (non-transparent) pixels, 0 when empty.
    pub fn width(&self) -> u32 {
        self.columns_rows().map_or(0, |((x0, x1), _)| x1 - x0 + 1)
    }

    /// Height of the visible (non-transparent) pixels, 0 when empty.
    pub fn height(&self) -> u32 {
        self.columns_rows().map_or(0, |(_, (y0, y1))| y1 - y0 + 1)
    }

    /// Snapshot of the current pixels, e.g. for stamping.
    pub fn to_pixel_rect(&self) -> tg_core::Result<PixelRect> {
        PixelRect::new(self.side, self.current.clone())
    }
}
