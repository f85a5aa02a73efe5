//! Text measurement and glyph rasterization for labels.
//!
//! [`FontdueRasterizer`] renders real fonts through `fontdue`.
//! [`BlockGlyphs`] draws every visible character as a solid cell; it needs
//! no font file and gives deterministic output.

use std::path::Path;
use std::sync::Arc;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::error::{Result, TgError};

/// Pixel extents of a string, measured from the pen origin on the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextMetrics {
    pub width: u32,
    pub ascent: u32,
    pub descent: u32,
}

impl TextMetrics {
    pub fn height(&self) -> u32 {
        self.ascent + self.descent
    }
}

/// Coverage bitmap for one glyph.
///
/// `left` and `top` position the bitmap's top-left corner relative to the pen
/// origin on the baseline; `top` is negative above the baseline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

/// Text provider interface used by label operations.
pub trait TextRasterizer: Send + Sync {
    fn measure(&self, text: &str) -> TextMetrics;
    fn rasterize(&self, text: &str) -> Vec<GlyphMask>;
    /// Same face at a new pixel height.
    fn resized(&self, height: u32) -> Arc<dyn TextRasterizer>;
}

/// fontdue-backed rasterizer at a fixed pixel size.
#[derive(Clone)]
pub struct FontdueRasterizer {
    font: fontdue::Font,
    px: f32,
}

impl FontdueRasterizer {
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| TgError::FontLoad(e.to_string()))?;
        Ok(Self { font, px: px.max(1.0) })
    }

    pub fn from_file(path: impl AsRef<Path>, px: f32) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, px)
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    fn ascent(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.px)
            .map(|lm| lm.ascent)
            .unwrap_or(self.px)
    }

    fn layout(&self, text: &str) -> Layout {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { x: 0.0, y: 0.0, ..LayoutSettings::default() });
        layout.append(&[&self.font], &TextStyle::new(text, self.px, 0));
        layout
    }
}

impl TextRasterizer for FontdueRasterizer {
    fn measure(&self, text: &str) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::default();
        }
        let (ascent, descent) = self
            .font
            .horizontal_line_metrics(self.px)
            .map(|lm| (lm.ascent, lm.descent.abs()))
            .unwrap_or((self.px, 0.0));
        let layout = self.layout(text);
        let width = layout
            .glyphs()
            .iter()
            .map(|g| {
                let advance = self.font.metrics_indexed(g.key.glyph_index, g.key.px).advance_width;
                (g.x + g.width as f32).max(g.x + advance)
            })
            .fold(0.0f32, f32::max);
        TextMetrics {
            width: width.ceil() as u32,
            ascent: ascent.ceil() as u32,
            descent: descent.ceil() as u32,
        }
    }

    fn rasterize(&self, text: &str) -> Vec<GlyphMask> {
        let ascent = self.ascent();
        let layout = self.layout(text);
        let mut out = Vec::new();
        for g in layout.glyphs() {
            let (metrics, bitmap) = self.font.rasterize_indexed(g.key.glyph_index, g.key.px);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }
            // layout y is measured from the line top; shift to the baseline
            out.push(GlyphMask {
                left: g.x.round() as i32,
                top: (g.y - ascent).round() as i32,
                width: metrics.width as u32,
                height: metrics.height as u32,
                coverage: bitmap,
            });
        }
        out
    }

    fn resized(&self, height: u32) -> Arc<dyn TextRasterizer> {
        Arc::new(Self { font: self.font.clone(), px: height.max(1) as f32 })
    }
}

/// Monospaced solid-cell glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGlyphs {
    height: u32,
}

impl BlockGlyphs {
    pub fn new(height: u32) -> Self {
        Self { height: height.max(1) }
    }

    fn advance(&self) -> u32 {
        (self.height * 3 / 5).max(2)
    }

    fn descent(&self) -> u32 {
        self.height / 4
    }
}

impl TextRasterizer for BlockGlyphs {
    fn measure(&self, text: &str) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::default();
        }
        TextMetrics {
            width: text.chars().count() as u32 * self.advance(),
            ascent: self.height,
            descent: self.descent(),
        }
    }

    fn rasterize(&self, text: &str) -> Vec<GlyphMask> {
        let cell = self.advance() - 1;
        text.chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| GlyphMask {
                left: (i as u32 * self.advance()) as i32,
                top: -(self.height as i32),
                width: cell,
                height: self.height,
                coverage: vec![255; (cell * self.height) as usize],
            })
            .collect()
    }

    fn resized(&self, height: u32) -> Arc<dyn TextRasterizer> {
        Arc::new(Self::new(height))
    }
}
