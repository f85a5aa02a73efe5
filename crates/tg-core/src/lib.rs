//! tg-core: TurtleSpace geometry, colors and the graphics operations that
//! mutate the shared canvas image.

pub mod color;
pub mod error;
pub mod geometry;
pub mod ops;
pub mod raster;
pub mod stroke;
pub mod text;

pub use color::{
    Argb, BLACK_OPAQUE, OPAQUE, RGB_MASK, TRANSPARENT, WHITE_OPAQUE, color_from_number, number_from_rgb,
};
pub use error::{Result, TgError};
pub use geometry::{
    DirtyRect, LogicalPoint, compass_to_radians, normalize_radians, radians_to_compass,
};
pub use ops::{ArcOp, FillOp, GraphicsOp, LabelOp, LineOp, SetPixelsOp};
pub use raster::{PixelRect, Raster};
pub use stroke::{LineCap, PenStroke};
pub use text::{BlockGlyphs, FontdueRasterizer, GlyphMask, TextMetrics, TextRasterizer};
