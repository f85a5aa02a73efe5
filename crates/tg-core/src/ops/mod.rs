//! Graphics operations.
//!
//! Each operation is a self-contained description of one mutation of the
//! canvas image. Applying it returns the image-space rectangle it touched,
//! or `None` when it changed nothing.

mod arc;
mod fill;
mod label;
mod line;
mod set_pixels;

pub use arc::ArcOp;
pub use fill::FillOp;
pub use label::LabelOp;
pub use line::LineOp;
pub use set_pixels::SetPixelsOp;

use crate::geometry::DirtyRect;
use crate::raster::Raster;

/// Any drawing operation the canvas queue accepts.
#[derive(Clone, Debug)]
pub enum GraphicsOp {
    Line(LineOp),
    Arc(ArcOp),
    Fill(FillOp),
    Label(LabelOp),
    SetPixels(SetPixelsOp),
}

impl GraphicsOp {
    pub fn apply(&self, image: &mut dyn Raster) -> Option<DirtyRect> {
        let touched = match self {
            GraphicsOp::Line(op) => op.apply(image),
            GraphicsOp::Arc(op) => op.apply(image),
            GraphicsOp::Fill(op) => op.apply(image),
            GraphicsOp::Label(op) => op.apply(image),
            GraphicsOp::SetPixels(op) => op.apply(image),
        };
        tracing::trace!(op = self.kind(), ?touched, "applied graphics op");
        touched
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GraphicsOp::Line(_) => "line",
            GraphicsOp::Arc(_) => "arc",
            GraphicsOp::Fill(_) => "fill",
            GraphicsOp::Label(_) => "label",
            GraphicsOp::SetPixels(_) => "set_pixels",
        }
    }
}

impl From<LineOp> for GraphicsOp {
    fn from(op: LineOp) -> Self {
        GraphicsOp::Line(op)
    }
}

impl From<ArcOp> for GraphicsOp {
    fn from(op: ArcOp) -> Self {
        GraphicsOp::Arc(op)
    }
}

impl From<FillOp> for GraphicsOp {
    fn from(op: FillOp) -> Self {
        GraphicsOp::Fill(op)
    }
}

impl From<LabelOp> for GraphicsOp {
    fn from(op: LabelOp) -> Self {
        GraphicsOp::Label(op)
    }
}

impl From<SetPixelsOp> for GraphicsOp {
    fn from(op: SetPixelsOp) -> Self {
        GraphicsOp::SetPixels(op)
    }
}
