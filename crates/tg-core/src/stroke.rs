//! Pen stroking through tiny-skia with anti-aliasing off.

use tiny_skia::{LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::color::Argb;
use crate::geometry::DirtyRect;
use crate::raster::Raster;

/// How open stroke ends are finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Ends stop flush at the endpoint.
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    /// Map the numeric cap codes 0 (butt), 1 (round), 2 (square).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(LineCap::Butt),
            1 => Some(LineCap::Round),
            2 => Some(LineCap::Square),
            _ => None,
        }
    }

    fn to_skia(self) -> tiny_skia::LineCap {
        match self {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        }
    }
}

/// Stroke parameters shared by line and arc operations.
#[derive(Clone, Debug, PartialEq)]
pub struct PenStroke {
    pub width: u32,
    pub pattern: Option<Vec<f32>>,
    pub cap: LineCap,
}

impl PenStroke {
    /// `dash_offset` is how far into the dash pattern the stroke starts.
    fn to_skia(&self, dash_offset: f64) -> Stroke {
        let mut stroke = Stroke {
            width: self.width.max(1) as f32,
            line_cap: self.cap.to_skia(),
            line_join: LineJoin::Bevel,
            ..Stroke::default()
        };
        if let Some(pattern) = &self.pattern {
            let period: f64 = pattern.iter().map(|&d| f64::from(d)).sum();
            let phase = if period > 0.0 { dash_offset.rem_euclid(period) } else { 0.0 };
            stroke.dash = StrokeDash::new(pattern.clone(), phase as f32);
            if stroke.dash.is_none() {
                tracing::warn!(?pattern, "invalid pen pattern, stroking solid");
            }
        }
        stroke
    }
}

/// Stroke an open polyline given in image coordinates, writing `color` into
/// every covered pixel inside `clip`.
///
/// Returns false when nothing could be stroked.
pub(crate) fn stroke_polyline(
    image: &mut dyn Raster,
    points: &[(f64, f64)],
    pen: &PenStroke,
    dash_offset: f64,
    color: Argb,
    clip: DirtyRect,
) -> bool {
    let Some((first, rest)) = points.split_first() else {
        return false;
    };
    let mut pb = PathBuilder::new();
    pb.move_to(first.0 as f32, first.1 as f32);
    for p in rest {
        pb.line_to(p.0 as f32, p.1 as f32);
    }
    let Some(path) = pb.finish() else {
        return false;
    };
    let Some(mut pixmap) = Pixmap::new(clip.width, clip.height) else {
        return false;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = false;
    let ts = Transform::from_translate(-(clip.x as f32), -(clip.y as f32));
    pixmap.stroke_path(&path, &paint, &pen.to_skia(dash_offset), ts, None);

    let stride = clip.width as usize;
    for (i, px) in pixmap.pixels().iter().enumerate() {
        if px.alpha() >= 128 {
            let x = clip.x + (i % stride) as u32;
            let y = clip.y + (i / stride) as u32;
            image.set_argb(x, y, color);
        }
    }
    true
}
