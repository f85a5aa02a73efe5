//! End-to-end checks of the operation set against an RGBA image.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use tg_core::{
    BlockGlyphs, DirtyRect, FillOp, GraphicsOp, LabelOp, LineOp, LogicalPoint, PixelRect, Raster, SetPixelsOp,
    WHITE_OPAQUE, color_from_number,
};

fn canvas() -> RgbaImage {
    RgbaImage::from_pixel(120, 120, Rgba([255, 255, 255, 255]))
}

#[test]
fn closed_square_then_fill() -> anyhow::Result<()> {
    let mut img = canvas();
    let red = color_from_number(4);
    let corners = [(-20.0, -20.0), (20.0, -20.0), (20.0, 20.0), (-20.0, 20.0), (-20.0, -20.0)];
    let mut ops: Vec<GraphicsOp> = corners
        .windows(2)
        .map(|w| LineOp::new(LogicalPoint::new(w[0].0, w[0].1), LogicalPoint::new(w[1].0, w[1].1), red, 2).into())
        .collect();
    ops.push(FillOp::new(LogicalPoint::ORIGIN, color_from_number(2)).into());

    let mut dirty: Option<DirtyRect> = None;
    for op in &ops {
        if let Some(r) = op.apply(&mut img) {
            dirty = Some(dirty.map_or(r, |d| d.union(&r)));
        }
    }

    let green = color_from_number(2);
    assert_eq!(img.argb(60, 60), green);
    assert_eq!(img.argb(45, 70), green);
    assert_eq!(img.argb(10, 10), WHITE_OPAQUE);
    let dirty = dirty.ok_or_else(|| anyhow::anyhow!("nothing drawn"))?;
    assert!(dirty.contains(40, 40) && dirty.contains(80, 80));
    Ok(())
}

#[test]
fn fill_rect_is_tight() -> anyhow::Result<()> {
    let mut img = canvas();
    let block = PixelRect::new(10, vec![0xff00_0000; 100])?;
    SetPixelsOp::new(LogicalPoint::new(-5.0, 5.0), block).apply(&mut img);
    // the block is solid, so filling it recolors exactly its 10x10 pixels
    let rect = FillOp::new(LogicalPoint::ORIGIN, color_from_number(1))
        .apply(&mut img)
        .ok_or_else(|| anyhow::anyhow!("fill did nothing"))?;
    assert_eq!(rect, DirtyRect::new(55, 55, 10, 10));
    Ok(())
}

#[test]
fn label_draws_above_baseline() -> anyhow::Result<()> {
    let mut img = canvas();
    let op: GraphicsOp =
        LabelOp::new("tg", LogicalPoint::new(-10.0, 0.0), Arc::new(BlockGlyphs::new(12)), color_from_number(0)).into();
    assert_eq!(op.kind(), "label");
    let rect = op.apply(&mut img).ok_or_else(|| anyhow::anyhow!("label did nothing"))?;
    assert_eq!((rect.x, rect.y), (50, 48));
    assert_eq!(img.argb(51, 55), color_from_number(0));
    assert_eq!(img.argb(51, 62), WHITE_OPAQUE);
    Ok(())
}
