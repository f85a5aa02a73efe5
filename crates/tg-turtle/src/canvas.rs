//! The canvas turtles draw on.
//!
//! Drawing requests are queued as [`GraphicsOp`]s and applied in order.
//! Turtle sprites are kept apart from the drawing and only overlaid when a
//! frame is composed.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use parking_lot::Mutex;
use tg_config::CanvasConfig;
use tg_core::color::to_rgba;
use tg_core::{Argb, DirtyRect, GraphicsOp, LogicalPoint, PixelRect, Raster, color_from_number};
use tg_sprite::ShapeRegistry;

/// Queued operations beyond which `submit` applies the backlog itself.
pub const MAX_PENDING_OPS: usize = 4096;

/// Canvas shared between turtles and the host.
pub type SharedCanvas = Arc<Mutex<TurtleCanvas>>;

/// Identifies a turtle's sprite on a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurtleId(pub u64);

/// A sprite image centered on a TurtleSpace point.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedSprite {
    pub center: LogicalPoint,
    pub pixels: PixelRect,
}

impl PlacedSprite {
    pub fn side(&self) -> u32 {
        self.pixels.width()
    }

    pub fn top_left(&self) -> LogicalPoint {
        let half = f64::from(self.side()) / 2.0;
        LogicalPoint::new(self.center.x() - half, self.center.y() + half)
    }

    /// Image-space area covered on a `width` x `height` canvas.
    pub fn bounds(&self, width: u32, height: u32) -> Option<DirtyRect> {
        let tl = self.top_left();
        let side = i64::from(self.side());
        DirtyRect::clipped(tl.pixel_x(width), tl.pixel_y(height), side, side, width, height)
    }

    /// Draw the opaque pixels over `frame`, clipped on every edge.
    fn overlay(&self, frame: &mut RgbaImage) {
        let (w, h) = (frame.width(), frame.height());
        let tl = self.top_left();
        let (x0, y0) = (tl.pixel_x(w), tl.pixel_y(h));
        let Some(area) = self.bounds(w, h) else { return };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let sx = (i64::from(x) - x0) as u32;
                let sy = (i64::from(y) - y0) as u32;
                let pixel = self.pixels.get(sx, sy);
                if pixel >> 24 != 0 {
                    frame.set_argb(x, y, pixel);
                }
            }
        }
    }
}

/// Where turtles report what needs repainting.
pub trait DisplaySurface {
    fn mark_dirty(&mut self, rect: DirtyRect);
    /// Show `sprite` for `id`, replacing any sprite it had.
    fn add_sprite(&mut self, id: TurtleId, sprite: PlacedSprite);
    fn remove_sprite(&mut self, id: TurtleId);
}

/// Persistent drawing image plus the sprites displayed over it.
#[derive(Debug)]
pub struct TurtleCanvas {
    image: RgbaImage,
    background: Argb,
    pending: VecDeque<GraphicsOp>,
    dirty: Option<DirtyRect>,
    sprites: BTreeMap<TurtleId, PlacedSprite>,
    shapes: ShapeRegistry,
    composed: Option<RgbaImage>,
    next_id: u64,
}

impl TurtleCanvas {
    /// A canvas cleared to the `background` color number.
    pub fn new(width: u32, height: u32, background: u32) -> Self {
        let background = color_from_number(background);
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), Rgba(to_rgba(background))),
            background,
            pending: VecDeque::new(),
            dirty: None,
            sprites: BTreeMap::new(),
            shapes: ShapeRegistry::new(),
            composed: None,
            next_id: 0,
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.width, config.height, config.background)
    }

    pub fn into_shared(self) -> SharedCanvas {
        Arc::new(Mutex::new(self))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The drawing so far, without sprites or queued operations.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn background(&self) -> Argb {
        self.background
    }

    pub fn shapes(&self) -> &ShapeRegistry {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut ShapeRegistry {
        &mut self.shapes
    }

    pub fn next_turtle_id(&mut self) -> TurtleId {
        self.next_id += 1;
        TurtleId(self.next_id)
    }

    /// Queue an operation behind those already submitted.
    ///
    /// The host normally drains the queue with [`apply_pending`](Self::apply_pending)
    /// or [`compose`](Self::compose). Once [`MAX_PENDING_OPS`] are waiting the
    /// backlog is applied here, so an undrained canvas stays bounded.
    pub fn submit(&mut self, op: impl Into<GraphicsOp>) {
        let op = op.into();
        tracing::trace!(op = op.kind(), queued = self.pending.len(), "submit");
        if self.pending.len() >= MAX_PENDING_OPS {
            tracing::debug!(queued = self.pending.len(), "pending queue full, applying");
            self.apply_pending();
        }
        self.pending.push_back(op);
    }

    pub fn pending(&self) -> impl Iterator<Item = &GraphicsOp> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Apply every queued operation in submission order; returns the area
    /// they touched.
    pub fn apply_pending(&mut self) -> Option<DirtyRect> {
        let mut touched: Option<DirtyRect> = None;
        while let Some(op) = self.pending.pop_front() {
            if let Some(rect) = op.apply(&mut self.image) {
                touched = Some(touched.map_or(rect, |t| t.union(&rect)));
            }
        }
        if let Some(rect) = touched {
            self.mark_dirty(rect);
        }
        touched
    }

    /// Area needing repaint since the last call.
    pub fn take_dirty(&mut self) -> Option<DirtyRect> {
        self.dirty.take()
    }

    /// Erase the drawing to the background color. Queued operations are dropped.
    pub fn clean(&mut self) {
        let dropped = self.pending.len();
        self.pending.clear();
        let fill = Rgba(to_rgba(self.background));
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
        tracing::debug!(dropped, "canvas cleaned");
        self.mark_dirty(DirtyRect::new(0, 0, self.width(), self.height()));
    }

    /// Change the background color number; the drawing is erased.
    pub fn set_background(&mut self, number: u32) {
        self.background = color_from_number(number);
        self.clean();
    }

    /// Pixels of the drawing in a block, after queued operations have run.
    /// Positions off the canvas read as transparent.
    pub fn pixels_at(&mut self, top_left: LogicalPoint, width: u32, height: u32) -> Vec<Argb> {
        self.apply_pending();
        let (x, y) = (top_left.pixel_x(self.width()), top_left.pixel_y(self.height()));
        self.image.read_block(x, y, width, height)
    }

    /// Pixel of the drawing under a point, `None` off the canvas.
    pub fn pixel_at(&mut self, point: LogicalPoint) -> Option<Argb> {
        self.apply_pending();
        let (x, y) = (point.pixel_x(self.width()), point.pixel_y(self.height()));
        self.image.contains(x, y).then(|| self.image.argb(x as u32, y as u32))
    }

    pub fn sprite(&self, id: TurtleId) -> Option<&PlacedSprite> {
        self.sprites.get(&id)
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// The drawing with every sprite overlaid.
    pub fn compose(&mut self) -> &RgbaImage {
        self.apply_pending();
        let frame = match self.composed.take() {
            Some(frame) => frame,
            None => {
                let mut frame = self.image.clone();
                for sprite in self.sprites.values() {
                    sprite.overlay(&mut frame);
                }
                frame
            }
        };
        self.composed.insert(frame)
    }

    fn mark_sprite(&mut self, sprite: Option<&PlacedSprite>) {
        if let Some(rect) = sprite.and_then(|s| s.bounds(self.width(), self.height())) {
            self.mark_dirty(rect);
        }
    }
}

impl DisplaySurface for TurtleCanvas {
    fn mark_dirty(&mut self, rect: DirtyRect) {
        self.dirty = Some(self.dirty.map_or(rect, |d| d.union(&rect)));
        self.composed = None;
    }

    fn add_sprite(&mut self, id: TurtleId, sprite: PlacedSprite) {
        let old = self.sprites.insert(id, sprite.clone());
        self.mark_sprite(old.as_ref());
        self.mark_sprite(Some(&sprite));
    }

    fn remove_sprite(&mut self, id: TurtleId) {
        let old = self.sprites.remove(&id);
        self.mark_sprite(old.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_core::{FillOp, LineOp, SetPixelsOp, WHITE_OPAQUE};

    const RED: Argb = 0xffff_0000;

    #[test]
    fn test_new_canvas_is_background() {
        let canvas = TurtleCanvas::new(10, 8, 4);
        assert_eq!((canvas.width(), canvas.height()), (10, 8));
        assert_eq!(canvas.image().argb(9, 7), RED);
        assert_eq!(canvas.background(), RED);
    }

    #[test]
    fn test_ops_apply_in_submission_order() {
        let mut canvas = TurtleCanvas::new(20, 20, 7);
        canvas.submit(LineOp::new(LogicalPoint::new(-10.0, 0.5), LogicalPoint::new(10.0, 0.5), RED, 1));
        // the line splits the canvas, so only the upper half fills
        canvas.submit(FillOp::new(LogicalPoint::new(-5.0, 5.0), color_from_number(1)));
        assert_eq!(canvas.pending_len(), 2);
        let touched = canvas.apply_pending().unwrap();
        assert_eq!(canvas.pending_len(), 0);
        assert_eq!(canvas.image().argb(5, 9), RED);
        assert_eq!(canvas.image().argb(5, 2), color_from_number(1));
        assert_eq!(canvas.image().argb(5, 15), WHITE_OPAQUE);
        assert_eq!(canvas.take_dirty(), Some(touched));
        assert_eq!(canvas.take_dirty(), None);
    }

    #[test]
    fn test_pixels_at_sees_queued_ops() {
        let mut canvas = TurtleCanvas::new(10, 10, 7);
        let block = PixelRect::new(2, vec![RED; 4]).unwrap();
        canvas.submit(SetPixelsOp::new(LogicalPoint::new(-1.0, 1.0), block));
        let px = canvas.pixels_at(LogicalPoint::new(-2.0, 2.0), 4, 4);
        assert_eq!(px.iter().filter(|&&p| p == RED).count(), 4);
        assert_eq!(canvas.pixel_at(LogicalPoint::new(0.5, 0.5)), Some(RED));
        assert_eq!(canvas.pixel_at(LogicalPoint::new(50.0, 0.0)), None);
        // off-canvas reads are transparent
        assert_eq!(canvas.pixels_at(LogicalPoint::new(-6.0, 6.0), 2, 2)[0], 0);
    }

    #[test]
    fn test_clean_and_background() {
        let mut canvas = TurtleCanvas::new(10, 10, 7);
        canvas.submit(FillOp::new(LogicalPoint::ORIGIN, RED));
        canvas.apply_pending();
        canvas.take_dirty();
        canvas.submit(FillOp::new(LogicalPoint::ORIGIN, color_from_number(2)));
        canvas.set_background(0);
        assert_eq!(canvas.pending_len(), 0);
        assert_eq!(canvas.image().argb(3, 3), color_from_number(0));
        assert_eq!(canvas.take_dirty(), Some(DirtyRect::new(0, 0, 10, 10)));
    }

    #[test]
    fn test_compose_overlays_sprites() {
        let mut canvas = TurtleCanvas::new(10, 10, 7);
        let id = canvas.next_turtle_id();
        let pixels = PixelRect::new(2, vec![RED, 0, 0, RED]).unwrap();
        canvas.add_sprite(id, PlacedSprite { center: LogicalPoint::ORIGIN, pixels });
        assert_eq!(canvas.sprite_count(), 1);
        assert_eq!(canvas.take_dirty(), Some(DirtyRect::new(4, 4, 2, 2)));
        let frame = canvas.compose().clone();
        assert_eq!(frame.argb(4, 4), RED);
        assert_eq!(frame.argb(5, 4), WHITE_OPAQUE);
        // the drawing itself is untouched
        assert_eq!(canvas.image().argb(4, 4), WHITE_OPAQUE);
        canvas.remove_sprite(id);
        assert_eq!(canvas.compose().argb(4, 4), WHITE_OPAQUE);
        assert_ne!(canvas.next_turtle_id(), id);
    }

    #[test]
    fn test_compose_clips_sprite_at_top_left() {
        let mut canvas = TurtleCanvas::new(10, 10, 7);
        let id = canvas.next_turtle_id();
        let pixels = PixelRect::new(4, (1..=16).map(|n| 0xff00_0000 | n).collect()).unwrap();
        // centered on the top-left corner pixel, so the sprite hangs off two edges
        canvas.add_sprite(id, PlacedSprite { center: LogicalPoint::new(-5.0, 5.0), pixels });
        assert_eq!(canvas.take_dirty(), Some(DirtyRect::new(0, 0, 2, 2)));
        let frame = canvas.compose();
        assert_eq!(frame.argb(0, 0), 0xff00_000b);
        assert_eq!(frame.argb(1, 0), 0xff00_000c);
        assert_eq!(frame.argb(0, 1), 0xff00_000f);
        assert_eq!(frame.argb(1, 1), 0xff00_0010);
        assert_eq!(frame.argb(2, 2), WHITE_OPAQUE);
    }

    #[test]
    fn test_queue_drains_past_limit() {
        let mut canvas = TurtleCanvas::new(10, 10, 7);
        let block = PixelRect::new(1, vec![RED]).unwrap();
        for _ in 0..MAX_PENDING_OPS {
            canvas.submit(SetPixelsOp::new(LogicalPoint::ORIGIN, block.clone()));
        }
        assert_eq!(canvas.pending_len(), MAX_PENDING_OPS);
        assert_eq!(canvas.image().argb(5, 5), WHITE_OPAQUE);
        canvas.submit(FillOp::new(LogicalPoint::new(-4.0, 4.0), RED));
        assert_eq!(canvas.pending_len(), 1);
        assert_eq!(canvas.image().argb(5, 5), RED);
        assert_eq!(canvas.take_dirty(), Some(DirtyRect::new(5, 5, 1, 1)));
    }
}
