//! The turtle state machine.
//!
//! A turtle turns motion and pen commands into graphics operations on its
//! canvas and keeps its sprite in step with its heading and pen color.
//! Without a canvas it still tracks every piece of state but draws nothing.

use std::collections::HashSet;
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::sync::Arc;

use tg_config::{MAX_LABEL_HEIGHT, MIN_LABEL_HEIGHT, TurtleConfig};
use tg_core::color::{alpha, rgb};
use tg_core::{
    ArcOp, BlockGlyphs, FillOp, LabelOp, LineCap, LineOp, LogicalPoint, SetPixelsOp, TextRasterizer,
    compass_to_radians, normalize_radians, number_from_rgb, radians_to_compass,
};
use tg_sprite::{Shape, ShapeRegistry, SpriteBuffer};

use crate::canvas::{DisplaySurface, PlacedSprite, SharedCanvas, TurtleCanvas, TurtleId};
use crate::error::Result;
use crate::pen::PenState;
use crate::throttle::{AbortHandle, Throttle};

const DEFAULT_LABEL_HEIGHT: u32 = 20;
const MAX_ARC_DEGREES: f64 = 360.0;

pub struct Turtle {
    id: TurtleId,
    canvas: Option<SharedCanvas>,
    position: LogicalPoint,
    heading: f64,
    pen: PenState,
    visible: bool,
    shape: Shape,
    sprite: SpriteBuffer,
    label_font: Arc<dyn TextRasterizer>,
    label_height: u32,
    throttle: Throttle,
}

impl fmt::Debug for Turtle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Turtle")
            .field("id", &self.id)
            .field("attached", &self.canvas.is_some())
            .field("position", &self.position)
            .field("heading", &self.heading())
            .field("pen", &self.pen)
            .field("visible", &self.visible)
            .field("shape", &self.shape.number())
            .finish_non_exhaustive()
    }
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new()
    }
}

impl Turtle {
    /// A turtle with no canvas.
    pub fn new() -> Self {
        Self::create(None)
    }

    /// A visible turtle at the center of `canvas`, facing north.
    pub fn on_canvas(canvas: SharedCanvas) -> Self {
        Self::create(Some(canvas))
    }

    pub fn from_config(canvas: Option<SharedCanvas>, config: &TurtleConfig) -> Result<Self> {
        let mut turtle = Self::create(canvas);
        turtle.set_pen_size(i64::from(config.pen_size));
        turtle.set_pen_color(config.pen_color)?;
        turtle.set_label_height(i64::from(config.label_height));
        turtle.set_throttle(config.throttle_ms as i64);
        if config.shape != Shape::TURTLE {
            turtle.set_shape_number(config.shape, &[])?;
        }
        Ok(turtle)
    }

    fn create(canvas: Option<SharedCanvas>) -> Self {
        let id = canvas.as_ref().map_or(TurtleId(0), |c| c.lock().next_turtle_id());
        let pen = PenState::default();
        let heading = FRAC_PI_2;
        let shape = Shape::Turtle;
        let sprite = shape.build(pen.color(), heading);
        let visible = canvas.is_some();
        let turtle = Self {
            id,
            canvas,
            position: LogicalPoint::ORIGIN,
            heading,
            pen,
            visible,
            shape,
            sprite,
            label_font: Arc::new(BlockGlyphs::new(DEFAULT_LABEL_HEIGHT)),
            label_height: DEFAULT_LABEL_HEIGHT,
            throttle: Throttle::default(),
        };
        if visible {
            turtle.with_canvas(|c| turtle.refresh_sprite(c));
        }
        tracing::debug!(id = turtle.id.0, attached = visible, "turtle created");
        turtle
    }

    fn with_canvas<R>(&self, f: impl FnOnce(&mut TurtleCanvas) -> R) -> Option<R> {
        self.canvas.as_ref().map(|c| f(&mut c.lock()))
    }

    /// Show the current sprite pixels on the canvas at the turtle position.
    fn refresh_sprite(&self, canvas: &mut TurtleCanvas) {
        match self.sprite.to_pixel_rect() {
            Ok(pixels) => canvas.add_sprite(self.id, PlacedSprite { center: self.position, pixels }),
            Err(e) => tracing::warn!(id = self.id.0, error = %e, "sprite not shown"),
        }
    }

    /// Bring a lagging sprite up to date with pen color and heading.
    fn sync_sprite(&mut self) -> bool {
        let recolored = self.sprite.set_color(self.pen.color());
        let turned = self.sprite.set_heading(self.heading);
        recolored || turned
    }

    /// Pause after a visible step; an interrupted pause becomes `Aborted`.
    fn settle(&self) -> Result<()> {
        if self.canvas.is_some() && self.visible {
            self.throttle.pause()
        } else {
            Ok(())
        }
    }

    fn line_to(&self, from: LogicalPoint, to: LogicalPoint) -> LineOp {
        LineOp::new(from, to, self.pen.color(), self.pen.width())
            .with_pattern(self.pen.pattern().map(<[f32]>::to_vec))
            .with_cap(self.pen.cap())
    }

    pub fn id(&self) -> TurtleId {
        self.id
    }

    pub fn canvas(&self) -> Option<&SharedCanvas> {
        self.canvas.as_ref()
    }

    pub fn position(&self) -> LogicalPoint {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }

    /// Compass heading in degrees, 0 north, clockwise.
    pub fn heading(&self) -> f64 {
        radians_to_compass(self.heading)
    }

    pub fn heading_radians(&self) -> f64 {
        self.heading
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Compass heading from the turtle toward `point`.
    pub fn towards(&self, point: LogicalPoint) -> f64 {
        radians_to_compass(self.position.radians_towards(point))
    }

    pub fn forward(&mut self, distance: f64) -> Result<()> {
        self.walk(distance)
    }

    pub fn back(&mut self, distance: f64) -> Result<()> {
        self.walk(-distance)
    }

    fn walk(&mut self, distance: f64) -> Result<()> {
        if distance == 0.0 {
            return Ok(());
        }
        let dest = self.position.other_end_point(self.heading, distance);
        self.move_to(dest)
    }

    pub fn set_position(&mut self, point: LogicalPoint) -> Result<()> {
        self.move_to(point)
    }

    pub fn set_x(&mut self, x: f64) -> Result<()> {
        self.move_to(LogicalPoint::new(x, self.position.y()))
    }

    pub fn set_y(&mut self, y: f64) -> Result<()> {
        self.move_to(LogicalPoint::new(self.position.x(), y))
    }

    pub fn home(&mut self) -> Result<()> {
        self.move_to(LogicalPoint::ORIGIN)
    }

    fn move_to(&mut self, dest: LogicalPoint) -> Result<()> {
        if dest == self.position {
            return Ok(());
        }
        let from = std::mem::replace(&mut self.position, dest);
        self.with_canvas(|canvas| {
            if self.pen.is_down() {
                canvas.submit(self.line_to(from, dest));
            }
            if self.visible {
                self.refresh_sprite(canvas);
            }
        });
        self.settle()
    }

    pub fn left(&mut self, degrees: f64) -> Result<()> {
        self.set_heading_radians(self.heading + degrees.to_radians())
    }

    pub fn right(&mut self, degrees: f64) -> Result<()> {
        self.set_heading_radians(self.heading - degrees.to_radians())
    }

    /// Turn to a compass heading.
    pub fn set_heading(&mut self, degrees: f64) -> Result<()> {
        self.set_heading_radians(compass_to_radians(degrees))
    }

    pub fn set_heading_radians(&mut self, radians: f64) -> Result<()> {
        self.heading = normalize_radians(radians);
        if self.visible && self.sprite.set_heading(self.heading) {
            self.with_canvas(|c| self.refresh_sprite(c));
        }
        self.settle()
    }

    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        self.sync_sprite();
        self.visible = true;
        self.with_canvas(|c| self.refresh_sprite(c));
    }

    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.with_canvas(|c| c.remove_sprite(self.id));
    }

    /// Remove the turtle from its canvas; it keeps its state.
    pub fn detach(&mut self) {
        self.hide();
        self.canvas = None;
    }

    pub fn pen_up(&mut self) {
        self.pen.set_down(false);
    }

    pub fn pen_down(&mut self) {
        self.pen.set_down(true);
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen.is_down()
    }

    pub fn set_pen_color(&mut self, number: u32) -> Result<()> {
        if !self.pen.set_color_number(number) {
            return Ok(());
        }
        if self.visible && self.sprite.set_color(self.pen.color()) {
            self.with_canvas(|c| self.refresh_sprite(c));
        }
        Ok(())
    }

    pub fn pen_color(&self) -> u32 {
        self.pen.color_number()
    }

    pub fn set_pen_size(&mut self, width: i64) {
        self.pen.set_width(width);
    }

    pub fn pen_size(&self) -> u32 {
        self.pen.width()
    }

    pub fn set_pen_pattern(&mut self, pattern: &[u32]) {
        self.pen.set_pattern(pattern);
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.pen.set_cap(cap);
    }

    /// Arc of `degrees` around the turtle, starting straight ahead and
    /// sweeping clockwise. The turtle does not move.
    pub fn arc(&mut self, degrees: f64, radius: f64) {
        if degrees == 0.0 || !self.pen.is_down() {
            return;
        }
        let degrees = degrees.clamp(-MAX_ARC_DEGREES, MAX_ARC_DEGREES);
        let op = ArcOp::new(
            self.position,
            radius,
            self.heading,
            -degrees.to_radians(),
            self.pen.color(),
            self.pen.width(),
        )
        .with_pattern(self.pen.pattern().map(<[f32]>::to_vec));
        self.with_canvas(|c| c.submit(op));
    }

    /// Flood fill from the turtle position with the pen color.
    pub fn fill(&mut self) {
        let op = FillOp::new(self.position, self.pen.color());
        self.with_canvas(|c| c.submit(op));
    }

    /// Draw text upright with its baseline starting at the turtle.
    pub fn label(&mut self, text: &str) {
        let op = LabelOp::new(text, self.position, self.label_font.clone(), self.pen.color());
        self.with_canvas(|c| c.submit(op));
    }

    pub fn label_width(&self, text: &str) -> u32 {
        self.label_font.measure(text).width
    }

    pub fn label_height(&self) -> u32 {
        self.label_height
    }

    /// Heights are clamped to the accepted label range.
    pub fn set_label_height(&mut self, height: i64) {
        let height = height.clamp(i64::from(MIN_LABEL_HEIGHT), i64::from(MAX_LABEL_HEIGHT)) as u32;
        if height != self.label_height {
            self.label_height = height;
            self.label_font = self.label_font.resized(height);
        }
    }

    /// Use `font` for labels at the current label height.
    pub fn set_label_font(&mut self, font: Arc<dyn TextRasterizer>) {
        self.label_font = font.resized(self.label_height);
    }

    /// Copy the sprite onto the drawing, shown or not.
    pub fn stamp(&mut self) -> Result<()> {
        self.sync_sprite();
        let Some(canvas) = &self.canvas else {
            return Ok(());
        };
        let placed = PlacedSprite { center: self.position, pixels: self.sprite.to_pixel_rect()? };
        canvas.lock().submit(SetPixelsOp::new(placed.top_left(), placed.pixels));
        Ok(())
    }

    /// Distinct RGB values of the drawing beneath the sprite's visible
    /// pixels, in first-seen order. `None` without a canvas.
    pub fn colors_under(&mut self) -> Option<Vec<u32>> {
        self.sync_sprite();
        let side = self.sprite.side();
        let half = f64::from(side) / 2.0;
        let top_left = LogicalPoint::new(self.position.x() - half, self.position.y() + half);
        let under = self.with_canvas(|c| c.pixels_at(top_left, side, side))?;

        let mut seen = HashSet::new();
        let mut colors = Vec::new();
        for (&mask, &pixel) in self.sprite.pixels().iter().zip(&under) {
            // off-canvas reads are transparent
            if alpha(mask) == 0 || alpha(pixel) == 0 {
                continue;
            }
            if seen.insert(rgb(pixel)) {
                colors.push(rgb(pixel));
            }
        }
        Some(colors)
    }

    /// Color number of the drawing under the turtle; -1 without a canvas or
    /// off its edge.
    pub fn color_under(&self) -> i64 {
        self.with_canvas(|c| c.pixel_at(self.position))
            .flatten()
            .map_or(-1, |p| i64::from(number_from_rgb(rgb(p))))
    }

    /// Erase the drawing; the turtle stays where it is.
    pub fn clean(&mut self) {
        self.with_canvas(|c| c.clean());
    }

    /// Erase the drawing and send the turtle home facing north.
    pub fn clear_screen(&mut self) -> Result<()> {
        self.clean();
        let down = self.pen.is_down();
        self.pen_up();
        let homed = self.home().and_then(|_| self.set_heading_radians(FRAC_PI_2));
        self.pen.set_down(down);
        homed
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.sprite = shape.build(self.pen.color(), self.heading);
        self.shape = shape;
        if self.visible {
            self.with_canvas(|c| self.refresh_sprite(c));
        }
    }

    /// Select a built-in shape (0..=6, optional `[width, height]`) or a
    /// user shape loaded on the canvas (32..=127).
    pub fn set_shape_number(&mut self, number: u32, params: &[u32]) -> Result<()> {
        let shape = self
            .with_canvas(|c| c.shapes().resolve(number, params))
            .unwrap_or_else(|| ShapeRegistry::new().resolve(number, params))?;
        self.set_shape(shape);
        Ok(())
    }

    pub fn shape_width(&mut self) -> u32 {
        self.sync_sprite();
        self.sprite.width()
    }

    pub fn shape_height(&mut self) -> u32 {
        self.sync_sprite();
        self.sprite.height()
    }

    pub fn set_throttle(&mut self, delay_ms: i64) {
        self.throttle.set_delay_ms(delay_ms);
    }

    pub fn throttle_ms(&self) -> u64 {
        self.throttle.delay_ms()
    }

    /// Handle a host uses to interrupt this turtle's throttle pause.
    pub fn abort_handle(&self) -> AbortHandle {
        self.throttle.abort_handle()
    }
}
