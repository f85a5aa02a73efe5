//! Built-in turtle shapes and the shape factory.
//!
//! Built-in shapes are drawn facing east: `height` runs along the heading
//! and `width` across it, so a north-facing shape reports `width` columns.

use tg_core::{Argb, BLACK_OPAQUE, PixelRect};

use crate::buffer::{MAX_SOURCE_HEIGHT, MAX_SOURCE_WIDTH, RotationStyle, SpriteBuffer};
use crate::painter::ShapePainter;

const OUTLINE: Argb = BLACK_OPAQUE;
const DEFAULT_SIZE: u32 = 16;
/// Boxes and balls stay closed down to this size.
const MIN_PLAIN_SIZE: u32 = 6;
/// Pointed shapes need room for an interior behind the tip.
const MIN_POINTED_SIZE: u32 = 10;
const TURTLE_WIDTH: u32 = 18;
const TURTLE_HEIGHT: u32 = 22;

/// What a turtle looks like.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Shape {
    #[default]
    Turtle,
    Arrow { width: u32, height: u32 },
    Ball { diameter: u32 },
    Box { width: u32, height: u32 },
    Cross { width: u32, height: u32 },
    Triangle { width: u32, height: u32 },
    Diamond { width: u32, height: u32 },
    /// Caller-supplied art drawn facing north on a white background.
    UserImage { pixels: PixelRect, rotation_style: RotationStyle },
}

impl Shape {
    pub const TURTLE: u32 = 0;
    pub const ARROW: u32 = 1;
    pub const BALL: u32 = 2;
    pub const BOX: u32 = 3;
    pub const CROSS: u32 = 4;
    pub const TRIANGLE: u32 = 5;
    pub const DIAMOND: u32 = 6;

    /// Built-in shape by number. `params` are `[width, height]`; a missing
    /// height repeats the width and missing sizes use the default.
    pub fn builtin(number: u32, params: &[u32]) -> Option<Shape> {
        let width = params.first().copied().unwrap_or(DEFAULT_SIZE);
        let height = params.get(1).copied().unwrap_or(width);
        let shape = match number {
            Self::TURTLE => Shape::Turtle,
            Self::ARROW => Shape::Arrow { width, height },
            Self::BALL => Shape::Ball { diameter: width },
            Self::BOX => Shape::Box { width, height },
            Self::CROSS => Shape::Cross { width, height },
            Self::TRIANGLE => Shape::Triangle { width, height },
            Self::DIAMOND => Shape::Diamond { width, height },
            _ => return None,
        };
        Some(shape)
    }

    /// Built-in shape number; `None` for user images.
    pub fn number(&self) -> Option<u32> {
        match self {
            Shape::Turtle => Some(Self::TURTLE),
            Shape::Arrow { .. } => Some(Self::ARROW),
            Shape::Ball { .. } => Some(Self::BALL),
            Shape::Box { .. } => Some(Self::BOX),
            Shape::Cross { .. } => Some(Self::CROSS),
            Shape::Triangle { .. } => Some(Self::TRIANGLE),
            Shape::Diamond { .. } => Some(Self::DIAMOND),
            Shape::UserImage { .. } => None,
        }
    }

    /// Render this shape into a sprite buffer at `heading` (radians).
    pub fn build(&self, color: Argb, heading: f64) -> SpriteBuffer {
        match self {
            Shape::UserImage { pixels, rotation_style } => {
                let mut sprite = SpriteBuffer::from_pixels(pixels, *rotation_style);
                sprite.set_heading(heading);
                sprite
            }
            Shape::Turtle => SpriteBuffer::from_painter(TURTLE_WIDTH, TURTLE_HEIGHT, color, heading, draw_turtle),
            Shape::Ball { diameter } => {
                let d = clamp_size(*diameter, *diameter, MIN_PLAIN_SIZE).0;
                SpriteBuffer::from_painter(d, d, color, heading, |p| {
                    let c = p.center();
                    p.circle(c, c, (d / 2) as i32 - 1, OUTLINE);
                })
            }
            Shape::Box { width, height } => {
                let (w, h) = clamp_size(*width, *height, MIN_PLAIN_SIZE);
                SpriteBuffer::from_painter(w, h, color, heading, |p| {
                    let e = Extent::new(p, w, h);
                    p.polygon(&[(e.x0, e.y0), (e.x1, e.y0), (e.x1, e.y1), (e.x0, e.y1)], OUTLINE);
                })
            }
            Shape::Triangle { width, height } => {
                let (w, h) = clamp_size(*width, *height, MIN_POINTED_SIZE);
                SpriteBuffer::from_painter(w, h, color, heading, |p| {
                    let e = Extent::new(p, w, h);
                    p.polygon(&[(e.x1, e.my), (e.x0, e.y1), (e.x0, e.y0)], OUTLINE);
                })
            }
            Shape::Diamond { width, height } => {
                let (w, h) = clamp_size(*width, *height, MIN_POINTED_SIZE);
                SpriteBuffer::from_painter(w, h, color, heading, |p| {
                    let e = Extent::new(p, w, h);
                    p.polygon(&[(e.x0, e.my), (e.mx, e.y0), (e.x1, e.my), (e.mx, e.y1)], OUTLINE);
                })
            }
            Shape::Cross { width, height } => {
                let (w, h) = clamp_size(*width, *height, MIN_POINTED_SIZE);
                SpriteBuffer::from_painter(w, h, color, heading, |p| draw_cross(p, w, h))
            }
            Shape::Arrow { width, height } => {
                let (w, h) = clamp_size(*width, *height, MIN_POINTED_SIZE);
                SpriteBuffer::from_painter(w, h, color, heading, |p| draw_arrow(p, w, h))
            }
        }
    }
}

fn clamp_size(width: u32, height: u32, min: u32) -> (u32, u32) {
    (width.clamp(min, MAX_SOURCE_WIDTH), height.clamp(min, MAX_SOURCE_HEIGHT))
}

/// Bounding box of an east-facing shape centered in the painter.
struct Extent {
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
    mx: i32,
    my: i32,
}

impl Extent {
    fn new(p: &ShapePainter<'_>, across: u32, along: u32) -> Self {
        let c = p.center();
        let x0 = c - (along / 2) as i32;
        let x1 = x0 + along as i32 - 1;
        let y0 = c - (across / 2) as i32;
        let y1 = y0 + across as i32 - 1;
        Self { x0, x1, y0, y1, mx: (x0 + x1) / 2, my: (y0 + y1) / 2 }
    }
}

fn draw_cross(p: &mut ShapePainter<'_>, across: u32, along: u32) {
    let e = Extent::new(p, across, along);
    let t = (across.min(along) / 3).max(4) as i32;
    let (hy0, hy1) = (e.my - t / 2, e.my - t / 2 + t - 1);
    let (vx0, vx1) = (e.mx - t / 2, e.mx - t / 2 + t - 1);
    p.polygon(
        &[
            (vx0, e.y0),
            (vx1, e.y0),
            (vx1, hy0),
            (e.x1, hy0),
            (e.x1, hy1),
            (vx1, hy1),
            (vx1, e.y1),
            (vx0, e.y1),
            (vx0, hy1),
            (e.x0, hy1),
            (e.x0, hy0),
            (vx0, hy0),
        ],
        OUTLINE,
    );
}

fn draw_arrow(p: &mut ShapePainter<'_>, across: u32, along: u32) {
    let e = Extent::new(p, across, along);
    let head = e.x1 - (along / 2) as i32;
    let shaft = ((across / 6) as i32).max(2);
    p.polygon(
        &[
            (e.x0, e.my - shaft),
            (head, e.my - shaft),
            (head, e.y0),
            (e.x1, e.my),
            (head, e.y1),
            (head, e.my + shaft),
            (e.x0, e.my + shaft),
        ],
        OUTLINE,
    );
}

fn draw_turtle(p: &mut ShapePainter<'_>) {
    let c = p.center();
    let shell = 6;
    p.circle(c, c, shell, OUTLINE);
    p.circle(c + shell + 3, c, 3, OUTLINE);
    for dy in [-1, 1] {
        for dx in [-1, 1] {
            p.line(c + 3 * dx, c + 5 * dy, c + 5 * dx, c + 8 * dy, OUTLINE);
        }
    }
    p.line(c - shell, c, c - shell - 3, c, OUTLINE);
}
