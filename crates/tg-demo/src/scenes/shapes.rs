use anyhow::Result;
use tg_core::{LogicalPoint, PixelRect};
use tg_sprite::{RotationStyle, Shape};
use tg_turtle::Turtle;

use super::Scene;

/// One stamp of every built-in shape around a circle, plus a recolored user image.
pub struct ShapesScene;

fn checker_image(side: u32) -> Vec<u32> {
    (0..side * side)
        .map(|i| {
            let (x, y) = (i % side, i / side);
            if (x / 4 + y / 4) % 2 == 0 { 0xff_ff_00_00 } else { 0xff_00_00_ff }
        })
        .collect()
}

impl Scene for ShapesScene {
    fn name(&self) -> &'static str {
        "shapes"
    }

    fn draw(&self, turtle: &mut Turtle) -> Result<()> {
        turtle.pen_up();
        for number in Shape::TURTLE..=Shape::DIAMOND {
            let heading = f64::from(number) * 360.0 / 7.0;
            turtle.home()?;
            turtle.set_heading(heading)?;
            turtle.forward(150.0)?;
            turtle.set_pen_color(number + 1)?;
            turtle.set_shape_number(number, &[30, 30])?;
            turtle.stamp()?;
        }

        turtle.home()?;
        turtle.set_shape(Shape::UserImage {
            pixels: PixelRect::new(32, checker_image(32))?,
            rotation_style: RotationStyle::Rotate,
        });
        turtle.set_heading(45.0)?;
        turtle.stamp()?;

        turtle.set_position(LogicalPoint::new(-60.0, -240.0))?;
        turtle.pen_down();
        turtle.set_pen_pattern(&[6, 4]);
        turtle.arc(270.0, 40.0);
        Ok(())
    }
}
