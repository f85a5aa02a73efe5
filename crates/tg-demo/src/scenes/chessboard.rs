use anyhow::Result;
use tg_core::LogicalPoint;
use tg_turtle::Turtle;

use super::Scene;

/// Eight by eight board of filled squares with an outline.
pub struct ChessboardScene {
    pub length: f64,
    pub light: u32,
    pub dark: u32,
}

impl Default for ChessboardScene {
    fn default() -> Self {
        Self { length: 480.0, light: 7, dark: 15 }
    }
}

impl ChessboardScene {
    fn square(&self, turtle: &mut Turtle, top_left: LogicalPoint, side: f64, fill: u32) -> Result<()> {
        turtle.pen_up();
        turtle.set_position(top_left)?;
        turtle.set_heading(90.0)?;
        turtle.pen_down();
        turtle.set_pen_color(0)?;
        for _ in 0..4 {
            turtle.forward(side)?;
            turtle.right(90.0)?;
        }
        // step inside the outline before filling
        turtle.pen_up();
        turtle.set_position(LogicalPoint::new(top_left.x() + side / 2.0, top_left.y() - side / 2.0))?;
        turtle.set_pen_color(fill)?;
        turtle.fill();
        Ok(())
    }
}

impl Scene for ChessboardScene {
    fn name(&self) -> &'static str {
        "chessboard"
    }

    fn draw(&self, turtle: &mut Turtle) -> Result<()> {
        let cell = (self.length / 8.0).round();
        let origin = -cell * 4.0;
        turtle.set_pen_size(2);
        for row in 0..8 {
            for col in 0..8 {
                let fill = if (row + col) % 2 == 0 { self.light } else { self.dark };
                let corner = LogicalPoint::new(origin + cell * f64::from(col), -origin - cell * f64::from(row));
                self.square(turtle, corner, cell, fill)?;
            }
        }
        turtle.pen_up();
        turtle.set_position(LogicalPoint::new(origin, -origin + 8.0))?;
        turtle.set_pen_color(0)?;
        turtle.label("a b c d e f g h");
        Ok(())
    }
}
