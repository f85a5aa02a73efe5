use anyhow::Result;
use tg_core::LogicalPoint;
use tg_turtle::Turtle;

use super::Scene;

struct Flake {
    x: f64,
    y: f64,
    size: f64,
    color: u32,
}

/// Eight-armed flakes on a black background.
pub struct SnowflakeScene {
    flakes: Vec<Flake>,
}

impl Default for SnowflakeScene {
    fn default() -> Self {
        let flake = |x, y, size, color| Flake { x, y, size, color };
        Self {
            flakes: vec![
                flake(-50.0, 50.0, 8.0, 7),
                flake(100.0, -100.0, 6.0, 15),
                flake(-70.0, -125.0, 7.0, 6),
                flake(-190.0, -50.0, 4.0, 2),
                flake(120.0, 50.0, 3.0, 22),
            ],
        }
    }
}

fn arm(turtle: &mut Turtle, size: f64) -> Result<()> {
    let twig = 10.0 * size / 3.0;
    for _ in 0..3 {
        for _ in 0..3 {
            turtle.forward(twig)?;
            turtle.back(twig)?;
            turtle.right(45.0)?;
        }
        turtle.left(90.0)?;
        turtle.back(twig)?;
        turtle.left(45.0)?;
    }
    turtle.right(90.0)?;
    turtle.forward(10.0 * size)?;
    Ok(())
}

impl Scene for SnowflakeScene {
    fn name(&self) -> &'static str {
        "snowflake"
    }

    fn draw(&self, turtle: &mut Turtle) -> Result<()> {
        if let Some(canvas) = turtle.canvas() {
            canvas.lock().set_background(0);
        }
        turtle.set_pen_size(1);
        for f in &self.flakes {
            turtle.pen_up();
            turtle.set_heading(90.0)?;
            turtle.set_position(LogicalPoint::new(f.x, f.y))?;
            turtle.forward(10.0 * f.size)?;
            turtle.left(45.0)?;
            turtle.pen_down();
            turtle.set_pen_color(f.color)?;
            for _ in 0..8 {
                arm(turtle, f.size)?;
                turtle.left(45.0)?;
            }
        }
        turtle.pen_up();
        Ok(())
    }
}
