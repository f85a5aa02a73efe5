use anyhow::Result;
use tg_core::LogicalPoint;
use tg_turtle::Turtle;

use super::Scene;

// teal, forest, red, brown
const BRANCH_COLORS: [u32; 4] = [11, 10, 4, 8];

/// Recursive binary tree growing up from the bottom of the canvas.
pub struct TreeScene {
    pub trunk: f64,
    pub spread: f64,
}

impl Default for TreeScene {
    fn default() -> Self {
        Self { trunk: 80.0, spread: 33.0 }
    }
}

impl TreeScene {
    fn branch(&self, turtle: &mut Turtle, length: f64) -> Result<()> {
        if length <= 4.0 {
            return Ok(());
        }
        turtle.set_pen_size((length / 10.0).ceil() as i64);
        turtle.set_pen_color(BRANCH_COLORS[length as usize % BRANCH_COLORS.len()])?;
        turtle.forward(length)?;
        turtle.right(self.spread)?;
        self.branch(turtle, length * 0.7)?;
        turtle.left(2.0 * self.spread)?;
        self.branch(turtle, length * 0.7)?;
        turtle.right(self.spread)?;
        turtle.back(length)?;
        Ok(())
    }
}

impl Scene for TreeScene {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn draw(&self, turtle: &mut Turtle) -> Result<()> {
        let floor = -f64::from(turtle_canvas_height(turtle)) / 2.0 + 20.0;
        turtle.pen_up();
        turtle.set_heading(0.0)?;
        turtle.set_position(LogicalPoint::new(0.0, floor))?;
        turtle.pen_down();
        self.branch(turtle, self.trunk)
    }
}

fn turtle_canvas_height(turtle: &Turtle) -> u32 {
    turtle.canvas().map_or(600, |c| c.lock().height())
}
