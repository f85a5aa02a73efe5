use anyhow::Result;
use tg_turtle::Turtle;

pub mod chessboard;
pub mod shapes;
pub mod snowflake;
pub mod tree;

pub const NAMES: [&str; 4] = ["tree", "snowflake", "chessboard", "shapes"];

/// A drawing driven entirely through one turtle.
pub trait Scene {
    fn name(&self) -> &'static str;
    fn draw(&self, turtle: &mut Turtle) -> Result<()>;
}

pub fn by_name(name: &str) -> Option<Box<dyn Scene>> {
    let scene: Box<dyn Scene> = match name {
        "tree" => Box::new(tree::TreeScene::default()),
        "snowflake" => Box::new(snowflake::SnowflakeScene::default()),
        "chessboard" => Box::new(chessboard::ChessboardScene::default()),
        "shapes" => Box::new(shapes::ShapesScene),
        _ => return None,
    };
    Some(scene)
}
