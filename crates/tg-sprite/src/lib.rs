//! tg-sprite: the square pixel buffer that shows a turtle's shape, its
//! rotation and recoloring, and the registry of loadable shapes.

mod buffer;
mod error;
mod painter;
mod registry;
mod shapes;

pub use buffer::{HEADING_TOLERANCE, MAX_SOURCE_HEIGHT, MAX_SOURCE_WIDTH, RotationStyle, SpriteBuffer, side_for};
pub use error::ShapeError;
pub use painter::ShapePainter;
pub use registry::{FIRST_USER_SHAPE, LAST_USER_SHAPE, ShapeRegistry};
pub use shapes::Shape;
