//! tg-turtle: turtle state, the shared canvas it draws on, and the pause
//! between visible steps.

mod canvas;
mod error;
mod pen;
mod throttle;
mod turtle;

pub use canvas::{DisplaySurface, PlacedSprite, SharedCanvas, TurtleCanvas, TurtleId};
pub use error::{Result, TurtleError};
pub use pen::PenState;
pub use throttle::{AbortHandle, Throttle};
pub use turtle::Turtle;
