//! Turtle graphics on a software canvas.
//!
//! Re-exports the workspace crates under one roof:
//! - `core`: coordinates, colors and the raster graphics ops
//! - `sprite`: rotatable turtle sprites and shape registry
//! - `turtle`: the shared canvas and turtle state machine
//! - `config`: `tg.toml` / `TG_*` settings

pub use tg_config as config;
pub use tg_core as core;
pub use tg_sprite as sprite;
pub use tg_turtle as turtle;

pub use tg_turtle::{SharedCanvas, Turtle, TurtleCanvas, TurtleError};
