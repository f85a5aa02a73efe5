use std::sync::Arc;

use anyhow::{Context, Result};
use tg_config::TgConfig;
use tg_core::{FontdueRasterizer, TextRasterizer};
use tg_turtle::{TurtleCanvas, Turtle};

mod scenes;
use scenes::Scene;

fn main() -> Result<()> {
    env_logger::init();

    let config = TgConfig::load();

    // CLI flag wins over config/env.
    let requested = std::env::args()
        .find_map(|a| a.strip_prefix("--scene=").map(str::to_owned))
        .or_else(|| config.demo.scene.clone());
    let scene: Box<dyn Scene> = match requested.as_deref() {
        Some(name) => scenes::by_name(name)
            .with_context(|| format!("unknown scene `{name}` (try one of {:?})", scenes::NAMES))?,
        None => Box::new(scenes::tree::TreeScene::default()),
    };

    let canvas = TurtleCanvas::from_config(&config.canvas).into_shared();
    let mut turtle = Turtle::from_config(Some(canvas.clone()), &config.turtle)?;

    if let Some(path) = &config.text.font {
        let px = turtle.label_height() as f32;
        match FontdueRasterizer::from_file(path, px) {
            Ok(font) => {
                let font: Arc<dyn TextRasterizer> = Arc::new(font);
                turtle.set_label_font(font);
            }
            Err(e) => log::warn!("label font {} not loaded, using block glyphs: {e}", path.display()),
        }
    }

    log::info!("drawing scene `{}`", scene.name());
    scene.draw(&mut turtle)?;
    turtle.hide();

    let output = &config.demo.output;
    let mut guard = canvas.lock();
    guard
        .compose()
        .save(output)
        .with_context(|| format!("writing {}", output.display()))?;
    log::info!("saved {}", output.display());
    Ok(())
}
