//! Turtle graphics configuration
//!
//! Settings are read from `tg.toml` in the current directory, then
//! overridden by `TG_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Longest throttle pause accepted, in milliseconds.
pub const MAX_THROTTLE_MS: u64 = 5000;
pub const MIN_LABEL_HEIGHT: u32 = 6;
pub const MAX_LABEL_HEIGHT: u32 = 100;

/// Errors from loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TgConfig {
    /// Canvas settings
    pub canvas: CanvasConfig,
    /// Initial turtle state
    pub turtle: TurtleConfig,
    /// Label text settings
    pub text: TextConfig,
    /// Demo application settings
    pub demo: DemoConfig,
}

/// Canvas configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Background color number
    pub background: u32,
}

/// Initial turtle state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    pub pen_size: u32,
    /// Pen color number
    pub pen_color: u32,
    /// Shape number (0 is the turtle)
    pub shape: u32,
    /// Pause after each visible move or turn, capped at `MAX_THROTTLE_MS`
    pub throttle_ms: u64,
    /// Label text height in pixels
    pub label_height: u32,
}

/// Label text configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TextConfig {
    /// Path to a .ttf/.otf file; block glyphs are used when unset
    pub font: Option<PathBuf>,
}

/// Demo application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Scene to draw (tree, snowflake, chessboard, shapes)
    pub scene: Option<String>,
    /// PNG file the finished canvas is written to
    pub output: PathBuf,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 600, height: 600, background: 7 }
    }
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            pen_size: 2,
            pen_color: 0,
            shape: 0,
            throttle_ms: 0,
            label_height: 20,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { scene: None, output: PathBuf::from("turtle.png") }
    }
}

fn parse_into<T: std::str::FromStr>(name: &str, slot: &mut T) {
    if let Ok(val) = std::env::var(name) {
        if let Ok(parsed) = val.parse::<T>() {
            *slot = parsed;
        }
    }
}

impl TgConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str::<Self>(&content)?.normalized())
    }

    /// Load `tg.toml` from the current directory, or defaults if it is
    /// missing or unreadable
    pub fn load_or_default() -> Self {
        Self::load_from_file("tg.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        // Canvas settings
        parse_into("TG_CANVAS_WIDTH", &mut self.canvas.width);
        parse_into("TG_CANVAS_HEIGHT", &mut self.canvas.height);
        parse_into("TG_BACKGROUND", &mut self.canvas.background);

        // Turtle settings
        parse_into("TG_PEN_SIZE", &mut self.turtle.pen_size);
        parse_into("TG_PEN_COLOR", &mut self.turtle.pen_color);
        parse_into("TG_SHAPE", &mut self.turtle.shape);
        parse_into("TG_THROTTLE_MS", &mut self.turtle.throttle_ms);
        parse_into("TG_LABEL_HEIGHT", &mut self.turtle.label_height);

        // Text and demo settings
        if let Ok(font) = std::env::var("TG_FONT") {
            self.text.font = Some(PathBuf::from(font));
        }
        if let Ok(scene) = std::env::var("TG_SCENE") {
            self.demo.scene = Some(scene);
        }
        if let Ok(output) = std::env::var("TG_OUTPUT") {
            self.demo.output = PathBuf::from(output);
        }

        *self = std::mem::take(self).normalized();
    }

    /// Bring out-of-range values back into their accepted ranges
    pub fn normalized(mut self) -> Self {
        self.canvas.width = self.canvas.width.max(1);
        self.canvas.height = self.canvas.height.max(1);
        self.turtle.pen_size = self.turtle.pen_size.max(1);
        self.turtle.throttle_ms = self.turtle.throttle_ms.min(MAX_THROTTLE_MS);
        self.turtle.label_height = self.turtle.label_height.clamp(MIN_LABEL_HEIGHT, MAX_LABEL_HEIGHT);
        self
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from tg.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
