//! Numbered user shapes.

use std::collections::BTreeMap;

use tg_core::PixelRect;

use crate::buffer::RotationStyle;
use crate::error::ShapeError;
use crate::shapes::Shape;

pub const FIRST_USER_SHAPE: u32 = 32;
pub const LAST_USER_SHAPE: u32 = 127;

/// User-loaded shapes in slots `FIRST_USER_SHAPE..=LAST_USER_SHAPE`.
#[derive(Clone, Debug, Default)]
pub struct ShapeRegistry {
    user: BTreeMap<u32, Shape>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_user_slot(number: u32) -> bool {
        (FIRST_USER_SHAPE..=LAST_USER_SHAPE).contains(&number)
    }

    /// Store an image in a user slot, replacing what was there.
    pub fn load(&mut self, number: u32, pixels: PixelRect, rotation_style: RotationStyle) -> Result<(), ShapeError> {
        if !Self::is_user_slot(number) {
            return Err(ShapeError::UnknownShape(number));
        }
        tracing::debug!(number, width = pixels.width(), height = pixels.height(), "loaded user shape");
        self.user.insert(number, Shape::UserImage { pixels, rotation_style });
        Ok(())
    }

    pub fn remove(&mut self, number: u32) -> Option<Shape> {
        self.user.remove(&number)
    }

    pub fn get(&self, number: u32) -> Option<&Shape> {
        self.user.get(&number)
    }

    pub fn len(&self) -> usize {
        self.user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_empty()
    }

    /// Shape for a number: a built-in (with `params`) or a loaded user slot.
    pub fn resolve(&self, number: u32, params: &[u32]) -> Result<Shape, ShapeError> {
        if Self::is_user_slot(number) {
            return self.get(number).cloned().ok_or(ShapeError::EmptyUserShape(number));
        }
        Shape::builtin(number, params).ok_or(ShapeError::UnknownShape(number))
    }
}
