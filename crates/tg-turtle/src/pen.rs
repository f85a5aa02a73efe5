//! Pen state.

use tg_core::color::rgb;
use tg_core::{Argb, LineCap, color_from_number, number_from_rgb};

/// Color, width, dash pattern, cap and up/down state of a turtle's pen.
#[derive(Clone, Debug, PartialEq)]
pub struct PenState {
    color: Argb,
    width: u32,
    pattern: Option<Vec<f32>>,
    cap: LineCap,
    down: bool,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            color: color_from_number(0),
            width: 2,
            pattern: None,
            cap: LineCap::Butt,
            down: true,
        }
    }
}

impl PenState {
    pub fn color(&self) -> Argb {
        self.color
    }

    /// Color number of the pen, a palette slot where one matches.
    pub fn color_number(&self) -> u32 {
        number_from_rgb(rgb(self.color))
    }

    /// Returns false when the color is unchanged.
    pub fn set_color_number(&mut self, number: u32) -> bool {
        let color = color_from_number(number);
        if color == self.color {
            return false;
        }
        self.color = color;
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Widths below one become one.
    pub fn set_width(&mut self, width: i64) {
        self.width = width.clamp(1, i64::from(u32::MAX)) as u32;
    }

    pub fn pattern(&self) -> Option<&[f32]> {
        self.pattern.as_deref()
    }

    /// Alternating on/off lengths; an empty slice means solid.
    ///
    /// Odd-length patterns repeat their last entry so on and off stay paired.
    pub fn set_pattern(&mut self, pattern: &[u32]) {
        if pattern.is_empty() {
            self.pattern = None;
            return;
        }
        let mut dashes: Vec<f32> = pattern.iter().map(|&d| d as f32).collect();
        if dashes.len() % 2 == 1 {
            dashes.push(dashes[dashes.len() - 1]);
        }
        self.pattern = Some(dashes);
    }

    pub fn cap(&self) -> LineCap {
        self.cap
    }

    pub fn set_cap(&mut self, cap: LineCap) {
        self.cap = cap;
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn set_down(&mut self, down: bool) {
        self.down = down;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pen = PenState::default();
        assert_eq!(pen.width(), 2);
        assert_eq!(pen.color_number(), 0);
        assert!(pen.is_down());
        assert_eq!(pen.cap(), LineCap::Butt);
        assert!(pen.pattern().is_none());
    }

    #[test]
    fn test_pattern_expansion() {
        let mut pen = PenState::default();
        pen.set_pattern(&[3]);
        assert_eq!(pen.pattern(), Some(&[3.0, 3.0][..]));
        pen.set_pattern(&[4, 2, 1]);
        assert_eq!(pen.pattern(), Some(&[4.0, 2.0, 1.0, 1.0][..]));
        pen.set_pattern(&[5, 2]);
        assert_eq!(pen.pattern(), Some(&[5.0, 2.0][..]));
        pen.set_pattern(&[]);
        assert!(pen.pattern().is_none());
    }

    #[test]
    fn test_width_clamp() {
        let mut pen = PenState::default();
        pen.set_width(0);
        assert_eq!(pen.width(), 1);
        pen.set_width(-7);
        assert_eq!(pen.width(), 1);
        pen.set_width(9);
        assert_eq!(pen.width(), 9);
    }

    #[test]
    fn test_color_change_reports() {
        let mut pen = PenState::default();
        assert!(!pen.set_color_number(0));
        assert!(pen.set_color_number(4));
        assert_eq!(pen.color(), 0xffff_0000);
        assert_eq!(pen.color_number(), 4);
    }
}
