//! ARGB pixel helpers and the numbered color palette.
//!
//! Pixels are packed `0xAARRGGBB` words. Colors are selected by palette
//! number; numbers past the table are taken as raw `0xRRGGBB` values.

use palette::Srgb;
use palette::named;

/// A packed `0xAARRGGBB` pixel.
pub type Argb = u32;

pub const OPAQUE: Argb = 0xff00_0000;
pub const RGB_MASK: Argb = 0x00ff_ffff;
pub const TRANSPARENT: Argb = 0;
pub const WHITE_OPAQUE: Argb = 0xffff_ffff;
pub const BLACK_OPAQUE: Argb = 0xff00_0000;

pub fn alpha(pixel: Argb) -> u8 {
    (pixel >> 24) as u8
}

pub fn rgb(pixel: Argb) -> u32 {
    pixel & RGB_MASK
}

pub fn opaque(pixel: Argb) -> Argb {
    pixel | OPAQUE
}

pub fn to_rgba(pixel: Argb) -> [u8; 4] {
    [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8, alpha(pixel)]
}

pub fn from_rgba([r, g, b, a]: [u8; 4]) -> Argb {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

const PALETTE: [Srgb<u8>; 32] = [
    named::BLACK,
    named::BLUE,
    named::LIME,
    named::CYAN,
    named::RED,
    named::MAGENTA,
    named::YELLOW,
    named::WHITE,
    Srgb::new(0x9b, 0x60, 0x3b), // brown
    Srgb::new(0xc5, 0x88, 0x12), // tan
    Srgb::new(0x64, 0xa2, 0x40), // forest
    Srgb::new(0x78, 0xbb, 0xbb), // aqua
    Srgb::new(0xff, 0x95, 0x77), // salmon
    Srgb::new(0x90, 0x71, 0xd0), // purple
    Srgb::new(0xff, 0xa3, 0x00), // orange
    Srgb::new(0xb7, 0xb7, 0xb7), // grey
    named::NAVY,
    named::SKYBLUE,
    named::LIMEGREEN,
    named::STEELBLUE,
    named::CHOCOLATE,
    named::PURPLE,
    named::GOLD,
    named::LIGHTGRAY,
    named::PERU,
    named::WHEAT,
    named::PALEGREEN,
    named::LIGHTBLUE,
    named::KHAKI,
    named::PINK,
    named::LAWNGREEN,
    named::OLIVE,
];

/// Number of palette entries; larger color numbers are raw RGB values.
pub const PALETTE_LEN: u32 = PALETTE.len() as u32;

fn srgb_to_rgb(c: Srgb<u8>) -> u32 {
    (u32::from(c.red) << 16) | (u32::from(c.green) << 8) | u32::from(c.blue)
}

/// Opaque ARGB pixel for a color number.
pub fn color_from_number(number: u32) -> Argb {
    match PALETTE.get(number as usize) {
        Some(c) => opaque(srgb_to_rgb(*c)),
        None => opaque(number & RGB_MASK),
    }
}

/// Color number for an RGB value: the first matching palette slot, else the
/// RGB value itself.
pub fn number_from_rgb(rgb_value: u32) -> u32 {
    let rgb_value = rgb_value & RGB_MASK;
    PALETTE
        .iter()
        .position(|c| srgb_to_rgb(*c) == rgb_value)
        .map(|i| i as u32)
        .unwrap_or(rgb_value)
}
