//! Sprite behavior as seen by a turtle: rotation, recoloring, stamping.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use tg_core::{PixelRect, WHITE_OPAQUE};
use tg_sprite::{RotationStyle, Shape, ShapeRegistry, SpriteBuffer};

fn red_square_on_white() -> anyhow::Result<PixelRect> {
    let mut data = vec![WHITE_OPAQUE; 20 * 20];
    for r in 5..15 {
        for c in 5..15 {
            data[r * 20 + c] = 0xffff_0000;
        }
    }
    Ok(PixelRect::new(20, data)?)
}

#[test]
fn square_grows_when_turned_diagonal() -> anyhow::Result<()> {
    let mut sprite = SpriteBuffer::from_pixels(&red_square_on_white()?, RotationStyle::Rotate);
    sprite.set_heading(0.0);
    assert_eq!((sprite.width(), sprite.height()), (10, 10));
    sprite.set_heading(FRAC_PI_4);
    assert!((13..=16).contains(&sprite.width()));
    sprite.set_heading(FRAC_PI_2);
    assert_eq!((sprite.width(), sprite.height()), (10, 10));
    Ok(())
}

#[test]
fn stamp_snapshot_matches_current_pixels() -> anyhow::Result<()> {
    let sprite = Shape::Triangle { width: 14, height: 18 }.build(0xff00_00ff, 1.2);
    let rect = sprite.to_pixel_rect()?;
    assert_eq!(rect.width(), sprite.side());
    assert_eq!(rect.height(), sprite.side());
    assert_eq!(rect.pixels(), sprite.pixels());
    Ok(())
}

#[test]
fn recolor_then_rotate_keeps_color() -> anyhow::Result<()> {
    let mut sprite = Shape::Diamond { width: 20, height: 20 }.build(0xff00_00ff, FRAC_PI_2);
    assert!(sprite.set_color(0xffff_ff00));
    assert!(sprite.set_heading(1.0));
    assert!(sprite.pixels().contains(&0xffff_ff00));
    assert!(!sprite.pixels().contains(&0xff00_00ff));
    Ok(())
}

#[test]
fn registry_builds_user_sprites() -> anyhow::Result<()> {
    let mut reg = ShapeRegistry::new();
    reg.load(64, red_square_on_white()?, RotationStyle::FlipFacingRight)?;
    let sprite = reg.resolve(64, &[])?.build(0, 0.0);
    assert_eq!(sprite.rotation_style(), RotationStyle::FlipFacingRight);
    assert_eq!((sprite.width(), sprite.height()), (10, 10));
    Ok(())
}
