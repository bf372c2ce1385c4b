use glam::IVec2;
use palette::Srgba;

use super::{Image, Sprite};

/// Builds the drop shadow cast by `sprite` when lit so that its shadow falls
/// `offset` pixels away.
///
/// The result covers both the sprite footprint and the displaced shadow, and
/// only contains the shadow itself: translucent black with the given alpha
/// wherever the sprite is visible. Its anchor is the sprite's anchor shifted
/// by the negative components of `offset`, so drawing the sprite at
/// `sprite.anchor() - shadow.anchor()` inside the shadow image lines the two up.
pub fn make_shadow(sprite: &Sprite, offset: IVec2, strength: u8) -> Sprite {
    if sprite.is_empty() {
        return Sprite::default();
    }

    let shift = offset.min(IVec2::ZERO);
    let size = sprite.size() + offset.abs();
    let mut shadow = Image::new(size.x, size.y);
    let color = Srgba::new(0, 0, 0, strength);
    for y in 0..sprite.height() {
        for x in 0..sprite.width() {
            if sprite.pixel(x, y).alpha > 0 {
                shadow.set_pixel(x + offset.x - shift.x, y + offset.y - shift.y, color);
            }
        }
    }
    Sprite::new(shadow, sprite.anchor() + shift)
}
