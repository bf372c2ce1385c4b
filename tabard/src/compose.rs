//! Bakes a button's surroundings into its sprites, so the button can be drawn
//! without restoring the background first. Meant for setup time, not per frame.

use vellum::{
    math::IVec2,
    two::{apply_palette, blit, copy, crop, make_shadow, IRect, Image, PaletteType, Sprite},
};

use crate::button::ButtonSprite;

/// Alpha of the drop shadow under shadowed buttons.
pub const SHADOW_STRENGTH: u8 = 120;

fn darkened(sprite: &Sprite) -> Image {
    let mut image = sprite.image().clone();
    apply_palette(&mut image, PaletteType::Darkening);
    image
}

/// Copies of `base` with each layer composited on top at its position.
fn layered(base: &Image, layers: [(&Image, IVec2); 3]) -> [Sprite; 3] {
    layers.map(|(layer, position)| {
        let mut image = Image::new(base.width(), base.height());
        copy(base, &mut image);
        blit(layer, &mut image, position);
        Sprite::from(image)
    })
}

/// A button at `offset` whose sprites include the part of `background` under
/// the released sprite's footprint. Each look is placed at its own anchor
/// inside that footprint.
pub fn make_button_with_background(
    offset: IVec2,
    released: &Sprite,
    pressed: &Sprite,
    background: &Image,
) -> ButtonSprite {
    let backdrop = crop(background, IRect::from_position_size(offset, released.size()));
    let disabled = darkened(released);
    let [released, pressed, disabled] = layered(
        &backdrop,
        [
            (released.image(), released.anchor()),
            (pressed.image(), pressed.anchor()),
            (&disabled, released.anchor()),
        ],
    );
    ButtonSprite::new(offset.x, offset.y, released, pressed, disabled)
}

/// Like [`make_button_with_background`], with a drop shadow of `released`
/// cast `shadow_offset` pixels away baked in as well. The button grows by the
/// shadow, so its position moves by the shadow's anchor.
pub fn make_button_with_shadow(
    offset: IVec2,
    released: &Sprite,
    pressed: &Sprite,
    background: &Image,
    shadow_offset: IVec2,
) -> ButtonSprite {
    let shadow = make_shadow(released, shadow_offset, SHADOW_STRENGTH);
    let origin = offset + shadow.anchor();
    let mut backdrop = crop(background, IRect::from_position_size(origin, shadow.size()));
    blit(&shadow, &mut backdrop, IVec2::ZERO);

    let disabled = darkened(released);
    let released_at = released.anchor() - shadow.anchor();
    let [released, pressed, disabled] = layered(
        &backdrop,
        [
            (released.image(), released_at),
            (pressed.image(), pressed.anchor() - shadow.anchor()),
            (&disabled, released_at),
        ],
    );
    ButtonSprite::new(origin.x, origin.y, released, pressed, disabled)
}
