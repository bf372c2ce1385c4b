use palette::{FromColor, Hsl, Srgb, Srgba};
use serde::{Deserialize, Serialize};

use super::{Image, Pixel};

/// Lightness kept by [`PaletteType::Darkening`].
const DARKENING_LIGHTNESS: f32 = 0.55;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PaletteType {
    /// Disabled-control look.
    Darkening,
    Grayscale,
}

fn remap(pixel: Pixel, palette: PaletteType) -> Pixel {
    let rgb: Srgb = pixel.color.into_format();
    let mut hsl: Hsl = Hsl::from_color(rgb);
    match palette {
        PaletteType::Darkening => hsl.lightness *= DARKENING_LIGHTNESS,
        PaletteType::Grayscale => hsl.saturation = 0.0,
    }
    let rgb: Srgb = Srgb::from_color(hsl);
    let rgb: Srgb<u8> = rgb.into_format();
    Srgba::new(rgb.red, rgb.green, rgb.blue, pixel.alpha)
}

/// Remaps every visible pixel of `image` in place. Alpha is preserved.
pub fn apply_palette(image: &mut Image, palette: PaletteType) {
    for pixel in image.pixels_mut() {
        if pixel.alpha > 0 {
            *pixel = remap(*pixel, palette);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::two::TRANSPARENT;

    #[test]
    fn darkening_lowers_every_channel_and_keeps_alpha() {
        let mut image = Image::filled(2, 1, Srgba::new(200, 120, 40, 255));
        image.set_pixel(1, 0, TRANSPARENT);
        apply_palette(&mut image, PaletteType::Darkening);

        let dark = image.pixel(0, 0);
        assert!(dark.red < 200 && dark.green < 120 && dark.blue <= 40);
        assert_eq!(dark.alpha, 255);
        assert_eq!(image.pixel(1, 0), TRANSPARENT);
    }

    #[test]
    fn grayscale_equalises_channels() {
        let mut image = Image::filled(1, 1, Srgba::new(10, 200, 90, 77));
        apply_palette(&mut image, PaletteType::Grayscale);
        let gray = image.pixel(0, 0);
        assert_eq!(gray.red, gray.green);
        assert_eq!(gray.green, gray.blue);
        assert_eq!(gray.alpha, 77);
    }
}
