use glam::IVec2;
use palette::Srgba;
use std::ops::{Deref, DerefMut};

use super::IRect;

pub type Pixel = Srgba<u8>;

pub const TRANSPARENT: Pixel = Srgba::new(0, 0, 0, 0);

/// RGBA pixel buffer. Dimensions are signed so placement math can go negative
/// before clipping.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Image {
    width: i32,
    height: i32,
    pixels: Vec<Pixel>,
}

impl Image {
    /// A fully transparent image.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Image {
            width,
            height,
            pixels: vec![TRANSPARENT; (width * height) as usize],
        }
    }
    pub fn filled(width: i32, height: i32, color: Pixel) -> Self {
        let mut image = Image::new(width, height);
        image.fill(color);
        image
    }
    /// Builds an image from row-major pixels. Returns `None` if the pixel count
    /// does not match the dimensions.
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Pixel>) -> Option<Self> {
        if width < 0 || height < 0 || pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Image {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            x >= 0 && y >= 0 && x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }
    pub fn pixel(&self, x: i32, y: i32) -> Pixel {
        self.pixels[self.index(x, y)]
    }
    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }
    pub fn fill(&mut self, color: Pixel) {
        self.pixels.fill(color);
    }
}

/// An image plus the offset at which it should be drawn relative to its
/// logical origin.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Sprite {
    image: Image,
    anchor: IVec2,
}

impl Sprite {
    pub fn new(image: Image, anchor: IVec2) -> Self {
        Sprite { image, anchor }
    }
    pub fn anchor(&self) -> IVec2 {
        self.anchor
    }
    pub fn set_anchor(&mut self, anchor: IVec2) {
        self.anchor = anchor;
    }
    pub fn image(&self) -> &Image {
        &self.image
    }
}

impl Deref for Sprite {
    type Target = Image;
    fn deref(&self) -> &Image {
        &self.image
    }
}
impl DerefMut for Sprite {
    fn deref_mut(&mut self) -> &mut Image {
        &mut self.image
    }
}

impl From<Image> for Sprite {
    fn from(image: Image) -> Self {
        Sprite::new(image, IVec2::ZERO)
    }
}

fn blend(src: Pixel, dst: Pixel) -> Pixel {
    match src.alpha {
        0 => dst,
        255 => src,
        alpha => {
            let alpha = u32::from(alpha);
            let inverse = 255 - alpha;
            let mix = |s: u8, d: u8| {
                ((u32::from(s) * alpha + u32::from(d) * inverse + 127) / 255) as u8
            };
            let out_alpha = alpha + (u32::from(dst.alpha) * inverse + 127) / 255;
            Srgba::new(
                mix(src.red, dst.red),
                mix(src.green, dst.green),
                mix(src.blue, dst.blue),
                out_alpha.min(255) as u8,
            )
        }
    }
}

/// Composites `src` over `dst` with its top-left corner at `position`.
/// Transparent source pixels leave the destination untouched; the result is
/// clipped to `dst`.
pub fn blit(src: &Image, dst: &mut Image, position: IVec2) {
    let bounds = IRect::from_position_size(IVec2::ZERO, dst.size());
    let target = IRect::from_position_size(position, src.size()).intersect(bounds);
    for y in target.y()..target.bottom() {
        for x in target.x()..target.right() {
            let source = src.pixel(x - position.x, y - position.y);
            let under = dst.pixel(x, y);
            dst.set_pixel(x, y, blend(source, under));
        }
    }
}

/// Overwrites the top-left region of `dst` with `src`, alpha included.
pub fn copy(src: &Image, dst: &mut Image) {
    let width = src.width.min(dst.width);
    let height = src.height.min(dst.height);
    for y in 0..height {
        for x in 0..width {
            dst.set_pixel(x, y, src.pixel(x, y));
        }
    }
}

/// Extracts `area` from `src`. The area is clipped to the source bounds, so
/// the result may be smaller than requested, or empty.
pub fn crop(src: &Image, area: IRect) -> Image {
    let area = area.intersect(IRect::from_position_size(IVec2::ZERO, src.size()));
    if area.is_empty() {
        return Image::default();
    }
    let mut out = Image::new(area.width(), area.height());
    for y in 0..area.height() {
        for x in 0..area.width() {
            out.set_pixel(x, y, src.pixel(area.x() + x, area.y() + y));
        }
    }
    out
}
