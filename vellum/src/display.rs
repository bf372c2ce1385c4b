use crate::two::{IRect, Image};

/// The screen that widgets draw into.
///
/// `surface` is the back buffer; `render` pushes a region of it to the user.
pub trait Display {
    fn surface(&mut self) -> &mut Image;
    fn render(&mut self, area: IRect);
}

/// Headless display backed by a plain image. Records every presented area.
#[derive(Default)]
pub struct OffscreenDisplay {
    image: Image,
    rendered: Vec<IRect>,
}

impl OffscreenDisplay {
    pub fn new(width: i32, height: i32) -> Self {
        OffscreenDisplay {
            image: Image::new(width, height),
            rendered: Vec::new(),
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }
    pub fn rendered(&self) -> &[IRect] {
        &self.rendered
    }
    pub fn take_rendered(&mut self) -> Vec<IRect> {
        std::mem::take(&mut self.rendered)
    }
}

impl Display for OffscreenDisplay {
    fn surface(&mut self) -> &mut Image {
        &mut self.image
    }
    fn render(&mut self, area: IRect) {
        self.rendered.push(area);
    }
}
