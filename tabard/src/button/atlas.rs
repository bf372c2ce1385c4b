use std::rc::Rc;
use vellum::{
    math::IVec2,
    two::{AtlasCache, AtlasId, Sprite},
};

use super::{ButtonBase, ButtonState};

/// Button whose looks are two frames of a shared atlas. Nothing is copied;
/// frames are looked up on every use, so an atlas reload is picked up
/// immediately.
pub struct Button {
    state: ButtonState,
    atlases: AtlasCache,
    atlas: AtlasId,
    released: u32,
    pressed: u32,
}

impl Button {
    pub fn new(
        x: i32,
        y: i32,
        atlases: AtlasCache,
        atlas: AtlasId,
        released: u32,
        pressed: u32,
    ) -> Self {
        Button {
            state: ButtonState::new(IVec2::new(x, y)),
            atlases,
            atlas,
            released,
            pressed,
        }
    }

    pub fn set_atlas_info(&mut self, atlas: AtlasId, released: u32, pressed: u32) {
        self.atlas = atlas;
        self.released = released;
        self.pressed = pressed;
    }
    pub fn atlas_info(&self) -> (AtlasId, u32, u32) {
        (self.atlas, self.released, self.pressed)
    }
}

impl ButtonBase for Button {
    fn state(&self) -> &ButtonState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut ButtonState {
        &mut self.state
    }
    fn pressed_sprite(&self) -> Rc<Sprite> {
        self.atlases.get(self.atlas, self.pressed)
    }
    fn released_sprite(&self) -> Rc<Sprite> {
        self.atlases.get(self.atlas, self.released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::tests::{solid, PRESSED, RELEASED};
    use vellum::two::{Image, SpriteAtlas};

    fn cache() -> AtlasCache {
        let cache = AtlasCache::new();
        cache.insert(
            AtlasId(4),
            SpriteAtlas::new(vec![solid(4, 4, RELEASED), solid(4, 4, PRESSED)]),
        );
        cache
    }

    #[test]
    fn draws_frames_from_the_atlas() {
        let mut button = Button::new(1, 1, cache(), AtlasId(4), 0, 1);
        let mut surface = Image::new(8, 8);
        button.draw(&mut surface);
        assert_eq!(surface.pixel(1, 1), RELEASED);
        button.press();
        button.draw(&mut surface);
        assert_eq!(surface.pixel(4, 4), PRESSED);
    }

    #[test]
    fn repointing_swaps_frames() {
        let mut button = Button::new(0, 0, cache(), AtlasId(4), 0, 1);
        button.set_atlas_info(AtlasId(4), 1, 0);
        assert_eq!(button.released_sprite().pixel(0, 0), PRESSED);
        assert_eq!(button.atlas_info(), (AtlasId(4), 1, 0));
    }

    #[test]
    fn disabled_look_is_rebuilt_after_reload() {
        let atlases = cache();
        let button = Button::new(0, 0, atlases.clone(), AtlasId(4), 0, 1);
        let before = button.disabled_sprite();
        assert!(Rc::ptr_eq(&before, &button.disabled_sprite()));

        atlases.insert(
            AtlasId(4),
            SpriteAtlas::new(vec![solid(6, 6, RELEASED), solid(6, 6, PRESSED)]),
        );
        let after = button.disabled_sprite();
        assert!(!Rc::ptr_eq(&before, &after));
        assert_eq!(after.size(), IVec2::new(6, 6));
    }

    #[test]
    fn missing_atlas_gives_empty_area() {
        let button = Button::new(5, 5, AtlasCache::new(), AtlasId(77), 0, 1);
        assert!(button.area().is_empty());
        let mut surface = Image::new(2, 2);
        button.draw(&mut surface);
        assert_eq!(surface, Image::new(2, 2));
    }
}
