use std::rc::Rc;
use vellum::{math::IVec2, two::Sprite};

use super::{ButtonBase, ButtonState};

/// Button that owns its three looks. An empty disabled sprite falls back to a
/// darkened copy of the released one.
#[derive(Default)]
pub struct ButtonSprite {
    state: ButtonState,
    released: Rc<Sprite>,
    pressed: Rc<Sprite>,
    disabled: Rc<Sprite>,
}

impl ButtonSprite {
    pub fn new(x: i32, y: i32, released: Sprite, pressed: Sprite, disabled: Sprite) -> Self {
        ButtonSprite {
            state: ButtonState::new(IVec2::new(x, y)),
            released: Rc::new(released),
            pressed: Rc::new(pressed),
            disabled: Rc::new(disabled),
        }
    }
    /// An empty button at `(x, y)`; give it looks with [`ButtonSprite::set_sprite`].
    pub fn at(x: i32, y: i32) -> Self {
        Self::new(x, y, Sprite::default(), Sprite::default(), Sprite::default())
    }

    pub fn set_sprite(&mut self, released: Sprite, pressed: Sprite, disabled: Sprite) {
        self.released = Rc::new(released);
        self.pressed = Rc::new(pressed);
        self.disabled = Rc::new(disabled);
    }
}

impl ButtonBase for ButtonSprite {
    fn state(&self) -> &ButtonState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut ButtonState {
        &mut self.state
    }
    fn pressed_sprite(&self) -> Rc<Sprite> {
        self.pressed.clone()
    }
    fn released_sprite(&self) -> Rc<Sprite> {
        self.released.clone()
    }
    fn disabled_sprite(&self) -> Rc<Sprite> {
        if self.disabled.is_empty() {
            self.state.darkened(self.released.clone())
        } else {
            self.disabled.clone()
        }
    }
}
