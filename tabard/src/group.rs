use vellum::{
    config::InterfaceConfig,
    display::Display,
    input::{Hotkey, InputSystem},
    two::{AtlasCache, AtlasId, IRect, Image, Sprite},
};

use crate::{
    button::{Button, ButtonBase, ButtonSprite},
    dialog,
};

/// Atlas holding the standard dialog buttons.
pub const SYSTEM_ATLAS: AtlasId = AtlasId(1);
/// Same layout as [`SYSTEM_ATLAS`], drawn for the evil interface theme.
pub const SYSTEM_EVIL_ATLAS: AtlasId = AtlasId(2);

/// Released and pressed frames of each dialog button in the system atlas.
fn preset_frames(value: i32) -> (u32, u32) {
    match value {
        dialog::OK => (1, 2),
        dialog::CANCEL => (3, 4),
        dialog::YES => (5, 6),
        _ => (7, 8),
    }
}

enum Placement {
    BottomLeft,
    BottomRight,
    BottomCenter,
}

/// An ordered collection of buttons, each answering with a value.
#[derive(Default)]
pub struct ButtonGroup {
    buttons: Vec<(Box<dyn ButtonBase>, i32)>,
}

impl ButtonGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard dialog buttons laid out along the bottom edge of `area`.
    ///
    /// Supported sets are `YES | NO`, `OK | CANCEL`, `OK` and `CANCEL`; any
    /// other set gives an empty group.
    pub fn with_preset(
        area: IRect,
        buttons: i32,
        atlases: &AtlasCache,
        config: &InterfaceConfig,
    ) -> Self {
        let atlas = if config.evil_interface {
            SYSTEM_EVIL_ATLAS
        } else {
            SYSTEM_ATLAS
        };
        let layout: &[(i32, Placement)] = match buttons {
            b if b == dialog::YES | dialog::NO => &[
                (dialog::YES, Placement::BottomLeft),
                (dialog::NO, Placement::BottomRight),
            ],
            b if b == dialog::OK | dialog::CANCEL => &[
                (dialog::OK, Placement::BottomLeft),
                (dialog::CANCEL, Placement::BottomRight),
            ],
            dialog::OK => &[(dialog::OK, Placement::BottomCenter)],
            dialog::CANCEL => &[(dialog::CANCEL, Placement::BottomCenter)],
            _ => {
                log::debug!("No preset for dialog buttons {:#06b}", buttons);
                &[]
            }
        };

        let mut group = ButtonGroup::new();
        for (value, placement) in layout {
            let (released, pressed) = preset_frames(*value);
            let size = atlases.get(atlas, released).size();
            let x = match placement {
                Placement::BottomLeft => area.x(),
                Placement::BottomRight => area.right() - size.x,
                Placement::BottomCenter => area.x() + (area.width() - size.x) / 2,
            };
            let y = area.bottom() - size.y;
            group.create_button(x, y, atlases.clone(), atlas, released, pressed, *value);
        }
        group
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_button(
        &mut self,
        x: i32,
        y: i32,
        atlases: AtlasCache,
        atlas: AtlasId,
        released: u32,
        pressed: u32,
        value: i32,
    ) {
        let button = Button::new(x, y, atlases, atlas, released, pressed);
        self.buttons.push((Box::new(button), value));
    }
    pub fn create_sprite_button(
        &mut self,
        x: i32,
        y: i32,
        released: Sprite,
        pressed: Sprite,
        value: i32,
    ) {
        let button = ButtonSprite::new(x, y, released, pressed, Sprite::default());
        self.buttons.push((Box::new(button), value));
    }
    pub fn add_button(&mut self, button: ButtonSprite, value: i32) {
        self.buttons.push((Box::new(button), value));
    }

    pub fn draw(&self, output: &mut Image) {
        for (button, _) in &self.buttons {
            button.draw(output);
        }
    }

    pub fn button(&self, index: usize) -> &dyn ButtonBase {
        self.buttons[index].0.as_ref()
    }
    pub fn button_mut(&mut self, index: usize) -> &mut dyn ButtonBase {
        self.buttons[index].0.as_mut()
    }
    pub fn value(&self, index: usize) -> i32 {
        self.buttons[index].1
    }
    pub fn len(&self) -> usize {
        self.buttons.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Updates press visuals, then reports the value of the button that was
    /// clicked or answered by hotkey this frame, or [`dialog::ZERO`].
    pub fn process_events(&mut self, input: &mut InputSystem, display: &mut dyn Display) -> i32 {
        for (button, _) in self.buttons.iter_mut() {
            if button.is_disabled() {
                continue;
            }
            if input.mouse_press_left(button.area()) {
                button.draw_on_press(display);
            } else {
                button.draw_on_release(display);
            }
        }

        for (button, value) in &self.buttons {
            if button.is_enabled() && input.mouse_click_left(button.area()) {
                return *value;
            }
        }

        for (button, value) in &self.buttons {
            if button.is_disabled() {
                continue;
            }
            let answered = (dialog::is_affirmative(*value)
                && input.hotkey_pressed(Hotkey::DefaultOkay))
                || (dialog::is_negative(*value) && input.hotkey_pressed(Hotkey::DefaultCancel));
            if answered {
                return *value;
            }
        }

        dialog::ZERO
    }
}
