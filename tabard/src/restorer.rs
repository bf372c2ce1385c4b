use vellum::two::Image;

use crate::button::ButtonBase;

/// Keeps a button disabled for as long as the guard lives.
///
/// A button that was already disabled is left alone, both on creation and on
/// drop.
pub struct ButtonRestorer<'a, B: ButtonBase + ?Sized> {
    button: &'a mut B,
    surface: &'a mut Image,
    was_disabled: bool,
}

impl<'a, B: ButtonBase + ?Sized> ButtonRestorer<'a, B> {
    pub fn new(button: &'a mut B, surface: &'a mut Image) -> Self {
        let was_disabled = button.is_disabled();
        if !was_disabled {
            button.disable();
            button.draw(surface);
        }
        ButtonRestorer {
            button,
            surface,
            was_disabled,
        }
    }

    pub fn button(&self) -> &B {
        self.button
    }
}

impl<B: ButtonBase + ?Sized> Drop for ButtonRestorer<'_, B> {
    fn drop(&mut self) {
        if !self.was_disabled {
            self.button.enable();
            self.button.draw(self.surface);
        }
    }
}
