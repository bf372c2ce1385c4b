mod atlas;
mod sprite;

pub use atlas::Button;
pub use sprite::ButtonSprite;

use std::{
    cell::RefCell,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};
use vellum::{
    display::Display,
    math::IVec2,
    two::{apply_palette, blit, IRect, Image, PaletteType, Sprite},
    WeakObj,
};

/// Identity of a button, stable for its whole life.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ButtonId(u64);

impl ButtonId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ButtonId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Snapshot sent to a subscriber after a button changes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ButtonEvent {
    pub sender: ButtonId,
    pub pressed: bool,
    pub enabled: bool,
    pub visible: bool,
}

pub trait ButtonObserver {
    fn sender_update(&mut self, event: &ButtonEvent);
}

struct DisabledCache {
    source: Rc<Sprite>,
    disabled: Rc<Sprite>,
}

/// State shared by every button flavour.
pub struct ButtonState {
    id: ButtonId,
    offset: IVec2,
    pressed: bool,
    enabled: bool,
    visible: bool,
    disabled: RefCell<Option<DisabledCache>>,
    subscriber: Option<WeakObj<dyn ButtonObserver>>,
}

impl Default for ButtonState {
    fn default() -> Self {
        ButtonState::new(IVec2::ZERO)
    }
}

impl ButtonState {
    pub fn new(offset: IVec2) -> Self {
        ButtonState {
            id: ButtonId::next(),
            offset,
            pressed: false,
            enabled: true,
            visible: true,
            disabled: RefCell::new(None),
            subscriber: None,
        }
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }
    pub fn event(&self) -> ButtonEvent {
        ButtonEvent {
            sender: self.id,
            pressed: self.pressed,
            enabled: self.enabled,
            visible: self.visible,
        }
    }

    fn notify(&self) {
        let Some(observer) = self.subscriber.as_ref().and_then(WeakObj::try_upgrade) else {
            return;
        };
        observer.get_mut().sender_update(&self.event());
    }

    /// Darkened copy of `released`, rebuilt whenever a different released
    /// sprite is passed in.
    pub fn darkened(&self, released: Rc<Sprite>) -> Rc<Sprite> {
        let mut cache = self.disabled.borrow_mut();
        if let Some(cached) = cache.as_ref() {
            if Rc::ptr_eq(&cached.source, &released) {
                return cached.disabled.clone();
            }
        }
        let mut disabled = Sprite::clone(&released);
        apply_palette(&mut disabled, PaletteType::Darkening);
        let disabled = Rc::new(disabled);
        *cache = Some(DisabledCache {
            source: released,
            disabled: disabled.clone(),
        });
        disabled
    }
}

/// A clickable sprite with pressed, released and disabled looks.
///
/// Implementors provide the state and the pressed/released sprites; everything
/// else is shared. Every state-changing call notifies the subscriber, if any.
pub trait ButtonBase {
    fn state(&self) -> &ButtonState;
    fn state_mut(&mut self) -> &mut ButtonState;

    fn pressed_sprite(&self) -> Rc<Sprite>;
    fn released_sprite(&self) -> Rc<Sprite>;
    fn disabled_sprite(&self) -> Rc<Sprite> {
        self.state().darkened(self.released_sprite())
    }

    fn id(&self) -> ButtonId {
        self.state().id
    }
    fn offset(&self) -> IVec2 {
        self.state().offset
    }
    fn is_enabled(&self) -> bool {
        self.state().enabled
    }
    fn is_disabled(&self) -> bool {
        !self.state().enabled
    }
    fn is_pressed(&self) -> bool {
        self.state().pressed
    }
    fn is_released(&self) -> bool {
        !self.state().pressed
    }
    fn is_visible(&self) -> bool {
        self.state().visible
    }
    fn is_hidden(&self) -> bool {
        !self.state().visible
    }

    fn press(&mut self) {
        if self.is_enabled() {
            self.state_mut().pressed = true;
            self.state().notify();
        }
    }
    fn release(&mut self) {
        if self.is_enabled() {
            self.state_mut().pressed = false;
            self.state().notify();
        }
    }
    fn enable(&mut self) {
        self.state_mut().enabled = true;
        self.state().notify();
    }
    fn disable(&mut self) {
        let state = self.state_mut();
        state.enabled = false;
        // A disabled button is never pressed.
        state.pressed = false;
        self.state().notify();
    }
    fn show(&mut self) {
        self.state_mut().visible = true;
        self.state().notify();
    }
    fn hide(&mut self) {
        self.state_mut().visible = false;
        self.state().notify();
    }
    fn set_position(&mut self, x: i32, y: i32) {
        self.state_mut().offset = IVec2::new(x, y);
    }

    fn subscribe(&mut self, observer: WeakObj<dyn ButtonObserver>) {
        self.state_mut().subscriber = Some(observer);
    }
    fn unsubscribe(&mut self) {
        self.state_mut().subscriber = None;
    }
    fn is_subscribed(&self) -> bool {
        self.state().subscriber.is_some()
    }

    fn draw(&self, output: &mut Image) {
        if self.is_hidden() {
            return;
        }
        let sprite = if self.is_pressed() {
            self.pressed_sprite()
        } else if self.is_enabled() {
            self.released_sprite()
        } else {
            self.disabled_sprite()
        };
        blit(&sprite, output, self.offset() + sprite.anchor());
    }

    /// Presses the button and presents it, unless it is already pressed.
    fn draw_on_press(&mut self, display: &mut dyn Display) -> bool {
        if self.is_pressed() {
            return false;
        }
        self.press();
        self.draw(display.surface());
        display.render(self.area());
        true
    }
    /// Releases the button and presents it, unless it is already released.
    fn draw_on_release(&mut self, display: &mut dyn Display) -> bool {
        if self.is_released() {
            return false;
        }
        self.release();
        self.draw(display.surface());
        display.render(self.area());
        true
    }

    /// Hit area: the sprite currently shown for the pressed/released state.
    fn area(&self) -> IRect {
        let sprite = if self.is_pressed() {
            self.pressed_sprite()
        } else {
            self.released_sprite()
        };
        IRect::from_position_size(self.offset() + sprite.anchor(), sprite.size())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use vellum::{color::Srgba, display::OffscreenDisplay, obj_upcast, two::Pixel, Obj};

    pub(crate) const RELEASED: Pixel = Srgba::new(200, 180, 40, 255);
    pub(crate) const PRESSED: Pixel = Srgba::new(40, 180, 200, 255);

    pub(crate) fn solid(width: i32, height: i32, color: Pixel) -> Sprite {
        Sprite::from(Image::filled(width, height, color))
    }

    #[derive(Default)]
    pub(crate) struct Recorder {
        pub events: Vec<ButtonEvent>,
    }
    impl ButtonObserver for Recorder {
        fn sender_update(&mut self, event: &ButtonEvent) {
            self.events.push(*event);
        }
    }

    fn sample() -> ButtonSprite {
        ButtonSprite::new(
            3,
            4,
            solid(5, 2, RELEASED),
            solid(5, 2, PRESSED),
            Sprite::default(),
        )
    }

    #[test]
    fn disable_forces_release() {
        let mut button = sample();
        button.press();
        assert!(button.is_pressed());
        button.disable();
        assert!(!button.is_pressed());
        assert!(button.is_disabled());
    }

    #[test]
    fn press_and_release_ignore_disabled_buttons() {
        let recorder = Obj::new(Recorder::default());
        let mut button = sample();
        button.disable();
        button.subscribe(obj_upcast!(recorder));

        button.press();
        assert!(button.is_released());
        button.release();
        assert!(recorder.get().events.is_empty());

        button.enable();
        button.press();
        let events = &recorder.get().events;
        assert_eq!(events.len(), 2);
        assert!(events[1].pressed && events[1].enabled);
        assert_eq!(events[1].sender, button.id());
    }

    #[test]
    fn visibility_notifies_without_touching_other_flags() {
        let recorder = Obj::new(Recorder::default());
        let mut button = sample();
        button.subscribe(obj_upcast!(recorder));
        button.press();
        button.hide();
        assert!(button.is_pressed() && button.is_enabled() && button.is_hidden());
        button.show();
        assert_eq!(recorder.get().events.len(), 3);

        button.unsubscribe();
        button.release();
        assert_eq!(recorder.get().events.len(), 3);
        assert!(!button.is_subscribed());
    }

    #[test]
    fn draw_on_press_is_edge_triggered() {
        let mut display = OffscreenDisplay::new(20, 20);
        let mut button = sample();

        assert!(button.draw_on_press(&mut display));
        assert!(button.is_pressed());
        assert_eq!(display.image().pixel(3, 4), PRESSED);
        assert_eq!(display.take_rendered(), vec![IRect::new(3, 4, 5, 2)]);

        assert!(!button.draw_on_press(&mut display));
        assert!(display.rendered().is_empty());

        assert!(button.draw_on_release(&mut display));
        assert!(!button.draw_on_release(&mut display));
        assert_eq!(display.image().pixel(7, 5), RELEASED);
        assert_eq!(display.rendered().len(), 1);
    }

    #[test]
    fn draw_picks_sprite_by_state_and_skips_hidden() {
        let mut surface = Image::new(10, 10);
        let mut button = sample();
        button.hide();
        button.draw(&mut surface);
        assert_eq!(surface, Image::new(10, 10));

        button.show();
        button.disable();
        button.draw(&mut surface);
        let dark = surface.pixel(3, 4);
        assert_ne!(dark, RELEASED);
        assert!(dark.red < RELEASED.red);
    }

    #[test]
    fn area_follows_sprite_anchor() {
        let mut pressed = solid(6, 3, PRESSED);
        pressed.set_anchor(IVec2::new(1, 1));
        let mut button =
            ButtonSprite::new(10, 10, solid(5, 2, RELEASED), pressed, Sprite::default());
        assert_eq!(button.area(), IRect::new(10, 10, 5, 2));
        button.press();
        assert_eq!(button.area(), IRect::new(11, 11, 6, 3));
        button.set_position(0, 0);
        assert_eq!(button.area(), IRect::new(1, 1, 6, 3));
    }

    #[test]
    fn darkened_copy_is_cached_per_source() {
        let state = ButtonState::default();
        let released = Rc::new(solid(2, 2, RELEASED));
        let first = state.darkened(released.clone());
        assert!(Rc::ptr_eq(&first, &state.darkened(released.clone())));

        let replacement = Rc::new(solid(2, 2, RELEASED));
        let second = state.darkened(replacement);
        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(sample().id(), sample().id());
    }
}
