use crate::{
    asset::{self, AssetError},
    math::IVec2,
    two::IRect,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    KpEnter,
    Escape,
    Space,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl TryFrom<miniquad::KeyCode> for Key {
    type Error = ();
    fn try_from(value: miniquad::KeyCode) -> Result<Self, Self::Error> {
        use miniquad::KeyCode as Code;
        Ok(match value {
            Code::Enter => Key::Enter,
            Code::KpEnter => Key::KpEnter,
            Code::Escape => Key::Escape,
            Code::Space => Key::Space,
            Code::Tab => Key::Tab,
            Code::Backspace => Key::Backspace,
            Code::Up => Key::Up,
            Code::Down => Key::Down,
            Code::Left => Key::Left,
            Code::Right => Key::Right,
            Code::A => Key::A,
            Code::B => Key::B,
            Code::C => Key::C,
            Code::D => Key::D,
            Code::E => Key::E,
            Code::F => Key::F,
            Code::G => Key::G,
            Code::H => Key::H,
            Code::I => Key::I,
            Code::J => Key::J,
            Code::K => Key::K,
            Code::L => Key::L,
            Code::M => Key::M,
            Code::N => Key::N,
            Code::O => Key::O,
            Code::P => Key::P,
            Code::Q => Key::Q,
            Code::R => Key::R,
            Code::S => Key::S,
            Code::T => Key::T,
            Code::U => Key::U,
            Code::V => Key::V,
            Code::W => Key::W,
            Code::X => Key::X,
            Code::Y => Key::Y,
            Code::Z => Key::Z,
            Code::Key0 => Key::Key0,
            Code::Key1 => Key::Key1,
            Code::Key2 => Key::Key2,
            Code::Key3 => Key::Key3,
            Code::Key4 => Key::Key4,
            Code::Key5 => Key::Key5,
            Code::Key6 => Key::Key6,
            Code::Key7 => Key::Key7,
            Code::Key8 => Key::Key8,
            Code::Key9 => Key::Key9,
            Code::F1 => Key::F1,
            Code::F2 => Key::F2,
            Code::F3 => Key::F3,
            Code::F4 => Key::F4,
            Code::F5 => Key::F5,
            Code::F6 => Key::F6,
            Code::F7 => Key::F7,
            Code::F8 => Key::F8,
            Code::F9 => Key::F9,
            Code::F10 => Key::F10,
            Code::F11 => Key::F11,
            Code::F12 => Key::F12,
            _ => return Err(()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl TryFrom<miniquad::MouseButton> for MouseButton {
    type Error = ();
    fn try_from(value: miniquad::MouseButton) -> Result<Self, Self::Error> {
        match value {
            miniquad::MouseButton::Left => Ok(MouseButton::Left),
            miniquad::MouseButton::Middle => Ok(MouseButton::Middle),
            miniquad::MouseButton::Right => Ok(MouseButton::Right),
            miniquad::MouseButton::Unknown => Err(()),
        }
    }
}

/// Raw events, as delivered by the window layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, pressed: bool },
    MouseMotion { position: IVec2 },
    MouseButton { button: MouseButton, pressed: bool },
}

impl InputEvent {
    /// Window layers report pointer positions as floats; widgets work in whole pixels.
    pub fn mouse_motion(x: f32, y: f32) -> Self {
        InputEvent::MouseMotion {
            position: IVec2::new(x.floor() as i32, y.floor() as i32),
        }
    }
}

/// Game-level actions that dialogs answer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hotkey {
    DefaultOkay,
    DefaultCancel,
}

impl Hotkey {
    pub const ALL: [Hotkey; 2] = [Hotkey::DefaultOkay, Hotkey::DefaultCancel];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotkeyBindings(HashMap<Hotkey, Vec<Key>>);

impl Default for HotkeyBindings {
    fn default() -> Self {
        let mut bindings = HotkeyBindings::empty();
        bindings.bind(Hotkey::DefaultOkay, Key::Enter);
        bindings.bind(Hotkey::DefaultOkay, Key::KpEnter);
        bindings.bind(Hotkey::DefaultCancel, Key::Escape);
        bindings
    }
}

impl HotkeyBindings {
    pub fn empty() -> Self {
        HotkeyBindings(HashMap::new())
    }

    const FILENAME: &'static str = "hotkeys.yaml";
    pub fn load_config() -> Result<HotkeyBindings, AssetError> {
        asset::load_yaml_file("config", Self::FILENAME)
    }
    pub fn save_config(&self) -> Result<(), AssetError> {
        asset::save_yaml_file("config", Self::FILENAME, self)
    }
    pub fn create_default_config_if_missing() -> asset::Result<()> {
        let path = asset::get_path("config", Self::FILENAME);
        if path.exists() {
            return Ok(());
        }
        log::info!("Creating default file {}", path.to_string_lossy());
        asset::create_dir("config")?;
        HotkeyBindings::default().save_config()
    }

    pub fn bind(&mut self, hotkey: Hotkey, key: Key) {
        let keys = self.0.entry(hotkey).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    pub fn keys(&self, hotkey: Hotkey) -> &[Key] {
        self.0.get(&hotkey).map(Vec::as_slice).unwrap_or(&[])
    }
    fn hotkeys_for(&self, key: Key) -> impl Iterator<Item = Hotkey> + '_ {
        self.0
            .iter()
            .filter(move |(_, keys)| keys.contains(&key))
            .map(|(hotkey, _)| *hotkey)
    }
}

#[derive(Default, Clone, Copy, Debug)]
struct PointerState {
    position: IVec2,
    primary: bool,
}

#[derive(Clone, Copy, Debug)]
struct Click {
    pressed_at: IVec2,
    released_at: IVec2,
}

/// Frame-scoped view of pointer and keyboard input.
///
/// Feed it every event with [`InputSystem::handle_event`], query it while
/// processing the frame, then call [`InputSystem::end_frame`].
pub struct InputSystem {
    bindings: HotkeyBindings,
    pointer: PointerState,
    press_position: Option<IVec2>,
    click: Option<Click>,
    hotkeys: HashSet<Hotkey>,
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new(HotkeyBindings::default())
    }
}

impl InputSystem {
    /// Unbound hotkeys are reported here, once; they can never fire.
    pub fn new(bindings: HotkeyBindings) -> Self {
        for hotkey in Hotkey::ALL {
            if bindings.keys(hotkey).is_empty() {
                log::warn!("Hotkey {:?} not bound", hotkey);
            }
        }
        InputSystem {
            bindings,
            pointer: Default::default(),
            press_position: None,
            click: None,
            hotkeys: HashSet::new(),
        }
    }
    pub fn load_config() -> asset::Result<Self> {
        Ok(Self::new(HotkeyBindings::load_config()?))
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::MouseMotion { position } => self.pointer.position = position,
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                if pressed == self.pointer.primary {
                    return;
                }
                self.pointer.primary = pressed;
                if pressed {
                    self.press_position = Some(self.pointer.position);
                } else if let Some(pressed_at) = self.press_position.take() {
                    self.click = Some(Click {
                        pressed_at,
                        released_at: self.pointer.position,
                    });
                }
            }
            InputEvent::MouseButton { .. } => {}
            InputEvent::Key { key, pressed } => {
                if pressed {
                    let hotkeys: Vec<Hotkey> = self.bindings.hotkeys_for(key).collect();
                    self.hotkeys.extend(hotkeys);
                }
            }
        }
    }

    /// Whether the primary button is held with the pointer inside `area`.
    pub fn mouse_press_left(&self, area: IRect) -> bool {
        self.pointer.primary && area.contains(self.pointer.position)
    }

    /// Whether a click both started and ended inside `area` this frame. A
    /// successful query consumes the click.
    pub fn mouse_click_left(&mut self, area: IRect) -> bool {
        match self.click {
            Some(click) if area.contains(click.pressed_at) && area.contains(click.released_at) => {
                self.click = None;
                true
            }
            _ => false,
        }
    }

    pub fn hotkey_pressed(&self, hotkey: Hotkey) -> bool {
        self.hotkeys.contains(&hotkey)
    }

    pub fn end_frame(&mut self) {
        self.click = None;
        self.hotkeys.clear();
    }
}
