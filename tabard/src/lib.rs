mod button;
pub mod compose;
pub mod dialog;
mod group;
mod option;
mod restorer;

pub use button::*;
pub use compose::{make_button_with_background, make_button_with_shadow};
pub use group::*;
pub use option::OptionButtonGroup;
pub use restorer::ButtonRestorer;
