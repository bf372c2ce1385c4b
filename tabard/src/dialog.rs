//! Answer values reported by dialog buttons. Values are bit flags so a set of
//! buttons can be described with `|`.

pub const ZERO: i32 = 0;
pub const YES: i32 = 1;
pub const OK: i32 = 2;
pub const NO: i32 = 4;
pub const CANCEL: i32 = 8;

/// Values answering the "okay" hotkey.
pub fn is_affirmative(value: i32) -> bool {
    value == YES || value == OK
}
/// Values answering the "cancel" hotkey.
pub fn is_negative(value: i32) -> bool {
    value == NO || value == CANCEL
}
