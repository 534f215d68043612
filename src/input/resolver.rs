use crate::model::{KeyboardSnapshot, ResolvedControls, TouchSnapshot};

/// Keyboard OR touch, per direction. Touch jump drives `up`.
pub fn resolve_controls(keys: KeyboardSnapshot, touch: TouchSnapshot) -> ResolvedControls {
    ResolvedControls {
        left: keys.left || touch.left,
        right: keys.right || touch.right,
        up: keys.up || touch.jump,
    }
}
