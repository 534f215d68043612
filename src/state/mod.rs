pub mod touch;

pub use touch::{ControlSlot, TouchControlState};
