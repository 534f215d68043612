pub mod controller;
pub mod resolver;

pub use controller::{Haptics, NoHaptics, TouchInputController, TouchInputSink};
pub use resolver::resolve_controls;
