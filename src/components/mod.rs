pub mod touch_overlay;

pub use touch_overlay::{sync_overlay_classes, ControllerHandle, TouchOverlay, TouchOverlayProps};
