//! Lifecycle of the on-screen touch controls.
//!
//! One [`MobileControls`] per page, owned by the host-facing [`crate::GameInput`].
//! `init` mounts the [`TouchOverlay`] into a fresh root under `<body>`;
//! `destroy` unmounts it and forgets all touch state.

use log::{debug, info};
use web_sys::Element;
use yew::AppHandle;

use crate::components::{sync_overlay_classes, ControllerHandle, TouchOverlay, TouchOverlayProps};
use crate::error::ControlsError;
use crate::input::TouchInputController;
use crate::model::{Control, TouchSnapshot};
use crate::settings::ControlSettings;
use crate::util::{is_touch_device, NavigatorHaptics};

pub const ROOT_ID: &str = "mobile-controls-root";

struct MountedOverlay {
    root: Element,
    app: AppHandle<TouchOverlay>,
}

pub struct MobileControls {
    controller: ControllerHandle,
    overlay: Option<MountedOverlay>,
    force_overlay: bool,
}

impl MobileControls {
    pub fn new(settings: &ControlSettings) -> Self {
        let controller =
            TouchInputController::new(Box::new(NavigatorHaptics), settings.pulse_ms());
        Self::with_controller(controller, settings.force_overlay)
    }

    pub fn with_controller(controller: TouchInputController, force_overlay: bool) -> Self {
        Self {
            controller: ControllerHandle::new(controller),
            overlay: None,
            force_overlay,
        }
    }

    pub fn controller(&self) -> ControllerHandle {
        self.controller.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.overlay.is_some()
    }

    /// No-op when already mounted or when the device has no touch support.
    pub fn init(&mut self) -> Result<(), ControlsError> {
        if self.overlay.is_some() {
            return Ok(());
        }
        if !self.force_overlay && !is_touch_device() {
            debug!("no touch support detected, skipping mobile controls");
            return Ok(());
        }
        let document = web_sys::window()
            .ok_or(ControlsError::NoWindow)?
            .document()
            .ok_or(ControlsError::NoDocument)?;
        let body = document.body().ok_or(ControlsError::NoBody)?;
        let root = document.create_element("div")?;
        root.set_id(ROOT_ID);
        body.append_child(&root)?;

        let app = yew::Renderer::<TouchOverlay>::with_root_and_props(
            root.clone(),
            TouchOverlayProps {
                controller: self.controller.clone(),
            },
        )
        .render();
        self.controller.0.borrow_mut().attach();
        self.overlay = Some(MountedOverlay { root, app });
        info!("mobile controls initialised");
        Ok(())
    }

    pub fn get_state(&self) -> TouchSnapshot {
        self.controller.0.borrow().get_state()
    }

    pub fn is_control_active(&self, control: Control) -> bool {
        self.controller.0.borrow().is_control_active(control)
    }

    pub fn set_pulse_ms(&mut self, pulse_ms: Option<u32>) {
        self.controller.0.borrow_mut().set_pulse_ms(pulse_ms);
    }

    /// Releases every control; the overlay stays mounted.
    pub fn reset(&mut self) {
        self.controller.0.borrow_mut().reset();
        if let Some(overlay) = &self.overlay {
            sync_overlay_classes(&overlay.root, TouchSnapshot::default());
        }
    }

    pub fn destroy(&mut self) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };
        self.controller.0.borrow_mut().detach();
        overlay.app.destroy();
        overlay.root.remove();
        info!("mobile controls destroyed");
    }
}

impl Drop for MobileControls {
    fn drop(&mut self) {
        self.destroy();
    }
}
