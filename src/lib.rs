//! Client-side controls for the platformer.
//!
//! The host engine owns rendering, physics and the frame loop. It preloads
//! assets through [`init_audio`] / [`init_spritesheet`], creates one
//! [`GameInput`] per page and calls `checkControls({ mario, keys })` every frame.

use log::warn;
use wasm_bindgen::prelude::*;

pub mod assets;
pub mod components;
pub mod error;
pub mod host;
pub mod input;
pub mod mobile;
pub mod model;
pub mod movement;
pub mod settings;
pub mod state;
pub mod util;

use error::ControlsError;
use host::{ControlContext, Scene};
use mobile::MobileControls;
use model::Control;
use settings::ControlSettings;

#[wasm_bindgen(js_name = initAudio)]
pub fn init_audio(scene: &Scene) -> Result<(), JsValue> {
    assets::init_audio(&scene.load())?;
    Ok(())
}

#[wasm_bindgen(js_name = initSpritesheet)]
pub fn init_spritesheet(scene: &Scene) -> Result<(), JsValue> {
    assets::init_spritesheet(&scene.load())?;
    Ok(())
}

/// Plays `id` once. Returns nothing when the host refused to play it.
#[wasm_bindgen(js_name = playAudio)]
pub fn play_audio(id: &str, scene: &Scene, volume: Option<f32>) -> Option<bool> {
    assets::play_audio(id, &scene.sound(), volume)
}

/// Keyboard + touch controls for one page. Create it once and keep it.
#[wasm_bindgen]
pub struct GameInput {
    mobile: MobileControls,
    settings: ControlSettings,
}

#[wasm_bindgen]
impl GameInput {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GameInput {
        let settings = ControlSettings::load();
        util::init_logging(settings.log_level);
        let mobile = MobileControls::new(&settings);
        GameInput { mobile, settings }
    }

    #[wasm_bindgen(js_name = initMobileControls)]
    pub fn init_mobile_controls(&mut self) -> Result<(), JsValue> {
        self.mobile.init()?;
        Ok(())
    }

    #[wasm_bindgen(js_name = isTouchControlActive)]
    pub fn is_touch_control_active(&self, control: &str) -> bool {
        match control.parse::<Control>() {
            Ok(c) => self.mobile.is_control_active(c),
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// `{ left, right, jump }`, all false until the overlay is mounted.
    #[wasm_bindgen(js_name = getTouchControlsState)]
    pub fn get_touch_controls_state(&self) -> Result<JsValue, JsValue> {
        let json = serde_json::to_string(&self.mobile.get_state()).map_err(ControlsError::from)?;
        js_sys::JSON::parse(&json)
    }

    #[wasm_bindgen(js_name = checkControls)]
    pub fn check_controls(&self, ctx: &ControlContext) {
        let mut mario = ctx.mario();
        movement::check_controls(
            &mut mario,
            ctx.keys().snapshot(),
            self.mobile.get_state(),
            &self.settings.movement,
        );
    }

    #[wasm_bindgen(js_name = setHaptics)]
    pub fn set_haptics(&mut self, enabled: bool) {
        self.settings.haptics = enabled;
        self.settings.save();
        self.mobile.set_pulse_ms(self.settings.pulse_ms());
    }

    pub fn reset(&mut self) {
        self.mobile.reset();
    }

    pub fn destroy(&mut self) {
        self.mobile.destroy();
    }
}

impl Default for GameInput {
    fn default() -> Self {
        Self::new()
    }
}
