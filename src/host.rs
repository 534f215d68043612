//! Bindings to the host engine's JS objects and the trait impls that let the
//! pure logic drive them.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::assets::{AssetLoader, FrameSize, SoundSystem};
use crate::error::ControlsError;
use crate::model::KeyboardSnapshot;
use crate::movement::SpriteHandle;

#[wasm_bindgen]
extern "C" {
    /// Scene exposing `load` and `sound`.
    pub type Scene;
    #[wasm_bindgen(method, getter)]
    pub fn load(this: &Scene) -> Loader;
    #[wasm_bindgen(method, getter)]
    pub fn sound(this: &Scene) -> SoundManager;

    pub type Loader;
    #[wasm_bindgen(method, catch)]
    fn audio(this: &Loader, key: &str, url: &str) -> Result<JsValue, JsValue>;
    #[wasm_bindgen(method, catch)]
    fn spritesheet(this: &Loader, key: &str, url: &str, config: &JsValue)
    -> Result<JsValue, JsValue>;

    pub type SoundManager;
    #[wasm_bindgen(method, catch)]
    fn add(this: &SoundManager, key: &str, config: &JsValue) -> Result<Sound, JsValue>;

    pub type Sound;
    #[wasm_bindgen(method, catch)]
    fn play(this: &Sound) -> Result<JsValue, JsValue>;

    /// `{ mario, keys }` passed to `checkControls` every frame.
    pub type ControlContext;
    #[wasm_bindgen(method, getter)]
    pub fn mario(this: &ControlContext) -> MarioSprite;
    #[wasm_bindgen(method, getter)]
    pub fn keys(this: &ControlContext) -> CursorKeys;

    pub type MarioSprite;
    #[wasm_bindgen(method, getter, js_name = isDead)]
    fn dead_flag(this: &MarioSprite) -> Option<bool>;
    #[wasm_bindgen(method, getter, js_name = isBlocked)]
    fn blocked_flag(this: &MarioSprite) -> Option<bool>;
    #[wasm_bindgen(method, getter, js_name = isGrown)]
    fn grown_flag(this: &MarioSprite) -> Option<bool>;
    #[wasm_bindgen(method, getter)]
    fn x(this: &MarioSprite) -> f64;
    #[wasm_bindgen(method, setter)]
    fn set_x(this: &MarioSprite, x: f64);
    #[wasm_bindgen(method, setter = flipX)]
    fn flip_x_prop(this: &MarioSprite, flip: bool);
    #[wasm_bindgen(method, js_name = setVelocityY)]
    fn velocity_y_call(this: &MarioSprite, vy: f64);
    #[wasm_bindgen(method, getter)]
    fn anims(this: &MarioSprite) -> AnimationState;
    #[wasm_bindgen(method, getter)]
    fn body(this: &MarioSprite) -> PhysicsBody;

    pub type AnimationState;
    #[wasm_bindgen(method, js_name = play)]
    fn play_key(this: &AnimationState, key: &str, ignore_if_playing: bool);

    pub type PhysicsBody;
    #[wasm_bindgen(method, getter)]
    fn touching(this: &PhysicsBody) -> Touching;

    pub type Touching;
    #[wasm_bindgen(method, getter)]
    fn down(this: &Touching) -> bool;

    pub type CursorKeys;
    #[wasm_bindgen(method, getter)]
    fn left(this: &CursorKeys) -> Key;
    #[wasm_bindgen(method, getter)]
    fn right(this: &CursorKeys) -> Key;
    #[wasm_bindgen(method, getter)]
    fn up(this: &CursorKeys) -> Key;

    pub type Key;
    #[wasm_bindgen(method, getter, js_name = isDown)]
    fn is_down(this: &Key) -> bool;
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, ControlsError> {
    Ok(js_sys::JSON::parse(&serde_json::to_string(value)?)?)
}

impl AssetLoader for Loader {
    fn load_audio(&self, key: &str, path: &str) -> Result<(), ControlsError> {
        self.audio(key, path)?;
        Ok(())
    }

    fn load_spritesheet(
        &self,
        key: &str,
        path: &str,
        frame: FrameSize,
    ) -> Result<(), ControlsError> {
        self.spritesheet(key, path, &to_js(&frame)?)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SoundConfig {
    volume: f32,
}

impl SoundSystem for SoundManager {
    fn play(&self, key: &str, volume: f32) -> Result<bool, ControlsError> {
        let sound = self.add(key, &to_js(&SoundConfig { volume })?)?;
        Ok(sound.play()?.as_bool().unwrap_or(false))
    }
}

impl SpriteHandle for MarioSprite {
    fn is_dead(&self) -> bool {
        self.dead_flag().unwrap_or(false)
    }

    fn is_blocked(&self) -> bool {
        self.blocked_flag().unwrap_or(false)
    }

    fn is_grown(&self) -> bool {
        self.grown_flag().unwrap_or(false)
    }

    fn touching_down(&self) -> bool {
        self.body().touching().down()
    }

    fn translate_x(&mut self, dx: i32) {
        self.set_x(self.x() + dx as f64);
    }

    fn set_flip_x(&mut self, flip: bool) {
        self.flip_x_prop(flip);
    }

    fn set_velocity_y(&mut self, vy: i32) {
        self.velocity_y_call(vy as f64);
    }

    fn play_animation(&mut self, key: &str, ignore_if_playing: bool) {
        self.anims().play_key(key, ignore_if_playing);
    }
}

impl CursorKeys {
    pub fn snapshot(&self) -> KeyboardSnapshot {
        KeyboardSnapshot {
            left: self.left().is_down(),
            right: self.right().is_down(),
            up: self.up().is_down(),
        }
    }
}
