//! Audio and spritesheet manifests plus the one-shot playback wrapper.

use log::error;
use serde::Serialize;

use crate::error::ControlsError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioAsset {
    pub key: &'static str,
    pub path: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSize {
    pub frame_width: u32,
    pub frame_height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpritesheetAsset {
    pub key: &'static str,
    pub path: &'static str,
    pub frame: FrameSize,
}

pub const AUDIO_MANIFEST: &[AudioAsset] = &[
    AudioAsset {
        key: "gameover",
        path: "./public/assets/sound/music/gameover.mp3",
    },
    AudioAsset {
        key: "goomba-stomp",
        path: "./public/assets/sound/effects/goomba-stomp.wav",
    },
    AudioAsset {
        key: "coin-pickup",
        path: "./public/assets/sound/effects/coin.mp3",
    },
    AudioAsset {
        key: "powerup",
        path: "./public/assets/sound/effects/consume-powerup.mp3",
    },
];

const fn frame(frame_width: u32, frame_height: u32) -> FrameSize {
    FrameSize {
        frame_width,
        frame_height,
    }
}

pub const SPRITESHEET_MANIFEST: &[SpritesheetAsset] = &[
    SpritesheetAsset {
        key: "mario",
        path: "./public/assets/entities/mario.png",
        frame: frame(18, 16),
    },
    SpritesheetAsset {
        key: "goomba",
        path: "./public/assets/entities/overworld/goomba.png",
        frame: frame(16, 16),
    },
    SpritesheetAsset {
        key: "coin",
        path: "./public/assets/collectibles/coin.png",
        frame: frame(16, 16),
    },
    SpritesheetAsset {
        key: "mario-grown",
        path: "public/assets/entities/mario-grown.png",
        frame: frame(18, 32),
    },
];

/// Host asset loader, called once per manifest entry during preload.
pub trait AssetLoader {
    fn load_audio(&self, key: &str, path: &str) -> Result<(), ControlsError>;
    fn load_spritesheet(&self, key: &str, path: &str, frame: FrameSize)
    -> Result<(), ControlsError>;
}

/// Host sound manager. `Ok` carries whatever `play()` reported.
pub trait SoundSystem {
    fn play(&self, key: &str, volume: f32) -> Result<bool, ControlsError>;
}

pub const DEFAULT_VOLUME: f32 = 1.0;

pub fn init_audio<L: AssetLoader + ?Sized>(loader: &L) -> Result<(), ControlsError> {
    for asset in AUDIO_MANIFEST {
        loader.load_audio(asset.key, asset.path)?;
    }
    Ok(())
}

pub fn init_spritesheet<L: AssetLoader + ?Sized>(loader: &L) -> Result<(), ControlsError> {
    for asset in SPRITESHEET_MANIFEST {
        loader.load_spritesheet(asset.key, asset.path, asset.frame)?;
    }
    Ok(())
}

/// Best effort: a failing sound is logged and swallowed.
pub fn play_audio<S: SoundSystem + ?Sized>(
    key: &str,
    sound: &S,
    volume: Option<f32>,
) -> Option<bool> {
    match sound.play(key, volume.unwrap_or(DEFAULT_VOLUME)) {
        Ok(played) => Some(played),
        Err(e) => {
            error!("failed to play '{}': {}", key, e);
            None
        }
    }
}
