//! Per-frame movement policy.
//!
//! [`decide_movement`] is pure: it maps resolved controls and the character's
//! status to a [`MovementDecision`]. [`apply_decision`] is the only place that
//! touches the sprite, through [`SpriteHandle`].

use serde::{Deserialize, Serialize};

use crate::input::resolve_controls;
use crate::model::{
    AnimationSet, GrowthState, KeyboardSnapshot, MovementDecision, ResolvedControls,
    TouchSnapshot,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Pixels moved per frame while a direction is held.
    pub walk_step: i32,
    /// Vertical velocity applied on jump (negative is up).
    pub jump_velocity: i32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_step: 2,
            jump_velocity: -300,
        }
    }
}

/// Flags read from the sprite before deciding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterStatus {
    pub dead: bool,
    pub blocked: bool,
    pub grounded: bool,
    pub growth: GrowthState,
}

/// Mutable view of the host's player sprite.
pub trait SpriteHandle {
    fn is_dead(&self) -> bool;
    fn is_blocked(&self) -> bool;
    fn is_grown(&self) -> bool;
    fn touching_down(&self) -> bool;
    fn translate_x(&mut self, dx: i32);
    fn set_flip_x(&mut self, flip: bool);
    fn set_velocity_y(&mut self, vy: i32);
    /// Host no-ops when `key` is already playing and `ignore_if_playing` is set.
    fn play_animation(&mut self, key: &str, ignore_if_playing: bool);

    fn status(&self) -> CharacterStatus {
        CharacterStatus {
            dead: self.is_dead(),
            blocked: self.is_blocked(),
            grounded: self.touching_down(),
            growth: if self.is_grown() {
                GrowthState::Grown
            } else {
                GrowthState::Normal
            },
        }
    }
}

pub fn decide_movement(
    status: CharacterStatus,
    controls: ResolvedControls,
    tuning: &MovementTuning,
) -> Option<MovementDecision> {
    if status.dead || status.blocked {
        return None;
    }
    let anims = AnimationSet::for_growth(status.growth);
    let mut decision = MovementDecision::default();

    // left+right together cancel out
    let moving = match (controls.left, controls.right) {
        (true, false) => {
            decision.velocity_delta_x = -tuning.walk_step;
            decision.facing_left = Some(true);
            true
        }
        (false, true) => {
            decision.velocity_delta_x = tuning.walk_step;
            decision.facing_left = Some(false);
            true
        }
        _ => false,
    };

    if status.grounded {
        decision.animation = Some(if moving { anims.walk } else { anims.idle });
        if controls.up {
            decision.velocity_y = Some(tuning.jump_velocity);
            decision.animation = Some(anims.jump);
        }
    }
    Some(decision)
}

pub fn apply_decision<S: SpriteHandle + ?Sized>(sprite: &mut S, decision: &MovementDecision) {
    if decision.velocity_delta_x != 0 {
        sprite.translate_x(decision.velocity_delta_x);
    }
    if let Some(flip) = decision.facing_left {
        sprite.set_flip_x(flip);
    }
    if let Some(vy) = decision.velocity_y {
        sprite.set_velocity_y(vy);
    }
    if let Some(key) = decision.animation {
        sprite.play_animation(key, true);
    }
}

/// Frame entry point: resolve, decide, apply. Dead or blocked sprites are left alone.
pub fn check_controls<S: SpriteHandle + ?Sized>(
    sprite: &mut S,
    keys: KeyboardSnapshot,
    touch: TouchSnapshot,
    tuning: &MovementTuning,
) -> Option<MovementDecision> {
    let status = sprite.status();
    let decision = decide_movement(status, resolve_controls(keys, touch), tuning)?;
    apply_decision(sprite, &decision);
    Some(decision)
}
