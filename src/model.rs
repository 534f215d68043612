//! Core data models for the controls layer.
//! Plain values only: control names, per-frame snapshots and the movement
//! decision handed to the sprite adapter.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ControlsError;

/// Logical on-screen control. Closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Left,
    Right,
    Jump,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Left, Control::Right, Control::Jump];

    /// Name used in `data-control` attributes and by the host.
    pub fn name(self) -> &'static str {
        match self {
            Control::Left => "left",
            Control::Right => "right",
            Control::Jump => "jump",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Control::Left => 0,
            Control::Right => 1,
            Control::Jump => 2,
        }
    }
}

impl FromStr for Control {
    type Err = ControlsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Control::Left),
            "right" => Ok(Control::Right),
            "jump" => Ok(Control::Jump),
            other => Err(ControlsError::UnknownControl(other.to_string())),
        }
    }
}

/// Read-only copy of the touch controls, shaped like the JS object the host reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl TouchSnapshot {
    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Jump => self.jump,
        }
    }
}

/// Keyboard "is down" flags polled by the host each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// Keyboard and touch merged for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolvedControls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthState {
    Normal,
    Grown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationSet {
    pub idle: &'static str,
    pub walk: &'static str,
    pub jump: &'static str,
}

pub const NORMAL_ANIMATIONS: AnimationSet = AnimationSet {
    idle: "mario-idle",
    walk: "mario-walk",
    jump: "mario-jump",
};

pub const GROWN_ANIMATIONS: AnimationSet = AnimationSet {
    idle: "mario-grown-idle",
    walk: "mario-grown-walk",
    jump: "mario-grown-jump",
};

impl AnimationSet {
    pub fn for_growth(growth: GrowthState) -> &'static AnimationSet {
        match growth {
            GrowthState::Normal => &NORMAL_ANIMATIONS,
            GrowthState::Grown => &GROWN_ANIMATIONS,
        }
    }
}

/// What the character should do this frame. Never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementDecision {
    /// Added to the sprite's `x`.
    pub velocity_delta_x: i32,
    /// `None` leaves `flipX` untouched.
    pub facing_left: Option<bool>,
    pub velocity_y: Option<i32>,
    /// Animation key to play with ignore-if-playing; `None` when airborne.
    pub animation: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_names_round_trip_through_from_str() {
        for c in Control::ALL {
            assert_eq!(c.name().parse::<Control>().unwrap(), c);
        }
    }

    #[test]
    fn unknown_control_is_rejected() {
        assert!(matches!(
            "down".parse::<Control>(),
            Err(ControlsError::UnknownControl(name)) if name == "down"
        ));
        assert!("Left".parse::<Control>().is_err());
    }

    #[test]
    fn snapshot_serializes_with_host_field_names() {
        let snap = TouchSnapshot { left: true, right: false, jump: true };
        assert_eq!(
            serde_json::to_string(&snap).unwrap(),
            r#"{"left":true,"right":false,"jump":true}"#
        );
    }

    #[test]
    fn growth_picks_animation_set() {
        assert_eq!(AnimationSet::for_growth(GrowthState::Normal).walk, "mario-walk");
        assert_eq!(AnimationSet::for_growth(GrowthState::Grown).jump, "mario-grown-jump");
    }
}
