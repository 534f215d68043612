//! Touch controller: turns per-button touch events plus the document-wide
//! touch-end sweep into one boolean per [`Control`].
//!
//! The overlay component forwards raw DOM events through [`TouchInputSink`];
//! tests drive the same trait with synthetic ids.

use std::collections::HashSet;

use log::{debug, warn};

use crate::error::ControlsError;
use crate::model::{Control, TouchSnapshot};
use crate::state::TouchControlState;

/// Receiver for touch events coming from an input surface.
pub trait TouchInputSink {
    fn on_touch_start(&mut self, control: Control, touch_id: i32);
    fn on_touch_end(&mut self, control: Control, touch_id: i32);
    /// `touching` holds the ids of every touch still on the screen.
    fn on_global_touch_end(&mut self, touching: &HashSet<i32>);
}

/// Short vibration on press. Failures are never fatal.
pub trait Haptics {
    fn pulse(&self, duration_ms: u32) -> Result<(), ControlsError>;
}

pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&self, _duration_ms: u32) -> Result<(), ControlsError> {
        Ok(())
    }
}

pub struct TouchInputController {
    state: TouchControlState,
    haptics: Box<dyn Haptics>,
    /// `None` disables the pulse.
    pulse_ms: Option<u32>,
    attached: bool,
}

impl TouchInputController {
    pub fn new(haptics: Box<dyn Haptics>, pulse_ms: Option<u32>) -> Self {
        Self {
            state: TouchControlState::default(),
            haptics,
            pulse_ms,
            attached: false,
        }
    }

    pub fn without_haptics() -> Self {
        Self::new(Box::new(NoHaptics), None)
    }

    pub fn set_pulse_ms(&mut self, pulse_ms: Option<u32>) {
        self.pulse_ms = pulse_ms;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Marks the overlay as mounted; queries report real state from here on.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Clears all state and marks the overlay as gone.
    pub fn detach(&mut self) {
        self.reset();
        self.attached = false;
    }

    /// All false until attached.
    pub fn get_state(&self) -> TouchSnapshot {
        if !self.attached {
            return TouchSnapshot::default();
        }
        self.state.snapshot()
    }

    pub fn is_control_active(&self, control: Control) -> bool {
        self.attached && self.state.is_active(control)
    }

    pub fn reset(&mut self) {
        self.state.clear();
    }

    pub fn state(&self) -> &TouchControlState {
        &self.state
    }
}

impl TouchInputSink for TouchInputController {
    fn on_touch_start(&mut self, control: Control, touch_id: i32) {
        self.state.press(control, touch_id);
        if let Some(ms) = self.pulse_ms {
            if let Err(e) = self.haptics.pulse(ms) {
                warn!("haptic pulse failed: {}", e);
            }
        }
    }

    fn on_touch_end(&mut self, control: Control, touch_id: i32) {
        if !self.state.release_if_owner(control, touch_id) {
            debug!("ignoring touchend {} on {}: not the owner", touch_id, control.name());
        }
    }

    fn on_global_touch_end(&mut self, touching: &HashSet<i32>) {
        let released = self.state.sweep(|id| touching.contains(&id));
        if !released.is_empty() {
            debug!("released {:?} after touches left the buttons", released);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingHaptics {
        pulses: Rc<Cell<u32>>,
        fail: bool,
    }

    impl Haptics for CountingHaptics {
        fn pulse(&self, _duration_ms: u32) -> Result<(), ControlsError> {
            self.pulses.set(self.pulses.get() + 1);
            if self.fail {
                Err(ControlsError::Host("vibrate blocked".into()))
            } else {
                Ok(())
            }
        }
    }

    fn attached() -> TouchInputController {
        let mut c = TouchInputController::without_haptics();
        c.attach();
        c
    }

    fn ids(list: &[i32]) -> HashSet<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn state_is_all_false_before_attach() {
        let mut c = TouchInputController::without_haptics();
        assert_eq!(c.get_state(), TouchSnapshot::default());
        c.on_touch_start(Control::Left, 1);
        assert_eq!(c.get_state(), TouchSnapshot::default());
        assert!(!c.is_control_active(Control::Left));
    }

    #[test]
    fn simultaneous_touches_hold_separate_controls() {
        let mut c = attached();
        c.on_touch_start(Control::Left, 1);
        assert_eq!(c.get_state(), TouchSnapshot { left: true, right: false, jump: false });
        c.on_touch_start(Control::Right, 2);
        assert_eq!(c.get_state(), TouchSnapshot { left: true, right: true, jump: false });
        c.on_touch_end(Control::Left, 1);
        assert_eq!(c.get_state(), TouchSnapshot { left: false, right: true, jump: false });
    }

    #[test]
    fn foreign_touch_end_is_ignored() {
        let mut c = attached();
        c.on_touch_start(Control::Jump, 4);
        c.on_touch_end(Control::Jump, 5);
        assert!(c.is_control_active(Control::Jump));
        assert_eq!(c.state().owner(Control::Jump), Some(4));
    }

    #[test]
    fn end_on_idle_control_is_a_no_op() {
        let mut c = attached();
        c.on_touch_end(Control::Right, 9);
        assert_eq!(c.get_state(), TouchSnapshot::default());
    }

    #[test]
    fn last_start_wins_then_matching_end_releases() {
        // sequences of matching starts/ends: active iff last start is unmatched
        let seqs: &[&[(bool, i32)]] = &[
            &[(true, 1)],
            &[(true, 1), (false, 1)],
            &[(true, 1), (false, 1), (true, 2)],
            &[(true, 1), (true, 2), (false, 2)],
            &[(true, 1), (false, 1), (true, 2), (false, 2), (true, 3)],
        ];
        for seq in seqs {
            let mut c = attached();
            for &(start, id) in seq.iter() {
                if start {
                    c.on_touch_start(Control::Left, id);
                } else {
                    c.on_touch_end(Control::Left, id);
                }
            }
            let expected = seq.last().map(|(start, _)| *start).unwrap_or(false);
            assert_eq!(c.is_control_active(Control::Left), expected, "{:?}", seq);
        }
    }

    #[test]
    fn finger_leaving_screen_releases_control() {
        let mut c = attached();
        c.on_touch_start(Control::Left, 1);
        c.on_global_touch_end(&ids(&[]));
        assert!(!c.is_control_active(Control::Left));
        assert_eq!(c.state().owner(Control::Left), None);
    }

    #[test]
    fn global_end_only_releases_missing_owners() {
        let mut c = attached();
        c.on_touch_start(Control::Left, 1);
        c.on_touch_start(Control::Right, 2);
        c.on_touch_start(Control::Jump, 3);
        c.on_global_touch_end(&ids(&[2, 42]));
        assert_eq!(c.get_state(), TouchSnapshot { left: false, right: true, jump: false });
        assert_eq!(c.state().owner(Control::Right), Some(2));
    }

    #[test]
    fn reset_clears_state_but_stays_attached() {
        let mut c = attached();
        c.on_touch_start(Control::Left, 1);
        c.on_touch_start(Control::Jump, 2);
        c.reset();
        assert_eq!(c.get_state(), TouchSnapshot::default());
        assert!(c.is_attached());
        assert_eq!(c.state().owner(Control::Jump), None);
    }

    #[test]
    fn detach_resets_and_marks_unattached() {
        let mut c = attached();
        c.on_touch_start(Control::Right, 1);
        c.detach();
        assert!(!c.is_attached());
        c.attach();
        assert_eq!(c.get_state(), TouchSnapshot::default());
    }

    #[test]
    fn press_pulses_haptics_and_survives_failure() {
        let pulses = Rc::new(Cell::new(0));
        let mut c = TouchInputController::new(
            Box::new(CountingHaptics { pulses: pulses.clone(), fail: true }),
            Some(10),
        );
        c.attach();
        c.on_touch_start(Control::Jump, 1);
        c.on_touch_start(Control::Left, 2);
        assert_eq!(pulses.get(), 2);
        assert!(c.is_control_active(Control::Jump));
    }

    #[test]
    fn disabled_pulse_never_calls_haptics() {
        let pulses = Rc::new(Cell::new(0));
        let mut c = TouchInputController::new(
            Box::new(CountingHaptics { pulses: pulses.clone(), fail: false }),
            None,
        );
        c.on_touch_start(Control::Jump, 1);
        assert_eq!(pulses.get(), 0);
    }
}
