// Per-control touch ownership, driven by the touch controller
use crate::model::{Control, TouchSnapshot};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSlot {
    pub active: bool,
    /// Touch identifier holding the control; set only while `active`.
    pub owner: Option<i32>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TouchControlState {
    slots: [ControlSlot; 3],
}

impl TouchControlState {
    pub fn slot(&self, control: Control) -> ControlSlot {
        self.slots[control.index()]
    }

    pub fn is_active(&self, control: Control) -> bool {
        self.slots[control.index()].active
    }

    pub fn owner(&self, control: Control) -> Option<i32> {
        self.slots[control.index()].owner
    }

    /// A new touch takes the control, replacing any previous owner.
    pub fn press(&mut self, control: Control, touch_id: i32) {
        self.slots[control.index()] = ControlSlot {
            active: true,
            owner: Some(touch_id),
        };
    }

    /// Returns true when `touch_id` owned the control and it was released.
    pub fn release_if_owner(&mut self, control: Control, touch_id: i32) -> bool {
        let slot = &mut self.slots[control.index()];
        if slot.owner != Some(touch_id) {
            return false;
        }
        *slot = ControlSlot::default();
        true
    }

    /// Releases every owned control whose touch is no longer on screen.
    /// Returns the controls that were released.
    pub fn sweep<F>(&mut self, still_touching: F) -> Vec<Control>
    where
        F: Fn(i32) -> bool,
    {
        let mut released = Vec::new();
        for c in Control::ALL {
            let slot = &mut self.slots[c.index()];
            if let Some(id) = slot.owner {
                if !still_touching(id) {
                    *slot = ControlSlot::default();
                    released.push(c);
                }
            }
        }
        released
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn snapshot(&self) -> TouchSnapshot {
        TouchSnapshot {
            left: self.is_active(Control::Left),
            right: self.is_active(Control::Right),
            jump: self.is_active(Control::Jump),
        }
    }
}
