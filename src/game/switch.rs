//! Hero switching
//!
//! Exactly one hero is active at a time. A switch hands the incoming hero
//! the outgoing hero's position and facing in the same frame, so from the
//! outside it reads as one character changing form.

use crate::game::actor::{ActionState, Actor};
use crate::game::knight::Knight;
use crate::game::mage::Mage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveSide {
    Knight,
    Mage,
}

impl ActiveSide {
    pub fn other(self) -> Self {
        match self {
            ActiveSide::Knight => ActiveSide::Mage,
            ActiveSide::Mage => ActiveSide::Knight,
        }
    }
}

pub struct SwitchController {
    side: ActiveSide,
}

impl SwitchController {
    pub fn new() -> Self {
        Self {
            side: ActiveSide::Knight,
        }
    }

    pub fn side(&self) -> ActiveSide {
        self.side
    }

    pub fn active_dead(&self, knight: &Knight, mage: &Mage) -> bool {
        match self.side {
            ActiveSide::Knight => knight.fighter.is_dead(),
            ActiveSide::Mage => mage.fighter.is_dead(),
        }
    }

    /// Swap which hero is live. Refused while the active hero is dead or
    /// the replacement is dead; the defeat flow owns that state.
    pub fn toggle(&mut self, knight: &mut Knight, mage: &mut Mage) -> bool {
        let incoming_dead = match self.side.other() {
            ActiveSide::Knight => knight.fighter.is_dead(),
            ActiveSide::Mage => mage.fighter.is_dead(),
        };
        if self.active_dead(knight, mage) || incoming_dead {
            return false;
        }

        let (outgoing, incoming) = match self.side {
            ActiveSide::Knight => (&mut knight.fighter, &mut mage.fighter),
            ActiveSide::Mage => (&mut mage.fighter, &mut knight.fighter),
        };

        incoming.pos = outgoing.pos;
        incoming.facing_left = outgoing.facing_left;
        incoming.vel = macroquad::math::vec2(0.0, 0.0);
        outgoing.vel = macroquad::math::vec2(0.0, 0.0);
        incoming.run_toggled = outgoing.run_toggled;
        incoming.enter_state(ActionState::Idle);
        // Draw the live hero over the parked one
        incoming.depth = 1;
        outgoing.depth = 0;

        self.side = self.side.other();
        match self.side {
            ActiveSide::Knight => {
                knight.set_active_state(true);
                mage.set_active_state(false);
            }
            ActiveSide::Mage => {
                mage.set_active_state(true);
                knight.set_active_state(false);
            }
        }
        true
    }
}

impl Default for SwitchController {
    fn default() -> Self {
        Self::new()
    }
}
