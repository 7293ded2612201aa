//! The Mage
//!
//! Ranged/caster hero. Her staff swing (A) and light-charge cast (Q) both
//! open the same hitbox; the dispatcher owns her heavier damage number.
//! Frailer than the knight, and takes more from enemy hits.

use crate::game::actor::{Actor, Fighter, HitboxGeometry};
use crate::game::animation::{Clip, ClipSet};
use crate::input::FrameInput;
use macroquad::math::{vec2, Vec2};

pub const MAGE_MAX_HP: f32 = 8.0;

const WALK_SPEED: f32 = 150.0;
const RUN_SPEED: f32 = 240.0;
const SCALE: f32 = 2.0;
const BODY: Vec2 = vec2(50.0, 88.0);
const HITBOX: HitboxGeometry = HitboxGeometry {
    width: 90.0,
    height: 55.0,
    offset_x: 35.0,
    offset_y: 0.0,
};

const FRAME_W: f32 = 128.0;
const FRAME_H: f32 = 71.0;

fn clips() -> ClipSet {
    let clip = |tex: &str, end: u32, fps: f32| Clip::new(tex, FRAME_W, FRAME_H, 0, end, fps);
    ClipSet {
        idle: clip("mage_idle", 5, 6.0),
        walk: clip("mage_walk", 6, 10.0),
        run: Some(clip("mage_run", 7, 12.0)),
        attack: clip("mage_attack", 5, 12.0),
        // Light_charge sheet is one pixel taller than the rest
        cast: Some(Clip::new("mage_magic", FRAME_W, 72.0, 0, 8, 10.0)),
        block: None,
        dead: clip("mage_dead", 4, 8.0),
    }
}

pub struct Mage {
    pub fighter: Fighter,
}

impl Mage {
    pub fn new(pos: Vec2) -> Self {
        Self {
            fighter: Fighter::new(
                pos,
                MAGE_MAX_HP,
                BODY,
                HITBOX,
                clips(),
                WALK_SPEED,
                RUN_SPEED,
                SCALE,
            ),
        }
    }

    /// Per-frame update while this hero is the active player
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        self.fighter.update_player_input(input, true, dt);
    }
}

impl Actor for Mage {
    fn fighter(&self) -> &Fighter {
        &self.fighter
    }

    fn fighter_mut(&mut self) -> &mut Fighter {
        &mut self.fighter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::actor::ActionState;

    #[test]
    fn test_cast_opens_hitbox() {
        let mut mage = Mage::new(vec2(250.0, 600.0));
        let input = FrameInput {
            cast_pressed: true,
            ..Default::default()
        };
        mage.update(&input, 0.016);
        assert_eq!(mage.fighter.state, ActionState::Casting);
        assert!(mage.fighter.hitbox.enabled);
    }

    #[test]
    fn test_cast_runs_to_completion() {
        let mut mage = Mage::new(vec2(250.0, 600.0));
        mage.update(
            &FrameInput {
                cast_pressed: true,
                ..Default::default()
            },
            0.016,
        );
        // 9 frames at 10 fps: 1.5s of idle input finishes the cast
        for _ in 0..94 {
            mage.update(&FrameInput::default(), 0.016);
        }
        assert_eq!(mage.fighter.state, ActionState::Idle);
        assert!(!mage.fighter.hitbox.enabled);
    }
}
