//! The Knight
//!
//! Melee hero. Sword swings are short and the hitbox sits close to the
//! body; he trades reach for a block that fully negates damage.

use crate::game::actor::{Actor, Fighter, HitboxGeometry};
use crate::game::animation::{Clip, ClipSet};
use crate::input::FrameInput;
use macroquad::math::{vec2, Vec2};

pub const KNIGHT_MAX_HP: f32 = 10.0;

const WALK_SPEED: f32 = 160.0;
const RUN_SPEED: f32 = 260.0;
const SCALE: f32 = 2.0;
const BODY: Vec2 = vec2(55.0, 90.0);
const HITBOX: HitboxGeometry = HitboxGeometry {
    width: 60.0,
    height: 50.0,
    offset_x: 30.0,
    offset_y: 0.0,
};

// Sheet cells are 128x71
const FRAME_W: f32 = 128.0;
const FRAME_H: f32 = 71.0;

fn clips() -> ClipSet {
    let clip = |tex: &str, end: u32, fps: f32| Clip::new(tex, FRAME_W, FRAME_H, 0, end, fps);
    ClipSet {
        idle: clip("knight_idle", 3, 6.0),
        walk: clip("knight_walking", 7, 10.0),
        run: Some(clip("knight_running", 6, 12.0)),
        attack: clip("knight_attack", 5, 12.0),
        cast: None,
        block: Some(clip("knight_block", 1, 6.0)),
        dead: clip("knight_dead", 3, 8.0),
    }
}

pub struct Knight {
    pub fighter: Fighter,
}

impl Knight {
    pub fn new(pos: Vec2) -> Self {
        Self {
            fighter: Fighter::new(
                pos,
                KNIGHT_MAX_HP,
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
        // The knight has no cast; Q falls through to nothing
        self.fighter.update_player_input(input, false, dt);
    }
}

impl Actor for Knight {
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
    fn test_cast_key_does_nothing() {
        let mut knight = Knight::new(vec2(250.0, 600.0));
        let input = FrameInput {
            cast_pressed: true,
            ..Default::default()
        };
        knight.update(&input, 0.016);
        assert_eq!(knight.fighter.state, ActionState::Idle);
        assert!(!knight.fighter.hitbox.enabled);
    }

    #[test]
    fn test_attack_enables_hitbox() {
        let mut knight = Knight::new(vec2(250.0, 600.0));
        let input = FrameInput {
            attack_pressed: true,
            ..Default::default()
        };
        knight.update(&input, 0.016);
        assert_eq!(knight.fighter.state, ActionState::Attacking);
        assert!(knight.fighter.hitbox.enabled);
    }
}
