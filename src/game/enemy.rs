//! Wave Enemies
//!
//! Every enemy is built from an immutable `EnemyConfig` descriptor: sprite
//! scale and flip, max HP, hitbox geometry and one clip per state. The
//! descriptors ship in `assets/waves.ron` so tuning a wave never touches
//! code. Behavior is a small chase/strike loop against the active player;
//! anything smarter is out of scope for this arena.

use crate::game::actor::{ActionState, Actor, Fighter, HitboxGeometry};
use crate::game::animation::{Clip, ClipSet};
use macroquad::math::{vec2, Vec2};
use serde::{Deserialize, Serialize};

/// Vertical slack when deciding whether the player is in striking reach
const REACH_TOLERANCE_Y: f32 = 48.0;

/// The clips a wave enemy carries (no run/cast/block variants)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyClips {
    pub idle: Clip,
    pub walk: Clip,
    pub attack: Clip,
    pub dead: Clip,
}

impl EnemyClips {
    fn to_clip_set(&self) -> ClipSet {
        ClipSet {
            idle: self.idle.clone(),
            walk: self.walk.clone(),
            run: None,
            attack: self.attack.clone(),
            cast: None,
            block: None,
            dead: self.dead.clone(),
        }
    }
}

/// Immutable enemy descriptor; constructed once per spawn, never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Identity key ("minotaur", "tengu", "boss")
    pub key: String,
    pub scale: f32,
    /// Sheet art faces left instead of right
    pub flip_x: bool,
    pub max_hp: f32,
    pub body_width: f32,
    pub body_height: f32,
    pub hitbox: HitboxGeometry,
    /// Walk speed in px/s
    pub speed: f32,
    pub clips: EnemyClips,
}

impl EnemyConfig {
    /// Boss descriptors drive the music switch
    pub fn is_boss(&self) -> bool {
        self.key.starts_with("boss")
    }
}

pub struct Enemy {
    pub fighter: Fighter,
    pub config: EnemyConfig,
}

impl Enemy {
    pub fn from_config(config: &EnemyConfig, pos: Vec2) -> Self {
        let mut fighter = Fighter::new(
            pos,
            config.max_hp,
            vec2(config.body_width, config.body_height),
            config.hitbox,
            config.clips.to_clip_set(),
            config.speed,
            config.speed,
            config.scale,
        );
        fighter.art_faces_left = config.flip_x;
        // Enemies enter from the right looking at the arena
        fighter.facing_left = true;
        Self {
            fighter,
            config: config.clone(),
        }
    }

    /// Horizontal distance at which a strike can land
    fn reach(&self) -> f32 {
        let g = self.fighter.hitbox.geometry;
        g.offset_x + g.width
    }

    /// One frame of chase/strike behavior against the active player
    pub fn update(&mut self, target: Vec2, target_alive: bool, dt: f32) {
        match self.fighter.state {
            ActionState::Dead => {
                self.fighter.anim.update(dt);
                return;
            }
            ActionState::Attacking => {
                self.fighter.anim.update(dt);
                if self.fighter.anim.finished() {
                    self.fighter.hitbox.enabled = false;
                    self.fighter.enter_state(ActionState::Idle);
                }
                return;
            }
            _ => {}
        }

        if !target_alive {
            if self.fighter.state != ActionState::Idle {
                self.fighter.vel = Vec2::ZERO;
                self.fighter.enter_state(ActionState::Idle);
            }
            self.fighter.anim.update(dt);
            return;
        }

        let to_target = target - self.fighter.pos;
        self.fighter.facing_left = to_target.x < 0.0;

        let in_reach =
            to_target.x.abs() <= self.reach() && to_target.y.abs() <= REACH_TOLERANCE_Y;
        if in_reach {
            self.fighter.start_attack(false);
            self.fighter.anim.update(dt);
            return;
        }

        // Close the gap
        self.fighter.vel = to_target.normalize() * self.config.speed;
        if self.fighter.state != ActionState::Walking {
            self.fighter.enter_state(ActionState::Walking);
        }
        self.fighter.integrate(dt);
        self.fighter.anim.update(dt);
    }

    /// Pruned from the scene once the death clip has played out
    pub fn finished(&self) -> bool {
        self.fighter.death_finished()
    }
}

impl Actor for Enemy {
    fn fighter(&self) -> &Fighter {
        &self.fighter
    }

    fn fighter_mut(&mut self) -> &mut Fighter {
        &mut self.fighter
    }
}

#[cfg(test)]
pub(crate) fn test_config(key: &str, max_hp: f32) -> EnemyConfig {
    let clip = |tex: &str, end| Clip::new(tex, 128.0, 128.0, 0, end, 8.0);
    EnemyConfig {
        key: key.to_string(),
        scale: 1.5,
        flip_x: true,
        max_hp,
        body_width: 70.0,
        body_height: 90.0,
        hitbox: HitboxGeometry {
            width: 60.0,
            height: 60.0,
            offset_x: 50.0,
            offset_y: 0.0,
        },
        speed: 90.0,
        clips: EnemyClips {
            idle: clip("idle", 9),
            walk: clip("walk", 4),
            attack: clip("attack", 4),
            dead: clip("dead", 5),
        },
    }
}
