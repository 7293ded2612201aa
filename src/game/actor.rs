//! Actor Core
//!
//! Shared state and rules for every fighting sprite in the scene: the two
//! heroes and the wave enemies. An actor is a `Fighter` (position, facing,
//! HP, a single tagged action state, an attack hitbox, animation playback)
//! plus the `Actor` trait seam the combat dispatcher and switch controller
//! work through.
//!
//! Action states are one tagged enum, not independent booleans, so illegal
//! combinations (dead-and-attacking, blocking-and-attacking) cannot exist.

use crate::assets::Assets;
use crate::game::animation::{AnimationPlayer, ClipSet};
use crate::game::healthbar::HealthBar;
use crate::input::FrameInput;
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

/// Walkable band of the arena floor
pub const GROUND_MIN_Y: f32 = 520.0;
pub const GROUND_MAX_Y: f32 = 650.0;

/// Horizontal clamp for player movement
pub const PLAYER_MIN_X: f32 = 60.0;
pub const PLAYER_MAX_X: f32 = 1220.0;

/// What an actor is doing this frame. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Walking,
    Running,
    Attacking,
    /// Mage spell wind-up; treated like `Attacking` for priority rules
    Casting,
    Blocking,
    Dead,
}

impl ActionState {
    /// Attack or cast in progress (suppresses movement and new triggers)
    pub fn is_striking(self) -> bool {
        matches!(self, ActionState::Attacking | ActionState::Casting)
    }

    /// States that freeze the background scroll
    pub fn blocks_scroll(self) -> bool {
        matches!(
            self,
            ActionState::Attacking | ActionState::Casting | ActionState::Blocking
        )
    }
}

/// Attack hitbox shape relative to the owner, mirrored by facing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitboxGeometry {
    pub width: f32,
    pub height: f32,
    /// Distance from the owner's center toward its facing direction
    pub offset_x: f32,
    pub offset_y: f32,
}

/// The hitbox itself: geometry plus an explicit enable window.
///
/// Enabled on attack-start, disabled on attack-end, and force-disabled when
/// the owner is switched out. While enabled and overlapping, the dispatcher
/// applies damage every frame - there is deliberately no hit cooldown.
#[derive(Debug, Clone, Copy)]
pub struct AttackHitbox {
    pub geometry: HitboxGeometry,
    pub enabled: bool,
}

/// Shared state for every animated fighter in the scene
pub struct Fighter {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing_left: bool,
    /// Sheet art faces left instead of right; flips the draw mirror
    pub art_faces_left: bool,

    pub hp: f32,
    pub max_hp: f32,
    pub state: ActionState,
    /// Run toggle (R); persists across state changes
    pub run_toggled: bool,

    /// Body collision rect size, centered on `pos`
    pub body_size: Vec2,
    pub body_enabled: bool,
    pub hitbox: AttackHitbox,

    pub walk_speed: f32,
    pub run_speed: f32,
    pub scale: f32,
    /// Draw order among actors; higher draws on top
    pub depth: i32,

    pub active: bool,
    pub visible: bool,

    pub clips: ClipSet,
    pub anim: AnimationPlayer,
    pub healthbar: HealthBar,
}

impl Fighter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pos: Vec2,
        max_hp: f32,
        body_size: Vec2,
        hitbox: HitboxGeometry,
        clips: ClipSet,
        walk_speed: f32,
        run_speed: f32,
        scale: f32,
    ) -> Self {
        let anim = AnimationPlayer::new(clips.idle.clone(), true);
        let healthbar = HealthBar::new(body_size.x.max(50.0));
        Self {
            pos,
            vel: Vec2::ZERO,
            facing_left: false,
            art_faces_left: false,
            hp: max_hp,
            max_hp,
            state: ActionState::Idle,
            run_toggled: false,
            body_size,
            body_enabled: true,
            hitbox: AttackHitbox {
                geometry: hitbox,
                enabled: false,
            },
            walk_speed,
            run_speed,
            scale,
            depth: 10,
            active: true,
            visible: true,
            clips,
            anim,
            healthbar,
        }
    }

    // =========================================================================
    // State transitions
    // =========================================================================

    /// Enter a new action state, restarting the matching animation clip.
    /// The restart guarantees no stale frame shows after a transition.
    pub fn enter_state(&mut self, state: ActionState) {
        self.state = state;
        let (clip, looped) = match state {
            ActionState::Idle => (self.clips.idle.clone(), true),
            ActionState::Walking => (self.clips.walk.clone(), true),
            ActionState::Running => (self.clips.run_or_walk(), true),
            ActionState::Attacking => (self.clips.attack.clone(), false),
            ActionState::Casting => (self.clips.cast_or_idle(), false),
            ActionState::Blocking => (self.clips.block_or_idle(), true),
            ActionState::Dead => (self.clips.dead.clone(), false),
        };
        self.anim.play(clip, looped);
    }

    /// Start a swing (or cast): hitbox turns on for the clip duration
    pub fn start_attack(&mut self, cast: bool) {
        self.vel = Vec2::ZERO;
        self.enter_state(if cast {
            ActionState::Casting
        } else {
            ActionState::Attacking
        });
        self.hitbox.enabled = true;
    }

    /// Apply damage. Ignored while dead (no double deaths) or blocking
    /// (block fully negates). Returns true if this call killed the actor.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.state == ActionState::Dead || self.state == ActionState::Blocking {
            return false;
        }
        self.hp = (self.hp - amount).max(0.0);
        if self.hp == 0.0 {
            self.die();
            return true;
        }
        false
    }

    fn die(&mut self) {
        self.vel = Vec2::ZERO;
        self.body_enabled = false;
        self.hitbox.enabled = false;
        self.enter_state(ActionState::Dead);
    }

    pub fn is_dead(&self) -> bool {
        self.state == ActionState::Dead
    }

    pub fn alive(&self) -> bool {
        !self.is_dead()
    }

    /// Dead and the death animation has played through (safe to prune)
    pub fn death_finished(&self) -> bool {
        self.is_dead() && self.anim.finished()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Body collision rect, centered on the position
    pub fn body_rect(&self) -> Rect {
        Rect::new(
            self.pos.x - self.body_size.x / 2.0,
            self.pos.y - self.body_size.y / 2.0,
            self.body_size.x,
            self.body_size.y,
        )
    }

    /// Attack hitbox rect in world space, mirrored by facing
    pub fn hitbox_rect(&self) -> Rect {
        let g = self.hitbox.geometry;
        let x = if self.facing_left {
            self.pos.x - g.offset_x - g.width
        } else {
            self.pos.x + g.offset_x
        };
        Rect::new(x, self.pos.y + g.offset_y - g.height / 2.0, g.width, g.height)
    }

    /// Apply velocity and keep the actor inside the walkable band
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.pos.y = self.pos.y.clamp(GROUND_MIN_Y, GROUND_MAX_Y);
    }

    // =========================================================================
    // Player input (shared by both heroes)
    // =========================================================================

    /// One frame of input handling, in priority order: death suppresses
    /// everything; an in-flight swing suppresses movement and new triggers;
    /// block is held-key and exclusive with attacking; otherwise movement.
    pub fn update_player_input(&mut self, input: &FrameInput, can_cast: bool, dt: f32) {
        if self.is_dead() {
            self.anim.update(dt);
            return;
        }

        if input.run_pressed {
            self.run_toggled = !self.run_toggled;
        }

        // Swing in progress: no combo queuing, no movement
        if self.state.is_striking() {
            self.anim.update(dt);
            if self.anim.finished() {
                self.hitbox.enabled = false;
                self.enter_state(ActionState::Idle);
            }
            return;
        }

        // Block while held
        if input.block_down {
            if self.state != ActionState::Blocking {
                self.vel = Vec2::ZERO;
                self.enter_state(ActionState::Blocking);
            }
            self.anim.update(dt);
            return;
        }
        if self.state == ActionState::Blocking {
            self.enter_state(ActionState::Idle);
        }

        // New swing
        if input.attack_pressed {
            self.start_attack(false);
            self.anim.update(dt);
            return;
        }
        if can_cast && input.cast_pressed {
            self.start_attack(true);
            self.anim.update(dt);
            return;
        }

        // Movement
        let axis = vec2(input.move_x(), input.move_y());
        if axis != Vec2::ZERO {
            let speed = if self.run_toggled {
                self.run_speed
            } else {
                self.walk_speed
            };
            self.vel = axis.normalize() * speed;
            if axis.x < 0.0 {
                self.facing_left = true;
            } else if axis.x > 0.0 {
                self.facing_left = false;
            }
            let target = if self.run_toggled {
                ActionState::Running
            } else {
                ActionState::Walking
            };
            if self.state != target {
                self.enter_state(target);
            }
        } else {
            self.vel = Vec2::ZERO;
            if self.state != ActionState::Idle {
                self.enter_state(ActionState::Idle);
            }
        }

        self.integrate(dt);
        self.pos.x = self.pos.x.clamp(PLAYER_MIN_X, PLAYER_MAX_X);
        self.anim.update(dt);
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    pub fn draw(&self, assets: &Assets) {
        if !self.visible {
            return;
        }
        let clip = self.anim.clip();
        let texture = assets.texture(&clip.texture);
        let dest = vec2(clip.frame_w * self.scale, clip.frame_h * self.scale);
        draw_texture_ex(
            texture,
            self.pos.x - dest.x / 2.0,
            self.pos.y - dest.y / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(dest),
                source: Some(self.anim.source_rect()),
                flip_x: self.facing_left != self.art_faces_left,
                ..Default::default()
            },
        );
    }
}

/// The polymorphic seam the dispatcher and switch controller work through
pub trait Actor {
    fn fighter(&self) -> &Fighter;
    fn fighter_mut(&mut self) -> &mut Fighter;

    fn take_damage(&mut self, amount: f32) -> bool {
        self.fighter_mut().take_damage(amount)
    }

    /// Activate or deactivate for rendering, physics and input.
    /// Deactivation always force-disables the attack hitbox.
    fn set_active_state(&mut self, active: bool) {
        let f = self.fighter_mut();
        f.active = active;
        f.visible = active;
        f.body_enabled = active && f.alive();
        if !active {
            f.hitbox.enabled = false;
        }
        f.healthbar.visible = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::animation::{Clip, ClipSet};

    pub(crate) fn test_clips() -> ClipSet {
        let c = |start, end| Clip::new("sheet", 128.0, 71.0, start, end, 10.0);
        ClipSet {
            idle: c(0, 3),
            walk: c(0, 5),
            run: Some(c(0, 5)),
            attack: c(0, 4),
            cast: Some(c(0, 8)),
            block: Some(c(0, 1)),
            dead: c(0, 3),
        }
    }

    fn fighter(hp: f32) -> Fighter {
        Fighter::new(
            vec2(250.0, 600.0),
            hp,
            vec2(50.0, 60.0),
            HitboxGeometry {
                width: 50.0,
                height: 40.0,
                offset_x: 20.0,
                offset_y: 0.0,
            },
            test_clips(),
            160.0,
            260.0,
            1.0,
        )
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut f = fighter(10.0);
        assert!(!f.take_damage(4.0));
        assert_eq!(f.hp, 6.0);

        assert!(f.take_damage(100.0));
        assert_eq!(f.hp, 0.0);
        assert!(f.is_dead());
    }

    #[test]
    fn test_death_is_idempotent() {
        let mut f = fighter(1.0);
        assert!(f.take_damage(1.0));
        assert!(f.is_dead());

        // Further damage reports no new death and changes nothing
        assert!(!f.take_damage(5.0));
        assert_eq!(f.hp, 0.0);
        assert!(f.is_dead());
    }

    #[test]
    fn test_block_negates_damage() {
        let mut f = fighter(10.0);
        f.enter_state(ActionState::Blocking);
        assert!(!f.take_damage(7.5));
        assert_eq!(f.hp, 10.0);
    }

    #[test]
    fn test_fractional_damage() {
        let mut f = fighter(8.0);
        f.take_damage(1.5);
        assert_eq!(f.hp, 6.5);
    }

    #[test]
    fn test_death_disables_body_and_hitbox() {
        let mut f = fighter(1.0);
        f.hitbox.enabled = true;
        f.take_damage(1.0);
        assert!(!f.body_enabled);
        assert!(!f.hitbox.enabled);
    }

    #[test]
    fn test_attack_suppresses_movement_and_retrigger() {
        let mut f = fighter(10.0);
        let swing = FrameInput {
            attack_pressed: true,
            ..Default::default()
        };
        f.update_player_input(&swing, false, 0.016);
        assert_eq!(f.state, ActionState::Attacking);
        assert!(f.hitbox.enabled);

        // Movement plus another attack press mid-swing: both ignored
        let x_before = f.pos.x;
        let busy = FrameInput {
            right: true,
            attack_pressed: true,
            ..Default::default()
        };
        f.update_player_input(&busy, false, 0.016);
        assert_eq!(f.state, ActionState::Attacking);
        assert_eq!(f.pos.x, x_before);
    }

    #[test]
    fn test_attack_ends_after_clip() {
        let mut f = fighter(10.0);
        f.update_player_input(
            &FrameInput {
                attack_pressed: true,
                ..Default::default()
            },
            false,
            0.016,
        );
        // 5 frames at 10 fps: well past 0.5s the swing is over
        for _ in 0..60 {
            f.update_player_input(&FrameInput::default(), false, 0.016);
        }
        assert_eq!(f.state, ActionState::Idle);
        assert!(!f.hitbox.enabled);
    }

    #[test]
    fn test_movement_sets_facing_and_state() {
        let mut f = fighter(10.0);
        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        f.update_player_input(&left, false, 0.016);
        assert!(f.facing_left);
        assert_eq!(f.state, ActionState::Walking);

        // Run toggle switches to running
        let run_left = FrameInput {
            left: true,
            run_pressed: true,
            ..Default::default()
        };
        f.update_player_input(&run_left, false, 0.016);
        assert_eq!(f.state, ActionState::Running);
    }

    #[test]
    fn test_block_is_held_and_freezes_movement() {
        let mut f = fighter(10.0);
        let block = FrameInput {
            block_down: true,
            right: true,
            ..Default::default()
        };
        let x_before = f.pos.x;
        f.update_player_input(&block, false, 0.016);
        assert_eq!(f.state, ActionState::Blocking);
        assert_eq!(f.pos.x, x_before);

        f.update_player_input(&FrameInput::default(), false, 0.016);
        assert_eq!(f.state, ActionState::Idle);
    }

    #[test]
    fn test_dead_ignores_input() {
        let mut f = fighter(1.0);
        f.take_damage(1.0);
        let input = FrameInput {
            right: true,
            attack_pressed: true,
            ..Default::default()
        };
        f.update_player_input(&input, false, 0.016);
        assert_eq!(f.state, ActionState::Dead);
        assert_eq!(f.vel, Vec2::ZERO);
    }

    #[test]
    fn test_hitbox_mirrors_with_facing() {
        let mut f = fighter(10.0);
        f.facing_left = false;
        let right = f.hitbox_rect();
        assert!(right.x > f.pos.x);

        f.facing_left = true;
        let left = f.hitbox_rect();
        assert!(left.x + left.w < f.pos.x + 1.0);
    }

    #[test]
    fn test_ground_band_clamp() {
        let mut f = fighter(10.0);
        f.vel = vec2(0.0, -10_000.0);
        f.integrate(1.0);
        assert_eq!(f.pos.y, GROUND_MIN_Y);

        f.vel = vec2(0.0, 10_000.0);
        f.integrate(1.0);
        assert_eq!(f.pos.y, GROUND_MAX_Y);
    }
}
