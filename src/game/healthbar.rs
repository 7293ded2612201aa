//! Health Bars
//!
//! A small overlay bound to an actor. The scene repositions it above its
//! owner every frame; only the active player's bar (and live enemies') are
//! visible.

use macroquad::prelude::*;

const BAR_HEIGHT: f32 = 6.0;
const BAR_GAP: f32 = 14.0;

#[derive(Debug, Clone)]
pub struct HealthBar {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub width: f32,
    pub visible: bool,
}

impl HealthBar {
    pub fn new(width: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            width,
            visible: true,
        }
    }

    /// Reposition above the owner. `half_height` is half the owner's body
    /// height so the bar floats just over the sprite.
    pub fn follow(&mut self, owner_pos: Vec2, half_height: f32) {
        self.pos = vec2(
            owner_pos.x - self.width / 2.0,
            owner_pos.y - half_height - BAR_GAP,
        );
    }

    pub fn draw(&self, hp: f32, max_hp: f32) {
        if !self.visible {
            return;
        }
        let fraction = if max_hp > 0.0 {
            (hp / max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        };
        draw_rectangle(self.pos.x, self.pos.y, self.width, BAR_HEIGHT, DARKGRAY);
        draw_rectangle(
            self.pos.x,
            self.pos.y,
            self.width * fraction,
            BAR_HEIGHT,
            if fraction > 0.35 { GREEN } else { RED },
        );
        draw_rectangle_lines(self.pos.x, self.pos.y, self.width, BAR_HEIGHT, 1.0, BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centers_above_owner() {
        let mut bar = HealthBar::new(60.0);
        bar.follow(vec2(300.0, 500.0), 40.0);

        assert_eq!(bar.pos.x, 270.0);
        assert!(bar.pos.y < 460.0);
    }
}
