//! Parallax Background
//!
//! Four layers, each three screen-wide tiles of the same texture. The
//! camera never moves; instead the tiles slide opposite the player's walk
//! direction, slower in the back layers. A tile that leaves the screen
//! entirely teleports past the far edge of its layer, so three tiles cover
//! the viewport forever.

use macroquad::prelude::*;

use crate::assets::Assets;

pub const SCREEN_W: f32 = 1280.0;
pub const SCREEN_H: f32 = 720.0;

/// World scroll speed in px/s at parallax factor 1.0
const BASE_SCROLL: f32 = 300.0;

const TILES_PER_LAYER: usize = 3;

pub struct Layer {
    texture: String,
    factor: f32,
    xs: [f32; TILES_PER_LAYER],
}

impl Layer {
    fn new(texture: &str, factor: f32) -> Self {
        Self {
            texture: texture.to_string(),
            factor,
            xs: [-SCREEN_W, 0.0, SCREEN_W],
        }
    }

    /// Slide against the walk direction, then recycle any tile that left
    /// the screen to the far end of the strip
    fn shift(&mut self, direction: f32, dt: f32) {
        let dx = -direction * self.factor * BASE_SCROLL * dt;
        for x in self.xs.iter_mut() {
            *x += dx;
        }

        let min = self.xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = self.xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        for x in self.xs.iter_mut() {
            if *x + SCREEN_W < 0.0 {
                *x = max + SCREEN_W;
            } else if *x > SCREEN_W {
                *x = min - SCREEN_W;
            }
        }
    }

    fn draw(&self, assets: &Assets) {
        let texture = assets.texture(&self.texture);
        for &x in &self.xs {
            draw_texture_ex(
                texture,
                x,
                0.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(SCREEN_W, SCREEN_H)),
                    ..Default::default()
                },
            );
        }
    }

    /// Every point of the viewport lies inside some tile
    #[cfg(test)]
    fn covers_screen(&self) -> bool {
        let mut xs = self.xs;
        xs.sort_by(|a, b| a.total_cmp(b));
        xs[0] <= 0.0
            && xs.windows(2).all(|w| w[1] - w[0] <= SCREEN_W + 0.5)
            && xs[TILES_PER_LAYER - 1] + SCREEN_W >= SCREEN_W
    }
}

pub struct Background {
    layers: Vec<Layer>,
}

impl Background {
    pub fn new() -> Self {
        Self {
            layers: vec![
                Layer::new("bg_sky", 0.1),
                Layer::new("bg_far", 0.15),
                Layer::new("bg_mid", 0.4),
                Layer::new("bg_near", 0.8),
            ],
        }
    }

    /// `direction` is the player's walk sign: -1, 0 or +1
    pub fn update(&mut self, direction: f32, dt: f32) {
        if direction == 0.0 {
            return;
        }
        for layer in self.layers.iter_mut() {
            layer.shift(direction, dt);
        }
    }

    pub fn reset(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.xs = [-SCREEN_W, 0.0, SCREEN_W];
        }
    }

    pub fn draw(&self, assets: &Assets) {
        for layer in &self.layers {
            layer.draw(assets);
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_layers_move_slower() {
        let mut bg = Background::new();
        bg.update(1.0, 1.0);

        let sky_shift = (bg.layers[0].xs[1] - 0.0).abs();
        let near_shift = (bg.layers[3].xs[1] - 0.0).abs();
        assert!(sky_shift < near_shift);
        assert!((sky_shift - 0.1 * BASE_SCROLL).abs() < 0.001);
    }

    #[test]
    fn test_scroll_opposes_walk_direction() {
        let mut bg = Background::new();
        bg.update(1.0, 0.1);
        // Walking right drags the world left
        assert!(bg.layers[3].xs[1] < 0.0);
    }

    #[test]
    fn test_coverage_survives_long_scroll() {
        let mut bg = Background::new();
        for _ in 0..10_000 {
            bg.update(1.0, 0.016);
        }
        for layer in &bg.layers {
            assert!(layer.covers_screen());
            for &x in &layer.xs {
                assert!(x > -2.0 * SCREEN_W && x < 2.0 * SCREEN_W);
            }
        }
    }

    #[test]
    fn test_coverage_survives_direction_flips() {
        let mut bg = Background::new();
        for i in 0..5_000 {
            let dir = if (i / 37) % 2 == 0 { 1.0 } else { -1.0 };
            bg.update(dir, 0.016);
        }
        for layer in &bg.layers {
            assert!(layer.covers_screen());
        }
    }

    #[test]
    fn test_idle_player_freezes_background() {
        let mut bg = Background::new();
        bg.update(0.0, 0.016);
        assert_eq!(bg.layers[3].xs, [-SCREEN_W, 0.0, SCREEN_W]);
    }
}
