//! HUD
//!
//! Screen-space text over the scene: wave counter, score, the key guide,
//! and the end-of-run banners. All layout is in absolute 1280x720
//! coordinates to match the fixed window.

use macroquad::prelude::*;

use crate::assets::Assets;
use crate::game::background::SCREEN_W;
use crate::game::scene::{Phase, Scene};

const MARGIN: f32 = 20.0;
const KEY_GUIDE: &str = "ARROWS move  A attack  SPACE block  Q cast  R run  E switch  N restart";

pub struct Hud;

impl Hud {
    pub fn draw(scene: &Scene, assets: &Assets, now: f64) {
        let font = assets.font.as_ref();

        let wave_line = format!(
            "WAVE {}/{}",
            scene.waves.current_wave(),
            scene.waves.total()
        );
        draw_text_ex(
            &wave_line,
            MARGIN,
            40.0,
            TextParams {
                font,
                font_size: 28,
                color: WHITE,
                ..Default::default()
            },
        );
        draw_text_ex(
            &format!("SCORE {}", scene.score),
            MARGIN,
            72.0,
            TextParams {
                font,
                font_size: 28,
                color: GOLD,
                ..Default::default()
            },
        );
        draw_text_ex(
            KEY_GUIDE,
            MARGIN,
            706.0,
            TextParams {
                font,
                font_size: 16,
                color: LIGHTGRAY,
                ..Default::default()
            },
        );

        match scene.phase {
            Phase::Playing => {}
            Phase::Victory => Self::banner("VICTORY!", GOLD, font, now),
            Phase::Defeat => Self::banner("YOU FELL", RED, font, now),
        }
    }

    fn banner(text: &str, color: Color, font: Option<&Font>, now: f64) {
        let size = 72u16;
        let dims = measure_text(text, font, size, 1.0);
        draw_text_ex(
            text,
            (SCREEN_W - dims.width) / 2.0,
            320.0,
            TextParams {
                font,
                font_size: size,
                color,
                ..Default::default()
            },
        );

        // Slow pulse on the prompt
        let alpha = 0.5 + 0.5 * (now * 3.0).sin() as f32;
        let prompt = "PRESS N TO PLAY AGAIN";
        let dims = measure_text(prompt, font, 28, 1.0);
        draw_text_ex(
            prompt,
            (SCREEN_W - dims.width) / 2.0,
            380.0,
            TextParams {
                font,
                font_size: 28,
                color: Color::new(1.0, 1.0, 1.0, alpha),
                ..Default::default()
            },
        );
    }
}
