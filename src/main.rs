//! EMBERWOOD: a two-hero side-scrolling arena brawler
//!
//! A knight and a mage share one body slot: E swaps them mid-fight.
//! - Knight: sword swings and a damage-negating block
//! - Mage: weaker melee but a heavy-hitting cast
//! - Three enemy waves end in a boss; clear them all to win

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod audio;
mod game;
mod hud;
mod input;

use macroquad::prelude::*;

use assets::Assets;
use audio::MusicDirector;
use game::scene::Scene;
use game::waves::{WaveSet, DEFAULT_WAVES};
use hud::Hud;
use input::{Action, InputState};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("EMBERWOOD v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let assets = Assets::load().await;

    // Wave table from disk when available, else the compiled-in copy
    let wave_source = match macroquad::file::load_string("assets/waves.ron").await {
        Ok(source) => source,
        Err(err) => {
            warn!("Could not read assets/waves.ron ({}), using built-in waves", err);
            DEFAULT_WAVES.to_string()
        }
    };
    let waves = WaveSet::load_or_default(&wave_source);

    let mut scene = Scene::new(waves, MusicDirector::new(&assets));
    let input = InputState::new();

    loop {
        if input.action_pressed(Action::Restart) {
            info!("Restarting run");
            scene.reset();
        }

        let frame = input.snapshot();
        scene.update(&frame, get_frame_time(), get_time());

        clear_background(BLACK);
        scene.draw(&assets);
        Hud::draw(&scene, &assets, get_time());

        next_frame().await;
    }
}
