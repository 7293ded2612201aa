//! Asset Store
//!
//! Textures, sounds and the UI font load once at startup into keyed maps.
//! Every load failure degrades instead of aborting: a missing texture draws
//! as the magenta placeholder, a missing sound stays silent, a missing font
//! falls back to the built-in one. The game itself never touches the
//! filesystem after startup.

use std::collections::HashMap;

use macroquad::audio::{load_sound, Sound};
use macroquad::prelude::*;

/// Font load retries before giving up (web fetches can be flaky)
const FONT_RETRY_LIMIT: u32 = 10;

const TEXTURE_MANIFEST: &[(&str, &str)] = &[
    // Background layers, back to front
    ("bg_sky", "assets/background/sky.png"),
    ("bg_far", "assets/background/far.png"),
    ("bg_mid", "assets/background/mid.png"),
    ("bg_near", "assets/background/near.png"),
    // Knight
    ("knight_idle", "assets/knight/idle.png"),
    ("knight_walking", "assets/knight/walking.png"),
    ("knight_running", "assets/knight/running.png"),
    ("knight_attack", "assets/knight/attack.png"),
    ("knight_block", "assets/knight/block.png"),
    ("knight_dead", "assets/knight/dead.png"),
    // Mage
    ("mage_idle", "assets/mage/idle.png"),
    ("mage_walk", "assets/mage/walk.png"),
    ("mage_run", "assets/mage/run.png"),
    ("mage_attack", "assets/mage/attack.png"),
    ("mage_magic", "assets/mage/magic.png"),
    ("mage_dead", "assets/mage/dead.png"),
    // Enemies
    ("minotaur_idle", "assets/minotaur/idle.png"),
    ("minotaur_walk", "assets/minotaur/walk.png"),
    ("minotaur_attack", "assets/minotaur/attack.png"),
    ("minotaur_dead", "assets/minotaur/dead.png"),
    ("tengu_idle", "assets/tengu/idle.png"),
    ("tengu_walk", "assets/tengu/walk.png"),
    ("tengu_attack", "assets/tengu/attack.png"),
    ("tengu_dead", "assets/tengu/dead.png"),
    ("boss_idle", "assets/boss/idle.png"),
    ("boss_walk", "assets/boss/walk.png"),
    ("boss_attack", "assets/boss/attack.png"),
    ("boss_dead", "assets/boss/dead.png"),
];

const SOUND_MANIFEST: &[(&str, &str)] = &[
    ("music_ambient", "assets/audio/ambient.ogg"),
    ("music_boss", "assets/audio/boss.ogg"),
    ("music_victory", "assets/audio/victory.ogg"),
];

pub struct Assets {
    textures: HashMap<String, Texture2D>,
    /// Drawn in place of any texture that failed to load
    placeholder: Texture2D,
    sounds: HashMap<String, Sound>,
    pub font: Option<Font>,
}

impl Assets {
    /// Load everything in the manifests. Never fails; failures are logged
    /// and the store degrades per asset.
    pub async fn load() -> Self {
        let mut textures = HashMap::new();
        for &(key, path) in TEXTURE_MANIFEST {
            match load_texture(path).await {
                Ok(texture) => {
                    texture.set_filter(FilterMode::Nearest);
                    textures.insert(key.to_string(), texture);
                }
                Err(err) => warn!("Texture '{}' failed to load from {}: {}", key, path, err),
            }
        }

        let mut sounds = HashMap::new();
        for &(key, path) in SOUND_MANIFEST {
            match load_sound(path).await {
                Ok(sound) => {
                    sounds.insert(key.to_string(), sound);
                }
                Err(err) => warn!("Sound '{}' failed to load from {}: {}", key, path, err),
            }
        }

        let font = Self::load_font_with_retry("assets/fonts/m6x11.ttf").await;

        info!(
            "Assets ready: {} textures, {} sounds, font {}",
            textures.len(),
            sounds.len(),
            if font.is_some() { "ok" } else { "fallback" }
        );

        Self {
            textures,
            placeholder: Self::placeholder_texture(),
            sounds,
            font,
        }
    }

    async fn load_font_with_retry(path: &str) -> Option<Font> {
        for attempt in 1..=FONT_RETRY_LIMIT {
            match load_ttf_font(path).await {
                Ok(font) => return Some(font),
                Err(err) => {
                    warn!("Font load attempt {}/{} failed: {}", attempt, FONT_RETRY_LIMIT, err)
                }
            }
        }
        None
    }

    fn placeholder_texture() -> Texture2D {
        // 2x2 magenta/black checker, the classic missing-art marker
        let px = [
            255, 0, 255, 255, 0, 0, 0, 255, //
            0, 0, 0, 255, 255, 0, 255, 255,
        ];
        let texture = Texture2D::from_rgba8(2, 2, &px);
        texture.set_filter(FilterMode::Nearest);
        texture
    }

    pub fn texture(&self, key: &str) -> &Texture2D {
        self.textures.get(key).unwrap_or(&self.placeholder)
    }

    pub fn sound(&self, key: &str) -> Option<&Sound> {
        self.sounds.get(key)
    }
}
