//! Music Director
//!
//! One looping track plays at a time: ambient while fighting regular waves,
//! the boss track from boss spawn, the victory theme once the arena is
//! cleared. Track changes are idempotent so the scene can request the
//! current phase's music every frame without restarting it.

use macroquad::audio::{play_sound, stop_sound, PlaySoundParams, Sound};

use crate::assets::Assets;

const AMBIENT_VOLUME: f32 = 0.5;
const BOSS_VOLUME: f32 = 0.8;
const VICTORY_VOLUME: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Track {
    Silence,
    Ambient,
    Boss,
    Victory,
}

pub struct MusicDirector {
    ambient: Option<Sound>,
    boss: Option<Sound>,
    victory: Option<Sound>,
    current: Track,
}

impl MusicDirector {
    pub fn new(assets: &Assets) -> Self {
        Self {
            ambient: assets.sound("music_ambient").cloned(),
            boss: assets.sound("music_boss").cloned(),
            victory: assets.sound("music_victory").cloned(),
            current: Track::Silence,
        }
    }

    /// A director with no sounds loaded; track bookkeeping still works
    pub fn silent() -> Self {
        Self {
            ambient: None,
            boss: None,
            victory: None,
            current: Track::Silence,
        }
    }

    pub fn play_ambient(&mut self) -> bool {
        self.switch_to(Track::Ambient)
    }

    pub fn play_boss(&mut self) -> bool {
        self.switch_to(Track::Boss)
    }

    pub fn play_victory(&mut self) -> bool {
        self.switch_to(Track::Victory)
    }

    /// Returns true when the track actually changed
    fn switch_to(&mut self, track: Track) -> bool {
        if self.current == track {
            return false;
        }
        self.stop_current();
        let (sound, volume, looped) = match track {
            Track::Silence => (None, 0.0, false),
            Track::Ambient => (self.ambient.as_ref(), AMBIENT_VOLUME, true),
            Track::Boss => (self.boss.as_ref(), BOSS_VOLUME, true),
            Track::Victory => (self.victory.as_ref(), VICTORY_VOLUME, true),
        };
        if let Some(sound) = sound {
            play_sound(sound, PlaySoundParams { looped, volume });
        }
        self.current = track;
        true
    }

    pub fn stop(&mut self) {
        self.stop_current();
        self.current = Track::Silence;
    }

    fn stop_current(&self) {
        let playing = match self.current {
            Track::Silence => None,
            Track::Ambient => self.ambient.as_ref(),
            Track::Boss => self.boss.as_ref(),
            Track::Victory => self.victory.as_ref(),
        };
        if let Some(sound) = playing {
            stop_sound(sound);
        }
    }
}
