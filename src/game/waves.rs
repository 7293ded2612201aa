//! Wave progression
//!
//! One enemy on stage at a time. When it dies the director arms a delayed
//! spawn for the next wave; the delay is explicit state here rather than a
//! fire-and-forget timer, so a restart can cancel it.
//!
//! Wave data loads from a RON file. A `None` entry in the wave list means
//! "another one of the previous kind"; the last wave is the boss.

use macroquad::prelude::warn;
use serde::Deserialize;

use crate::game::enemy::EnemyConfig;

/// Seconds between a death and the next spawn
pub const SPAWN_DELAY: f64 = 2.0;

pub const DEFAULT_WAVES: &str = include_str!("../../assets/waves.ron");

/// Deserialized wave table.
///
/// Index 0 of `waves` is the opening enemy, already on stage when the
/// scene starts; the director never spawns it. Later entries spawn one
/// per death, and a `None` there repeats the nearest earlier kind.
#[derive(Debug, Clone, Deserialize)]
pub struct WaveSet {
    /// The wave-0 enemy, pre-spawned by the scene
    pub opening: EnemyConfig,
    /// One entry per wave; entry 0 is a placeholder for `opening`
    pub waves: Vec<Option<EnemyConfig>>,
    /// Index into `waves` that triggers boss music
    pub boss_index: usize,
}

impl WaveSet {
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }

    /// Parse `source`, falling back to the compiled-in table when it does
    /// not parse. The embedded table is validated by a test.
    pub fn load_or_default(source: &str) -> Self {
        match Self::from_ron(source) {
            Ok(set) => set,
            Err(err) => {
                warn!("Wave table failed to parse ({}), using built-in waves", err);
                Self::from_ron(DEFAULT_WAVES).expect("embedded wave table parses")
            }
        }
    }

    /// Resolve wave `index`, walking `None` entries back to the nearest
    /// concrete config. Falls back to the opening enemy if the list starts
    /// with `None`.
    pub fn resolve(&self, index: usize) -> Option<&EnemyConfig> {
        let entry = self.waves.get(index)?;
        if let Some(config) = entry {
            return Some(config);
        }
        self.waves[..index]
            .iter()
            .rev()
            .find_map(|earlier| earlier.as_ref())
            .or(Some(&self.opening))
    }
}

/// A spawn that has been scheduled but not yet fired
#[derive(Debug, Clone, Copy)]
struct PendingSpawn {
    wave_index: usize,
    fires_at: f64,
}

/// What `tick` asks the scene to do this frame
#[derive(Debug, Clone, PartialEq)]
pub enum WaveStep {
    None,
    Spawn {
        config: EnemyConfig,
        wave_index: usize,
        is_boss: bool,
    },
    Complete,
}

pub struct WaveDirector {
    set: WaveSet,
    /// Next wave index to schedule; only ever advances
    next: usize,
    pending: Option<PendingSpawn>,
    complete: bool,
}

impl WaveDirector {
    pub fn new(set: WaveSet) -> Self {
        Self {
            set,
            // Wave 0 is the pre-spawned opening enemy
            next: 1,
            pending: None,
            complete: false,
        }
    }

    pub fn opening(&self) -> &EnemyConfig {
        &self.set.opening
    }

    pub fn complete(&self) -> bool {
        self.complete
    }

    /// 1-based number of the wave currently on stage (or incoming), for
    /// the HUD counter
    pub fn current_wave(&self) -> usize {
        self.next.min(self.total())
    }

    pub fn total(&self) -> usize {
        self.set.waves.len()
    }

    /// Arm the next wave transition. Idempotent per death: a second call
    /// while one is already pending keeps the original deadline.
    ///
    /// The final death arms the timer too — the run is only complete once
    /// it fires, so the victory transition waits out the same delay as a
    /// spawn would.
    pub fn on_enemy_died(&mut self, now: f64) {
        if self.complete || self.pending.is_some() {
            return;
        }
        self.pending = Some(PendingSpawn {
            wave_index: self.next,
            fires_at: now + SPAWN_DELAY,
        });
        self.next += 1;
    }

    /// Fire a due transition, at most one per call
    pub fn tick(&mut self, now: f64) -> WaveStep {
        if self.complete {
            return WaveStep::None;
        }
        let Some(pending) = self.pending else {
            return WaveStep::None;
        };
        if now < pending.fires_at {
            return WaveStep::None;
        }
        self.pending = None;
        match self.set.resolve(pending.wave_index) {
            Some(config) => WaveStep::Spawn {
                config: config.clone(),
                wave_index: pending.wave_index,
                is_boss: pending.wave_index == self.set.boss_index || config.is_boss(),
            },
            // Index past the table: the run is cleared
            None => {
                self.complete = true;
                WaveStep::Complete
            }
        }
    }

    /// Drop any armed spawn. Used on restart so a timer from the previous
    /// run cannot fire into the fresh scene.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::test_config;

    fn three_wave_set() -> WaveSet {
        WaveSet {
            opening: test_config("minotaur", 100.0),
            waves: vec![
                None,
                Some(test_config("tengu", 250.0)),
                Some(test_config("boss_demon", 500.0)),
            ],
            boss_index: 2,
        }
    }

    #[test]
    fn test_embedded_table_parses() {
        let set = WaveSet::from_ron(DEFAULT_WAVES).unwrap();
        assert_eq!(set.boss_index, set.waves.len() - 1);
        assert!(set.resolve(set.boss_index).unwrap().is_boss());
    }

    #[test]
    fn test_wave_table_round_trips_through_disk() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", DEFAULT_WAVES).unwrap();

        let source = std::fs::read_to_string(file.path()).unwrap();
        let set = WaveSet::load_or_default(&source);
        assert_eq!(set.opening.key, "minotaur");
        assert_eq!(set.waves.len(), 3);
    }

    #[test]
    fn test_garbage_source_falls_back_to_embedded() {
        let set = WaveSet::load_or_default("definitely not ron");
        assert_eq!(set.opening.key, "minotaur");
    }

    #[test]
    fn test_none_entry_reuses_previous_kind() {
        let set = three_wave_set();
        assert_eq!(set.resolve(0).unwrap().key, "minotaur");
        assert_eq!(set.resolve(1).unwrap().key, "tengu");
        assert_eq!(set.resolve(3), None);
    }

    #[test]
    fn test_spawn_waits_for_delay() {
        let mut director = WaveDirector::new(three_wave_set());
        director.on_enemy_died(10.0);

        assert_eq!(director.tick(10.0), WaveStep::None);
        assert_eq!(director.tick(11.9), WaveStep::None);
        match director.tick(12.0) {
            WaveStep::Spawn {
                config,
                wave_index,
                is_boss,
            } => {
                assert_eq!(config.key, "tengu");
                assert_eq!(wave_index, 1);
                assert!(!is_boss);
            }
            other => panic!("expected spawn, got {:?}", other),
        }
        // Fired once; nothing pending until the next death
        assert_eq!(director.tick(20.0), WaveStep::None);
    }

    #[test]
    fn test_full_run_reaches_boss_once() {
        let mut director = WaveDirector::new(three_wave_set());
        let mut now = 0.0;
        let mut boss_spawns = 0;

        // Opening minotaur dies, then tengu, spawning waves 1 and 2
        for _ in 0..2 {
            director.on_enemy_died(now);
            now += SPAWN_DELAY + 0.1;
            match director.tick(now) {
                WaveStep::Spawn { is_boss, .. } => {
                    if is_boss {
                        boss_spawns += 1;
                    }
                }
                other => panic!("expected spawn, got {:?}", other),
            }
        }
        assert_eq!(boss_spawns, 1);
        assert!(!director.complete());

        // Boss death ends the run, after the same delay as a spawn
        director.on_enemy_died(now);
        assert!(!director.complete());
        assert_eq!(director.tick(now + SPAWN_DELAY - 0.1), WaveStep::None);
        assert_eq!(director.tick(now + SPAWN_DELAY), WaveStep::Complete);
        assert!(director.complete());
        assert_eq!(director.tick(now + 10.0), WaveStep::None);
    }

    #[test]
    fn test_completion_waits_out_the_spawn_delay() {
        let mut director = WaveDirector::new(three_wave_set());
        let mut now = 0.0;
        for _ in 0..2 {
            director.on_enemy_died(now);
            now += SPAWN_DELAY;
            let _ = director.tick(now);
        }

        // Final death: still running during the whole delay window
        director.on_enemy_died(now);
        assert!(!director.complete());
        assert_eq!(director.tick(now + 1.9), WaveStep::None);
        assert_eq!(director.tick(now + SPAWN_DELAY), WaveStep::Complete);
    }

    #[test]
    fn test_duplicate_death_reports_keep_deadline() {
        let mut director = WaveDirector::new(three_wave_set());
        director.on_enemy_died(5.0);
        director.on_enemy_died(6.5);
        // Deadline stays 5.0 + delay; the second report neither resets nor
        // postpones it
        assert_eq!(director.tick(6.9), WaveStep::None);
        assert!(matches!(director.tick(7.0), WaveStep::Spawn { .. }));
    }

    #[test]
    fn test_cancel_pending_disarms_timer() {
        let mut director = WaveDirector::new(three_wave_set());
        director.on_enemy_died(0.0);
        director.cancel_pending();
        assert_eq!(director.tick(100.0), WaveStep::None);
    }

    #[test]
    fn test_wave_counter() {
        let mut director = WaveDirector::new(three_wave_set());
        assert_eq!(director.current_wave(), 1);
        assert_eq!(director.total(), 3);

        director.on_enemy_died(0.0);
        let _ = director.tick(SPAWN_DELAY);
        assert_eq!(director.current_wave(), 2);
    }
}
