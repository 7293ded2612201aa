//! Scene
//!
//! Owns every live object in the arena and runs one fixed update order per
//! frame: switch, hero input, background scroll, enemy AI, combat, death
//! bookkeeping, wave progression. Events from the previous frame are
//! dropped at the top of the update so anything left in the queues after a
//! frame describes exactly that frame.
//!
//! The scene never reads the keyboard or the clock itself; the host hands
//! it a `FrameInput` snapshot and the current time.

use macroquad::math::Vec2;

use crate::assets::Assets;
use crate::audio::MusicDirector;
use crate::game::actor::{Actor, Fighter};
use crate::game::background::Background;
use crate::game::combat::Dispatcher;
use crate::game::enemy::Enemy;
use crate::game::event::{ActorId, Events, SpawnEvent};
use crate::game::knight::Knight;
use crate::game::mage::Mage;
use crate::game::switch::{ActiveSide, SwitchController};
use crate::game::waves::{WaveDirector, WaveSet, WaveStep};
use crate::input::FrameInput;

const PLAYER_START: Vec2 = Vec2::new(250.0, 600.0);
const ENEMY_SPAWN: Vec2 = Vec2::new(1300.0, 560.0);
const SCORE_PER_KILL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Victory,
    Defeat,
}

pub struct Scene {
    wave_set: WaveSet,
    pub knight: Knight,
    pub mage: Mage,
    pub switcher: SwitchController,
    pub enemies: Vec<Enemy>,
    pub events: Events,
    dispatcher: Dispatcher,
    pub waves: WaveDirector,
    pub background: Background,
    pub music: MusicDirector,
    pub score: u32,
    pub phase: Phase,
}

impl Scene {
    pub fn new(wave_set: WaveSet, mut music: MusicDirector) -> Self {
        let knight = Knight::new(PLAYER_START);
        let mut mage = Mage::new(PLAYER_START);
        mage.set_active_state(false);

        let waves = WaveDirector::new(wave_set.clone());
        let enemies = vec![Enemy::from_config(waves.opening(), ENEMY_SPAWN)];
        music.play_ambient();

        Self {
            wave_set,
            knight,
            mage,
            switcher: SwitchController::new(),
            enemies,
            events: Events::new(),
            dispatcher: Dispatcher::default(),
            waves,
            background: Background::new(),
            music,
            score: 0,
            phase: Phase::Playing,
        }
    }

    /// Back to the opening state. Any armed spawn timer dies with the old
    /// wave director.
    pub fn reset(&mut self) {
        self.knight = Knight::new(PLAYER_START);
        self.mage = Mage::new(PLAYER_START);
        self.mage.set_active_state(false);
        self.switcher = SwitchController::new();
        self.waves = WaveDirector::new(self.wave_set.clone());
        self.enemies = vec![Enemy::from_config(self.waves.opening(), ENEMY_SPAWN)];
        self.events.clear_all();
        self.background.reset();
        self.score = 0;
        self.phase = Phase::Playing;
        self.music.stop();
        self.music.play_ambient();
    }

    fn active_fighter(&self) -> &Fighter {
        match self.switcher.side() {
            ActiveSide::Knight => &self.knight.fighter,
            ActiveSide::Mage => &self.mage.fighter,
        }
    }

    pub fn update(&mut self, input: &FrameInput, dt: f32, now: f64) {
        self.events.clear_all();

        if self.phase != Phase::Playing {
            // Let death and victory poses play out behind the banner
            self.knight.fighter.anim.update(dt);
            self.mage.fighter.anim.update(dt);
            for enemy in self.enemies.iter_mut() {
                enemy.fighter.anim.update(dt);
            }
            return;
        }

        if input.switch_pressed {
            self.switcher.toggle(&mut self.knight, &mut self.mage);
        }

        let side = self.switcher.side();
        match side {
            ActiveSide::Knight => self.knight.update(input, dt),
            ActiveSide::Mage => self.mage.update(input, dt),
        }
        follow_bar(&mut self.knight.fighter);
        follow_bar(&mut self.mage.fighter);

        // The world scrolls with the walk unless the current action pins
        // the hero in place
        let scroll = if self.active_fighter().state.blocks_scroll() {
            0.0
        } else {
            input.move_x()
        };
        self.background.update(scroll, dt);

        // Drop corpses whose death clip finished; enemy slots in this
        // frame's events index into the pruned list
        self.enemies.retain(|enemy| !enemy.finished());

        let target = self.active_fighter().pos;
        let target_alive = self.active_fighter().alive();
        for enemy in self.enemies.iter_mut() {
            enemy.update(target, target_alive, dt);
            follow_bar(&mut enemy.fighter);
        }

        self.dispatcher.dispatch(
            side,
            &mut self.knight,
            &mut self.mage,
            &mut self.enemies,
            &mut self.events,
        );

        let deaths: Vec<_> = self.events.death.iter().copied().collect();
        for death in deaths {
            match death.target {
                ActorId::Knight | ActorId::Mage => {
                    if self.switcher.active_dead(&self.knight, &self.mage) {
                        self.phase = Phase::Defeat;
                        self.music.stop();
                    }
                }
                ActorId::Enemy(_) => {
                    self.score += SCORE_PER_KILL;
                    // The director decides after the delay whether this
                    // death spawns the next wave or ends the run
                    self.waves.on_enemy_died(now);
                }
            }
        }

        match self.waves.tick(now) {
            WaveStep::Spawn {
                config,
                wave_index,
                is_boss,
            } => {
                self.enemies.push(Enemy::from_config(&config, ENEMY_SPAWN));
                self.events.spawn.send(SpawnEvent {
                    wave_index,
                    position: ENEMY_SPAWN,
                });
                if is_boss {
                    self.music.play_boss();
                }
            }
            WaveStep::Complete => {
                self.phase = Phase::Victory;
                self.music.play_victory();
            }
            WaveStep::None => {}
        }
    }

    pub fn draw(&self, assets: &Assets) {
        self.background.draw(assets);

        // Parked hero under the live one
        let mut heroes = [&self.knight.fighter, &self.mage.fighter];
        heroes.sort_by_key(|f| f.depth);
        for fighter in heroes {
            fighter.draw(assets);
        }
        for enemy in &self.enemies {
            enemy.fighter.draw(assets);
        }

        for fighter in [&self.knight.fighter, &self.mage.fighter] {
            fighter.healthbar.draw(fighter.hp, fighter.max_hp);
        }
        for enemy in &self.enemies {
            let f = &enemy.fighter;
            if f.alive() {
                f.healthbar.draw(f.hp, f.max_hp);
            }
        }
    }
}

fn follow_bar(fighter: &mut Fighter) {
    let pos = fighter.pos;
    let half = fighter.body_size.y / 2.0;
    fighter.healthbar.follow(pos, half);
}
