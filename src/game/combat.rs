//! Combat Dispatcher
//!
//! Pairwise overlap checks between attack hitboxes and bodies. Damage is a
//! fixed amount per (attacker, defender) pair, not a stat formula. A hit
//! lands when the hitbox rect intersects the defender's body, the hitbox is
//! enabled, the attacker is the presently-active player (for hero attacks),
//! and the defender is not already dead.
//!
//! There is no hit cooldown: a hitbox that stays enabled and overlapping
//! deals damage every frame. That matches the original tuning and is
//! intentional.

use crate::game::actor::{Actor, Fighter};
use crate::game::enemy::Enemy;
use crate::game::event::{ActorId, DamageEvent, DeathEvent, Events};
use crate::game::knight::Knight;
use crate::game::mage::Mage;
use crate::game::switch::ActiveSide;

/// Fixed per-pair damage amounts
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    pub knight_vs_enemy: f32,
    pub mage_vs_enemy: f32,
    pub enemy_vs_knight: f32,
    pub enemy_vs_mage: f32,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            knight_vs_enemy: 1.0,
            mage_vs_enemy: 3.0,
            enemy_vs_knight: 1.0,
            enemy_vs_mage: 1.5,
        }
    }
}

impl Dispatcher {
    /// Run every registered pair for one frame
    pub fn dispatch(
        &self,
        side: ActiveSide,
        knight: &mut Knight,
        mage: &mut Mage,
        enemies: &mut [Enemy],
        events: &mut Events,
    ) {
        for (slot, enemy) in enemies.iter_mut().enumerate() {
            let enemy_id = ActorId::Enemy(slot);

            // Active hero -> enemy
            let (attacker, hero_id, damage): (&Fighter, ActorId, f32) = match side {
                ActiveSide::Knight => (&knight.fighter, ActorId::Knight, self.knight_vs_enemy),
                ActiveSide::Mage => (&mage.fighter, ActorId::Mage, self.mage_vs_enemy),
            };
            if attacker.hitbox.enabled
                && enemy.fighter.alive()
                && attacker.hitbox_rect().overlaps(&enemy.fighter.body_rect())
            {
                let position = enemy.fighter.pos;
                let died = enemy.take_damage(damage);
                events.damage.send(DamageEvent {
                    target: enemy_id,
                    source: hero_id,
                    amount: damage,
                    position,
                });
                if died {
                    events.death.send(DeathEvent {
                        target: enemy_id,
                        position,
                    });
                }
            }

            // Enemy -> either hero (only a body that is enabled can be hit,
            // which excludes the switched-out hero)
            if enemy.fighter.hitbox.enabled {
                let strike = enemy.fighter.hitbox_rect();
                Self::enemy_strike(
                    &strike,
                    enemy_id,
                    &mut knight.fighter,
                    ActorId::Knight,
                    self.enemy_vs_knight,
                    events,
                );
                Self::enemy_strike(
                    &strike,
                    enemy_id,
                    &mut mage.fighter,
                    ActorId::Mage,
                    self.enemy_vs_mage,
                    events,
                );
            }
        }
    }

    fn enemy_strike(
        strike: &macroquad::math::Rect,
        enemy_id: ActorId,
        hero: &mut Fighter,
        hero_id: ActorId,
        damage: f32,
        events: &mut Events,
    ) {
        if !hero.body_enabled || hero.is_dead() || !strike.overlaps(&hero.body_rect()) {
            return;
        }
        let position = hero.pos;
        let died = hero.take_damage(damage);
        events.damage.send(DamageEvent {
            target: hero_id,
            source: enemy_id,
            amount: damage,
            position,
        });
        if died {
            events.death.send(DeathEvent {
                target: hero_id,
                position,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::test_config;
    use macroquad::math::vec2;

    fn setup() -> (Knight, Mage, Vec<Enemy>, Events) {
        let knight = Knight::new(vec2(350.0, 560.0));
        let mut mage = Mage::new(vec2(350.0, 560.0));
        mage.set_active_state(false);
        let enemies = vec![Enemy::from_config(&test_config("minotaur", 3.0), vec2(400.0, 560.0))];
        (knight, mage, enemies, Events::new())
    }

    #[test]
    fn test_disabled_hitbox_never_lands() {
        let (mut knight, mut mage, mut enemies, mut events) = setup();
        assert!(!knight.fighter.hitbox.enabled);

        Dispatcher::default().dispatch(
            ActiveSide::Knight,
            &mut knight,
            &mut mage,
            &mut enemies,
            &mut events,
        );
        assert_eq!(enemies[0].fighter.hp, 3.0);
        assert!(events.damage.is_empty());
    }

    #[test]
    fn test_inactive_attacker_never_lands() {
        let (mut knight, mut mage, mut enemies, mut events) = setup();
        // Knight swings, but the mage is the active side
        knight.fighter.hitbox.enabled = true;

        Dispatcher::default().dispatch(
            ActiveSide::Mage,
            &mut knight,
            &mut mage,
            &mut enemies,
            &mut events,
        );
        assert_eq!(enemies[0].fighter.hp, 3.0);
    }

    #[test]
    fn test_overlapping_swing_applies_every_frame() {
        let (mut knight, mut mage, mut enemies, mut events) = setup();
        knight.fighter.hitbox.enabled = true;
        let dispatcher = Dispatcher::default();

        dispatcher.dispatch(ActiveSide::Knight, &mut knight, &mut mage, &mut enemies, &mut events);
        assert_eq!(enemies[0].fighter.hp, 2.0);

        // No cooldown: the next frame hits again
        dispatcher.dispatch(ActiveSide::Knight, &mut knight, &mut mage, &mut enemies, &mut events);
        assert_eq!(enemies[0].fighter.hp, 1.0);
    }

    #[test]
    fn test_kill_emits_single_death_event() {
        let (mut knight, mut mage, mut enemies, mut events) = setup();
        knight.fighter.hitbox.enabled = true;
        let dispatcher = Dispatcher::default();

        for _ in 0..5 {
            dispatcher.dispatch(
                ActiveSide::Knight,
                &mut knight,
                &mut mage,
                &mut enemies,
                &mut events,
            );
        }
        assert!(enemies[0].fighter.is_dead());
        assert_eq!(events.death.len(), 1);
        assert_eq!(events.death.iter().next().unwrap().target, ActorId::Enemy(0));
        // Three hits landed before death gated further damage
        assert_eq!(events.damage.len(), 3);
    }

    #[test]
    fn test_enemy_hits_only_enabled_bodies() {
        let (mut knight, mut mage, mut enemies, mut events) = setup();
        enemies[0].fighter.hitbox.enabled = true;
        // Strike rect reaches right from x=300 and covers both heroes
        enemies[0].fighter.pos = vec2(300.0, 560.0);
        enemies[0].fighter.facing_left = false;

        Dispatcher::default().dispatch(
            ActiveSide::Knight,
            &mut knight,
            &mut mage,
            &mut enemies,
            &mut events,
        );
        assert!(knight.fighter.hp < 10.0);
        // Switched-out mage's body is disabled, untouched
        assert_eq!(mage.fighter.hp, 8.0);
    }

    #[test]
    fn test_mage_damage_is_fractional() {
        let (mut knight, mut mage, mut enemies, mut events) = setup();
        knight.set_active_state(false);
        mage.set_active_state(true);
        enemies[0].fighter.hitbox.enabled = true;
        enemies[0].fighter.pos = vec2(300.0, 560.0);
        enemies[0].fighter.facing_left = false;

        Dispatcher::default().dispatch(
            ActiveSide::Mage,
            &mut knight,
            &mut mage,
            &mut enemies,
            &mut events,
        );
        assert_eq!(mage.fighter.hp, 8.0 - 1.5);
    }
}
