//! Event System
//!
//! Events allow decoupled communication between game systems.
//! Instead of systems directly calling each other, they send events
//! that other systems can listen to.
//!
//! Example flow:
//! 1. Combat dispatcher detects hit → sends DamageEvent
//! 2. Dispatcher sees HP reach zero → sends DeathEvent
//! 3. Wave director reads DeathEvent → schedules the next spawn
//!
//! Each system handles its own concern without knowing about the others.

use macroquad::math::Vec2;

/// Identifies an actor in the scene for event payloads.
///
/// Enemies are identified by their slot in the scene's enemy list at the
/// time the event was sent; the list is only pruned after events are
/// handled, so the index is stable for the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorId {
    Knight,
    Mage,
    Enemy(usize),
}

impl ActorId {
    pub fn is_enemy(&self) -> bool {
        matches!(self, ActorId::Enemy(_))
    }
}

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    /// Check if there are any events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of events in queue
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all game events.
pub struct Events {
    /// Damage dealt to an actor
    pub damage: EventQueue<DamageEvent>,

    /// Actor died
    pub death: EventQueue<DeathEvent>,

    /// A wave enemy was spawned
    pub spawn: EventQueue<SpawnEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self {
            damage: EventQueue::new(),
            death: EventQueue::new(),
            spawn: EventQueue::new(),
        }
    }

    /// Clear all event queues. Called at the top of each scene update, so
    /// whatever remains afterwards describes exactly that frame.
    pub fn clear_all(&mut self) {
        self.damage.clear();
        self.death.clear();
        self.spawn.clear();
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// Damage was dealt to an actor
#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Who got hit
    pub target: ActorId,
    /// Who dealt the damage
    pub source: ActorId,
    /// Amount of damage
    pub amount: f32,
    /// Where the hit occurred
    pub position: Vec2,
}

/// An actor died
#[derive(Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Who died
    pub target: ActorId,
    /// Where they died
    pub position: Vec2,
}

/// A wave enemy was spawned
#[derive(Debug, Clone, Copy)]
pub struct SpawnEvent {
    /// Wave index (0-based) the enemy belongs to
    pub wave_index: usize,
    /// Where it spawned
    pub position: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();

        events.death.send(DeathEvent {
            target: ActorId::Enemy(0),
            position: Vec2::ZERO,
        });

        assert_eq!(events.death.len(), 1);
        assert!(events.death.iter().next().unwrap().target.is_enemy());

        events.clear_all();
        assert!(events.death.is_empty());
    }
}
