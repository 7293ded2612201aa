//! Gameplay Module
//!
//! Everything that lives inside the arena: the two heroes, the wave
//! enemies, combat resolution, and the scene that ties them together.
//!
//! Key concepts:
//! - Fighter: shared actor state (position, HP, animation, hitboxes)
//! - Events: decoupled damage/death/spawn notifications per frame
//! - Scene: fixed per-frame update order over all live objects
//!
//! Simulation code in here never touches the keyboard, the clock or the
//! GPU; the host feeds it input snapshots and timestamps, which is what
//! keeps the whole module testable headless.

pub mod actor;
pub mod animation;
pub mod background;
pub mod combat;
pub mod enemy;
pub mod event;
pub mod healthbar;
pub mod knight;
pub mod mage;
pub mod scene;
pub mod switch;
pub mod waves;

// Re-export main types
pub use event::Events;
pub use scene::Scene;
