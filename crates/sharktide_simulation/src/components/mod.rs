//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: агент и игроки (Shark, Health, Mortality, Player, Listener)
//! - movement: навигация (MovementCommand, MovementSpeed)
//! - world: состояние раунда (RoundState)

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
