//! Состояние раунда (глобальное, пишется хостом)

use bevy::prelude::*;

/// Глобальный alive/death query раунда
///
/// Когда все игроки мертвы, AI interval не выполняется вообще.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RoundState {
    pub all_players_dead: bool,
}
