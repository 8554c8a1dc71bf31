//! Timer systems для tick-based schedules
//!
//! Запускаются в FixedUpdate и решают, когда гонять low-frequency AiInterval.

use bevy::prelude::{ResMut, World};
use super::{AiInterval, AiTiming, FixedTickCounter};

/// System: Increment tick counter (FixedUpdate, запускается ПЕРВЫМ)
pub fn increment_tick_counter(mut counter: ResMut<FixedTickCounter>) {
    counter.tick = counter.tick.wrapping_add(1); // Wraparound safe
}

/// System: Run AiInterval schedule каждые `interval_ticks` ticks
///
/// Exclusive system (требует &mut World для run_schedule).
pub fn run_ai_interval_timer(world: &mut World) {
    let tick = world.resource::<FixedTickCounter>().tick;
    let every = world.resource::<AiTiming>().interval_ticks.max(1);

    if tick % every == 0 {
        world.run_schedule(AiInterval);
    }
}
