//! Общие helpers для integration тестов
//!
//! Тесты гоняют `FixedUpdate` напрямую (без `app.update()`), поэтому Events
//! не свапаются - читаем их своим cursor'ом.

#![allow(dead_code)]

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use sharktide_simulation::ai::TargetSighted;
use sharktide_simulation::{create_headless_app, spawn_player, spawn_shark, AiTiming};

/// Читатель событий, который видит каждое событие ровно один раз
pub struct EventLog<E: Event> {
    cursor: EventCursor<E>,
}

impl<E: Event + Clone> EventLog<E> {
    pub fn new(app: &App) -> Self {
        Self {
            cursor: app.world().resource::<Events<E>>().get_cursor(),
        }
    }

    pub fn drain(&mut self, app: &App) -> Vec<E> {
        let events = app.world().resource::<Events<E>>();
        self.cursor.read(events).cloned().collect()
    }
}

pub struct Scene {
    pub app: App,
    pub shark: Entity,
    pub player: Entity,
}

/// Host (participant 0), агент в нуле, игрок на `distance` по X
pub fn host_scene(seed: u64, distance: f32) -> Scene {
    let mut app = create_headless_app(seed);
    let shark = spawn_shark(app.world_mut(), Vec3::ZERO, 0);
    let player = spawn_player(app.world_mut(), Vec3::new(distance, 0.0, 0.0));
    Scene { app, shark, player }
}

/// Один AI интервал (interval_ticks fixed ticks)
pub fn run_interval(app: &mut App) {
    let ticks = app.world().resource::<AiTiming>().interval_ticks;
    sharktide_simulation::run_fixed_ticks(app, ticks);
}

pub fn spot(scene: &mut Scene) {
    scene.app.world_mut().send_event(TargetSighted::Spotted {
        observer: scene.shark,
        target: scene.player,
    });
}

pub fn state_of<C: Component + Copy>(app: &App, entity: Entity) -> C {
    *app.world().get::<C>(entity).expect("component present")
}

/// Гонять интервалы до нужного state; возвращает число интервалов
pub fn run_until<C: Component + Copy + PartialEq + std::fmt::Debug>(
    app: &mut App,
    entity: Entity,
    wanted: C,
    max_intervals: usize,
) -> usize {
    for i in 0..max_intervals {
        if state_of::<C>(app, entity) == wanted {
            return i;
        }
        run_interval(app);
    }
    panic!(
        "{:?} not reached in {} intervals (now {:?})",
        wanted,
        max_intervals,
        state_of::<C>(app, entity)
    );
}
