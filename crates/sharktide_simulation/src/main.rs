//! Headless симуляция SHARKTIDE
//!
//! Скриптованный прогон одного агента: игрок в поле зрения → follow → hunt →
//! collision → animation kill event → FatalEffect → снова Searching.

use bevy::prelude::*;
use sharktide_simulation::ai::{AnimationKillEvent, TargetCollision, TargetSighted};
use sharktide_simulation::{
    create_headless_app, run_for_secs, spawn_player, spawn_shark, FatalEffect, SharkState,
};

fn main() {
    let seed = 42;
    println!("Starting SHARKTIDE headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    let shark = spawn_shark(app.world_mut(), Vec3::ZERO, 0);
    let player = spawn_player(app.world_mut(), Vec3::new(6.0, 0.0, 0.0));

    run_for_secs(&mut app, 1.0);
    report(&app, shark, "spawned");

    app.world_mut().send_event(TargetSighted::Spotted {
        observer: shark,
        target: player,
    });
    run_for_secs(&mut app, 1.0);
    report(&app, shark, "player sighted");

    // FollowSong + HuntSting
    run_for_secs(&mut app, 26.0);
    report(&app, shark, "after cues");

    app.world_mut().send_event(TargetCollision {
        agent: shark,
        target: player,
    });
    run_for_secs(&mut app, 0.5);
    report(&app, shark, "collided");

    app.world_mut().send_event(AnimationKillEvent { agent: shark });
    app.world_mut().run_schedule(FixedUpdate);
    let kills = app
        .world()
        .resource::<Events<FatalEffect>>()
        .iter_current_update_events()
        .count();
    println!("FatalEffect emitted: {}", kills);

    run_for_secs(&mut app, 1.0);
    report(&app, shark, "after kill");

    println!("Simulation complete!");
}

fn report(app: &App, shark: Entity, label: &str) {
    let state = app
        .world()
        .get::<SharkState>(shark)
        .copied()
        .unwrap_or_default();
    println!("[{}] {:?} state = {:?}", label, shark, state);
}
