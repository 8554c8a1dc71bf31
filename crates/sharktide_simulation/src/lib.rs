//! SHARKTIDE Simulation Core
//!
//! ECS-симуляция враждебного агента ("акула") на Bevy 0.16 (strategic layer):
//! поиск → следование → охота → убийство, с gated audio, kill sequence через
//! animation event и репликацией эффектов на клиентов.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = decision logic (FSM, waits, kill sequence, death overlay)
//! - Движок = navigation, colliders, animation, mixer, transport

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod audio;
pub mod combat;
pub mod components;
pub mod logger;
pub mod net;
pub mod schedules;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, SharkBrain, SharkConfig, SharkState};
pub use combat::{CombatPlugin, DamageTaken, FatalEffect, KillRefusal};
pub use components::*;
pub use logger::{log, log_error, log_info, log_warning};
pub use net::{EffectKind, LocalParticipant, NetOwnership, ReplicatedEffect, ReplicationPlugin};
pub use schedules::{AiInterval, AiTiming, FixedTickCounter};

/// Порядок внутри одного FixedUpdate tick
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Start() новых агентов
    Spawn,
    /// Line-of-sight от движка
    Perception,
    /// Tick counter → AiInterval
    Interval,
    /// Collision / animation kill events
    Reactions,
    /// Damage → death decision → one-time death transition
    Death,
    /// ReplicatedEffect → локальный рендер
    Replication,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AiTiming>()
            .init_resource::<FixedTickCounter>()
            .init_resource::<audio::CueLibrary>()
            .init_resource::<RoundState>()
            .init_resource::<LocalParticipant>();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        let fixed_hz = app.world().resource::<AiTiming>().fixed_hz;
        app.insert_resource(Time::<Fixed>::from_hz(fixed_hz))
            .init_schedule(AiInterval);

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Spawn,
                SimulationSet::Perception,
                SimulationSet::Interval,
                SimulationSet::Reactions,
                SimulationSet::Death,
                SimulationSet::Replication,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                schedules::increment_tick_counter,
                schedules::run_ai_interval_timer,
            )
                .chain()
                .in_set(SimulationSet::Interval),
        );

        app.register_type::<Shark>()
            .register_type::<Health>()
            .register_type::<Mortality>()
            .register_type::<Player>()
            .register_type::<SharkState>()
            .register_type::<SharkConfig>()
            .register_type::<NetOwnership>();

        // Подсистемы (ECS strategic layer)
        app.add_plugins((CombatPlugin, AIPlugin, ReplicationPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (с SimulationPlugin)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Прогнать `ticks` fixed ticks без wall-clock времени
///
/// Вся логика двигается через `AiTiming`, так что результат не зависит от FPS.
pub fn run_fixed_ticks(app: &mut App, ticks: u64) {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Прогнать `secs` секунд симуляции
pub fn run_for_secs(app: &mut App, secs: f32) {
    let ticks = app.world().resource::<AiTiming>().ticks_for(secs);
    run_fixed_ticks(app, ticks);
}

/// Спавн агента; `owner` - участник с authority
pub fn spawn_shark(world: &mut World, position: Vec3, owner: u64) -> Entity {
    world
        .spawn((
            Shark,
            Transform::from_translation(position),
            NetOwnership { owner },
        ))
        .id()
}

/// Спавн игрока-цели (он же слушатель spatial audio)
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((Player::default(), Listener, Transform::from_translation(position)))
        .id()
}
