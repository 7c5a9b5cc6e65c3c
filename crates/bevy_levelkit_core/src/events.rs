//! Observer events fired on the [`LevelWaves`](crate::components::LevelWaves) entity.
//!
//! Game code observes these to spawn mobs; this crate never spawns them itself.

use bevy::prelude::*;

/// Fired when a level's wave spec is loaded and its [`WaveRun`](crate::components::WaveRun)
/// has been inserted.
#[derive(EntityEvent, Debug, Clone)]
pub struct WavesReady {
    #[event_target]
    pub entity: Entity,
    pub wave_count: usize,
}

/// Fired when a wave begins.
///
/// # Example
///
/// ```ignore
/// commands.spawn(LevelWaves { handle })
///     .observe(|trigger: On<WaveStarted>| {
///         for mob in &trigger.event().mobs {
///             info!("spawning {mob}");
///         }
///     });
/// ```
#[derive(EntityEvent, Debug, Clone)]
pub struct WaveStarted {
    #[event_target]
    pub entity: Entity,
    /// Position of the wave in the level (0-based)
    pub index: usize,
    /// One entry per mob to spawn
    pub mobs: Vec<String>,
    /// Seconds until the next wave
    pub duration: f32,
    /// Label of the special wave, if any
    pub special: Option<String>,
}

/// Fired once the last wave's duration has elapsed.
#[derive(EntityEvent, Debug, Clone)]
pub struct WavesFinished {
    #[event_target]
    pub entity: Entity,
}

/// Fired when the spec cannot be loaded or a wave cannot be produced.
#[derive(EntityEvent, Debug, Clone)]
pub struct WaveSpecFailed {
    #[event_target]
    pub entity: Entity,
    pub error: String,
}
