//! Components driving a level's wave run.

use bevy::prelude::*;
use bevy_levelkit_assets::prelude::WaveSpecAsset;

use crate::scheduler::WaveScheduler;

/// Requests a wave run for a level.
///
/// Spawn an entity with this component; once the spec is available a
/// [`WaveRun`] is inserted next to it.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_levelkit_core::components::LevelWaves;
/// fn start_level(mut commands: Commands, asset_server: Res<AssetServer>) {
///     commands.spawn(LevelWaves {
///         handle: asset_server.load("levels/level1.waves.toml"),
///     });
/// }
/// ```
#[derive(Component, Debug, Clone)]
pub struct LevelWaves {
    pub handle: Handle<WaveSpecAsset>,
}

/// Where a [`WaveRun`] stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    /// No wave started yet
    #[default]
    Waiting,
    /// A wave is in progress
    Running,
    /// All waves handed out, or the run hit an error
    Finished,
}

/// Progress of a level's waves.
#[derive(Component, Debug, Clone)]
pub struct WaveRun {
    pub scheduler: WaveScheduler,
    /// Seconds until the next wave starts
    pub remaining: f32,
    /// Paused runs neither count down nor start waves
    pub paused: bool,
    pub status: RunStatus,
}

impl WaveRun {
    /// A run that starts its first wave on the next update.
    pub fn new(scheduler: WaveScheduler) -> Self {
        Self {
            scheduler,
            remaining: 0.0,
            paused: false,
            status: RunStatus::Waiting,
        }
    }

    /// A run that waits for [`resume`](Self::resume) before starting.
    pub fn paused(scheduler: WaveScheduler) -> Self {
        Self {
            paused: true,
            ..Self::new(scheduler)
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status == RunStatus::Finished
    }

    /// Index of the wave currently running.
    pub fn current_wave(&self) -> Option<usize> {
        match self.status {
            RunStatus::Running => self.scheduler.current_index().checked_sub(1),
            RunStatus::Waiting | RunStatus::Finished => None,
        }
    }
}

/// Marks a [`LevelWaves`] entity whose spec failed to load.
#[derive(Component, Debug)]
pub struct WaveSpecUnavailable;
