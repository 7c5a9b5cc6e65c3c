//! Plugin for `bevy_levelkit_core`.

use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use crate::systems::{advance_wave_runs, start_loaded_wave_runs};

/// Configuration for `LevelkitCorePlugin`.
///
/// Inserted as a resource. `rng_seed` is read once when the plugin is built;
/// changing `autostart` at runtime only affects runs created afterwards.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_levelkit_core::{LevelkitCoreConfig, LevelkitCorePlugin};
///
/// App::new()
///     .add_plugins(LevelkitCorePlugin::new(LevelkitCoreConfig {
///         rng_seed: Some(42),
///         ..default()
///     }));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct LevelkitCoreConfig {
    /// Seed for wave sampling. `None` seeds from the OS.
    ///
    /// Set this for reproducible runs (replays, tests).
    pub rng_seed: Option<u64>,

    /// Start the first wave as soon as the spec is loaded.
    ///
    /// When `false`, the run is inserted paused and waits for
    /// [`WaveRun::resume`](crate::components::WaveRun::resume).
    pub autostart: bool,
}

impl Default for LevelkitCoreConfig {
    fn default() -> Self {
        Self {
            rng_seed: None,
            autostart: true,
        }
    }
}

/// Random number source for wave sampling.
#[derive(Resource, Debug)]
pub struct WaveRng(pub StdRng);

impl WaveRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_os_rng()),
        }
    }
}

/// Plugin for the `bevy_levelkit_core` wave scheduling system.
///
/// Add this plugin after `LevelkitAssetsPlugin`.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_levelkit_assets::LevelkitAssetsPlugin;
/// use bevy_levelkit_core::LevelkitCorePlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(LevelkitAssetsPlugin)
///     .add_plugins(LevelkitCorePlugin::default())
///     .run();
/// ```
#[derive(Default)]
pub struct LevelkitCorePlugin {
    config: LevelkitCoreConfig,
}

impl LevelkitCorePlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: LevelkitCoreConfig) -> Self {
        Self { config }
    }
}

impl Plugin for LevelkitCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(WaveRng::from_seed(self.config.rng_seed))
            .insert_resource(self.config.clone());

        // Runs are picked up in PreUpdate so their first wave starts in the same frame
        app.add_systems(PreUpdate, start_loaded_wave_runs)
            .add_systems(Update, advance_wave_runs);
    }
}
