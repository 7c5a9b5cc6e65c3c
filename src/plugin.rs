//! Unified plugin for bevy_levelkit.

use bevy::prelude::*;

use bevy_levelkit_assets::LevelkitAssetsPlugin;
use bevy_levelkit_core::{LevelkitCoreConfig, LevelkitCorePlugin};

/// Unified plugin that adds asset loading ([`LevelkitAssetsPlugin`]) and wave
/// scheduling ([`LevelkitCorePlugin`]).
///
/// # With Custom Configuration
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_levelkit::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         BevyLevelkitPlugin::default()
///             .with_core(LevelkitCoreConfig {
///                 rng_seed: Some(1234),
///                 autostart: false,
///             })
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct BevyLevelkitPlugin {
    /// Core configuration
    pub core: LevelkitCoreConfig,
}

impl BevyLevelkitPlugin {
    /// Create with custom core configuration
    pub fn with_core(mut self, config: LevelkitCoreConfig) -> Self {
        self.core = config;
        self
    }
}

impl Plugin for BevyLevelkitPlugin {
    fn build(&self, app: &mut App) {
        // Layer 1: Assets
        app.add_plugins(LevelkitAssetsPlugin);

        // Layer 2: Wave scheduling
        app.add_plugins(LevelkitCorePlugin::new(self.core.clone()));

        info!("BevyLevelkitPlugin initialized");
    }
}
