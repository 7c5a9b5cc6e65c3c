//! Inserts a [`WaveRun`] once a level's spec is available.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_levelkit_assets::prelude::WaveSpecAsset;

use crate::components::{LevelWaves, WaveRun, WaveSpecUnavailable};
use crate::events::{WaveSpecFailed, WavesReady};
use crate::plugin::LevelkitCoreConfig;
use crate::scheduler::WaveScheduler;

/// Reactive system that detects when a `WaveSpecAsset` is available and
/// starts the level's wave run.
///
/// Runs in `PreUpdate` before user systems.
///
/// Specs added straight to `Assets<WaveSpecAsset>` are picked up as well as
/// ones loaded through the asset server. A failed load is reported once with
/// [`WaveSpecFailed`].
pub fn start_loaded_wave_runs(
    asset_server: Res<AssetServer>,
    specs: Res<Assets<WaveSpecAsset>>,
    config: Res<LevelkitCoreConfig>,
    mut commands: Commands,
    query: Query<(Entity, &LevelWaves), (Without<WaveRun>, Without<WaveSpecUnavailable>)>,
) {
    for (entity, level) in &query {
        let Some(asset) = specs.get(&level.handle) else {
            if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&level.handle) {
                error!("Wave spec for {:?} failed to load: {}", entity, err);
                let error = err.to_string();
                commands
                    .entity(entity)
                    .insert(WaveSpecUnavailable)
                    .trigger(move |entity| WaveSpecFailed { entity, error });
            }
            continue;
        };

        let wave_count = asset.len();
        info!("Starting wave run on {:?} with {} waves", entity, wave_count);

        // the first wave starts in `advance_wave_runs` this same frame
        let scheduler = WaveScheduler::new(asset.spec.clone());
        let run = if config.autostart {
            WaveRun::new(scheduler)
        } else {
            WaveRun::paused(scheduler)
        };

        commands
            .entity(entity)
            .insert(run)
            .trigger(move |entity| WavesReady { entity, wave_count });
    }
}
