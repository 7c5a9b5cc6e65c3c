use std::ops::Deref;

use bevy::prelude::*;

use crate::schema::LevelWaveSpec;

/// Bevy asset wrapper for level wave specs (.waves.toml files)
///
/// The spec is validated before the asset is created, so every special wave
/// label in `waves` is known to resolve.
#[derive(TypePath, Asset, Debug, Clone)]
pub struct WaveSpecAsset {
    pub spec: LevelWaveSpec,
}

impl Deref for WaveSpecAsset {
    type Target = LevelWaveSpec;

    fn deref(&self) -> &Self::Target {
        &self.spec
    }
}
