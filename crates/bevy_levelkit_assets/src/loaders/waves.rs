use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
    tasks::ConditionalSendFuture,
};
use thiserror::Error;

use crate::assets::waves::WaveSpecAsset;
use crate::schema::{LevelWaveSpec, SchemaError};

/// Asset loader for level wave specs (.waves.toml files)
///
/// Validation runs here, so a dangling special-wave label or an out of range
/// value fails the load instead of surfacing mid-level.
#[derive(Default)]
pub struct WaveSpecAssetLoader;

#[derive(Debug, Error)]
pub enum WaveSpecLoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Level spec is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Invalid level spec: {0}")]
    Schema(#[from] SchemaError),
}

impl AssetLoader for WaveSpecAssetLoader {
    type Asset = WaveSpecAsset;
    type Settings = ();
    type Error = WaveSpecLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;

            let spec = LevelWaveSpec::from_toml_str(std::str::from_utf8(&bytes)?)?;

            debug!(
                "Loaded level spec {:?}: {} waves, {} special, {:.1}s total",
                load_context.asset_path().path(),
                spec.len(),
                spec.special_waves.len(),
                spec.total_duration()
            );

            Ok(WaveSpecAsset { spec })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["waves.toml"]
    }
}
