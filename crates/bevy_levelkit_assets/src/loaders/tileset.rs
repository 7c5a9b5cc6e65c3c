use std::path::Path;

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    platform::collections::HashMap,
    prelude::*,
    tasks::ConditionalSendFuture,
};
use normalize_path::NormalizePath;
use thiserror::Error;

use crate::assets::tileset::TilesetAsset;
use crate::format::{TsxError, parse_tsx};

/// Asset loader for tilesets (.tsx files)
///
/// Parses the tileset from the bytes Bevy hands us and loads every tile image
/// as a dependency, so the tileset only counts as loaded once its images are.
#[derive(Default)]
pub struct TilesetAssetLoader;

#[derive(Debug, Error)]
pub enum TilesetLoaderError {
    #[error("Failed to load tileset: {0}")]
    Tsx(#[from] TsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl AssetLoader for TilesetAssetLoader {
    type Asset = TilesetAsset;
    type Settings = ();
    type Error = TilesetLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;

            let tileset_path = load_context.asset_path().path().to_path_buf();
            let tileset = parse_tsx(&tileset_path, &bytes)?;

            let mut tile_images = HashMap::new();
            for tile in &tileset {
                let image_path = resolve_relative_path(&tileset_path, &tile.image_path)?;
                let handle = load_context.load(image_path);
                tile_images.insert(tile.id, handle);
            }

            debug!(
                "Loaded tileset '{}' with {} tiles ({} variants)",
                tileset.name,
                tileset.len(),
                tileset.variants().count()
            );

            let tile_size = UVec2::new(tileset.tile_width, tileset.tile_height);

            Ok(TilesetAsset {
                tileset,
                tile_images,
                tile_size,
            })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["tsx"]
    }
}

/// Resolve an image path written in a tileset to a Bevy asset path
///
/// Tilesets use paths relative to their own directory like
/// `../textures/tile.png`, but Bevy's asset system expects asset-root-relative
/// paths like `textures/tile.png`.
///
/// # Arguments
/// * `tileset_path` - Asset path of the tileset file
/// * `relative_path` - The image path from the tileset (e.g., `../images/tile.png`)
///
/// # Returns
/// * `Ok(String)` - The asset-root-relative path
/// * `Err(TilesetLoaderError)` - If path resolution fails
fn resolve_relative_path(
    tileset_path: &Path,
    relative_path: &Path,
) -> Result<String, TilesetLoaderError> {
    let parent = tileset_path.parent().ok_or_else(|| {
        TilesetLoaderError::InvalidPath(format!(
            "No parent directory for asset: {:?}",
            tileset_path
        ))
    })?;

    // Path::join does NOT normalize - it just concatenates
    let normalized = parent.join(relative_path).normalize();

    // Convert to Bevy asset path (forward slashes, no leading slash)
    let asset_path = normalized
        .to_str()
        .ok_or_else(|| {
            TilesetLoaderError::InvalidPath(format!("Invalid UTF-8 in path: {:?}", normalized))
        })?
        .replace('\\', "/");

    Ok(asset_path)
}
