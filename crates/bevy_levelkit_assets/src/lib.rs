//! # `bevy_levelkit_assets`
//!
//! Data model and asset loading for level data: image-collection tilesets
//! (`.tsx`) and level wave specs (`.waves.toml`).
//!
//! The [`schema`] and [`format`] modules work without an `App`; the
//! [`plugin`] wires them into Bevy's asset server.

pub mod assets;
pub mod format;
pub mod loaders;
pub mod plugin;
pub mod schema;

// Re-export the plugin for convenience
pub use plugin::LevelkitAssetsPlugin;

/// Prelude module for convenient imports
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_levelkit_assets::prelude::*;
///
/// fn my_system(tilesets: Res<Assets<TilesetAsset>>) {
///     // Use level assets...
/// }
/// ```
pub mod prelude {
    pub use crate::assets::{tileset::TilesetAsset, waves::WaveSpecAsset};
    pub use crate::format::{TsxError, parse_tsx, write_tsx};
    pub use crate::plugin::LevelkitAssetsPlugin;
    pub use crate::schema::{
        ErrorKind, LevelWaveSpec, ResolvedWave, SchemaError, Tile, Tileset, Wave, WaveSize,
    };
}
