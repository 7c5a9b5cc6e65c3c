use bevy::prelude::*;

use crate::assets::{tileset::TilesetAsset, waves::WaveSpecAsset};
use crate::loaders::{tileset::TilesetAssetLoader, waves::WaveSpecAssetLoader};

/// Plugin that registers the level asset types and loaders
///
/// This plugin enables loading tilesets (`.tsx`) and level wave specs
/// (`.waves.toml`) as Bevy assets.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_levelkit_assets::LevelkitAssetsPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(LevelkitAssetsPlugin)
///     .run();
/// ```
///
/// # What this plugin does NOT do
///
/// - Wave scheduling (that's Layer 2 - `bevy_levelkit_core`)
/// - Rendering tiles or spawning mobs (left to the game)
///
/// This is a **Layer 1** plugin: pure asset loading with no ECS concerns.
pub struct LevelkitAssetsPlugin;

impl Plugin for LevelkitAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<TilesetAsset>()
            .init_asset::<WaveSpecAsset>();

        app.register_asset_loader(TilesetAssetLoader)
            .register_asset_loader(WaveSpecAssetLoader);
    }
}
