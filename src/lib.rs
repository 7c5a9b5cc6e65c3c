//! # bevy_levelkit
//!
//! Level data for a 2D wave-survival game in Bevy: image-collection tilesets
//! and per-level wave specs.
//!
//! This is a meta-crate that combines the `bevy_levelkit_*` sub-crates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_levelkit::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BevyLevelkitPlugin::default())
//!         .add_systems(Startup, load_level)
//!         .run();
//! }
//!
//! fn load_level(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     let _tiles: Handle<TilesetAsset> = asset_server.load("tilesets/deltaworld_v1.tsx");
//!     commands.spawn(LevelWaves {
//!         handle: asset_server.load("levels/level1.waves.toml"),
//!     });
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Layer 1** ([`assets`]): Data model, validation and asset loading (.tsx, .waves.toml)
//! - **Layer 2** ([`core`]): Wave scheduling with observer events

pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_levelkit_assets as assets;
pub use bevy_levelkit_core as core;

/// Unified prelude for bevy_levelkit
pub mod prelude {
    pub use crate::assets::prelude::*;
    pub use crate::core::prelude::*;

    // Unified plugin
    pub use crate::plugin::BevyLevelkitPlugin;
}
