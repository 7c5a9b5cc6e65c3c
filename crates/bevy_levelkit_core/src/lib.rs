//! # `bevy_levelkit_core`
//!
//! Wave scheduling for `bevy_levelkit`. Turns a loaded level wave spec into
//! timed batches of mob names and announces them through observer events.
//!
//! **This crate does NOT spawn mobs** - game code observes [`WaveStarted`]
//! and decides what a mob name means.
//!
//! ## Architecture
//!
//! Layer 2 (this crate) sits on top of:
//! - **Layer 1** (`bevy_levelkit_assets`): Level data model and asset loading
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_levelkit_assets::LevelkitAssetsPlugin;
//! use bevy_levelkit_core::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(LevelkitAssetsPlugin)
//!         .add_plugins(LevelkitCorePlugin::default())
//!         .add_systems(Startup, start_level)
//!         .run();
//! }
//!
//! fn start_level(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands
//!         .spawn(LevelWaves {
//!             handle: asset_server.load("levels/level1.waves.toml"),
//!         })
//!         .observe(|trigger: On<WaveStarted>| {
//!             info!("wave {} brings {:?}", trigger.event().index, trigger.event().mobs);
//!         });
//! }
//! ```
//!
//! [`WaveStarted`]: events::WaveStarted

pub mod components;
pub mod events;
pub mod plugin;
pub mod scheduler;
pub mod systems;

pub mod prelude {
    //! Common imports for `bevy_levelkit_core` users.

    pub use crate::components::{LevelWaves, RunStatus, WaveRun, WaveSpecUnavailable};
    pub use crate::events::{WaveSpecFailed, WaveStarted, WavesFinished, WavesReady};
    pub use crate::plugin::{LevelkitCoreConfig, LevelkitCorePlugin, WaveRng};
    pub use crate::scheduler::{WaveError, WaveScheduler, WaveSpawn};
}

// Re-export plugin types at crate root for convenience
pub use plugin::{LevelkitCoreConfig, LevelkitCorePlugin};
