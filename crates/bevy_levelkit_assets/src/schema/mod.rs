//! Level data model shared by the loaders and the wave scheduler.

pub mod error;
pub mod tileset;
pub mod waves;

pub use error::{ErrorKind, SchemaError};
pub use tileset::{Tile, Tileset};
pub use waves::{LevelWaveSpec, ResolvedWave, Wave, WaveSize};
