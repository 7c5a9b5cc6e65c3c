pub mod tileset;
pub mod waves;
