//! File format adapters. TOML lives on [`crate::schema::LevelWaveSpec`] itself.

pub mod tsx;

pub use tsx::{TsxError, parse_tsx, write_tsx};
