//! combat_data: data schemas and loaders for the combat simulation core.
//!
//! Keeps file I/O and TOML parsing out of the sim crate. Loaders resolve
//! paths under the workspace `data/` directory so tests and tools can run
//! from any crate. Configs are read once at spawn time and treated as
//! read-only afterwards.

pub mod loader;

pub mod configs {
    pub mod abilities;
    pub mod enemy;
    pub mod player;
    pub mod telemetry;
}
