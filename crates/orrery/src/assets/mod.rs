// assets/mod.rs
//
// Scene descriptions: the JSON config format and the built-in presets.

pub mod config;
pub mod presets;

pub use config::SystemConfig;
