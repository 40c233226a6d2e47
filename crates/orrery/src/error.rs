//! Configuration errors raised while building a scene.
//!
//! Every variant is fatal: the simulation refuses to start rather than
//! substituting defaults. Numerical degeneracies and out-of-range zoom are
//! not errors; they are corrected where they occur.

use thiserror::Error;

/// Result type for scene construction.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("scene has no bodies")]
    Empty,

    #[error("body {index} ({name}): radius must be positive and finite, got {radius}")]
    InvalidRadius { index: usize, name: String, radius: f32 },

    #[error("body {index} ({name}): orbit radius must be non-negative and finite, got {orbit_radius}")]
    InvalidOrbitRadius { index: usize, name: String, orbit_radius: f32 },

    #[error("body {index} ({name}): orbital period must be non-zero and finite, got {period}")]
    InvalidPeriod { index: usize, name: String, period: f64 },

    #[error("body {index} ({name}): initial phase must be finite")]
    InvalidPhase { index: usize, name: String },

    #[error("body {index} ({name}): parent index {parent} does not exist")]
    UnknownParent { index: usize, name: String, parent: usize },

    #[error("body {index} ({name}) is its own ancestor")]
    Cycle { index: usize, name: String },

    #[error("no root body (every body has a parent)")]
    MissingRoot,

    #[error("multiple root bodies: {first} and {second}")]
    MultipleRoots { first: usize, second: usize },

    #[error("root body {name} must have orbit radius 0, got {orbit_radius}")]
    RootOrbits { name: String, orbit_radius: f32 },

    #[error("zoom range [{min}, {max}] is invalid")]
    InvalidZoomRange { min: f32, max: f32 },

    #[error("speed range [{min}, {max}] is invalid")]
    InvalidSpeedRange { min: f64, max: f64 },

    #[error("{what} must be positive and finite, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
