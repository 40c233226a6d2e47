pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::sim::Orrery;
pub use api::types::{BodyId, Overlay, Rgb};
pub use assets::config::SystemConfig;
pub use assets::presets;
pub use core::bodies::{BodyDesc, BodyTree, OrbitalBody, PeriodUnit};
pub use core::clock::CalendarTime;
pub use core::time::{TimeBase, TimeConfig};
pub use error::{ConfigError, ConfigResult};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{CameraConfig, CameraTransform};
pub use renderer::instance::{BodyInstance, InstanceBuffer};
pub use systems::lighting::{
    cast_shadow, in_shadow_cone, light_angle, phase_angle, terminator_fan,
    BodyLighting, Disc, IlluminationConfig, ShadowFootprint, TerminatorFan,
};
pub use systems::render::{build_snapshot, FrameSnapshot, RenderBody, Ring, ShadowDisc};
