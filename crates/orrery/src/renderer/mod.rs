pub mod instance;
pub mod camera;

pub use camera::{CameraConfig, CameraTransform};
pub use instance::{BodyInstance, InstanceBuffer};
