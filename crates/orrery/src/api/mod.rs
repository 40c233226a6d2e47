pub mod sim;
pub mod types;

pub use sim::Orrery;
pub use types::{BodyId, Overlay, Rgb};
