pub mod bodies;
pub mod clock;
pub mod time;

pub use bodies::{BodyDesc, BodyTree, OrbitalBody, PeriodUnit};
pub use clock::{CalendarTime, DAYS_PER_YEAR};
pub use time::{TimeBase, TimeConfig};
