//! Domain layer containing entities and the time source.

pub mod clock;
pub mod entities;

// Re-export commonly used domain types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::*;
