//! Shared data model for the smart school bag.
//!
//! Everything the reader, content, lighting and storage crates exchange is
//! defined here: tag identifiers, the persisted settings document, weekday
//! handling and the lighting preference enums.

pub mod clock;
pub mod constants;
pub mod error;
pub mod settings;
pub mod tag;
pub mod types;

pub use clock::{FixedWeekday, LocalClock, WeekdayClock};
pub use error::{Error, Result};
pub use settings::{PendingTags, Settings};
pub use tag::{TagRecord, WeeklySchedule};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
