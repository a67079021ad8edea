#![forbid(unsafe_code)]

pub mod clock;
pub mod compass;
pub mod directory;
mod error;
pub mod ticker;
pub mod timetable;

pub use clock::{Clock, SystemClock};
pub use compass::{CompassSession, HeadingEvent};
pub use directory::{MosqueEntry, nearest_mosques, observer_location};
pub use error::Error;
pub use ticker::{ControlEvent, PrayerTicker, TickReport};
pub use timetable::ConfiguredTimetable;
