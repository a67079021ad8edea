mod countdown;
mod day;
mod scheduler;
mod timetable;

pub use countdown::Countdown;
pub use day::{PrayerDay, PrayerName, PrayerSlot};
pub use scheduler::{PrayerScheduler, SchedulerState, UpcomingPrayer};
pub use timetable::{StaticTimetable, Timetable};
