mod error;
pub mod prayer;
pub mod qibla;

pub use error::{Error, ScheduleViolation};
pub use prayer::{
    Countdown, PrayerDay, PrayerName, PrayerScheduler, PrayerSlot, SchedulerState,
    StaticTimetable, Timetable, UpcomingPrayer,
};
pub use qibla::{
    CompassState, CompassStatus, GeoPoint, KAABA, QiblaCompass, QiblaReading, RawHeading,
    UnavailableReason,
};
