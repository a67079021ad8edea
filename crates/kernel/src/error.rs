use crate::prayer::PrayerName;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Represents all possible errors that can occur in this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A prayer day does not hold five slots in strictly increasing canonical
    /// order.
    #[error("Invalid prayer schedule: {0}")]
    InvalidSchedule(#[from] ScheduleViolation),

    /// A local `HH:MM` clock string could not be parsed.
    #[error("Invalid clock time for {prayer}: {value:?}")]
    InvalidClockTime { prayer: PrayerName, value: String },

    /// A local clock time maps to zero or several instants (DST gap or fold).
    #[error("Local time {time} on {date} does not map to a single instant")]
    NonexistentLocalTime { date: NaiveDate, time: NaiveTime },

    /// Latitude or longitude outside the valid range, or not finite.
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// `now` reached the Fajr following the loaded day; the scheduler must be
    /// advanced before it can be evaluated again.
    ///
    /// # See Also
    ///
    /// [`PrayerScheduler::advance`](crate::PrayerScheduler::advance)
    #[error("Schedule expired at {expired_at}, now is {now}")]
    ScheduleExpired {
        now: DateTime<Utc>,
        expired_at: DateTime<Utc>,
    },

    /// The timetable has no prayer times for the date.
    #[error("No prayer times for {0}")]
    MissingDay(NaiveDate),

    /// The date following this one cannot be represented.
    #[error("Date out of range: {0}")]
    DateOutOfRange(NaiveDate),
}

/// The way a set of prayer slots breaks the day invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleViolation {
    #[error("expected 5 slots, found {found}")]
    SlotCount { found: usize },

    #[error("slot {position} is {found}, expected {expected}")]
    OutOfOrder {
        position: usize,
        expected: PrayerName,
        found: PrayerName,
    },

    #[error("{later} is not strictly after {earlier}")]
    NotIncreasing {
        earlier: PrayerName,
        later: PrayerName,
    },
}
