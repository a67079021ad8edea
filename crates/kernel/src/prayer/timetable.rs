use crate::error::Error;
use crate::prayer::PrayerDay;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Source of prayer days, typically an astronomical calculator or a mosque
/// directory. The scheduler asks it for tomorrow only when today is exhausted.
pub trait Timetable: Send + Sync {
    /// Produce the prayer day for `date`.
    fn day(&self, date: NaiveDate) -> Result<PrayerDay, Error>;
}

/// A timetable backed by an in-memory set of precomputed days.
#[derive(Debug, Clone, Default)]
pub struct StaticTimetable {
    days: BTreeMap<NaiveDate, PrayerDay>,
}

impl StaticTimetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: PrayerDay) -> Option<PrayerDay> {
        self.days.insert(day.date(), day)
    }
}

impl FromIterator<PrayerDay> for StaticTimetable {
    fn from_iter<I: IntoIterator<Item = PrayerDay>>(iter: I) -> Self {
        let mut timetable = Self::new();
        for day in iter {
            timetable.insert(day);
        }
        timetable
    }
}

impl Timetable for StaticTimetable {
    fn day(&self, date: NaiveDate) -> Result<PrayerDay, Error> {
        self.days.get(&date).cloned().ok_or(Error::MissingDay(date))
    }
}
