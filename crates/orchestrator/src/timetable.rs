#![forbid(unsafe_code)]

use crate::error::Error;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use kernel::{PrayerDay, Timetable};

/// Timetable built from the `[timetable]` config section: local clock
/// strings at a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct ConfiguredTimetable {
    offset: FixedOffset,
    table: config::Timetable,
}

impl ConfiguredTimetable {
    pub fn new(table: config::Timetable) -> Result<Self, Error> {
        let offset = table
            .utc_offset
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(Error::InvalidUtcOffset(table.utc_offset))?;
        Ok(Self { offset, table })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `now` on the timetable's local clock.
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }
}

impl Timetable for ConfiguredTimetable {
    fn day(&self, date: NaiveDate) -> Result<PrayerDay, kernel::Error> {
        let times = self
            .table
            .times_for(date)
            .ok_or(kernel::Error::MissingDay(date))?;
        PrayerDay::from_clock_times(date, &self.offset, times.as_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use config::{ClockTimes, DayTimes};
    use kernel::PrayerName;

    fn clock_times(fajr: &str) -> ClockTimes {
        ClockTimes {
            fajr: fajr.into(),
            dhuhr: "13:45".into(),
            asr: "16:40".into(),
            maghrib: "19:05".into(),
            isha: "20:30".into(),
        }
    }

    #[test]
    fn test_day_uses_offset_and_overrides() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let timetable = ConfiguredTimetable::new(config::Timetable {
            utc_offset: 120,
            default: Some(clock_times("06:00")),
            days: vec![DayTimes {
                date,
                times: clock_times("05:48"),
            }],
        })
        .unwrap();

        let day = timetable.day(date).unwrap();
        assert_eq!(
            day.slot(PrayerName::Fajr).instant,
            Utc.with_ymd_and_hms(2026, 10, 19, 3, 48, 0).unwrap()
        );
        let next = timetable.day(date.succ_opt().unwrap()).unwrap();
        assert_eq!(
            next.fajr().instant,
            Utc.with_ymd_and_hms(2026, 10, 20, 4, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let timetable = ConfiguredTimetable::new(config::Timetable {
            utc_offset: 120,
            ..Default::default()
        })
        .unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 23, 0, 0).unwrap();
        assert_eq!(
            timetable.local_date(now),
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
        );
    }

    #[test]
    fn test_missing_times() {
        let timetable = ConfiguredTimetable::new(config::Timetable::default()).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            timetable.day(date).unwrap_err(),
            kernel::Error::MissingDay(date)
        );
    }

    #[test]
    fn test_rejects_absurd_offset() {
        let table = config::Timetable {
            utc_offset: 24 * 60,
            ..Default::default()
        };
        assert!(matches!(
            ConfiguredTimetable::new(table),
            Err(Error::InvalidUtcOffset(1440))
        ));
    }
}
