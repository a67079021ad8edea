#![forbid(unsafe_code)]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Local `HH:MM` prayer times as published by a mosque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClockTimes {
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl ClockTimes {
    /// The five times in canonical order.
    pub fn as_array(&self) -> [&str; 5] {
        [
            self.fajr.as_str(),
            self.dhuhr.as_str(),
            self.asr.as_str(),
            self.maghrib.as_str(),
            self.isha.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayTimes {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub times: ClockTimes,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Timetable {
    /// Offset of the local clock times from UTC, in minutes east.
    pub utc_offset: i32,

    /// Times used for any date without an entry in `days`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ClockTimes>,

    pub days: Vec<DayTimes>,
}

impl Timetable {
    /// Clock times for `date`, falling back to the default set.
    pub fn times_for(&self, date: NaiveDate) -> Option<&ClockTimes> {
        self.days
            .iter()
            .find(|day| day.date == date)
            .map(|day| &day.times)
            .or(self.default.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(fajr: &str) -> ClockTimes {
        ClockTimes {
            fajr: fajr.into(),
            dhuhr: "13:00".into(),
            asr: "16:00".into(),
            maghrib: "19:00".into(),
            isha: "20:30".into(),
        }
    }

    #[test]
    fn explicit_day_wins_over_default() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let timetable = Timetable {
            utc_offset: 0,
            default: Some(times("06:00")),
            days: vec![DayTimes {
                date,
                times: times("05:45"),
            }],
        };
        assert_eq!(timetable.times_for(date).map(|t| t.fajr.as_str()), Some("05:45"));
        assert_eq!(
            timetable
                .times_for(date.succ_opt().unwrap())
                .map(|t| t.as_array()[0]),
            Some("06:00")
        );
    }

    #[test]
    fn empty_timetable_has_no_times() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(Timetable::default().times_for(date), None);
    }
}
