use crate::error::{Error, ScheduleViolation};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;

/// The five daily prayers in canonical order.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrayerName {
    Fajr = 0,
    Dhuhr = 1,
    Asr = 2,
    Maghrib = 3,
    Isha = 4,
}

impl PrayerName {
    pub const ALL: [PrayerName; 5] = [
        PrayerName::Fajr,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The prayer that follows within the same day, `None` for Isha.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }
}

impl fmt::Display for PrayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerSlot {
    pub name: PrayerName,
    pub instant: DateTime<Utc>,
}

impl PrayerSlot {
    pub fn new(name: PrayerName, instant: DateTime<Utc>) -> Self {
        Self { name, instant }
    }
}

/// Five prayer slots of one calendar date at one location.
///
/// A `PrayerDay` can only be built through the validating constructors, so
/// every instance holds exactly five slots in canonical order with strictly
/// increasing instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerDay {
    date: NaiveDate,
    slots: [PrayerSlot; 5],
}

impl PrayerDay {
    /// Build a day from five instants given in canonical order.
    pub fn new(date: NaiveDate, instants: [DateTime<Utc>; 5]) -> Result<Self, Error> {
        let slots = PrayerName::ALL.map(|name| PrayerSlot::new(name, instants[name.index()]));
        Self::try_from_slots(date, slots)
    }

    /// Build a day from externally supplied slots. Slots are never reordered:
    /// anything other than Fajr, Dhuhr, Asr, Maghrib, Isha with strictly
    /// increasing instants is rejected.
    pub fn try_from_slots(
        date: NaiveDate,
        slots: impl IntoIterator<Item = PrayerSlot>,
    ) -> Result<Self, Error> {
        let slots: Vec<PrayerSlot> = slots.into_iter().collect();
        let slots: [PrayerSlot; 5] = slots
            .try_into()
            .map_err(|slots: Vec<PrayerSlot>| ScheduleViolation::SlotCount { found: slots.len() })?;

        for (position, (slot, expected)) in slots.iter().zip(PrayerName::ALL).enumerate() {
            if slot.name != expected {
                return Err(ScheduleViolation::OutOfOrder {
                    position,
                    expected,
                    found: slot.name,
                }
                .into());
            }
        }

        for pair in slots.windows(2) {
            if pair[1].instant <= pair[0].instant {
                return Err(ScheduleViolation::NotIncreasing {
                    earlier: pair[0].name,
                    later: pair[1].name,
                }
                .into());
            }
        }

        Ok(Self { date, slots })
    }

    /// Build a day from local `HH:MM` (or `HH:MM:SS`) strings as published by
    /// mosque timetables, interpreted in `tz`.
    pub fn from_clock_times<Tz: TimeZone>(
        date: NaiveDate,
        tz: &Tz,
        times: [&str; 5],
    ) -> Result<Self, Error> {
        let mut instants = [DateTime::<Utc>::MIN_UTC; 5];
        for name in PrayerName::ALL {
            let raw = times[name.index()];
            let time = parse_clock_time(raw).ok_or_else(|| Error::InvalidClockTime {
                prayer: name,
                value: raw.to_owned(),
            })?;
            let local = tz
                .from_local_datetime(&date.and_time(time))
                .single()
                .ok_or(Error::NonexistentLocalTime { date, time })?;
            instants[name.index()] = local.with_timezone(&Utc);
        }
        Self::new(date, instants)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn slots(&self) -> &[PrayerSlot; 5] {
        &self.slots
    }

    pub fn slot(&self, name: PrayerName) -> PrayerSlot {
        self.slots[name.index()]
    }

    pub fn fajr(&self) -> PrayerSlot {
        self.slot(PrayerName::Fajr)
    }

    pub fn isha(&self) -> PrayerSlot {
        self.slot(PrayerName::Isha)
    }
}

fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        date().and_hms_opt(h, m, 0).unwrap().and_utc()
    }

    #[test]
    fn test_canonical_order() {
        assert_eq!(PrayerName::Fajr.next(), Some(PrayerName::Dhuhr));
        assert_eq!(PrayerName::Isha.next(), None);
        assert_eq!(PrayerName::Maghrib.to_string(), "Maghrib");
    }

    #[test]
    fn test_new_accepts_increasing_instants() {
        let day = PrayerDay::new(date(), [at(5, 0), at(12, 0), at(15, 0), at(18, 0), at(20, 0)])
            .unwrap();
        assert_eq!(day.fajr().instant, at(5, 0));
        assert_eq!(day.isha().name, PrayerName::Isha);
        assert_eq!(day.slot(PrayerName::Asr).instant, at(15, 0));
    }

    #[test]
    fn test_rejects_equal_instants() {
        let err = PrayerDay::new(date(), [at(5, 0), at(12, 0), at(12, 0), at(18, 0), at(20, 0)])
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidSchedule(ScheduleViolation::NotIncreasing {
                earlier: PrayerName::Dhuhr,
                later: PrayerName::Asr,
            })
        );
    }

    #[test]
    fn test_rejects_short_day() {
        let slots = [
            PrayerSlot::new(PrayerName::Fajr, at(5, 0)),
            PrayerSlot::new(PrayerName::Dhuhr, at(12, 0)),
        ];
        let err = PrayerDay::try_from_slots(date(), slots).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidSchedule(ScheduleViolation::SlotCount { found: 2 })
        );
    }

    #[test]
    fn test_rejects_reordered_names() {
        let slots = [
            PrayerSlot::new(PrayerName::Fajr, at(5, 0)),
            PrayerSlot::new(PrayerName::Asr, at(12, 0)),
            PrayerSlot::new(PrayerName::Dhuhr, at(15, 0)),
            PrayerSlot::new(PrayerName::Maghrib, at(18, 0)),
            PrayerSlot::new(PrayerName::Isha, at(20, 0)),
        ];
        let err = PrayerDay::try_from_slots(date(), slots).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidSchedule(ScheduleViolation::OutOfOrder {
                position: 1,
                expected: PrayerName::Dhuhr,
                found: PrayerName::Asr,
            })
        );
    }

    #[test]
    fn test_from_clock_times_applies_offset() {
        let paris = FixedOffset::east_opt(2 * 3600).unwrap();
        let day = PrayerDay::from_clock_times(
            date(),
            &paris,
            ["07:12", "13:45", "16:40:30", "19:05", "20:30"],
        )
        .unwrap();
        assert_eq!(day.fajr().instant, at(5, 12));
        assert_eq!(
            day.slot(PrayerName::Asr).instant,
            date().and_hms_opt(14, 40, 30).unwrap().and_utc()
        );
    }

    #[test]
    fn test_from_clock_times_rejects_garbage() {
        let err = PrayerDay::from_clock_times(
            date(),
            &Utc,
            ["05:00", "noon", "15:00", "18:00", "20:00"],
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidClockTime {
                prayer: PrayerName::Dhuhr,
                value: "noon".into(),
            }
        );
    }
}
