use crate::error::{Error, ScheduleViolation};
use crate::prayer::{Countdown, PrayerDay, PrayerName, PrayerSlot, Timetable};
use chrono::{DateTime, NaiveDate, Utc};
use std::{fmt, sync::Arc, sync::OnceLock};
use tracing::trace;

/// The prayer a countdown is running towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingPrayer {
    pub slot: PrayerSlot,
    /// Set when the slot belongs to the following day (always Fajr).
    pub tomorrow: bool,
}

impl fmt::Display for UpcomingPrayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tomorrow {
            write!(f, "{} (tomorrow)", self.slot.name)
        } else {
            write!(f, "{}", self.slot.name)
        }
    }
}

/// Result of one evaluation. Recomputed wholesale on every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerState {
    /// Slot whose interval contains `now`. `None` before today's Fajr.
    pub active: Option<PrayerSlot>,
    pub next: UpcomingPrayer,
    pub remaining: Countdown,
    /// Highlight flag for each of today's rows, indexed by [`PrayerName::index`].
    pub rows: [bool; 5],
}

impl SchedulerState {
    pub fn is_row_active(&self, name: PrayerName) -> bool {
        self.rows[name.index()]
    }

    /// Countdown rendered as `HH:MM:SS`.
    pub fn time_remaining(&self) -> String {
        self.remaining.to_string()
    }
}

/// Classifies instants against a loaded prayer day.
///
/// The scheduler holds no timer. It is a pure function of today, tomorrow and
/// `now`; tomorrow is pulled from the timetable the first time it is needed
/// (once today's Isha has started) and cached for the lifetime of the
/// scheduler, so asking for it eagerly or lazily gives the same answers.
///
/// Before today's Fajr no prayer is reported active: yesterday's Isha is not
/// carried over. Row highlighting follows the same rule.
pub struct PrayerScheduler {
    timetable: Arc<dyn Timetable>,
    today: PrayerDay,
    tomorrow: OnceLock<PrayerDay>,
}

impl fmt::Debug for PrayerScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrayerScheduler")
            .field("today", &self.today)
            .field("tomorrow", &self.tomorrow.get())
            .finish_non_exhaustive()
    }
}

impl PrayerScheduler {
    /// Load `date` from the timetable and build a scheduler for it.
    pub fn new(timetable: Arc<dyn Timetable>, date: NaiveDate) -> Result<Self, Error> {
        let today = timetable.day(date)?;
        Ok(Self::with_today(timetable, today))
    }

    pub fn with_today(timetable: Arc<dyn Timetable>, today: PrayerDay) -> Self {
        Self {
            timetable,
            today,
            tomorrow: OnceLock::new(),
        }
    }

    pub fn today(&self) -> &PrayerDay {
        &self.today
    }

    /// The day after today, fetched from the timetable on first use.
    pub fn tomorrow(&self) -> Result<&PrayerDay, Error> {
        if let Some(day) = self.tomorrow.get() {
            return Ok(day);
        }

        let date = next_date(self.today.date())?;
        let day = self.timetable.day(date)?;
        if day.fajr().instant <= self.today.isha().instant {
            return Err(ScheduleViolation::NotIncreasing {
                earlier: PrayerName::Isha,
                later: PrayerName::Fajr,
            }
            .into());
        }
        trace!(%date, "loaded tomorrow's prayer day");
        Ok(self.tomorrow.get_or_init(|| day))
    }

    /// Start of the slot following `name`: the next slot of today, or
    /// tomorrow's Fajr for Isha.
    fn following(&self, name: PrayerName) -> Result<DateTime<Utc>, Error> {
        match name.next() {
            Some(next) => Ok(self.today.slot(next).instant),
            None => Ok(self.tomorrow()?.fajr().instant),
        }
    }

    /// Whether the slot `name` covers `now`, i.e. `slot <= now < following`.
    pub fn is_active(&self, name: PrayerName, now: DateTime<Utc>) -> Result<bool, Error> {
        let slot = self.today.slot(name);
        if now < slot.instant {
            return Ok(false);
        }
        Ok(now < self.following(name)?)
    }

    /// Classify `now` against the loaded days.
    ///
    /// Fails with [`Error::ScheduleExpired`] once `now` reaches tomorrow's Fajr.
    pub fn evaluate(&self, now: DateTime<Utc>) -> Result<SchedulerState, Error> {
        let next = match self.today.slots().iter().find(|slot| slot.instant > now) {
            Some(slot) => UpcomingPrayer {
                slot: *slot,
                tomorrow: false,
            },
            None => {
                let fajr = self.tomorrow()?.fajr();
                if fajr.instant <= now {
                    return Err(Error::ScheduleExpired {
                        now,
                        expired_at: fajr.instant,
                    });
                }
                UpcomingPrayer {
                    slot: fajr,
                    tomorrow: true,
                }
            }
        };

        let mut rows = [false; 5];
        for name in PrayerName::ALL {
            rows[name.index()] = self.is_active(name, now)?;
        }
        let active = PrayerName::ALL
            .into_iter()
            .find(|name| rows[name.index()])
            .map(|name| self.today.slot(name));

        Ok(SchedulerState {
            active,
            next,
            remaining: Countdown::between(now, next.slot.instant),
            rows,
        })
    }

    /// Whether `now` has reached tomorrow's Fajr and the scheduler should be
    /// advanced.
    pub fn needs_rollover(&self, now: DateTime<Utc>) -> Result<bool, Error> {
        if now < self.today.isha().instant {
            return Ok(false);
        }
        Ok(now >= self.tomorrow()?.fajr().instant)
    }

    /// A scheduler for the following day, sharing this one's timetable.
    pub fn advance(&self) -> Result<Self, Error> {
        let today = self.tomorrow()?.clone();
        Ok(Self::with_today(Arc::clone(&self.timetable), today))
    }
}

fn next_date(date: NaiveDate) -> Result<NaiveDate, Error> {
    date.succ_opt().ok_or(Error::DateOutOfRange(date))
}
