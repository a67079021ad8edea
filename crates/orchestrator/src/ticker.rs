#![forbid(unsafe_code)]

use crate::clock::Clock;
use crate::error::Error;
use crate::timetable::ConfiguredTimetable;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use config::Config;
use kernel::{PrayerScheduler, SchedulerState};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

pub enum ControlEvent {
    /// Swap in a scheduler for a different day or location.
    Replace(PrayerScheduler),
    /// Rebuild the scheduler and cadence from a reloaded configuration.
    Reload(Config),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub now: DateTime<Utc>,
    /// Date of the prayer day the state was computed against.
    pub date: NaiveDate,
    pub state: SchedulerState,
    pub rolled_over: bool,
}

/// Drives a [`PrayerScheduler`] at a fixed cadence.
///
/// The ticker owns the only timer for its scheduler: replacing the day goes
/// through [`ControlEvent`] and is handled inside the same loop, so there is
/// never a second timer evaluating a stale day.
pub struct PrayerTicker {
    scheduler: PrayerScheduler,
    /// Offset of the local clock whose calendar date selects the prayer day.
    offset: FixedOffset,
    clock: Box<dyn Clock + Send + Sync>,
    tick: Duration,
    last_now: Option<DateTime<Utc>>,
}

impl PrayerTicker {
    pub fn new(
        scheduler: PrayerScheduler,
        offset: FixedOffset,
        clock: Box<dyn Clock + Send + Sync>,
        tick: Duration,
    ) -> Self {
        Self {
            scheduler,
            offset,
            clock,
            tick,
            last_now: None,
        }
    }

    /// Build a ticker for the local date the clock currently reports, using
    /// the configured timetable.
    pub fn from_config(
        config: &Config,
        clock: Box<dyn Clock + Send + Sync>,
    ) -> Result<Self, Error> {
        let (scheduler, offset) = Self::scheduler_from_config(config, clock.now())?;
        Ok(Self::new(scheduler, offset, clock, config.schedule.tick))
    }

    fn scheduler_from_config(
        config: &Config,
        now: DateTime<Utc>,
    ) -> Result<(PrayerScheduler, FixedOffset), Error> {
        let timetable = ConfiguredTimetable::new(config.timetable.clone())?;
        let offset = timetable.offset();
        let date = timetable.local_date(now);
        Ok((PrayerScheduler::new(Arc::new(timetable), date)?, offset))
    }

    pub fn scheduler(&self) -> &PrayerScheduler {
        &self.scheduler
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    /// Evaluate once against the clock, advancing first while the local
    /// calendar date or tomorrow's Fajr is past the loaded day. A ticker that
    /// crosses midnight answers exactly like one started after it.
    pub fn tick(&mut self) -> Result<TickReport, Error> {
        let now = self.clock.now();
        if let Some(last) = self.last_now
            && now < last
        {
            warn!(%now, %last, "clock went backwards");
        }
        self.last_now = Some(now);

        let mut rolled_over = false;
        while self.local_date(now) > self.scheduler.today().date()
            || self.scheduler.needs_rollover(now)?
        {
            self.scheduler = self.scheduler.advance()?;
            info!(date = %self.scheduler.today().date(), "rolled over to next prayer day");
            rolled_over = true;
        }

        let state = self.scheduler.evaluate(now)?;
        Ok(TickReport {
            now,
            date: self.scheduler.today().date(),
            state,
            rolled_over,
        })
    }

    /// Tick until the cancellation token is triggered, publishing every report.
    /// Stops quietly when the receiving side goes away.
    pub async fn run_until(
        &mut self,
        cancel: CancellationToken,
        mut control_rx: mpsc::UnboundedReceiver<ControlEvent>,
        updates: flume::Sender<TickReport>,
    ) -> Result<(), Error> {
        async {
            loop {
                let tick_start = self.clock.now();
                let report = self.tick()?;
                if updates.send_async(report).await.is_err() {
                    debug!("report receiver dropped");
                    break;
                }

                let elapsed = (self.clock.now() - tick_start).to_std().unwrap_or_default();
                let sleep_for = self.tick.saturating_sub(elapsed);

                let wake = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    Some(event) = control_rx.recv() => Some(event),
                    _ = self.clock.sleep(sleep_for) => continue,
                };

                match wake {
                    Some(event) => self.handle_control(event)?,
                    None => {
                        info!("shutdown requested");
                        break;
                    }
                }
            }

            Ok::<(), Error>(())
        }
        .instrument(tracing::debug_span!("prayer_ticker"))
        .await
    }

    pub fn handle_control(&mut self, event: ControlEvent) -> Result<(), Error> {
        match event {
            ControlEvent::Replace(scheduler) => {
                info!(date = %scheduler.today().date(), "prayer day replaced");
                self.scheduler = scheduler;
            }
            ControlEvent::Reload(config) => {
                (self.scheduler, self.offset) =
                    Self::scheduler_from_config(&config, self.clock.now())?;
                self.tick = config.schedule.tick;
                info!(date = %self.scheduler.today().date(), "config reloaded");
            }
        }
        Ok(())
    }
}
