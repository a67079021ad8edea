#![forbid(unsafe_code)]

use crate::directory::observer_location;
use crate::error::Error;
use config::Config;
use kernel::{CompassStatus, GeoPoint, QiblaCompass, RawHeading, UnavailableReason};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info};

/// One event from the device-orientation side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadingEvent {
    Sample(RawHeading),
    /// The platform refused or cannot provide orientation data.
    Unavailable(UnavailableReason),
    /// The observer moved; the static reading is recomputed.
    Relocate(GeoPoint),
}

/// Feeds a heading stream into a [`QiblaCompass`] and publishes the resulting
/// status after every event. Samples are applied as they arrive, with no
/// buffering or throttling.
#[derive(Debug, Clone)]
pub struct CompassSession {
    compass: QiblaCompass,
}

impl CompassSession {
    pub fn new(compass: QiblaCompass) -> Self {
        Self { compass }
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let origin = observer_location(config)?;
        let compass = QiblaCompass::new(origin).with_tolerance(config.compass.alignment_tolerance);
        Ok(Self::new(compass))
    }

    pub fn compass(&self) -> &QiblaCompass {
        &self.compass
    }

    pub fn apply(&mut self, event: HeadingEvent) -> CompassStatus {
        match event {
            HeadingEvent::Sample(raw) => self.compass.on_raw_sample(raw),
            HeadingEvent::Unavailable(reason) => {
                info!(%reason, "compass unavailable");
                self.compass.mark_unavailable(reason);
                self.compass.status()
            }
            HeadingEvent::Relocate(origin) => {
                self.compass.relocate(origin);
                debug!(reading = ?self.compass.reading(), "qibla reading recomputed");
                self.compass.status()
            }
        }
    }

    /// Consume heading events until cancelled or the source closes. A closed
    /// source is published as [`UnavailableReason::StreamClosed`].
    pub async fn run_until(
        &mut self,
        cancel: CancellationToken,
        events: flume::Receiver<HeadingEvent>,
        status_tx: flume::Sender<CompassStatus>,
    ) {
        async {
            if status_tx.send_async(self.compass.status()).await.is_err() {
                return;
            }

            loop {
                let event = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        info!("shutdown requested");
                        break;
                    }
                    event = events.recv_async() => event,
                };

                let status = match event {
                    Ok(event) => self.apply(event),
                    Err(_) => {
                        self.compass.mark_unavailable(UnavailableReason::StreamClosed);
                        let _ = status_tx.send_async(self.compass.status()).await;
                        debug!("heading source closed");
                        break;
                    }
                };

                if status_tx.send_async(status).await.is_err() {
                    debug!("status receiver dropped");
                    break;
                }
            }
        }
        .instrument(tracing::debug_span!("compass_session"))
        .await
    }
}
