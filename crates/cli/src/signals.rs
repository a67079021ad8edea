use crate::error::Error;
use flume::Sender;
use tokio::signal::unix::{SignalKind, signal};

/// Indefinitely listens to signals and sends signal events to the provided channel.
pub async fn wait_for_signal(signal_event: &Sender<SignalEvent>) -> Result<(), Error> {
    let mut sighup = signal(SignalKind::hangup()).map_err(Error::SignalHandler)?;
    let mut sigint = signal(SignalKind::interrupt()).map_err(Error::SignalHandler)?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(Error::SignalHandler)?;

    loop {
        tokio::select! {
            _ = sighup.recv() => {
                signal_event.send_async(SignalEvent::Reload).await?;
            }
            _ = sigint.recv() => {
                signal_event.send_async(SignalEvent::Shutdown).await?;
            }
            _ = sigterm.recv() => {
                signal_event.send_async(SignalEvent::Shutdown).await?;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    /// Re-read the configuration file.
    Reload,
    Shutdown,
}
