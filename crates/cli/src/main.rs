use chrono::FixedOffset;
use clap::Parser;
use config::Config;
use miqat::cli::{Cli, Command};
use miqat::input::parse_heading_line;
use miqat::output;
use miqat::signals::{SignalEvent, wait_for_signal};
use orchestrator::{
    CompassSession, ConfiguredTimetable, ControlEvent, PrayerTicker, SystemClock, nearest_mosques,
    observer_location,
};
use std::io;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_log::AsTrace;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.log_level_filter().as_trace())
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(io::stderr)
        .init();

    debug!(config = ?cli);

    let config = load_config(cli.conffile.as_deref())?;
    if cli.dump_config {
        io::Write::write_all(&mut io::stdout(), config.to_toml()?.as_bytes())?;
        return Ok(());
    }

    match cli.command.clone().unwrap_or_default() {
        Command::Times { once } => run_times(cli.conffile.as_deref(), config, once).await,
        Command::Qibla { follow } => run_qibla(&config, follow).await,
        Command::Mosques { limit } => {
            let origin = observer_location(&config)?;
            let ranked = nearest_mosques(&config, &origin, limit);
            output::write_mosques(&mut io::stdout(), &ranked)?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        _ => Config::from_env()?,
    };
    Ok(config)
}

async fn run_times(conffile: Option<&Path>, config: Config, once: bool) -> anyhow::Result<()> {
    let mut ticker = PrayerTicker::from_config(&config, Box::new(SystemClock))?;
    let mut offset = ticker.offset();

    if once {
        let report = ticker.tick()?;
        let mut out = io::stdout();
        output::write_day(&mut out, &report, &offset, ticker.scheduler().today().slots())?;
        output::write_report(&mut out, &report, &offset)?;
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let (control_tx, control_rx) = mpsc::unbounded_channel();
    let (updates_tx, updates_rx) = flume::bounded(8);
    let (signals_tx, signals_rx) = flume::bounded(8);

    let signals = tokio::spawn(async move {
        if let Err(err) = wait_for_signal(&signals_tx).await {
            error!(error = ?err, "Error while waiting for signal");
        }
    });
    let ticker = tokio::spawn({
        let cancel = cancel.clone();
        async move { ticker.run_until(cancel, control_rx, updates_tx).await }
    });

    loop {
        tokio::select! {
            res = signals_rx.recv_async() => {
                let Ok(event) = res else { break };
                debug!(?event, "Received signal event");
                match event {
                    SignalEvent::Reload => {
                        let Some(path) = conffile else {
                            info!("no config file to reload");
                            continue;
                        };
                        match reload(path) {
                            Ok((config, new_offset)) => {
                                offset = new_offset;
                                let _ = control_tx.send(ControlEvent::Reload(config));
                            }
                            Err(err) => warn!(%err, "failed to reload config"),
                        }
                    }
                    SignalEvent::Shutdown => {
                        cancel.cancel();
                    }
                }
            }
            res = updates_rx.recv_async() => {
                let Ok(report) = res else { break };
                output::write_report(&mut io::stdout(), &report, &offset)?;
            }
        }
    }

    cancel.cancel();
    signals.abort();
    ticker.await??;
    Ok(())
}

fn reload(path: &Path) -> anyhow::Result<(Config, FixedOffset)> {
    let config = Config::load(path)?;
    let offset = ConfiguredTimetable::new(config.timetable.clone())?.offset();
    Ok((config, offset))
}

async fn run_qibla(config: &Config, follow: bool) -> anyhow::Result<()> {
    let mut session = CompassSession::from_config(config)?;
    output::write_reading(&mut io::stdout(), &session.compass().reading())?;
    if !follow {
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let (events_tx, events_rx) = flume::unbounded();
    let (status_tx, status_rx) = flume::unbounded();

    let compass = tokio::spawn({
        let cancel = cancel.clone();
        async move { session.run_until(cancel, events_rx, status_tx).await }
    });
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_heading_line(&line) {
                Ok(Some(event)) => {
                    if events_tx.send_async(event).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(err) => warn!(%err, "skipping heading input"),
            }
        }
    });

    loop {
        tokio::select! {
            res = status_rx.recv_async() => {
                let Ok(status) = res else { break };
                output::write_compass_status(&mut io::stdout(), &status)?;
            }
            _ = tokio::signal::ctrl_c() => {
                cancel.cancel();
            }
        }
    }

    reader.abort();
    compass.await?;
    Ok(())
}
