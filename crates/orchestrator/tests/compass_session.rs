#![forbid(unsafe_code)]

use config::{Config, Location};
use kernel::{CompassStatus, GeoPoint, RawHeading, UnavailableReason};
use orchestrator::{CompassSession, HeadingEvent};
use tokio_util::sync::CancellationToken;

fn config() -> Config {
    let mut config = Config::default();
    config.location = Some(Location {
        latitude: 48.8566,
        longitude: 2.3522,
    });
    config.compass.alignment_tolerance = 2.0;
    config
}

#[test]
fn session_uses_configured_tolerance() {
    let mut session = CompassSession::from_config(&config()).unwrap();
    let bearing = session.compass().reading().bearing_degrees;
    assert_eq!(session.compass().tolerance(), 2.0);

    let status = session.apply(HeadingEvent::Sample(RawHeading::Compass(Some(bearing + 3.0))));
    assert!(status.state().is_some_and(|s| !s.is_aligned));
    let status = session.apply(HeadingEvent::Sample(RawHeading::Compass(Some(bearing + 1.5))));
    assert!(status.state().is_some_and(|s| s.is_aligned));
}

#[test]
fn alpha_samples_are_converted() {
    let mut session = CompassSession::from_config(&config()).unwrap();
    let bearing = session.compass().reading().bearing_degrees;
    let status = session.apply(HeadingEvent::Sample(RawHeading::Alpha(Some(360.0 - bearing))));
    let state = status.state().copied().unwrap();
    assert!(state.is_aligned);
    assert!((state.device_heading_degrees - bearing).abs() < 1e-9);
}

#[tokio::test]
async fn run_until_publishes_each_sample_and_closure() {
    let mut session = CompassSession::from_config(&config()).unwrap();
    let bearing = session.compass().reading().bearing_degrees;
    let (events_tx, events_rx) = flume::unbounded();
    let (status_tx, status_rx) = flume::unbounded();

    events_tx
        .send(HeadingEvent::Sample(RawHeading::Compass(Some(bearing))))
        .unwrap();
    events_tx
        .send(HeadingEvent::Unavailable(UnavailableReason::PermissionDenied))
        .unwrap();
    events_tx
        .send(HeadingEvent::Relocate(GeoPoint::new(-33.8688, 151.2093).unwrap()))
        .unwrap();
    drop(events_tx);

    session
        .run_until(CancellationToken::new(), events_rx, status_tx)
        .await;

    let statuses: Vec<CompassStatus> = status_rx.drain().collect();
    assert_eq!(statuses.len(), 5);
    assert_eq!(
        statuses[0],
        CompassStatus::Unavailable(UnavailableReason::AwaitingSample)
    );
    assert!(statuses[1].state().is_some_and(|s| s.is_aligned && s.relative_angle_degrees == 0.0));
    assert_eq!(
        statuses[2],
        CompassStatus::Unavailable(UnavailableReason::PermissionDenied)
    );
    assert_eq!(
        statuses[3],
        CompassStatus::Unavailable(UnavailableReason::PermissionDenied)
    );
    assert_eq!(
        statuses[4],
        CompassStatus::Unavailable(UnavailableReason::StreamClosed)
    );
}

#[tokio::test]
async fn run_until_honours_cancellation() {
    let mut session = CompassSession::from_config(&config()).unwrap();
    let (_events_tx, events_rx) = flume::unbounded::<HeadingEvent>();
    let (status_tx, status_rx) = flume::unbounded();
    let cancel = CancellationToken::new();
    cancel.cancel();

    session.run_until(cancel, events_rx, status_tx).await;
    let statuses: Vec<CompassStatus> = status_rx.drain().collect();
    assert_eq!(
        statuses,
        [CompassStatus::Unavailable(UnavailableReason::AwaitingSample)]
    );
}

#[test]
fn missing_location_is_an_error() {
    assert!(matches!(
        CompassSession::from_config(&Config::default()),
        Err(orchestrator::Error::MissingLocation)
    ));
}
