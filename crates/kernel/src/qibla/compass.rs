use crate::qibla::{
    GeoPoint, KAABA, QiblaReading, RawHeading, compute_bearing_and_distance, normalize_degrees,
};
use std::fmt;
use tracing::trace;

/// Degrees either side of the Qibla within which the device counts as aligned.
pub const DEFAULT_ALIGNMENT_TOLERANCE: f64 = 5.0;

/// Shortest angular separation between two angles in `[0, 360)`.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    diff.min(360.0 - diff)
}

/// Orientation of the device relative to the Qibla for one heading sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassState {
    pub device_heading_degrees: f64,
    /// Rotation to apply to an arrow so it points at the Qibla, in `[0, 360)`.
    pub relative_angle_degrees: f64,
    pub is_aligned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// No heading sample has arrived yet.
    AwaitingSample,
    PermissionDenied,
    Unsupported,
    /// The heading source went away.
    StreamClosed,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            UnavailableReason::AwaitingSample => "waiting for heading",
            UnavailableReason::PermissionDenied => "permission denied",
            UnavailableReason::Unsupported => "no orientation sensor",
            UnavailableReason::StreamClosed => "heading stream closed",
        };
        f.write_str(reason)
    }
}

/// What the compass can currently show. An unavailable compass is a normal
/// state, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompassStatus {
    Unavailable(UnavailableReason),
    Live(CompassState),
}

impl CompassStatus {
    pub fn state(&self) -> Option<&CompassState> {
        match self {
            CompassStatus::Live(state) => Some(state),
            CompassStatus::Unavailable(_) => None,
        }
    }
}

/// Static Qibla reading for one location plus the live alignment derived
/// from the most recent heading sample.
#[derive(Debug, Clone)]
pub struct QiblaCompass {
    destination: GeoPoint,
    reading: QiblaReading,
    tolerance: f64,
    status: CompassStatus,
}

impl QiblaCompass {
    /// Compass pointing at the Kaaba from `origin`.
    pub fn new(origin: GeoPoint) -> Self {
        Self::with_destination(origin, KAABA)
    }

    pub fn with_destination(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            destination,
            reading: compute_bearing_and_distance(&origin, &destination),
            tolerance: DEFAULT_ALIGNMENT_TOLERANCE,
            status: CompassStatus::Unavailable(UnavailableReason::AwaitingSample),
        }
    }

    /// Override the alignment tolerance. Negative or non-finite values fall
    /// back to the default.
    pub fn with_tolerance(mut self, degrees: f64) -> Self {
        self.tolerance = if degrees.is_finite() && degrees >= 0.0 {
            degrees
        } else {
            DEFAULT_ALIGNMENT_TOLERANCE
        };
        self
    }

    pub fn reading(&self) -> QiblaReading {
        self.reading
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn status(&self) -> CompassStatus {
        self.status
    }

    /// Recompute the static reading for a new location. A live state is
    /// re-derived from its last heading against the new bearing.
    pub fn relocate(&mut self, origin: GeoPoint) {
        self.reading = compute_bearing_and_distance(&origin, &self.destination);
        if let CompassStatus::Live(state) = self.status {
            self.on_heading_sample(state.device_heading_degrees);
        }
    }

    /// Apply a clockwise-from-north heading. The last sample applied wins.
    /// Non-finite headings are ignored and leave the status untouched.
    pub fn on_heading_sample(&mut self, device_heading_degrees: f64) -> Option<CompassState> {
        if !device_heading_degrees.is_finite() {
            trace!(device_heading_degrees, "ignoring non-finite heading");
            return None;
        }
        let heading = normalize_degrees(device_heading_degrees);
        let relative = normalize_degrees(self.reading.bearing_degrees - heading);
        let state = CompassState {
            device_heading_degrees: heading,
            relative_angle_degrees: relative,
            is_aligned: circular_distance(relative, 0.0) <= self.tolerance,
        };
        trace!(heading, relative, aligned = state.is_aligned, "heading sample");
        self.status = CompassStatus::Live(state);
        Some(state)
    }

    /// Apply a platform reading. Readings without a value leave the status
    /// untouched.
    pub fn on_raw_sample(&mut self, raw: RawHeading) -> CompassStatus {
        if let Some(heading) = raw.normalized() {
            self.on_heading_sample(heading);
        }
        self.status
    }

    pub fn mark_unavailable(&mut self, reason: UnavailableReason) {
        self.status = CompassStatus::Unavailable(reason);
    }
}
