use crate::qibla::normalize_degrees;

/// A raw orientation reading as delivered by the platform.
///
/// Some platforms report a compass heading directly (clockwise from north),
/// others only an `alpha` angle that grows counter-clockwise. Either may be
/// absent when the sensor has nothing to report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawHeading {
    Compass(Option<f64>),
    Alpha(Option<f64>),
}

impl RawHeading {
    /// Clockwise-from-north heading in `[0, 360)`, or `None` when the reading
    /// carries no usable value.
    pub fn normalized(self) -> Option<f64> {
        let degrees = match self {
            RawHeading::Compass(heading) => heading?,
            RawHeading::Alpha(alpha) => 360.0 - alpha?,
        };
        degrees.is_finite().then(|| normalize_degrees(degrees))
    }
}
