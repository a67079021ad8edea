use crate::error::Error;
use std::cmp::Ordering;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// The Kaaba, destination of every Qibla reading.
pub const KAABA: GeoPoint = GeoPoint {
    latitude: 21.4225,
    longitude: 39.8262,
};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        // rounding can push `a` a hair past 1 for antipodal points
        let a = a.clamp(0.0, 1.0);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// Wrap any finite angle into `[0, 360)`. Angles already in range come back
/// bit-for-bit unchanged.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    // `+ 0.0` turns -0.0 into 0.0
    let wrapped = if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped + 0.0
    };
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Initial great-circle bearing from `origin` to `destination`, clockwise from
/// true north, in `[0, 360)`. Degenerate inputs (coincident points, poles)
/// yield whatever `atan2` gives, which is 0 for coincident points.
pub fn initial_bearing(origin: &GeoPoint, destination: &GeoPoint) -> f64 {
    let lat1 = origin.latitude.to_radians();
    let lat2 = destination.latitude.to_radians();
    let d_lon = (destination.longitude - origin.longitude).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Static bearing and distance from a location to the Qibla destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QiblaReading {
    pub bearing_degrees: f64,
    pub distance_km: f64,
}

impl QiblaReading {
    /// Distance rounded to the nearest kilometre, for display.
    pub fn distance_km_rounded(&self) -> u64 {
        self.distance_km.round() as u64
    }
}

pub fn compute_bearing_and_distance(origin: &GeoPoint, destination: &GeoPoint) -> QiblaReading {
    QiblaReading {
        bearing_degrees: initial_bearing(origin, destination),
        distance_km: origin.distance_km(destination),
    }
}

/// Anything with a position, such as a mosque directory entry.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

/// Pair each item with its distance from `origin`, nearest first.
pub fn rank_by_distance<T: Located>(
    origin: &GeoPoint,
    items: impl IntoIterator<Item = T>,
) -> Vec<(T, f64)> {
    let mut ranked: Vec<(T, f64)> = items
        .into_iter()
        .map(|item| {
            let distance = origin.distance_km(&item.location());
            (item, distance)
        })
        .collect();
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    ranked
}
