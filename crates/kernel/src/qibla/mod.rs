mod compass;
mod geo;
mod heading;

pub use compass::{
    CompassState, CompassStatus, DEFAULT_ALIGNMENT_TOLERANCE, QiblaCompass, UnavailableReason,
    circular_distance,
};
pub use geo::{
    EARTH_RADIUS_KM, GeoPoint, KAABA, Located, QiblaReading, compute_bearing_and_distance,
    initial_bearing, normalize_degrees, rank_by_distance,
};
pub use heading::RawHeading;
