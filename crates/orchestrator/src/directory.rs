#![forbid(unsafe_code)]

use crate::error::Error;
use config::{Config, Location};
use kernel::GeoPoint;
use kernel::qibla::{Located, rank_by_distance};
use tracing::warn;

/// A configured mosque with a validated position.
#[derive(Debug, Clone, PartialEq)]
pub struct MosqueEntry {
    pub name: String,
    pub city: Option<String>,
    pub location: GeoPoint,
}

impl Located for MosqueEntry {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

fn geo_point(location: Location) -> Result<GeoPoint, kernel::Error> {
    GeoPoint::new(location.latitude, location.longitude)
}

/// The configured observer position.
pub fn observer_location(config: &Config) -> Result<GeoPoint, Error> {
    let location = config.location.ok_or(Error::MissingLocation)?;
    Ok(geo_point(location)?)
}

/// Up to `limit` configured mosques, nearest to `origin` first, with their
/// distance in kilometres. Entries with invalid coordinates are skipped.
pub fn nearest_mosques(
    config: &Config,
    origin: &GeoPoint,
    limit: usize,
) -> Vec<(MosqueEntry, f64)> {
    let entries = config.mosques.iter().filter_map(|mosque| {
        match geo_point(mosque.location()) {
            Ok(location) => Some(MosqueEntry {
                name: mosque.name.clone(),
                city: mosque.city.clone(),
                location,
            }),
            Err(err) => {
                warn!(name = %mosque.name, %err, "skipping mosque");
                None
            }
        }
    });

    let mut ranked = rank_by_distance(origin, entries);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Location, Mosque};

    fn mosque(name: &str, latitude: f64, longitude: f64) -> Mosque {
        Mosque {
            name: name.into(),
            city: None,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_nearest_mosques() {
        let config = Config {
            location: Some(Location {
                latitude: 48.8566,
                longitude: 2.3522,
            }),
            mosques: vec![
                mosque("Lyon", 45.7485, 4.8467),
                mosque("Broken", 123.0, 0.0),
                mosque("Paris", 48.842, 2.355),
                mosque("Lille", 50.6292, 3.0573),
            ],
            ..Default::default()
        };
        let origin = observer_location(&config).unwrap();
        let ranked = nearest_mosques(&config, &origin, 2);
        let names: Vec<&str> = ranked.iter().map(|(m, _)| m.name.as_str()).collect();
        assert_eq!(names, ["Paris", "Lille"]);
        assert!(ranked[0].1 < 2.0);
    }

    #[test]
    fn test_missing_location() {
        assert!(matches!(
            observer_location(&Config::default()),
            Err(Error::MissingLocation)
        ));
    }

    #[test]
    fn test_invalid_location() {
        let config = Config {
            location: Some(Location {
                latitude: 91.0,
                longitude: 0.0,
            }),
            ..Default::default()
        };
        assert!(matches!(
            observer_location(&config),
            Err(Error::Kernel(kernel::Error::InvalidCoordinate { .. }))
        ));
    }
}
