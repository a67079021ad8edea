#![forbid(unsafe_code)]

mod compass;
mod error;
mod location;
mod schedule;
mod timetable;

pub use compass::Compass;
pub use error::Error;
pub use location::{Location, Mosque};
pub use schedule::Schedule;
pub use timetable::{ClockTimes, DayTimes, Timetable};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables that override file values. Nested keys are
/// separated by a double underscore, e.g. `MIQAT_COMPASS__ALIGNMENT_TOLERANCE`.
pub const ENV_PREFIX: &str = "MIQAT_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Observer position. Needed for the Qibla and nearest-mosque views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    pub schedule: Schedule,

    pub compass: Compass,

    pub timetable: Timetable,

    pub mosques: Vec<Mosque>,
}

impl Config {
    /// Default configuration, without reading any file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with environment overrides applied, for running without a
    /// configuration file.
    pub fn from_env() -> Result<Self, Error> {
        Self::extract(Figment::from(Serialized::defaults(Self::default())))
    }

    /// Load the configuration from a TOML file layered over the defaults, then
    /// apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_owned()));
        }
        Self::extract(Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(path)))
    }

    /// Parse a TOML document layered over the defaults. Environment overrides
    /// are not applied.
    pub fn from_toml_str(document: &str) -> Result<Self, Error> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(document))
            .extract()?;
        Ok(config.clamp())
    }

    fn extract(figment: Figment) -> Result<Self, Error> {
        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract()?;
        Ok(config.clamp())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml_edit::ser::to_string_pretty(self)?)
    }

    fn clamp(mut self) -> Self {
        self.compass = self.compass.clamp();
        self.schedule = self.schedule.clamp();
        self
    }
}
