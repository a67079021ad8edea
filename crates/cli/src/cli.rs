use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::{Path, PathBuf};

/// Miqat: prayer times countdown and Qibla compass
///
/// Miqat shows which of the five daily prayers is active, counts down to the
/// next one, and computes the direction and distance to the Kaaba from the
/// configured location.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    ///
    /// Without one, built-in defaults and `MIQAT_*` environment variables are
    /// used.
    #[arg(short, long, value_parser = validate_file)]
    pub conffile: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub dump_config: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the active prayer and count down to the next one (default).
    Times {
        /// Evaluate once and exit instead of updating every tick.
        #[arg(long)]
        once: bool,
    },

    /// Show the Qibla bearing and distance.
    Qibla {
        /// Read heading samples from stdin and report alignment.
        ///
        /// One sample per line: `compass <degrees>` for clockwise headings,
        /// `alpha <degrees>` for counter-clockwise orientation angles,
        /// `denied` / `unsupported` for sensor failures, or
        /// `at <latitude> <longitude>` to move the observer.
        #[arg(long)]
        follow: bool,
    },

    /// List configured mosques, nearest first.
    Mosques {
        /// Maximum number of mosques to list.
        #[arg(short, long, default_value_t = 5, value_parser = validate_limit)]
        limit: usize,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Times { once: false }
    }
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}

/// Validate the mosque list length.
#[inline(always)]
fn validate_limit(limit: &str) -> Result<usize, String> {
    let limit: usize = limit
        .parse()
        .map_err(|_| format!("`{limit}` is not a valid count"))?;
    if (1..=100).contains(&limit) {
        Ok(limit)
    } else {
        Err("Limit must be between 1 and 100".to_string())
    }
}
