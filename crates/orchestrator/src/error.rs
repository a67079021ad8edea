#![forbid(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::Error),

    #[error("schedule error: {0}")]
    Kernel(#[from] kernel::Error),

    #[error("utc offset out of range: {0} minutes")]
    InvalidUtcOffset(i32),

    #[error("no location configured")]
    MissingLocation,
}
