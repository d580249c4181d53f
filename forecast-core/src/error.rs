use thiserror::Error;

use crate::time::Timestamp;

/// Errors raised by the normalization pipeline itself.
///
/// I/O edges (config file, payload file, HTTP) report through `anyhow` instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// Min/max was requested over a window with no usable temperatures.
    #[error("Cannot summarize an empty forecast window")]
    EmptyWindow,

    /// A record carried no `weather[0]` entry.
    #[error("Record has no condition data (weather[0] is missing)")]
    MissingConditionData,

    /// UTC offset outside of (-24h, +24h).
    #[error("Invalid UTC offset: {0} seconds")]
    InvalidOffset(i32),

    #[error("Invalid sun window: sunrise {sunrise} is not before sunset {sunset}")]
    InvalidSunWindow { sunrise: Timestamp, sunset: Timestamp },
}
