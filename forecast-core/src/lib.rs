//! Core library for the `forecast` dashboard.
//!
//! This crate defines:
//! - Raw One Call payload shapes
//! - Timestamp formatting against an explicit UTC offset
//! - Day/night classification, hourly/daily normalization and summaries
//! - Configuration and forecast sources
//!
//! It is used by `forecast-cli`, but the pipeline is pure and can be reused by
//! any other front end.

pub mod aggregate;
pub mod compass;
pub mod config;
pub mod current;
pub mod daylight;
pub mod dashboard;
pub mod error;
pub mod facts;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod time;

pub use aggregate::{DEFAULT_PROGRESS_WINDOW, TempRange, progress_fraction, summarize};
pub use compass::CardinalDirection;
pub use config::{Config, DisplayConfig};
pub use current::{CurrentConditions, is_current_hour};
pub use dashboard::{Dashboard, DashboardOptions};
pub use daylight::{
    DEFAULT_MISSING_WINDOW_POLICY, DayNightClassifier, MissingWindowPolicy, SunEvent, SunEventKind,
    SunTimings, SunWindow, SunWindows,
};
pub use error::ForecastError;
pub use model::{OneCallPayload, RawCurrent, RawDaily, RawHourly};
pub use normalize::{
    DailyRecord, DayGroup, HourlyForecast, HourlyRecord, normalize_daily, normalize_hourly,
};
pub use provider::{ForecastRequest, ForecastSource, source_from_config};
pub use time::{LocalTimeParts, TimeContext, Timestamp};
