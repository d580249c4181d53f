//! Timestamp formatting against an explicit UTC offset.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Seconds since the Unix epoch, as delivered by the weather API.
pub type Timestamp = i64;

const DATE_FORMAT: &str = "%-m/%-d/%Y";
const TIME_FORMAT: &str = "%-I:%M %p";
const WEEKDAY_FORMAT: &str = "%A";

/// Display fields for one instant, projected into a [`TimeContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTimeParts {
    /// e.g. `11/15/2023`
    pub date: String,
    /// e.g. `7:13 AM`
    pub time: String,
    /// e.g. `Wednesday`
    pub weekday: String,
    /// Calendar day the strings were derived from.
    pub day: NaiveDate,
}

/// The timezone every timestamp is rendered in.
///
/// Carried explicitly so output never depends on the host's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeContext {
    offset: FixedOffset,
}

impl Default for TimeContext {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimeContext {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build a context from an offset east of UTC, in seconds.
    pub fn from_offset_seconds(seconds: i32) -> Result<Self, ForecastError> {
        FixedOffset::east_opt(seconds)
            .map(Self::new)
            .ok_or(ForecastError::InvalidOffset(seconds))
    }

    pub fn offset_seconds(&self) -> i32 {
        self.offset.local_minus_utc()
    }

    /// The instant as a zoned date-time.
    ///
    /// Timestamps chrono cannot represent fall back to the epoch.
    pub fn local(&self, ts: Timestamp) -> DateTime<FixedOffset> {
        let utc = DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_else(|| {
            tracing::warn!(ts, "timestamp out of range, using the epoch instead");
            DateTime::<Utc>::default()
        });
        utc.with_timezone(&self.offset)
    }

    pub fn calendar_date(&self, ts: Timestamp) -> NaiveDate {
        self.local(ts).date_naive()
    }

    pub fn hour(&self, ts: Timestamp) -> u32 {
        self.local(ts).hour()
    }

    pub fn format(&self, ts: Timestamp) -> LocalTimeParts {
        let local = self.local(ts);
        LocalTimeParts {
            date: local.format(DATE_FORMAT).to_string(),
            time: local.format(TIME_FORMAT).to_string(),
            weekday: local.format(WEEKDAY_FORMAT).to_string(),
            day: local.date_naive(),
        }
    }

    /// Clock time only, used for sunrise/sunset labels.
    pub fn format_time(&self, ts: Timestamp) -> String {
        self.local(ts).format(TIME_FORMAT).to_string()
    }
}
