//! Runs the whole pipeline over one payload.

use serde::Serialize;

use crate::{
    aggregate::{TempRange, progress_fraction, summarize},
    current::CurrentConditions,
    daylight::{DayNightClassifier, MissingWindowPolicy, SunWindows},
    model::OneCallPayload,
    normalize::{DailyRecord, HourlyForecast, normalize_daily, normalize_hourly},
    time::TimeContext,
};

/// Knobs for [`Dashboard::build`].
#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub ctx: TimeContext,
    pub missing_window: MissingWindowPolicy,
    /// Hours shown in the hourly section; `None` keeps all of them.
    pub hourly_limit: Option<usize>,
    pub progress_window: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            ctx: TimeContext::utc(),
            missing_window: MissingWindowPolicy::default(),
            hourly_limit: None,
            progress_window: crate::aggregate::DEFAULT_PROGRESS_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub timezone: String,
    pub utc_offset_seconds: i32,
    pub current: Option<CurrentConditions>,
    pub hourly: HourlyForecast,
    pub daily: Vec<DailyRecord>,
    /// Absent when there are no hours to summarize.
    pub hourly_range: Option<TempRange>,
    pub progress: f64,
}

impl Dashboard {
    pub fn build(payload: &OneCallPayload, opts: &DashboardOptions) -> Self {
        let windows = SunWindows::from_daily(&payload.daily, &opts.ctx);
        let classifier =
            DayNightClassifier::new(windows, opts.ctx).with_policy(opts.missing_window);

        let mut hourly = normalize_hourly(&payload.hourly, &classifier);
        if let Some(limit) = opts.hourly_limit {
            hourly = hourly.truncated(limit);
        }

        let hourly_range = match summarize(hourly.hours()) {
            Ok(range) => Some(range),
            Err(err) => {
                tracing::debug!(%err, "no hourly temperature range");
                None
            }
        };

        let current = payload
            .current
            .as_ref()
            .map(|c| CurrentConditions::build(c, &payload.daily, &classifier));

        Self {
            timezone: payload.timezone.clone(),
            utc_offset_seconds: opts.ctx.offset_seconds(),
            current,
            progress: progress_fraction(hourly.len(), opts.progress_window),
            daily: normalize_daily(&payload.daily, &opts.ctx),
            hourly,
            hourly_range,
        }
    }
}
