//! Day/night classification against per-date sunrise/sunset windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::{
    error::ForecastError,
    model::{RawCurrent, RawDaily},
    time::{TimeContext, Timestamp},
};

/// Daylight bounds for one calendar date. `sunrise < sunset` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SunWindow {
    sunrise: Timestamp,
    sunset: Timestamp,
}

impl SunWindow {
    pub fn new(sunrise: Timestamp, sunset: Timestamp) -> Result<Self, ForecastError> {
        if sunrise >= sunset {
            return Err(ForecastError::InvalidSunWindow { sunrise, sunset });
        }
        Ok(Self { sunrise, sunset })
    }

    pub fn sunrise(&self) -> Timestamp {
        self.sunrise
    }

    pub fn sunset(&self) -> Timestamp {
        self.sunset
    }

    /// Light from sunrise (inclusive) up to sunset (exclusive).
    pub fn is_light(&self, ts: Timestamp) -> bool {
        self.sunrise <= ts && ts < self.sunset
    }
}

/// What to report for an instant whose date has no [`SunWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingWindowPolicy {
    AssumeLight,
    AssumeDark,
}

/// Instants outside the known sun windows count as light.
pub const DEFAULT_MISSING_WINDOW_POLICY: MissingWindowPolicy = MissingWindowPolicy::AssumeLight;

impl Default for MissingWindowPolicy {
    fn default() -> Self {
        DEFAULT_MISSING_WINDOW_POLICY
    }
}

/// Calendar date → sun window, keyed in a given [`TimeContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SunWindows {
    by_date: BTreeMap<NaiveDate, SunWindow>,
}

impl SunWindows {
    pub fn new() -> Self {
        Self::default()
    }

    /// One window per day, keyed by the local date of its sunrise.
    ///
    /// Days whose sunrise is not before their sunset are skipped. When two days
    /// land on the same date the first one wins.
    pub fn from_daily(days: &[RawDaily], ctx: &TimeContext) -> Self {
        let mut windows = Self::new();

        for day in days {
            let window = match SunWindow::new(day.sunrise, day.sunset) {
                Ok(w) => w,
                Err(err) => {
                    tracing::warn!(dt = day.dt, %err, "skipping day without a usable sun window");
                    continue;
                }
            };

            let date = ctx.calendar_date(window.sunrise);
            if windows.by_date.contains_key(&date) {
                tracing::warn!(%date, "duplicate sun window, keeping the first");
                continue;
            }
            windows.insert(date, window);
        }

        windows
    }

    /// Build windows from a flat list of sun timestamps, such as the
    /// `[sunrise, sunset, next sunrise]` triple from [`SunTimings::as_array`].
    ///
    /// Timestamps are bucketed by local date; a date holding exactly two of
    /// them gets a window from the earlier to the later one. Other dates are
    /// left without a window. The dashboard itself builds its windows with
    /// [`SunWindows::from_daily`]; this form is for callers that only hold
    /// the flat timestamps.
    pub fn from_timings(timings: &[Timestamp], ctx: &TimeContext) -> Self {
        let mut buckets: HashMap<NaiveDate, Vec<Timestamp>> = HashMap::new();
        for &ts in timings {
            buckets.entry(ctx.calendar_date(ts)).or_default().push(ts);
        }

        let mut windows = Self::new();
        for (date, mut stamps) in buckets {
            if stamps.len() != 2 {
                continue;
            }
            stamps.sort_unstable();
            if let Ok(window) = SunWindow::new(stamps[0], stamps[1]) {
                windows.insert(date, window);
            }
        }

        windows
    }

    pub fn insert(&mut self, date: NaiveDate, window: SunWindow) -> Option<SunWindow> {
        self.by_date.insert(date, window)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&SunWindow> {
        self.by_date.get(&date)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Decides whether an instant falls in darkness.
#[derive(Debug, Clone)]
pub struct DayNightClassifier {
    windows: SunWindows,
    ctx: TimeContext,
    policy: MissingWindowPolicy,
}

impl DayNightClassifier {
    pub fn new(windows: SunWindows, ctx: TimeContext) -> Self {
        Self {
            windows,
            ctx,
            policy: DEFAULT_MISSING_WINDOW_POLICY,
        }
    }

    pub fn with_policy(mut self, policy: MissingWindowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn context(&self) -> &TimeContext {
        &self.ctx
    }

    pub fn windows(&self) -> &SunWindows {
        &self.windows
    }

    pub fn policy(&self) -> MissingWindowPolicy {
        self.policy
    }

    /// Dark unless a window covering the local date of `ts` contains it.
    ///
    /// A window covers its sunrise date and, when sunset lands on the next
    /// local date, that date as well. Dates no window covers fall back to
    /// the policy.
    pub fn is_dark(&self, ts: Timestamp) -> bool {
        let date = self.ctx.calendar_date(ts);
        let own = self.windows.get(date);
        let carried = date
            .pred_opt()
            .and_then(|prev| self.windows.get(prev))
            .filter(|w| self.ctx.calendar_date(w.sunset) == date);

        let mut covering = own.into_iter().chain(carried).peekable();
        if covering.peek().is_none() {
            return self.policy == MissingWindowPolicy::AssumeDark;
        }
        !covering.any(|w| w.is_light(ts))
    }
}

/// Which sun event a "next" label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SunEventKind {
    Sunrise,
    Sunset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SunEvent {
    pub kind: SunEventKind,
    pub at: Timestamp,
}

/// Today's sunrise and sunset plus tomorrow's sunrise, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SunTimings {
    pub today_sunrise: Timestamp,
    pub today_sunset: Timestamp,
    pub tomorrow_sunrise: Option<Timestamp>,
}

impl SunTimings {
    /// Today's times from the current conditions, tomorrow's sunrise from
    /// the second daily record.
    pub fn from_current(current: &RawCurrent, days: &[RawDaily]) -> Self {
        Self {
            today_sunrise: current.sunrise,
            today_sunset: current.sunset,
            tomorrow_sunrise: days.get(1).map(|d| d.sunrise),
        }
    }

    /// Taken from the leading days of a daily forecast, today first.
    pub fn from_daily(days: &[RawDaily]) -> Option<Self> {
        let (today, rest) = days.split_first()?;
        Some(Self {
            today_sunrise: today.sunrise,
            today_sunset: today.sunset,
            tomorrow_sunrise: rest.first().map(|d| d.sunrise),
        })
    }

    /// The three timestamps in order, once tomorrow's sunrise is known.
    pub fn as_array(&self) -> Option<[Timestamp; 3]> {
        let tomorrow = self.tomorrow_sunrise?;
        Some([self.today_sunrise, self.today_sunset, tomorrow])
    }

    /// The sun event worth showing at `now`: the coming sunrise before dawn,
    /// the sunset during the day, and tomorrow's sunrise once the sun is down.
    ///
    /// `None` only after sunset when tomorrow's sunrise is unknown.
    pub fn next_event(&self, now: Timestamp) -> Option<SunEvent> {
        let (kind, at) = if now < self.today_sunrise {
            (SunEventKind::Sunrise, self.today_sunrise)
        } else if now < self.today_sunset {
            (SunEventKind::Sunset, self.today_sunset)
        } else {
            (SunEventKind::Sunrise, self.tomorrow_sunrise?)
        };
        Some(SunEvent { kind, at })
    }
}
