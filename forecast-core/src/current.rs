//! Current-conditions summary for the dashboard header.

use chrono::Timelike;
use serde::Serialize;

use crate::{
    aggregate::TempRange,
    compass::CardinalDirection,
    daylight::{DayNightClassifier, SunEvent, SunTimings},
    error::ForecastError,
    model::{Condition, RawCurrent, RawDaily},
    time::{LocalTimeParts, TimeContext, Timestamp},
};

/// The next sunrise or sunset with its clock label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextSunEvent {
    #[serde(flatten)]
    pub event: SunEvent,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    #[serde(flatten)]
    pub raw: RawCurrent,
    pub local: LocalTimeParts,
    pub is_dark: bool,
    pub wind_direction: CardinalDirection,
    /// Today's low/high from the first daily record.
    pub today: Option<TempRange>,
    pub rain_chance_pct: u8,
    pub visibility_km: Option<u32>,
    pub next_sun_event: Option<NextSunEvent>,
}

impl CurrentConditions {
    /// `daily` is the full daily sequence, today first.
    pub fn build(
        current: &RawCurrent,
        daily: &[RawDaily],
        classifier: &DayNightClassifier,
    ) -> Self {
        let ctx = classifier.context();
        let today = daily.first();

        let next_sun_event = SunTimings::from_current(current, daily)
            .next_event(current.dt)
            .map(|event| NextSunEvent {
                event,
                time: ctx.format_time(event.at),
            });

        Self {
            raw: current.clone(),
            local: ctx.format(current.dt),
            is_dark: classifier.is_dark(current.dt),
            wind_direction: CardinalDirection::from_degrees(current.wind_deg),
            today: today.map(|d| TempRange {
                min: d.temp.min,
                max: d.temp.max,
            }),
            rain_chance_pct: today.map(RawDaily::rain_chance_pct).unwrap_or(0),
            visibility_km: current
                .visibility
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| (v / 1000.0).round() as u32),
            next_sun_event,
        }
    }

    pub fn condition(&self) -> Result<&Condition, ForecastError> {
        self.raw.condition()
    }
}

/// Whether `ts` falls in the same local hour as `now`.
pub fn is_current_hour(ts: Timestamp, now: Timestamp, ctx: &TimeContext) -> bool {
    let a = ctx.local(ts);
    let b = ctx.local(now);
    a.date_naive() == b.date_naive() && a.hour() == b.hour()
}
