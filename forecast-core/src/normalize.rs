//! Turns raw hourly/daily sequences into display records.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    daylight::DayNightClassifier,
    error::ForecastError,
    model::{Condition, RawDaily, RawHourly},
    time::{LocalTimeParts, TimeContext},
};

/// A raw hour plus its local time and darkness flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    #[serde(flatten)]
    pub raw: RawHourly,
    pub local: LocalTimeParts,
    pub is_dark: bool,
}

impl HourlyRecord {
    pub fn condition(&self) -> Result<&Condition, ForecastError> {
        self.raw.condition()
    }
}

/// A raw day plus its local date, weekday and formatted sun times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    #[serde(flatten)]
    pub raw: RawDaily,
    pub local: LocalTimeParts,
    pub sunrise_time: String,
    pub sunset_time: String,
}

impl DailyRecord {
    pub fn condition(&self) -> Result<&Condition, ForecastError> {
        self.raw.condition()
    }
}

/// Normalized hours in chronological order, grouped by local date.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HourlyForecast {
    hours: Vec<HourlyRecord>,
    /// Date string → indices into `hours`.
    #[serde(rename = "groups")]
    by_date: IndexMap<String, Vec<usize>>,
}

/// All hours of one local date, borrowed from an [`HourlyForecast`].
#[derive(Debug, Clone)]
pub struct DayGroup<'a> {
    pub date: &'a str,
    pub weekday: &'a str,
    pub hours: Vec<&'a HourlyRecord>,
}

impl HourlyForecast {
    fn from_records(hours: Vec<HourlyRecord>) -> Self {
        let mut by_date: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (idx, hour) in hours.iter().enumerate() {
            by_date.entry(hour.local.date.clone()).or_default().push(idx);
        }
        Self { hours, by_date }
    }

    pub fn hours(&self) -> &[HourlyRecord] {
        &self.hours
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Date strings in first-seen order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.by_date.keys().map(String::as_str)
    }

    /// Groups in first-seen date order, hours in their original order.
    pub fn day_groups(&self) -> impl Iterator<Item = DayGroup<'_>> {
        self.by_date.iter().filter_map(|(date, indices)| {
            let weekday = self.hours[*indices.first()?].local.weekday.as_str();
            let hours: Vec<&HourlyRecord> = indices.iter().map(|&i| &self.hours[i]).collect();
            Some(DayGroup {
                date: date.as_str(),
                weekday,
                hours,
            })
        })
    }

    /// The first `n` hours, regrouped.
    pub fn truncated(&self, n: usize) -> Self {
        Self::from_records(self.hours.iter().take(n).cloned().collect())
    }
}

pub fn normalize_hourly(raw: &[RawHourly], classifier: &DayNightClassifier) -> HourlyForecast {
    let ctx = classifier.context();
    let records: Vec<HourlyRecord> = raw
        .iter()
        .map(|hour| HourlyRecord {
            raw: hour.clone(),
            local: ctx.format(hour.dt),
            is_dark: classifier.is_dark(hour.dt),
        })
        .collect();

    let forecast = HourlyForecast::from_records(records);
    tracing::debug!(
        hours = forecast.len(),
        dates = forecast.by_date.len(),
        "normalized hourly forecast"
    );
    forecast
}

/// Normalize the multi-day view. The first day is "today" and is left out.
pub fn normalize_daily(raw: &[RawDaily], ctx: &TimeContext) -> Vec<DailyRecord> {
    let records: Vec<DailyRecord> = raw
        .iter()
        .skip(1)
        .map(|day| DailyRecord {
            raw: day.clone(),
            local: ctx.format(day.dt),
            sunrise_time: ctx.format_time(day.sunrise),
            sunset_time: ctx.format_time(day.sunset),
        })
        .collect();

    tracing::debug!(days = records.len(), "normalized daily forecast");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{daylight::SunWindows, model::fixtures, time::Timestamp};

    const SR: Timestamp = 1_700_000_000;
    const SS: Timestamp = 1_700_030_000;
    const DAY: Timestamp = 86_400;

    fn tokyo() -> TimeContext {
        TimeContext::from_offset_seconds(9 * 3600).expect("valid offset")
    }

    fn classifier_for(days: &[RawDaily]) -> DayNightClassifier {
        DayNightClassifier::new(SunWindows::from_daily(days, &tokyo()), tokyo())
    }

    #[test]
    fn hourly_flags_darkness_across_sunset() {
        let days = [fixtures::day(SR - 3600, SR, SS, 10.0, 20.0)];
        let raw: Vec<RawHourly> = [SS - 10, SS, SS + 10]
            .iter()
            .map(|&dt| fixtures::hour(dt, 15.0))
            .collect();

        let forecast = normalize_hourly(&raw, &classifier_for(&days));
        let flags: Vec<bool> = forecast.hours().iter().map(|h| h.is_dark).collect();

        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn hourly_passes_raw_fields_through() {
        let mut hour = fixtures::hour(SR + 3600, 17.25);
        hour.rain = Some(crate::model::HourlyRain { one_hour: 0.4 });
        let forecast = normalize_hourly(std::slice::from_ref(&hour), &classifier_for(&[]));

        let record = &forecast.hours()[0];
        assert_eq!(record.raw, hour);
        assert_eq!(record.local, tokyo().format(SR + 3600));
        assert_eq!(record.condition().unwrap().main, "Clouds");
    }

    #[test]
    fn groups_preserve_order_and_flatten_back() {
        let start = SR - 4 * 3600;
        let raw: Vec<RawHourly> = (0..48)
            .map(|i| fixtures::hour(start + i * 3600, i as f64))
            .collect();
        let forecast = normalize_hourly(&raw, &classifier_for(&[]));

        let flattened: Vec<&HourlyRecord> =
            forecast.day_groups().flat_map(|g| g.hours).collect();
        let original: Vec<&HourlyRecord> = forecast.hours().iter().collect();
        assert_eq!(flattened, original);

        let dates: Vec<&str> = forecast.dates().collect();
        assert_eq!(dates, vec!["11/15/2023", "11/16/2023", "11/17/2023"]);

        let first = forecast.day_groups().next().expect("first group");
        assert_eq!(first.weekday, "Wednesday");
        assert!(first.hours.windows(2).all(|w| w[0].raw.dt < w[1].raw.dt));
    }

    #[test]
    fn empty_hourly_is_empty() {
        let forecast = normalize_hourly(&[], &classifier_for(&[]));
        assert!(forecast.is_empty());
        assert_eq!(forecast.day_groups().count(), 0);
    }

    #[test]
    fn truncated_keeps_leading_hours() {
        let raw: Vec<RawHourly> = (0..30).map(|i| fixtures::hour(SR + i * 3600, 0.0)).collect();
        let forecast = normalize_hourly(&raw, &classifier_for(&[])).truncated(24);

        assert_eq!(forecast.len(), 24);
        assert_eq!(forecast.hours()[23].raw.dt, SR + 23 * 3600);
        assert_eq!(forecast.day_groups().map(|g| g.hours.len()).sum::<usize>(), 24);
    }

    #[test]
    fn daily_drops_today_and_formats_the_rest() {
        let d0 = fixtures::day(SR - DAY, SR - DAY, SS - DAY, 5.0, 9.0);
        let d1 = fixtures::day(SR + 3 * 3600, SR, SS, 10.0, 20.0);
        let raw = vec![d0, d1];
        let before = raw.clone();

        let daily = normalize_daily(&raw, &tokyo());

        assert_eq!(raw, before);
        assert_eq!(daily.len(), 1);
        let day = &daily[0];
        assert_eq!(day.raw.temp.max, 20.0);
        assert_eq!(day.sunrise_time, "7:13 AM");
        assert_eq!(day.sunset_time, "3:33 PM");
        assert_eq!(day.local.date, "11/15/2023");
        assert_eq!(day.local.weekday, "Wednesday");
    }

    #[test]
    fn daily_length_is_input_minus_one() {
        let raw: Vec<RawDaily> = (0..8)
            .map(|i| fixtures::day(SR + i * DAY, SR + i * DAY, SS + i * DAY, 0.0, 1.0))
            .collect();

        assert_eq!(normalize_daily(&raw, &tokyo()).len(), 7);
        assert!(normalize_daily(&raw[..1], &tokyo()).is_empty());
        assert!(normalize_daily(&[], &tokyo()).is_empty());
    }

    #[test]
    fn hourly_record_serializes_flat() {
        let forecast = normalize_hourly(&[fixtures::hour(SR, 3.0)], &classifier_for(&[]));
        let json = serde_json::to_value(&forecast.hours()[0]).unwrap();

        assert_eq!(json["dt"], SR);
        assert_eq!(json["is_dark"], false);
        assert_eq!(json["local"]["time"], "7:13 AM");
    }

    #[test]
    fn forecast_serializes_groups_as_indices() {
        let raw = [fixtures::hour(SR, 1.0), fixtures::hour(SR + DAY, 2.0)];
        let json = serde_json::to_value(normalize_hourly(&raw, &classifier_for(&[]))).unwrap();

        assert_eq!(json["hours"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["groups"]["11/15/2023"], serde_json::json!([0]));
        assert_eq!(json["groups"]["11/16/2023"], serde_json::json!([1]));
    }
}
