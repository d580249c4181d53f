//! Raw payload shapes, as delivered by the One Call API.
//!
//! Every struct ignores unknown fields and round-trips through serde, so a
//! normalized record can carry its raw source without loss.

use serde::{Deserialize, Serialize};

use crate::{error::ForecastError, time::Timestamp};

/// One entry of a record's `weather` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    /// Condition code, e.g. `01n`.
    pub icon: String,
}

/// Rain volume for the last hour, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRain {
    #[serde(rename = "1h")]
    pub one_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHourly {
    pub dt: Timestamp,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub clouds: u8,
    /// Metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    /// Probability of precipitation, 0..=1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<HourlyRain>,
}

/// Current conditions: the hourly shape plus today's sun times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrent {
    pub dt: Timestamp,
    pub sunrise: Timestamp,
    pub sunset: Timestamp,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub clouds: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<HourlyRain>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTemp {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDaily {
    pub dt: Timestamp,
    pub sunrise: Timestamp,
    pub sunset: Timestamp,
    pub temp: DailyTemp,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub clouds: u8,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop: Option<f64>,
    /// Daily rain volume in millimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
}

/// The full response envelope for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneCallPayload {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub timezone: String,
    /// Seconds east of UTC for the location.
    #[serde(default)]
    pub timezone_offset: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<RawCurrent>,
    #[serde(default)]
    pub hourly: Vec<RawHourly>,
    #[serde(default)]
    pub daily: Vec<RawDaily>,
}

fn first_condition(weather: &[Condition]) -> Result<&Condition, ForecastError> {
    weather.first().ok_or(ForecastError::MissingConditionData)
}

impl RawHourly {
    pub fn condition(&self) -> Result<&Condition, ForecastError> {
        first_condition(&self.weather)
    }
}

impl RawCurrent {
    pub fn condition(&self) -> Result<&Condition, ForecastError> {
        first_condition(&self.weather)
    }
}

impl RawDaily {
    pub fn condition(&self) -> Result<&Condition, ForecastError> {
        first_condition(&self.weather)
    }

    /// Chance of precipitation as a whole percentage; absent `pop` reads as 0.
    pub fn rain_chance_pct(&self) -> u8 {
        let pop = self.pop.unwrap_or(0.0).clamp(0.0, 1.0);
        (pop * 100.0).round() as u8
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const HOURLY_JSON: &str = r#"{
        "dt": 1700028000, "temp": 12.4, "feels_like": 11.8, "pressure": 1016,
        "humidity": 81, "dew_point": 9.2, "uvi": 0, "clouds": 75,
        "visibility": 10000, "wind_speed": 4.12, "wind_deg": 250, "wind_gust": 7.1,
        "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10n" }],
        "pop": 0.42, "rain": { "1h": 0.31 }
    }"#;

    #[test]
    fn parses_hourly_payload_and_ignores_unknown_fields() {
        let hour: RawHourly = serde_json::from_str(HOURLY_JSON).expect("valid hourly json");

        assert_eq!(hour.dt, 1_700_028_000);
        assert_eq!(hour.humidity, 81);
        assert_eq!(hour.visibility, Some(10_000.0));
        assert_eq!(hour.pop, Some(0.42));
        assert_eq!(hour.rain.map(|r| r.one_hour), Some(0.31));
        assert_eq!(hour.condition().unwrap().icon, "10n");
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let json = r#"{
            "dt": 1, "temp": 1.0, "feels_like": 0.0, "pressure": 1000, "humidity": 50,
            "clouds": 0, "wind_speed": 0.0, "wind_deg": 0
        }"#;
        let hour: RawHourly = serde_json::from_str(json).expect("valid hourly json");

        assert!(hour.weather.is_empty());
        assert!(hour.pop.is_none());
        assert!(hour.rain.is_none());
        assert_eq!(hour.condition().unwrap_err(), ForecastError::MissingConditionData);
    }

    #[test]
    fn parses_daily_with_scalar_rain() {
        let json = r#"{
            "dt": 1700046000, "sunrise": 1700000000, "sunset": 1700030000,
            "temp": { "day": 15.0, "min": 10.0, "max": 20.0, "night": 11.0, "eve": 14.0, "morn": 10.5 },
            "feels_like": { "day": 14.0, "night": 10.0, "eve": 13.0, "morn": 9.0 },
            "pressure": 1012, "humidity": 55, "wind_speed": 5.5, "wind_deg": 310,
            "clouds": 12, "pop": 0.2, "rain": 1.7,
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }]
        }"#;
        let day: RawDaily = serde_json::from_str(json).expect("valid daily json");

        assert_eq!(day.temp.max, 20.0);
        assert_eq!(day.rain, Some(1.7));
        assert_eq!(day.rain_chance_pct(), 20);
    }

    #[test]
    fn rain_chance_defaults_to_zero() {
        let mut day = fixtures::day(0, 10, 20, 1.0, 2.0);
        day.pop = None;
        assert_eq!(day.rain_chance_pct(), 0);

        day.pop = Some(0.666);
        assert_eq!(day.rain_chance_pct(), 67);
    }

    #[test]
    fn envelope_defaults_missing_sections() {
        let payload: OneCallPayload =
            serde_json::from_str(r#"{ "lat": 35.68, "lon": 139.69 }"#).expect("valid envelope");

        assert!(payload.current.is_none());
        assert!(payload.hourly.is_empty());
        assert!(payload.daily.is_empty());
        assert_eq!(payload.timezone_offset, 0);
    }
}
