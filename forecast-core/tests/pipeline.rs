use forecast_core::{
    CardinalDirection, Dashboard, DashboardOptions, DayNightClassifier, ForecastError,
    ForecastRequest, ForecastSource, MissingWindowPolicy, OneCallPayload, SunEventKind, SunWindows,
    TimeContext, normalize_daily, normalize_hourly, provider::file::FileSource,
};

const FIXTURE: &str = include_str!("data/onecall_tokyo.json");

fn payload() -> OneCallPayload {
    serde_json::from_str(FIXTURE).expect("fixture parses")
}

fn tokyo_opts(payload: &OneCallPayload) -> DashboardOptions {
    DashboardOptions {
        ctx: TimeContext::from_offset_seconds(payload.timezone_offset).expect("valid offset"),
        ..DashboardOptions::default()
    }
}

#[test]
fn dashboard_from_fixture() {
    let payload = payload();
    let dash = Dashboard::build(&payload, &tokyo_opts(&payload));

    let flags: Vec<bool> = dash.hourly.hours().iter().map(|h| h.is_dark).collect();
    assert_eq!(flags, vec![false, true, true, false]);

    let dates: Vec<&str> = dash.hourly.dates().collect();
    assert_eq!(dates, vec!["11/14/2023", "11/15/2023"]);

    assert_eq!(dash.daily.len(), 2);
    assert_eq!(dash.daily[0].raw.temp.max, 20.0);
    assert_eq!(dash.daily[0].sunrise_time, "7:13 AM");
    assert_eq!(dash.daily[0].sunset_time, "3:33 PM");
    assert_eq!(dash.daily[0].local.weekday, "Wednesday");

    let range = dash.hourly_range.expect("hours present");
    assert_eq!((range.min, range.max), (9.3, 16.5));
    assert_eq!(dash.progress, 4.0 / 48.0);
}

#[test]
fn current_conditions_from_fixture() {
    let payload = payload();
    let dash = Dashboard::build(&payload, &tokyo_opts(&payload));
    let current = dash.current.expect("fixture has current conditions");

    assert_eq!(current.local.time, "2:33 PM");
    assert!(!current.is_dark);
    assert_eq!(current.wind_direction, CardinalDirection::N);
    assert_eq!(current.visibility_km, Some(10));
    assert_eq!(current.rain_chance_pct, 10);

    let next = current.next_sun_event.expect("two days of sun timings");
    assert_eq!(next.event.kind, SunEventKind::Sunset);
    assert_eq!(next.time, "3:33 PM");
}

#[test]
fn missing_condition_is_surfaced_not_fatal() {
    let payload = payload();
    let dash = Dashboard::build(&payload, &tokyo_opts(&payload));

    let last = dash.hourly.hours().last().expect("four hours");
    assert_eq!(last.condition().unwrap_err(), ForecastError::MissingConditionData);
}

#[test]
fn daily_normalization_leaves_input_untouched() {
    let payload = payload();
    let before = payload.daily.clone();

    let ctx = TimeContext::from_offset_seconds(payload.timezone_offset).unwrap();
    let daily = normalize_daily(&payload.daily, &ctx);

    assert_eq!(payload.daily, before);
    assert_eq!(daily.len(), before.len() - 1);
}

#[test]
fn utc_context_shifts_grouping_but_not_darkness_semantics() {
    let payload = payload();
    let ctx = TimeContext::utc();
    let classifier = DayNightClassifier::new(SunWindows::from_daily(&payload.daily, &ctx), ctx);
    let hourly = normalize_hourly(&payload.hourly, &classifier);

    let flattened: Vec<i64> = hourly
        .day_groups()
        .flat_map(|g| g.hours.into_iter().map(|h| h.raw.dt))
        .collect();
    let original: Vec<i64> = payload.hourly.iter().map(|h| h.dt).collect();
    assert_eq!(flattened, original);

    let dates: Vec<&str> = hourly.dates().collect();
    assert_eq!(dates, vec!["11/14/2023"]);

    // In UTC each window runs from one evening into the next morning.
    let flags: Vec<bool> = hourly.hours().iter().map(|h| h.is_dark).collect();
    assert_eq!(flags, vec![false, true, true, false]);
}

#[test]
fn default_context_dashboard_matches_local_darkness() {
    let payload = payload();
    let tokyo = Dashboard::build(&payload, &tokyo_opts(&payload));
    let utc = Dashboard::build(&payload, &DashboardOptions::default());

    let dark = |d: &Dashboard| d.hourly.hours().iter().map(|h| h.is_dark).collect::<Vec<_>>();
    assert_eq!(dark(&utc), dark(&tokyo));
    assert_eq!(utc.current.map(|c| c.is_dark), Some(false));
}

#[test]
fn assume_dark_policy_flows_through_the_dashboard() {
    let mut payload = payload();
    payload.daily.clear();
    let opts = DashboardOptions {
        missing_window: MissingWindowPolicy::AssumeDark,
        ..tokyo_opts(&payload)
    };

    let dash = Dashboard::build(&payload, &opts);
    assert!(dash.hourly.hours().iter().all(|h| h.is_dark));
    assert!(dash.daily.is_empty());
}

#[tokio::test]
async fn file_source_feeds_the_pipeline() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/onecall_tokyo.json");
    let payload = FileSource::new(path)
        .fetch(&ForecastRequest::new(35.6895, 139.6917))
        .await
        .expect("fixture loads");

    assert_eq!(payload.timezone, "Asia/Tokyo");
    assert_eq!(payload.hourly.len(), 4);
}
