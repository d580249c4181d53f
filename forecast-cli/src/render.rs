//! Plain-text rendering of a [`Dashboard`].

use std::fmt::Write;

use forecast_core::{
    Dashboard, DailyRecord, HourlyRecord, SunEventKind, TimeContext, Timestamp,
    current::CurrentConditions,
    facts::{IndexSource, pick_fact},
    is_current_hour,
};

use crate::cli::HourlyView;

const BAR_WIDTH: usize = 20;
const NO_CONDITION: &str = "n/a";

pub struct RenderOptions<'a> {
    pub title: &'a str,
    pub view: HourlyView,
    pub now: Timestamp,
    pub ctx: TimeContext,
    pub units: &'a str,
}

struct Units {
    temp: &'static str,
    speed: &'static str,
}

fn units_for(system: &str) -> Units {
    match system {
        "imperial" => Units {
            temp: "°F",
            speed: "mph",
        },
        "standard" => Units {
            temp: "K",
            speed: "m/s",
        },
        _ => Units {
            temp: "°C",
            speed: "m/s",
        },
    }
}

pub fn dashboard(
    dash: &Dashboard,
    opts: &RenderOptions<'_>,
    facts: &mut dyn IndexSource,
) -> String {
    let units = units_for(opts.units);
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", opts.title);

    if let Some(current) = &dash.current {
        current_section(&mut out, current, &units);
    }

    if !dash.hourly.is_empty() {
        let _ = writeln!(out, "\nHourly forecast");
        match opts.view {
            HourlyView::Timeline => {
                for hour in dash.hourly.hours() {
                    hour_line(&mut out, hour, opts, &units, true);
                }
            }
            HourlyView::Grid => {
                for group in dash.hourly.day_groups() {
                    let short = group.hours[0].local.day.format("%b %-d");
                    let _ = writeln!(out, "  {} ({short})", group.weekday);
                    for hour in group.hours {
                        hour_line(&mut out, hour, opts, &units, false);
                    }
                }
            }
        }
    }

    if let Some(range) = dash.hourly_range {
        let _ = writeln!(
            out,
            "  Range {:.0}{t} .. {:.0}{t}  [{}] {:.0}%",
            range.min,
            range.max,
            progress_bar(dash.progress),
            dash.progress * 100.0,
            t = units.temp,
        );
    }

    if !dash.daily.is_empty() {
        let _ = writeln!(out, "\n{}-day forecast", dash.daily.len());
        for day in &dash.daily {
            day_line(&mut out, day, &units);
        }
    }

    let _ = writeln!(out, "\nDid you know? {}", pick_fact(facts));
    out
}

fn current_section(out: &mut String, current: &CurrentConditions, units: &Units) {
    let raw = &current.raw;
    let t = units.temp;

    let _ = writeln!(
        out,
        "{} {}, {}{}",
        current.local.weekday,
        current.local.date,
        current.local.time,
        if current.is_dark { " (night)" } else { "" }
    );

    let condition = current
        .condition()
        .map(|c| format!("{} ({})", c.main, c.description))
        .unwrap_or_else(|_| NO_CONDITION.to_string());
    let _ = writeln!(out, "  {:.0}{t}  {condition}", raw.temp);

    let mut feels = format!("  Feels like {:.0}{t}", raw.feels_like);
    if let Some(rain) = raw.rain {
        let _ = write!(feels, " | Rain: {}mm", rain.one_hour);
    }
    let _ = writeln!(out, "{feels}");

    if let Some(today) = current.today {
        let _ = writeln!(out, "  HI {:.0}{t}  LO {:.0}{t}", today.max, today.min);
    }

    let visibility = current
        .visibility_km
        .map(|km| format!("{km} km"))
        .unwrap_or_else(|| NO_CONDITION.to_string());
    let _ = writeln!(
        out,
        "  Humidity {}% | Wind {} {} {} | Pressure {} hPa | Clouds {}% | Rain chance {}% | Visibility {}",
        raw.humidity,
        current.wind_direction,
        raw.wind_speed,
        units.speed,
        raw.pressure,
        raw.clouds,
        current.rain_chance_pct,
        visibility,
    );

    if let Some(next) = &current.next_sun_event {
        let label = match next.event.kind {
            SunEventKind::Sunrise => "Sunrise",
            SunEventKind::Sunset => "Sunset",
        };
        let _ = writeln!(out, "  {label} {}", next.time);
    }
}

fn hour_line(
    out: &mut String,
    hour: &HourlyRecord,
    opts: &RenderOptions<'_>,
    units: &Units,
    with_date: bool,
) {
    let marker = if is_current_hour(hour.raw.dt, opts.now, &opts.ctx) { '>' } else { ' ' };
    let shade = if hour.is_dark { '*' } else { ' ' };
    let condition = hour.condition().map(|c| c.main.as_str()).unwrap_or(NO_CONDITION);

    let _ = write!(out, "  {marker}{shade} {:>8}", hour.local.time);
    if with_date {
        let _ = write!(out, "  {:<10}", hour.local.date);
    }
    let _ = writeln!(out, "  {:>4.0}{}  {condition}", hour.raw.temp, units.temp);
}

fn day_line(out: &mut String, day: &DailyRecord, units: &Units) {
    let condition = day.condition().map(|c| c.main.as_str()).unwrap_or(NO_CONDITION);
    let _ = writeln!(
        out,
        "  {:<9} {:<10}  High {:.0}{t}  Low {:.0}{t}  Humidity {}%  Rain {}%  {condition}  ({} - {})",
        day.local.weekday,
        day.local.date,
        day.raw.temp.max,
        day.raw.temp.min,
        day.raw.humidity,
        day.raw.rain_chance_pct(),
        day.sunrise_time,
        day.sunset_time,
        t = units.temp,
    );
}

fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
