use serde::Serialize;

use crate::{error::ForecastError, normalize::HourlyRecord};

/// Hours covered by a full progress bar.
pub const DEFAULT_PROGRESS_WINDOW: usize = 48;

/// Lowest and highest temperature over a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

impl TempRange {
    /// Fold over temperatures, ignoring NaN. Nothing left to fold is an error.
    pub fn from_temps<I>(temps: I) -> Result<Self, ForecastError>
    where
        I: IntoIterator<Item = f64>,
    {
        temps
            .into_iter()
            .filter(|t| !t.is_nan())
            .fold(None, |acc: Option<TempRange>, t| {
                Some(match acc {
                    None => TempRange { min: t, max: t },
                    Some(r) => TempRange {
                        min: r.min.min(t),
                        max: r.max.max(t),
                    },
                })
            })
            .ok_or(ForecastError::EmptyWindow)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Min/max of `temp` across the given hours.
pub fn summarize(hours: &[HourlyRecord]) -> Result<TempRange, ForecastError> {
    TempRange::from_temps(hours.iter().map(|h| h.raw.temp))
}

/// Share of `window_size` covered, clamped to `[0, 1]`. An empty window is `0`.
pub fn progress_fraction(covered: usize, window_size: usize) -> f64 {
    if window_size == 0 {
        return 0.0;
    }
    covered.min(window_size) as f64 / window_size as f64
}
