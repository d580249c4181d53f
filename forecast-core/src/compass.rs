use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 16 compass points used to label wind bearings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardinalDirection {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

const SECTOR_DEGREES: f64 = 22.5;

impl CardinalDirection {
    /// Clockwise from north.
    pub const fn all() -> &'static [CardinalDirection; 16] {
        use CardinalDirection::*;
        &[N, Nne, Ne, Ene, E, Ese, Se, Sse, S, Ssw, Sw, Wsw, W, Wnw, Nw, Nnw]
    }

    /// Resolve a bearing in degrees.
    ///
    /// Any finite value is wrapped into `[0, 360)` first. Sectors are 22.5° wide,
    /// centered on each point and closed at their lower edge, so `11.25` is `NNE`.
    /// Non-finite bearings resolve to `N`.
    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return CardinalDirection::N;
        }

        let wrapped = degrees.rem_euclid(360.0);
        let sector = ((wrapped + SECTOR_DEGREES / 2.0) / SECTOR_DEGREES).floor() as usize;

        Self::all()[sector % 16]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardinalDirection::N => "N",
            CardinalDirection::Nne => "NNE",
            CardinalDirection::Ne => "NE",
            CardinalDirection::Ene => "ENE",
            CardinalDirection::E => "E",
            CardinalDirection::Ese => "ESE",
            CardinalDirection::Se => "SE",
            CardinalDirection::Sse => "SSE",
            CardinalDirection::S => "S",
            CardinalDirection::Ssw => "SSW",
            CardinalDirection::Sw => "SW",
            CardinalDirection::Wsw => "WSW",
            CardinalDirection::W => "W",
            CardinalDirection::Wnw => "WNW",
            CardinalDirection::Nw => "NW",
            CardinalDirection::Nnw => "NNW",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
