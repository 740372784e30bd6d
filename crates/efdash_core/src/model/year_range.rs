//! Year-range literals used throughout filtering and aggregation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the three fixed reporting windows.
///
/// `From2021To2024` and `From2025To2027` are sub-periods; every project year
/// in 2021..=2027 belongs to exactly one of them. `From2021To2027` is the
/// full horizon and is never assigned to a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum YearRange {
    #[serde(rename = "2021-2024")]
    From2021To2024,
    #[serde(rename = "2025-2027")]
    From2025To2027,
    #[serde(rename = "2021-2027")]
    From2021To2027,
}

/// Both sub-periods in chronological order.
pub const SUB_PERIODS: [YearRange; 2] = [YearRange::From2021To2024, YearRange::From2025To2027];

impl YearRange {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::From2021To2024 => "2021-2024",
            Self::From2025To2027 => "2025-2027",
            Self::From2021To2027 => "2021-2027",
        }
    }

    /// Inclusive first and last year of the window.
    pub fn bounds(self) -> (i32, i32) {
        match self {
            Self::From2021To2024 => (2021, 2024),
            Self::From2025To2027 => (2025, 2027),
            Self::From2021To2027 => (2021, 2027),
        }
    }

    pub fn contains_year(self, year: i32) -> bool {
        let (start, end) = self.bounds();
        (start..=end).contains(&year)
    }

    pub fn is_sub_period(self) -> bool {
        !matches!(self, Self::From2021To2027)
    }

    /// Returns the sub-period a project year belongs to.
    pub fn sub_period_of(year: i32) -> Option<Self> {
        SUB_PERIODS
            .into_iter()
            .find(|range| range.contains_year(year))
    }

    /// Sub-periods covered by this window.
    pub fn sub_periods(self) -> &'static [YearRange] {
        match self {
            Self::From2021To2024 => &SUB_PERIODS[..1],
            Self::From2025To2027 => &SUB_PERIODS[1..],
            Self::From2021To2027 => &SUB_PERIODS,
        }
    }
}

impl Display for YearRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input did not match any of the three year-range literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRangeParseError(pub String);

impl Display for YearRangeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported year range `{}`; expected 2021-2024|2025-2027|2021-2027",
            self.0
        )
    }
}

impl Error for YearRangeParseError {}

impl FromStr for YearRange {
    type Err = YearRangeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "2021-2024" => Ok(Self::From2021To2024),
            "2025-2027" => Ok(Self::From2025To2027),
            "2021-2027" => Ok(Self::From2021To2027),
            other => Err(YearRangeParseError(other.to_string())),
        }
    }
}
