use crate::utils::error::Result;
use crate::utils::validation::validate_ordered;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most likes a nickname request keeps.
pub const MAX_LIKES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdpRecord {
    pub country_name: String,
    pub country_code: String,
    pub year: i32,
    pub gdp: f64,
}

/// Inclusive year range, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    from: i32,
    to: i32,
}

impl YearRange {
    pub fn new(from: i32, to: i32) -> Result<Self> {
        validate_ordered("years", from, to)?;
        Ok(Self { from, to })
    }

    pub fn from(&self) -> i32 {
        self.from
    }

    pub fn to(&self) -> i32 {
        self.to
    }

    pub fn contains(&self, year: i32) -> bool {
        self.from <= year && year <= self.to
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Growth {
    Percent(f64),
    NotAvailable,
}

impl Growth {
    /// Percentage change from `first` to `last`. Zero or absent endpoints give `NotAvailable`.
    pub fn between(first: Option<f64>, last: Option<f64>) -> Self {
        match (first, last) {
            (Some(first), Some(last)) if first != 0.0 && first.is_finite() && last.is_finite() => {
                Growth::Percent((last - first) / first * 100.0)
            }
            _ => Growth::NotAvailable,
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Growth::Percent(p) => Some(*p),
            Growth::NotAvailable => None,
        }
    }
}

impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Growth::Percent(p) => write!(f, "{:+.2}%", p),
            Growth::NotAvailable => write!(f, "n/a"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMetric {
    pub country_code: String,
    pub country_name: String,
    pub first_year: i32,
    pub last_year: i32,
    pub first_gdp: Option<f64>,
    pub last_gdp: Option<f64>,
    pub growth: Growth,
}

/// One line of the chart: a country's GDP over the selected years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySeries {
    pub country_code: String,
    pub country_name: String,
    pub points: Vec<(i32, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GdpView {
    pub range: YearRange,
    pub countries: Vec<String>,
    pub records: Vec<GdpRecord>,
    pub metrics: Vec<CountryMetric>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicknameRequest {
    pub key_word: Option<String>,
    pub likes: Vec<String>,
}

impl NicknameRequest {
    /// Trims everything, drops blank likes and keeps at most [`MAX_LIKES`].
    pub fn new<S: AsRef<str>>(key_word: &str, likes: &[S]) -> Self {
        let key_word = key_word.trim();
        Self {
            key_word: (!key_word.is_empty()).then(|| key_word.to_string()),
            likes: likes
                .iter()
                .map(|l| l.as_ref().trim())
                .filter(|l| !l.is_empty())
                .take(MAX_LIKES)
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn key_word(&self) -> &str {
        self.key_word.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicknameList {
    pub key_word: Option<String>,
    pub likes: Vec<String>,
    pub top_pick: Option<String>,
    pub candidates: Vec<String>,
}
