//! Data types used by the aggregation pipeline.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::observation::{AgeGroup, Generation, Observation, Sex};

/// GDP-per-capita band, ordered poorest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum IncomeLevel {
    #[serde(rename = "Low Income")]
    Low,
    #[serde(rename = "Lower Middle")]
    LowerMiddle,
    #[serde(rename = "Upper Middle")]
    UpperMiddle,
    #[serde(rename = "High Income")]
    High,
}

impl IncomeLevel {
    pub fn label(self) -> &'static str {
        match self {
            IncomeLevel::Low => "Low Income",
            IncomeLevel::LowerMiddle => "Lower Middle",
            IncomeLevel::UpperMiddle => "Upper Middle",
            IncomeLevel::High => "High Income",
        }
    }
}

/// Risk category for a rate per 100k, ordered least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Moderate,
    Elevated,
    High,
    Crisis,
}

/// A dimension observations can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Country,
    Year,
    Sex,
    AgeGroup,
    Generation,
    IncomeLevel,
}

impl FromStr for GroupKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "country" => Ok(GroupKey::Country),
            "year" => Ok(GroupKey::Year),
            "sex" => Ok(GroupKey::Sex),
            "age" | "age_group" => Ok(GroupKey::AgeGroup),
            "generation" => Ok(GroupKey::Generation),
            "income" | "income_level" => Ok(GroupKey::IncomeLevel),
            other => Err(Error::invalid(format!("unknown group key: {other:?}"))),
        }
    }
}

/// One component of a bucket's grouping key. Comparison follows the
/// canonical order of each enumeration, never the label text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum GroupValue {
    Country(String),
    Year(i32),
    Sex(Sex),
    AgeGroup(AgeGroup),
    Generation(Generation),
    IncomeLevel(IncomeLevel),
}

impl GroupValue {
    pub fn key(&self) -> GroupKey {
        match self {
            GroupValue::Country(_) => GroupKey::Country,
            GroupValue::Year(_) => GroupKey::Year,
            GroupValue::Sex(_) => GroupKey::Sex,
            GroupValue::AgeGroup(_) => GroupKey::AgeGroup,
            GroupValue::Generation(_) => GroupKey::Generation,
            GroupValue::IncomeLevel(_) => GroupKey::IncomeLevel,
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Country(c) => f.write_str(c),
            GroupValue::Year(y) => write!(f, "{y}"),
            GroupValue::Sex(s) => f.write_str(s.label()),
            GroupValue::AgeGroup(a) => f.write_str(a.label()),
            GroupValue::Generation(g) => f.write_str(g.label()),
            GroupValue::IncomeLevel(i) => f.write_str(i.label()),
        }
    }
}

/// Summed totals and derived rate for one group of observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateBucket {
    pub key: Vec<GroupValue>,
    pub total_suicides: u64,
    pub total_population: u64,
    /// NaN when `total_population` is zero.
    pub rate_per_100k: f64,
    pub mean_gdp_per_capita: f64,
    pub rows: usize,
}

impl AggregateBucket {
    /// The value this bucket holds for `key`, if it was grouped by it.
    pub fn get(&self, key: GroupKey) -> Option<&GroupValue> {
        self.key.iter().find(|v| v.key() == key)
    }

    pub fn country(&self) -> Option<&str> {
        match self.get(GroupKey::Country) {
            Some(GroupValue::Country(c)) => Some(c),
            _ => None,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self.get(GroupKey::Year) {
            Some(GroupValue::Year(y)) => Some(*y),
            _ => None,
        }
    }

    pub fn sex(&self) -> Option<Sex> {
        match self.get(GroupKey::Sex) {
            Some(GroupValue::Sex(s)) => Some(*s),
            _ => None,
        }
    }

    /// Key values joined with `" / "`, e.g. `Norway / 2015`.
    pub fn label(&self) -> String {
        self.key
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    pub fn has_rate(&self) -> bool {
        !self.rate_per_100k.is_nan()
    }
}

/// Flat row form of an [`AggregateBucket`] for CSV output.
#[derive(Debug, Serialize)]
pub struct BucketRow {
    pub group: String,
    pub total_suicides: u64,
    pub total_population: u64,
    pub rate_per_100k: Option<f64>,
    pub mean_gdp_per_capita: f64,
    pub rows: usize,
}

impl From<&AggregateBucket> for BucketRow {
    fn from(b: &AggregateBucket) -> Self {
        BucketRow {
            group: b.label(),
            total_suicides: b.total_suicides,
            total_population: b.total_population,
            rate_per_100k: b.has_rate().then_some(b.rate_per_100k),
            mean_gdp_per_capita: b.mean_gdp_per_capita,
            rows: b.rows,
        }
    }
}

/// Per-year male and female rates with their ratio and gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderGapPoint {
    pub year: i32,
    pub male_rate: Option<f64>,
    pub female_rate: Option<f64>,
    /// Male rate divided by female rate.
    pub ratio: Option<f64>,
    /// Male rate minus female rate.
    pub gap: Option<f64>,
}

/// A point on one of the economic-factor charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicPoint {
    pub country: String,
    pub year: Option<i32>,
    pub total_suicides: u64,
    pub total_population: u64,
    pub rate_per_100k: f64,
    pub mean_gdp_per_capita: f64,
    pub income_level: IncomeLevel,
}

/// A country ranked by rate with its risk category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCountry {
    pub country: String,
    pub total_suicides: u64,
    pub total_population: u64,
    pub rate_per_100k: f64,
    pub risk_level: RiskLevel,
}

/// Filter options a presentation layer offers the user.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub sexes: Vec<Sex>,
    pub age_groups: Vec<AgeGroup>,
    pub generations: Vec<Generation>,
}

pub(crate) fn group_value(
    obs: &Observation,
    key: GroupKey,
    income: Option<IncomeLevel>,
) -> Option<GroupValue> {
    Some(match key {
        GroupKey::Country => GroupValue::Country(obs.country.clone()),
        GroupKey::Year => GroupValue::Year(obs.year),
        GroupKey::Sex => GroupValue::Sex(obs.sex),
        GroupKey::AgeGroup => GroupValue::AgeGroup(obs.age_group),
        GroupKey::Generation => GroupValue::Generation(obs.generation),
        GroupKey::IncomeLevel => GroupValue::IncomeLevel(income?),
    })
}
