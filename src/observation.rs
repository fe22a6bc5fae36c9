//! Observation rows and the closed categorical enumerations they carry.
//!
//! Enum variants are declared in canonical order so the derived `Ord` is the
//! order charts expect (youngest age band first, oldest generation first).
//! Values outside the known sets map to an explicit `Unclassified` variant,
//! which sorts after every known value.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One row of the raw dataset, normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    pub sex: Sex,
    pub age_group: AgeGroup,
    pub generation: Generation,
    pub suicides_count: u64,
    pub population: u64,
    pub suicides_per_100k: f64,
    pub gdp_per_capita: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl FromStr for Sex {
    type Err = Error;

    /// Case-insensitive; the published dataset spells these in lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(Error::invalid(format!("unknown sex: {other:?}"))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeGroup {
    #[serde(rename = "5-14 years")]
    Age5To14,
    #[serde(rename = "15-24 years")]
    Age15To24,
    #[serde(rename = "25-34 years")]
    Age25To34,
    #[serde(rename = "35-54 years")]
    Age35To54,
    #[serde(rename = "55-74 years")]
    Age55To74,
    #[serde(rename = "75+ years")]
    Age75Plus,
    #[serde(rename = "Unclassified")]
    Unclassified,
}

impl AgeGroup {
    /// The six known bands, youngest first. Excludes `Unclassified`.
    pub const ORDERED: [AgeGroup; 6] = [
        AgeGroup::Age5To14,
        AgeGroup::Age15To24,
        AgeGroup::Age25To34,
        AgeGroup::Age35To54,
        AgeGroup::Age55To74,
        AgeGroup::Age75Plus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Age5To14 => "5-14 years",
            AgeGroup::Age15To24 => "15-24 years",
            AgeGroup::Age25To34 => "25-34 years",
            AgeGroup::Age35To54 => "35-54 years",
            AgeGroup::Age55To74 => "55-74 years",
            AgeGroup::Age75Plus => "75+ years",
            AgeGroup::Unclassified => "Unclassified",
        }
    }

    /// Maps a raw `Age` column value onto a band, falling back to `Unclassified`.
    pub fn from_label(raw: &str) -> AgeGroup {
        let raw = raw.trim();
        AgeGroup::ORDERED
            .into_iter()
            .find(|a| a.label() == raw)
            .unwrap_or(AgeGroup::Unclassified)
    }
}

impl FromStr for AgeGroup {
    type Err = Error;

    /// Strict parse for caller-supplied selections: unknown labels are an
    /// error here rather than silently becoming `Unclassified`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unclassified") {
            return Ok(AgeGroup::Unclassified);
        }
        match AgeGroup::from_label(s) {
            AgeGroup::Unclassified => Err(Error::invalid(format!("unknown age group: {s:?}"))),
            age => Ok(age),
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Generation {
    #[serde(rename = "G.I. Generation")]
    GiGeneration,
    Silent,
    Boomers,
    #[serde(rename = "Generation X")]
    GenerationX,
    Millennials,
    #[serde(rename = "Generation Z")]
    GenerationZ,
    Unclassified,
}

impl Generation {
    /// Known generations, oldest first. Excludes `Unclassified`.
    pub const ORDERED: [Generation; 6] = [
        Generation::GiGeneration,
        Generation::Silent,
        Generation::Boomers,
        Generation::GenerationX,
        Generation::Millennials,
        Generation::GenerationZ,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Generation::GiGeneration => "G.I. Generation",
            Generation::Silent => "Silent",
            Generation::Boomers => "Boomers",
            Generation::GenerationX => "Generation X",
            Generation::Millennials => "Millennials",
            Generation::GenerationZ => "Generation Z",
            Generation::Unclassified => "Unclassified",
        }
    }

    /// Maps a raw `Generation` column value, correcting the dataset's
    /// `Millenials` spelling.
    pub fn from_label(raw: &str) -> Generation {
        match raw.trim() {
            "Millenials" => Generation::Millennials,
            raw => Generation::ORDERED
                .into_iter()
                .find(|g| g.label() == raw)
                .unwrap_or(Generation::Unclassified),
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parse_is_case_insensitive() {
        assert_eq!("male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert!("other".parse::<Sex>().is_err());
    }

    #[test]
    fn test_age_group_canonical_order() {
        let mut shuffled = vec![
            AgeGroup::Unclassified,
            AgeGroup::Age75Plus,
            AgeGroup::Age5To14,
            AgeGroup::Age35To54,
            AgeGroup::Age15To24,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                AgeGroup::Age5To14,
                AgeGroup::Age15To24,
                AgeGroup::Age35To54,
                AgeGroup::Age75Plus,
                AgeGroup::Unclassified,
            ]
        );
    }

    #[test]
    fn test_age_group_unknown_label_is_unclassified() {
        assert_eq!(AgeGroup::from_label("15-24 years"), AgeGroup::Age15To24);
        assert_eq!(AgeGroup::from_label("0-4 years"), AgeGroup::Unclassified);
        assert!("0-4 years".parse::<AgeGroup>().is_err());
        assert_eq!("unclassified".parse::<AgeGroup>().unwrap(), AgeGroup::Unclassified);
    }

    #[test]
    fn test_generation_typo_normalized() {
        assert_eq!(Generation::from_label("Millenials"), Generation::Millennials);
        assert_eq!(Generation::from_label("Millennials"), Generation::Millennials);
        assert_eq!(Generation::from_label("Zoomers"), Generation::Unclassified);
    }

    #[test]
    fn test_generation_chronological_order() {
        assert!(Generation::GiGeneration < Generation::Silent);
        assert!(Generation::GenerationX < Generation::Millennials);
        assert!(Generation::GenerationZ < Generation::Unclassified);
    }
}
