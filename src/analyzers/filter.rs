//! Row filtering by year range, sex, age group and country.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::dataset::ALL_COUNTRIES;
use crate::error::{Error, Result};
use crate::observation::{AgeGroup, Observation, Sex};

/// Which countries a filter admits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountrySelection {
    /// No country restriction.
    All,
    Only(BTreeSet<String>),
}

impl CountrySelection {
    /// Builds a selection from user-picked names. No names, or a list
    /// containing the `"All"` sentinel, means no restriction.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() || names.contains(ALL_COUNTRIES) {
            CountrySelection::All
        } else {
            CountrySelection::Only(names)
        }
    }

    pub fn admits(&self, country: &str) -> bool {
        match self {
            CountrySelection::All => true,
            CountrySelection::Only(names) => names.contains(country),
        }
    }
}

/// Validated filter parameters. Construct with [`FilterSpec::new`] or
/// [`FilterSpec::unrestricted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    year_min: i32,
    year_max: i32,
    sexes: BTreeSet<Sex>,
    age_groups: BTreeSet<AgeGroup>,
    countries: CountrySelection,
}

impl FilterSpec {
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `year_min > year_max`, when
    /// `sexes` or `age_groups` is empty, or when `countries` is an empty
    /// explicit set.
    pub fn new(
        year_min: i32,
        year_max: i32,
        sexes: BTreeSet<Sex>,
        age_groups: BTreeSet<AgeGroup>,
        countries: CountrySelection,
    ) -> Result<Self> {
        if year_min > year_max {
            return Err(Error::invalid(format!(
                "year_min {year_min} is greater than year_max {year_max}"
            )));
        }
        if sexes.is_empty() {
            return Err(Error::invalid("at least one sex must be selected"));
        }
        if age_groups.is_empty() {
            return Err(Error::invalid("at least one age group must be selected"));
        }
        if let CountrySelection::Only(names) = &countries {
            if names.is_empty() {
                return Err(Error::invalid("country selection must not be empty"));
            }
        }
        Ok(Self {
            year_min,
            year_max,
            sexes,
            age_groups,
            countries,
        })
    }

    /// Every sex, every age group (including unclassified rows) and every
    /// country within the given years.
    pub fn unrestricted(year_min: i32, year_max: i32) -> Result<Self> {
        let mut ages: BTreeSet<AgeGroup> = AgeGroup::ORDERED.into_iter().collect();
        ages.insert(AgeGroup::Unclassified);
        Self::new(
            year_min,
            year_max,
            Sex::ALL.into_iter().collect(),
            ages,
            CountrySelection::All,
        )
    }

    pub fn year_min(&self) -> i32 {
        self.year_min
    }

    pub fn year_max(&self) -> i32 {
        self.year_max
    }

    pub fn sexes(&self) -> &BTreeSet<Sex> {
        &self.sexes
    }

    pub fn age_groups(&self) -> &BTreeSet<AgeGroup> {
        &self.age_groups
    }

    pub fn countries(&self) -> &CountrySelection {
        &self.countries
    }

    /// Number of years the range spans, inclusive.
    pub fn years_selected(&self) -> i64 {
        i64::from(self.year_max) - i64::from(self.year_min) + 1
    }

    pub fn matches(&self, obs: &Observation) -> bool {
        (self.year_min..=self.year_max).contains(&obs.year)
            && self.sexes.contains(&obs.sex)
            && self.age_groups.contains(&obs.age_group)
            && self.countries.admits(&obs.country)
    }
}

/// Returns the rows matching every predicate of `spec`, in input order.
pub fn filter(observations: &[Observation], spec: &FilterSpec) -> Vec<Observation> {
    observations
        .iter()
        .filter(|o| spec.matches(o))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Generation;

    fn obs(country: &str, year: i32, sex: Sex, age_group: AgeGroup) -> Observation {
        Observation {
            country: country.to_string(),
            year,
            sex,
            age_group,
            generation: Generation::Silent,
            suicides_count: 3,
            population: 10_000,
            suicides_per_100k: 30.0,
            gdp_per_capita: 4_000.0,
        }
    }

    fn sample() -> Vec<Observation> {
        vec![
            obs("Norway", 1990, Sex::Male, AgeGroup::Age15To24),
            obs("Norway", 2000, Sex::Female, AgeGroup::Age35To54),
            obs("Sweden", 2005, Sex::Male, AgeGroup::Age75Plus),
            obs("Japan", 2010, Sex::Female, AgeGroup::Age15To24),
            obs("Japan", 2016, Sex::Male, AgeGroup::Unclassified),
        ]
    }

    #[test]
    fn test_new_rejects_inverted_years() {
        let result = FilterSpec::new(
            2000,
            1999,
            Sex::ALL.into_iter().collect(),
            AgeGroup::ORDERED.into_iter().collect(),
            CountrySelection::All,
        );
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_new_rejects_empty_selections() {
        let ages: BTreeSet<AgeGroup> = AgeGroup::ORDERED.into_iter().collect();
        let sexes: BTreeSet<Sex> = Sex::ALL.into_iter().collect();

        assert!(FilterSpec::new(1990, 2000, BTreeSet::new(), ages.clone(), CountrySelection::All).is_err());
        assert!(FilterSpec::new(1990, 2000, sexes.clone(), BTreeSet::new(), CountrySelection::All).is_err());
        assert!(
            FilterSpec::new(1990, 2000, sexes, ages, CountrySelection::Only(BTreeSet::new())).is_err()
        );
    }

    #[test]
    fn test_country_selection_sentinel() {
        assert_eq!(CountrySelection::from_names(Vec::<String>::new()), CountrySelection::All);
        assert_eq!(CountrySelection::from_names(["Norway", "All"]), CountrySelection::All);
        let only = CountrySelection::from_names(["Norway"]);
        assert!(only.admits("Norway"));
        assert!(!only.admits("Sweden"));
    }

    #[test]
    fn test_unrestricted_keeps_everything_in_range() {
        let spec = FilterSpec::unrestricted(1985, 2016).unwrap();
        assert_eq!(filter(&sample(), &spec), sample());
    }

    #[test]
    fn test_filter_applies_all_predicates() {
        let spec = FilterSpec::new(
            1995,
            2012,
            [Sex::Female].into_iter().collect(),
            [AgeGroup::Age15To24, AgeGroup::Age35To54].into_iter().collect(),
            CountrySelection::from_names(["Norway", "Japan"]),
        )
        .unwrap();

        let out = filter(&sample(), &spec);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].country, "Norway");
        assert_eq!(out[1].country, "Japan");
        assert!(out.iter().all(|o| spec.matches(o)));
    }

    #[test]
    fn test_filter_year_bounds_inclusive() {
        let mut spec = FilterSpec::unrestricted(2005, 2010).unwrap();
        let out = filter(&sample(), &spec);
        assert_eq!(out.iter().map(|o| o.year).collect::<Vec<_>>(), vec![2005, 2010]);

        spec = FilterSpec::unrestricted(2001, 2004).unwrap();
        assert!(filter(&sample(), &spec).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let spec = FilterSpec::new(
            1985,
            2016,
            [Sex::Male].into_iter().collect(),
            AgeGroup::ORDERED.into_iter().collect(),
            CountrySelection::All,
        )
        .unwrap();
        let once = filter(&sample(), &spec);
        let twice = filter(&once, &spec);
        assert_eq!(once, twice);
        // the unclassified-age row is excluded when only known bands are selected
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_years_selected() {
        let spec = FilterSpec::unrestricted(1985, 2016).unwrap();
        assert_eq!(spec.years_selected(), 32);
    }
}
