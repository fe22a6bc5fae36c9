//! Chart tables derived from a filtered observation set.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::analyzers::aggregate::{aggregate, by_rate_desc, top_n_by_rate};
use crate::analyzers::filter::CountrySelection;
use crate::analyzers::income::IncomeBands;
use crate::analyzers::risk::classify_risk;
use crate::analyzers::types::{
    AggregateBucket, EconomicPoint, GenderGapPoint, GroupKey, TopCountry,
};
use crate::analyzers::utility::mean;
use crate::error::Result;
use crate::observation::{Observation, Sex};

/// Countries shown on the trends chart when the selection is too broad.
pub const TREND_COUNTRY_LIMIT: usize = 10;

/// Countries shown on the top-countries ranking.
pub const TOP_COUNTRY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicView {
    #[default]
    TimeTrends,
    GdpCorrelation,
    CountryOverview,
}

/// Rates by age band and sex, youngest band first.
pub fn age_by_sex(filtered: &[Observation]) -> Result<Vec<AggregateBucket>> {
    aggregate(filtered, &[GroupKey::AgeGroup, GroupKey::Sex])
}

/// One bucket per country; feeds the choropleth map.
pub fn country_rates(filtered: &[Observation]) -> Result<Vec<AggregateBucket>> {
    aggregate(filtered, &[GroupKey::Country])
}

/// Male and female rates per year with their ratio and difference.
pub fn gender_gap(filtered: &[Observation]) -> Result<Vec<GenderGapPoint>> {
    let buckets = aggregate(filtered, &[GroupKey::Year, GroupKey::Sex])?;

    let mut by_year: BTreeMap<i32, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for b in &buckets {
        let (Some(year), Some(sex)) = (b.year(), b.sex()) else {
            continue;
        };
        let rate = b.has_rate().then_some(b.rate_per_100k);
        let entry = by_year.entry(year).or_default();
        match sex {
            Sex::Male => entry.0 = rate,
            Sex::Female => entry.1 = rate,
        }
    }

    Ok(by_year
        .into_iter()
        .map(|(year, (male_rate, female_rate))| {
            let (ratio, gap) = match (male_rate, female_rate) {
                (Some(m), Some(f)) => ((f > 0.0).then(|| m / f), Some(m - f)),
                _ => (None, None),
            };
            GenderGapPoint {
                year,
                male_rate,
                female_rate,
                ratio,
                gap,
            }
        })
        .collect())
}

/// Countries to plot on the trends chart.
///
/// A broad selection (`All`, or more than [`TREND_COUNTRY_LIMIT`] names) is
/// narrowed to the countries with the highest mean per-row rate. Equal means
/// keep the order in which countries first appear in `filtered`.
pub fn trend_countries(filtered: &[Observation], selection: &CountrySelection) -> Vec<String> {
    let broad = match selection {
        CountrySelection::All => true,
        CountrySelection::Only(names) => names.len() > TREND_COUNTRY_LIMIT,
    };
    if !broad {
        return filtered
            .iter()
            .map(|o| o.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
    }

    // first-seen order
    let mut per_country: Vec<(&str, Vec<f64>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for o in filtered {
        let slot = *index.entry(o.country.as_str()).or_insert_with(|| {
            per_country.push((o.country.as_str(), Vec::new()));
            per_country.len() - 1
        });
        per_country[slot].1.push(o.suicides_per_100k);
    }

    let mut ranked: Vec<(&str, f64)> = per_country
        .into_iter()
        .map(|(country, rates)| (country, mean(&rates)))
        .collect();
    ranked.sort_by(|a, b| by_rate_desc(a.1, b.1));
    ranked
        .into_iter()
        .take(TREND_COUNTRY_LIMIT)
        .map(|(country, _)| country.to_string())
        .collect()
}

/// Points for one of the economic-factor charts. Income level is derived
/// from each group's mean GDP per capita.
pub fn economic_points(
    filtered: &[Observation],
    view: EconomicView,
    selection: &CountrySelection,
    bands: &IncomeBands,
) -> Result<Vec<EconomicPoint>> {
    let buckets = match view {
        EconomicView::TimeTrends => {
            let keep = trend_countries(filtered, selection);
            let rows: Vec<Observation> = filtered
                .iter()
                .filter(|o| keep.contains(&o.country))
                .cloned()
                .collect();
            aggregate(&rows, &[GroupKey::Country, GroupKey::Year])?
        }
        EconomicView::GdpCorrelation => aggregate(filtered, &[GroupKey::Country, GroupKey::Year])?,
        EconomicView::CountryOverview => aggregate(filtered, &[GroupKey::Country])?,
    };

    buckets
        .into_iter()
        .map(|b| {
            Ok(EconomicPoint {
                country: b.country().unwrap_or_default().to_string(),
                year: b.year(),
                total_suicides: b.total_suicides,
                total_population: b.total_population,
                rate_per_100k: b.rate_per_100k,
                mean_gdp_per_capita: b.mean_gdp_per_capita,
                income_level: bands.classify(b.mean_gdp_per_capita)?,
            })
        })
        .collect()
}

/// Highest-rate countries with their risk level. Countries without a
/// defined rate are left out.
pub fn top_countries(filtered: &[Observation], n: usize) -> Result<Vec<TopCountry>> {
    let rated: Vec<AggregateBucket> = country_rates(filtered)?
        .into_iter()
        .filter(AggregateBucket::has_rate)
        .collect();

    top_n_by_rate(&rated, n)
        .into_iter()
        .map(|b| {
            Ok(TopCountry {
                country: b.country().unwrap_or_default().to_string(),
                total_suicides: b.total_suicides,
                total_population: b.total_population,
                rate_per_100k: b.rate_per_100k,
                risk_level: classify_risk(b.rate_per_100k)?,
            })
        })
        .collect()
}
