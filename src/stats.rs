use serde::Serialize;
use std::collections::BTreeSet;

use crate::analyzers::filter::FilterSpec;
use crate::analyzers::risk::headline_label;
use crate::analyzers::utility::mean;
use crate::observation::Observation;

/// Headline figures shown above the charts for the current filter.
#[derive(Debug, Default, Serialize)]
pub struct KeyMetrics {
    pub total_suicides: u64,
    /// Mean of the per-row precomputed rate, skipping undefined cells; NaN
    /// when no row has a rate.
    pub avg_rate_per_100k: f64,
    pub headline: String,
    pub total_population: u64,
    /// Population in millions, as displayed on the metric card.
    pub population_millions: f64,
    pub countries: usize,
    pub years_selected: i64,
    pub year_min: i32,
    pub year_max: i32,
}

impl KeyMetrics {
    pub fn from_observations(filtered: &[Observation], spec: &FilterSpec) -> Self {
        let rates: Vec<f64> = filtered
            .iter()
            .map(|o| o.suicides_per_100k)
            .filter(|r| !r.is_nan())
            .collect();
        let avg_rate_per_100k = mean(&rates);
        let total_population: u64 = filtered.iter().map(|o| o.population).sum();

        KeyMetrics {
            total_suicides: filtered.iter().map(|o| o.suicides_count).sum(),
            avg_rate_per_100k,
            headline: headline_label(avg_rate_per_100k).to_string(),
            total_population,
            population_millions: total_population as f64 / 1_000_000.0,
            countries: filtered
                .iter()
                .map(|o| o.country.as_str())
                .collect::<BTreeSet<_>>()
                .len(),
            years_selected: spec.years_selected(),
            year_min: spec.year_min(),
            year_max: spec.year_max(),
        }
    }
}
