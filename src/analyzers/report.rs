use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::filter::{FilterSpec, filter};
use crate::analyzers::income::IncomeBands;
use crate::analyzers::types::{AggregateBucket, EconomicPoint, FilterOptions, GenderGapPoint, TopCountry};
use crate::analyzers::views::{
    EconomicView, TOP_COUNTRY_LIMIT, age_by_sex, country_rates, economic_points, gender_gap,
    top_countries,
};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::observation::{AgeGroup, Generation};
use crate::stats::KeyMetrics;

/// Every table the dashboard renders for one filter selection.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub filter: FilterSpec,
    pub income_bands: IncomeBands,
    pub metrics: KeyMetrics,
    pub age_by_sex: Vec<AggregateBucket>,
    pub countries: Vec<AggregateBucket>,
    pub gender_gap: Vec<GenderGapPoint>,
    pub economic_view: EconomicView,
    pub economic: Vec<EconomicPoint>,
    pub top_countries: Vec<TopCountry>,
}

impl DashboardReport {
    /// Filters `dataset` with `spec` and computes every view from the result.
    pub fn build(
        dataset: &Dataset,
        spec: &FilterSpec,
        bands: &IncomeBands,
        view: EconomicView,
    ) -> Result<Self> {
        let filtered = filter(dataset.observations(), spec);
        debug!(
            total = dataset.observations().len(),
            matched = filtered.len(),
            "Observations filtered"
        );

        let report = DashboardReport {
            generated_at: Utc::now(),
            source: dataset.source().to_string(),
            filter: spec.clone(),
            income_bands: *bands,
            metrics: KeyMetrics::from_observations(&filtered, spec),
            age_by_sex: age_by_sex(&filtered)?,
            countries: country_rates(&filtered)?,
            gender_gap: gender_gap(&filtered)?,
            economic_view: view,
            economic: economic_points(&filtered, view, spec.countries(), bands)?,
            top_countries: top_countries(&filtered, TOP_COUNTRY_LIMIT)?,
        };

        info!(
            matched = filtered.len(),
            countries = report.countries.len(),
            "Dashboard report built"
        );
        Ok(report)
    }
}

/// Filter choices offered for `dataset`.
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    let bounds = dataset.year_bounds();
    FilterOptions {
        countries: dataset.countries(true),
        year_min: bounds.map(|(min, _)| min),
        year_max: bounds.map(|(_, max)| max),
        sexes: dataset.sexes(),
        age_groups: AgeGroup::ORDERED.to_vec(),
        generations: Generation::ORDERED.to_vec(),
    }
}
