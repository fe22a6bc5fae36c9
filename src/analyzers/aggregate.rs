use crate::analyzers::income::IncomeBands;
use crate::analyzers::types::{AggregateBucket, GroupKey, GroupValue, group_value};
use crate::analyzers::utility::rate_per_100k;
use crate::error::{Error, Result};
use crate::observation::Observation;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Default)]
struct Totals {
    suicides: u64,
    population: u64,
    gdp_sum: f64,
    rows: usize,
}

/// Groups `observations` by `group_keys` using the default income bands.
///
/// See [`aggregate_with`].
pub fn aggregate(observations: &[Observation], group_keys: &[GroupKey]) -> Result<Vec<AggregateBucket>> {
    aggregate_with(observations, group_keys, &IncomeBands::default())
}

/// Groups `observations` by the distinct tuple of `group_keys` values and
/// sums suicides and population per group.
///
/// Buckets come back ordered by key tuple; enumeration keys compare in
/// canonical order. A group with zero population gets a NaN rate.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `group_keys` is empty, or if
/// grouping by income level meets a negative GDP.
pub fn aggregate_with(
    observations: &[Observation],
    group_keys: &[GroupKey],
    bands: &IncomeBands,
) -> Result<Vec<AggregateBucket>> {
    if group_keys.is_empty() {
        return Err(Error::invalid("at least one group key is required"));
    }
    let needs_income = group_keys.contains(&GroupKey::IncomeLevel);

    let mut groups: BTreeMap<Vec<GroupValue>, Totals> = BTreeMap::new();

    for obs in observations {
        let income = if needs_income {
            Some(bands.classify(obs.gdp_per_capita)?)
        } else {
            None
        };

        let key = group_keys
            .iter()
            .filter_map(|k| group_value(obs, *k, income))
            .collect::<Vec<_>>();

        let totals = groups.entry(key).or_default();
        totals.suicides += obs.suicides_count;
        totals.population += obs.population;
        totals.gdp_sum += obs.gdp_per_capita;
        totals.rows += 1;
    }

    Ok(groups
        .into_iter()
        .map(|(key, t)| AggregateBucket {
            key,
            total_suicides: t.suicides,
            total_population: t.population,
            rate_per_100k: rate_per_100k(t.suicides, t.population),
            mean_gdp_per_capita: t.gdp_sum / t.rows as f64,
            rows: t.rows,
        })
        .collect())
}

/// Orders rates descending with NaN after every defined rate.
pub(crate) fn by_rate_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Returns the `n` buckets with the highest rate, descending. Ties keep
/// their input order.
pub fn top_n_by_rate(buckets: &[AggregateBucket], n: usize) -> Vec<AggregateBucket> {
    let mut ranked = buckets.to_vec();
    ranked.sort_by(|a, b| by_rate_desc(a.rate_per_100k, b.rate_per_100k));
    ranked.truncate(n);
    ranked
}
