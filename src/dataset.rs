//! The loaded dataset and the filter options it offers a presentation layer.

use std::collections::BTreeSet;
use tracing::info;

use crate::error::Result;
use crate::observation::{Observation, Sex};
use crate::parser::load_observations;

/// Sentinel shown ahead of the country list meaning "no country restriction".
pub const ALL_COUNTRIES: &str = "All";

/// Observations loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    source: String,
    observations: Vec<Observation>,
}

impl Dataset {
    #[tracing::instrument]
    pub fn load(path: &str) -> Result<Self> {
        let observations = load_observations(path)?;
        info!(rows = observations.len(), "Dataset loaded");
        Ok(Self {
            source: path.to_string(),
            observations,
        })
    }

    pub fn from_observations(source: &str, observations: Vec<Observation>) -> Self {
        Self {
            source: source.to_string(),
            observations,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Distinct countries, sorted, optionally preceded by [`ALL_COUNTRIES`].
    pub fn countries(&self, with_all_sentinel: bool) -> Vec<String> {
        let distinct: BTreeSet<&str> = self
            .observations
            .iter()
            .map(|o| o.country.as_str())
            .collect();

        let mut out = Vec::with_capacity(distinct.len() + 1);
        if with_all_sentinel {
            out.push(ALL_COUNTRIES.to_string());
        }
        out.extend(distinct.into_iter().map(str::to_string));
        out
    }

    /// Inclusive `(min, max)` year bounds, `None` for an empty dataset.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.observations.iter().map(|o| o.year).min()?;
        let max = self.observations.iter().map(|o| o.year).max()?;
        Some((min, max))
    }

    /// Sex values present in the data, in canonical order.
    pub fn sexes(&self) -> Vec<Sex> {
        let present: BTreeSet<Sex> = self.observations.iter().map(|o| o.sex).collect();
        present.into_iter().collect()
    }
}
