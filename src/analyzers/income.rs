//! GDP-per-capita income banding.
//!
//! Band boundaries are configuration. Two schemes have been used by the
//! dashboard over time; [`IncomeBands::DASHBOARD`] is the default.

use serde::Serialize;

use crate::analyzers::types::IncomeLevel;
use crate::error::{Error, Result};

/// Upper bounds (exclusive) of the three lower income bands, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IncomeBands {
    pub low_below: f64,
    pub lower_middle_below: f64,
    pub upper_middle_below: f64,
}

impl IncomeBands {
    /// `[0, 3000)`, `[3000, 9000)`, `[9000, 25000)`, `[25000, ∞)`.
    pub const DASHBOARD: IncomeBands = IncomeBands {
        low_below: 3_000.0,
        lower_middle_below: 9_000.0,
        upper_middle_below: 25_000.0,
    };

    /// `[0, 1000)`, `[1000, 4000)`, `[4000, 12000)`, `[12000, ∞)`.
    pub const LEGACY: IncomeBands = IncomeBands {
        low_below: 1_000.0,
        lower_middle_below: 4_000.0,
        upper_middle_below: 12_000.0,
    };

    /// Builds a custom scheme.
    ///
    /// # Errors
    ///
    /// Boundaries must be finite, non-negative and strictly ascending.
    pub fn new(low_below: f64, lower_middle_below: f64, upper_middle_below: f64) -> Result<Self> {
        let bounds = [low_below, lower_middle_below, upper_middle_below];
        if bounds.iter().any(|b| !b.is_finite() || *b < 0.0) {
            return Err(Error::invalid(format!(
                "income band boundaries must be finite and non-negative: {bounds:?}"
            )));
        }
        if !(low_below < lower_middle_below && lower_middle_below < upper_middle_below) {
            return Err(Error::invalid(format!(
                "income band boundaries must be strictly ascending: {bounds:?}"
            )));
        }
        Ok(Self {
            low_below,
            lower_middle_below,
            upper_middle_below,
        })
    }

    /// Places `gdp_per_capita` into exactly one band.
    ///
    /// # Errors
    ///
    /// Negative or NaN input returns [`Error::InvalidArgument`].
    pub fn classify(&self, gdp_per_capita: f64) -> Result<IncomeLevel> {
        match gdp_per_capita {
            g if g.is_nan() || g < 0.0 => Err(Error::invalid(format!(
                "GDP per capita must be non-negative, got {g}"
            ))),
            g if g < self.low_below => Ok(IncomeLevel::Low),
            g if g < self.lower_middle_below => Ok(IncomeLevel::LowerMiddle),
            g if g < self.upper_middle_below => Ok(IncomeLevel::UpperMiddle),
            _ => Ok(IncomeLevel::High),
        }
    }
}

impl Default for IncomeBands {
    fn default() -> Self {
        IncomeBands::DASHBOARD
    }
}

/// Named selection between the known band schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncomeScheme {
    #[default]
    Dashboard,
    Legacy,
}

impl IncomeScheme {
    pub fn bands(self) -> IncomeBands {
        match self {
            IncomeScheme::Dashboard => IncomeBands::DASHBOARD,
            IncomeScheme::Legacy => IncomeBands::LEGACY,
        }
    }
}

/// Classifies with the default [`IncomeBands::DASHBOARD`] scheme.
pub fn classify_income(gdp_per_capita: f64) -> Result<IncomeLevel> {
    IncomeBands::default().classify(gdp_per_capita)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_boundaries() {
        assert_eq!(classify_income(0.0).unwrap(), IncomeLevel::Low);
        assert_eq!(classify_income(2_999.99).unwrap(), IncomeLevel::Low);
        assert_eq!(classify_income(3_000.0).unwrap(), IncomeLevel::LowerMiddle);
        assert_eq!(classify_income(8_999.0).unwrap(), IncomeLevel::LowerMiddle);
        assert_eq!(classify_income(9_000.0).unwrap(), IncomeLevel::UpperMiddle);
        assert_eq!(classify_income(25_000.0).unwrap(), IncomeLevel::High);
        assert_eq!(classify_income(1.0e9).unwrap(), IncomeLevel::High);
    }

    #[test]
    fn test_legacy_boundaries() {
        let bands = IncomeScheme::Legacy.bands();
        assert_eq!(bands.classify(999.0).unwrap(), IncomeLevel::Low);
        assert_eq!(bands.classify(1_000.0).unwrap(), IncomeLevel::LowerMiddle);
        assert_eq!(bands.classify(4_000.0).unwrap(), IncomeLevel::UpperMiddle);
        assert_eq!(bands.classify(12_000.0).unwrap(), IncomeLevel::High);
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(matches!(classify_income(-0.01), Err(Error::InvalidArgument(_))));
        assert!(matches!(classify_income(f64::NAN), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_bands_are_monotonic_and_total() {
        // every input lands in exactly one band, and bands never go down as GDP rises
        let mut previous = IncomeLevel::Low;
        for step in 0..4_000 {
            let gdp = step as f64 * 10.0;
            let level = classify_income(gdp).unwrap();
            assert!(level >= previous, "band decreased at {gdp}");
            previous = level;
        }
        assert_eq!(previous, IncomeLevel::High);
    }

    #[test]
    fn test_custom_bands_validated() {
        assert!(IncomeBands::new(100.0, 200.0, 300.0).is_ok());
        assert!(IncomeBands::new(300.0, 200.0, 100.0).is_err());
        assert!(IncomeBands::new(-1.0, 200.0, 300.0).is_err());
        assert!(IncomeBands::new(100.0, 100.0, 300.0).is_err());
        assert!(IncomeBands::new(100.0, 200.0, f64::INFINITY).is_err());
    }
}
