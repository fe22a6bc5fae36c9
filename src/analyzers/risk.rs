use crate::analyzers::types::RiskLevel;
use crate::error::{Error, Result};

/// Converts a rate per 100k into a risk category.
///
/// | Range             | Level    |
/// |-------------------|----------|
/// | > 30              | CRISIS   |
/// | > 20 and <= 30    | HIGH     |
/// | > 10 and <= 20    | ELEVATED |
/// | <= 10             | MODERATE |
///
/// # Errors
///
/// NaN has no risk level and returns [`Error::InvalidArgument`].
pub fn classify_risk(rate_per_100k: f64) -> Result<RiskLevel> {
    match rate_per_100k {
        r if r.is_nan() => Err(Error::invalid("cannot classify risk of an undefined rate")),
        r if r > 30.0 => Ok(RiskLevel::Crisis),
        r if r > 20.0 => Ok(RiskLevel::High),
        r if r > 10.0 => Ok(RiskLevel::Elevated),
        _ => Ok(RiskLevel::Moderate),
    }
}

/// Three-tier label shown under the headline average rate.
pub fn headline_label(avg_rate: f64) -> &'static str {
    match avg_rate {
        r if r.is_nan() => "NO DATA",
        r if r > 20.0 => "HIGH RISK",
        r if r > 10.0 => "MODERATE",
        _ => "LOW RISK",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_boundaries() {
        assert_eq!(classify_risk(31.0).unwrap(), RiskLevel::Crisis);
        assert_eq!(classify_risk(30.01).unwrap(), RiskLevel::Crisis);
        assert_eq!(classify_risk(30.0).unwrap(), RiskLevel::High);
        assert_eq!(classify_risk(20.01).unwrap(), RiskLevel::High);
        assert_eq!(classify_risk(20.0).unwrap(), RiskLevel::Elevated);
        assert_eq!(classify_risk(10.01).unwrap(), RiskLevel::Elevated);
        assert_eq!(classify_risk(10.0).unwrap(), RiskLevel::Moderate);
        assert_eq!(classify_risk(0.0).unwrap(), RiskLevel::Moderate);
    }

    #[test]
    fn test_risk_nan_is_invalid() {
        assert!(matches!(classify_risk(f64::NAN), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_risk_infinite_rate_is_crisis() {
        assert_eq!(classify_risk(f64::INFINITY).unwrap(), RiskLevel::Crisis);
    }

    #[test]
    fn test_headline_label() {
        assert_eq!(headline_label(25.0), "HIGH RISK");
        assert_eq!(headline_label(20.0), "MODERATE");
        assert_eq!(headline_label(10.0), "LOW RISK");
        assert_eq!(headline_label(f64::NAN), "NO DATA");
    }
}
