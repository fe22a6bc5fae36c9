/// Computes the arithmetic mean of a slice of values. Returns NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Suicides per 100,000 population. Returns NaN when `population` is zero.
pub fn rate_per_100k(suicides: u64, population: u64) -> f64 {
    if population == 0 {
        return f64::NAN;
    }
    suicides as f64 / population as f64 * 100_000.0
}
