//! CSV parser for the suicide statistics dataset.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::observation::{AgeGroup, Generation, Observation, Sex};

/// A row exactly as it appears in the source file. Header names are matched
/// verbatim, including case and spacing.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Sex")]
    sex: String,
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "Generation")]
    generation: String,
    #[serde(rename = "Suicides Count")]
    suicides_count: u64,
    #[serde(rename = "Population")]
    population: u64,
    #[serde(rename = "Suicides/100K Population")]
    suicides_per_100k: f64,
    #[serde(rename = "GDP Per Capita ($)")]
    gdp_per_capita: f64,
}

/// Column names a source file must carry, in file order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Country",
    "Year",
    "Sex",
    "Age",
    "Generation",
    "Suicides Count",
    "Population",
    "Suicides/100K Population",
    "GDP Per Capita ($)",
];

impl RawRow {
    fn normalize(self) -> std::result::Result<Observation, String> {
        let country = self.country.trim().to_string();
        if country.is_empty() {
            return Err("empty country".to_string());
        }
        let sex: Sex = self.sex.parse().map_err(|e: Error| e.to_string())?;
        if self.gdp_per_capita.is_nan() || self.gdp_per_capita < 0.0 {
            return Err(format!("invalid GDP per capita: {}", self.gdp_per_capita));
        }

        Ok(Observation {
            country,
            year: self.year,
            sex,
            age_group: AgeGroup::from_label(&self.age),
            generation: Generation::from_label(&self.generation),
            suicides_count: self.suicides_count,
            population: self.population,
            suicides_per_100k: self.suicides_per_100k,
            gdp_per_capita: self.gdp_per_capita,
        })
    }
}

/// Decodes observations from CSV text read from `reader`.
///
/// `source` names the input in error messages.
///
/// # Errors
///
/// Returns [`Error::DataSourceUnavailable`] if a required column is missing or
/// any row fails to parse or validate. No partial result is returned.
pub fn parse_observations<R: Read>(reader: R, source: &str) -> Result<Vec<Observation>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| Error::unavailable(source, e))?;
    if headers.is_empty() {
        return Err(Error::unavailable(source, "empty file, no header row"));
    }
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .collect();
    if !missing.is_empty() {
        return Err(Error::unavailable(
            source,
            format!("missing column(s): {}", missing.join(", ")),
        ));
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        // header is line 1
        let line = idx + 2;
        let raw = result.map_err(|e| Error::unavailable(source, e))?;
        let obs = raw
            .normalize()
            .map_err(|reason| Error::unavailable(source, format!("line {line}: {reason}")))?;
        rows.push(obs);
    }

    let unclassified_age = rows
        .iter()
        .filter(|o| o.age_group == AgeGroup::Unclassified)
        .count();
    let unclassified_generation = rows
        .iter()
        .filter(|o| o.generation == Generation::Unclassified)
        .count();
    if unclassified_age > 0 || unclassified_generation > 0 {
        warn!(
            source,
            unclassified_age,
            unclassified_generation,
            "Rows with unrecognized categories assigned to Unclassified"
        );
    }

    debug!(source, rows = rows.len(), "CSV parsed");
    Ok(rows)
}

/// Opens and parses the CSV file at `path`.
///
/// # Errors
///
/// Returns [`Error::DataSourceUnavailable`] if the file cannot be opened or
/// its contents fail to parse.
pub fn load_observations(path: &str) -> Result<Vec<Observation>> {
    let file = File::open(path).map_err(|e| Error::unavailable(path, e))?;
    parse_observations(file, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Country,Year,Sex,Age,Generation,Suicides Count,Population,Suicides/100K Population,GDP Per Capita ($)\n";

    fn parse(body: &str) -> Result<Vec<Observation>> {
        let text = format!("{HEADER}{body}");
        parse_observations(text.as_bytes(), "test.csv")
    }

    #[test]
    fn test_parse_header_only_is_empty() {
        let rows = parse("").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_valid_row() {
        let rows = parse("Albania,1987,male,15-24 years,Generation X,21,312900,6.71,796\n").unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.country, "Albania");
        assert_eq!(row.year, 1987);
        assert_eq!(row.sex, Sex::Male);
        assert_eq!(row.age_group, AgeGroup::Age15To24);
        assert_eq!(row.generation, Generation::GenerationX);
        assert_eq!(row.suicides_count, 21);
        assert_eq!(row.population, 312900);
        assert_eq!(row.gdp_per_capita, 796.0);
    }

    #[test]
    fn test_parse_normalizes_millenials() {
        let rows = parse("Albania,1995,female,5-14 years,Millenials,3,300000,1.0,1000\n").unwrap();
        assert_eq!(rows[0].generation, Generation::Millennials);
    }

    #[test]
    fn test_parse_keeps_unknown_age_as_unclassified() {
        let rows = parse("Albania,1995,female,0-4 years,Silent,3,300000,1.0,1000\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].age_group, AgeGroup::Unclassified);
    }

    #[test]
    fn test_parse_missing_column_fails() {
        let text = "Country,Year,Sex\nAlbania,1987,male\n";
        let result = parse_observations(text.as_bytes(), "short.csv");
        assert!(matches!(result, Err(Error::DataSourceUnavailable { .. })));
    }

    #[test]
    fn test_parse_wrong_header_without_rows_fails() {
        let err = parse_observations("Foo,Bar\n".as_bytes(), "bad.csv").unwrap_err();
        match err {
            Error::DataSourceUnavailable { path, reason } => {
                assert_eq!(path, "bad.csv");
                assert!(reason.contains("Country"));
                assert!(reason.contains("GDP Per Capita ($)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_file_fails() {
        let result = parse_observations("".as_bytes(), "empty.csv");
        assert!(matches!(result, Err(Error::DataSourceUnavailable { .. })));
    }

    #[test]
    fn test_parse_negative_gdp_fails_with_line() {
        let err = parse("Albania,1987,male,15-24 years,Silent,1,100,1.0,-5\n").unwrap_err();
        match err {
            Error::DataSourceUnavailable { path, reason } => {
                assert_eq!(path, "test.csv");
                assert!(reason.contains("line 2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_observations("/definitely/not/here/Suicide_dashboard.csv");
        assert!(matches!(result, Err(Error::DataSourceUnavailable { .. })));
    }
}
