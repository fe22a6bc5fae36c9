//! Filter-and-aggregate pipeline.
//!
//! Raw observations are filtered by a [`filter::FilterSpec`], grouped into
//! [`types::AggregateBucket`]s with a rate per 100k, ranked, and classified
//! into income and risk bands. [`views`] and [`report`] assemble the tables
//! a dashboard renders.

pub mod aggregate;
pub mod filter;
pub mod income;
pub mod report;
pub mod risk;
pub mod types;
pub mod utility;
pub mod views;

pub use aggregate::{aggregate, aggregate_with, top_n_by_rate};
pub use filter::{CountrySelection, FilterSpec, filter};
pub use income::{IncomeBands, IncomeScheme, classify_income};
pub use risk::classify_risk;
pub use types::{AggregateBucket, GroupKey, GroupValue, IncomeLevel, RiskLevel};
