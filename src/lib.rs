pub mod analyzers;
pub mod auth;
pub mod dataset;
pub mod error;
pub mod observation;
pub mod output;
pub mod parser;
pub mod stats;
