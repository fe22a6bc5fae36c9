//! Output formatting and persistence for aggregated tables.
//!
//! Supports debug pretty-printing, JSON to stdout or a file, and CSV export
//! of aggregate buckets.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info};

use crate::analyzers::types::{AggregateBucket, BucketRow};
use csv::WriterBuilder;

/// Logs any value using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Writes `value` as pretty-printed JSON to `path`, or to stdout when `path`
/// is `None`.
pub fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            info!(path, "JSON written");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, value)?;
            lock.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Writes buckets as CSV rows to `path`, replacing any existing file.
///
/// Undefined rates are written as empty cells.
pub fn write_buckets_csv(path: &str, buckets: &[AggregateBucket]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for bucket in buckets {
        writer.serialize(BucketRow::from(bucket))?;
    }
    writer.flush()?;

    info!(path, rows = buckets.len(), "CSV written");
    Ok(())
}
