//! Utility functions for rounding, dates, line reading and validation
//!
//! This module centralises the small conversions used throughout the
//! pipeline: round-half-down decimal rounding, `dd/mm/yyyy` date
//! handling, and input-file line reading.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Default date format for input and report dates (dd/mm/yyyy)
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Round a value to `scale` fractional digits using round-half-down
/// semantics: an exact half rounds toward zero, so 0.125 becomes 0.12
/// and -0.125 becomes -0.12.
pub fn round_to_scale(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointTowardZero)
}

/// Two-place specialisation of [`round_to_scale`], used for excess and
/// return values everywhere in the report.
pub fn round_to_two_scale(value: Decimal) -> Decimal {
    round_to_scale(value, 2)
}

/// Parse a date string with an explicit pattern.
///
/// Pure function: callers pass the pattern rather than sharing a
/// formatter instance, so concurrent use is safe.
pub fn parse_date(input: &str, pattern: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), pattern)
        .with_context(|| format!("unable to parse date: {}", input))
}

/// Parse a date in the default `dd/mm/yyyy` format.
pub fn parse_default_date(input: &str) -> Result<NaiveDate> {
    parse_date(input, DEFAULT_DATE_FORMAT)
}

/// Format a date with an explicit pattern.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    date.format(pattern).to_string()
}

/// Format a date in the default `dd/mm/yyyy` format.
pub fn format_default_date(date: NaiveDate) -> String {
    format_date(date, DEFAULT_DATE_FORMAT)
}

/// Read the non-blank lines of an input file.
///
/// A missing file is not an error: the run proceeds with an empty
/// dataset. Unreadable files propagate as IO errors.
pub fn read_file_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();

    if !path.exists() {
        warn!("{} does not exist, treating as empty input", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read file {}", path.display()))?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect())
}

/// Check whether a report file name is acceptable: absent means the
/// default will be used, otherwise the name must end in `.csv`.
pub fn is_valid_report_name(name: Option<&str>) -> bool {
    match name {
        None => true,
        Some(n) => n.ends_with(".csv"),
    }
}
