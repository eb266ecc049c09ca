//! Data models for funds, benchmarks, return series and performance rows

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A fund as defined in the fund reference file.
///
/// `benchmark_code` links the fund to its benchmark; the join itself
/// matches return series by date, so only `name` is consulted when
/// building performance rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fund {
    pub code: String,
    pub name: String,
    pub benchmark_code: String,
}

/// Benchmark reference data (code and display name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benchmark {
    pub code: String,
    pub name: String,
}

/// Which series a return observation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Fund,
    Benchmark,
}

/// A single return observation: one value for one code on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRecord {
    pub kind: ReturnKind,
    pub code: String,
    pub date: NaiveDate,
    pub value: Decimal,
}

/// One row of the out-performance report.
///
/// `rank` starts at 0 (unassigned) and is written in place by the
/// ranker once the period bucket is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Performance {
    pub fund_name: String,
    pub date: NaiveDate,
    /// Excess over the benchmark, rounded to two places
    pub excess: Decimal,
    /// "Out Performed", "Under Performed" or the single-space placeholder
    pub classification: &'static str,
    /// The fund's raw return, rounded to two places
    pub returns: Decimal,
    pub rank: u32,
}
