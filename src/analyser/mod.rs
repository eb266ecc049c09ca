//! Out-performance analyser - the excess/ranking pipeline
//!
//! Joins fund returns against benchmark returns by date, computes
//! excess and classification per pair, buckets the results by period,
//! ranks each bucket and flattens everything into a single report
//! ordered newest period first, rank ascending within a period.

pub mod excess;
pub mod rank;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::AnalyserError;
use crate::extract;
use crate::models::{Fund, Performance, ReturnRecord};
use crate::reports;
use crate::utils::{read_file_lines, round_to_two_scale};

/// A written report: where it landed and the rows it contains, in
/// output order.
#[derive(Debug)]
pub struct GeneratedReport {
    pub path: PathBuf,
    pub rows: Vec<Performance>,
}

/// Analyser over the four input files. The benchmark reference file is
/// optional; the join only needs benchmark returns.
pub struct OutPerformanceAnalyser {
    fund_csv: PathBuf,
    benchmark_csv: Option<PathBuf>,
    fund_return_csv: PathBuf,
    benchmark_return_csv: PathBuf,
}

impl OutPerformanceAnalyser {
    pub fn new(
        fund_csv: impl Into<PathBuf>,
        benchmark_csv: Option<PathBuf>,
        fund_return_csv: impl Into<PathBuf>,
        benchmark_return_csv: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fund_csv: fund_csv.into(),
            benchmark_csv,
            fund_return_csv: fund_return_csv.into(),
            benchmark_return_csv: benchmark_return_csv.into(),
        }
    }

    /// Run the full pipeline and write the report into
    /// `destination_dir`, named `output_file_name` or the default.
    ///
    /// Configuration problems (missing directory, non-CSV name) fail
    /// before any input is read; nothing is written on error.
    pub fn generate_monthly_out_performance(
        &self,
        destination_dir: &Path,
        output_file_name: Option<&str>,
    ) -> Result<GeneratedReport> {
        if !destination_dir.is_dir() {
            return Err(AnalyserError::InvalidArgument(format!(
                "destination directory does not exist: {}",
                destination_dir.display()
            ))
            .into());
        }
        if !crate::utils::is_valid_report_name(output_file_name) {
            return Err(AnalyserError::InvalidArgument(format!(
                "not a valid CSV file name: {}",
                output_file_name.unwrap_or_default()
            ))
            .into());
        }

        let rows = self.analyse()?;
        let path = reports::write_report(&rows, destination_dir, output_file_name)?;

        info!("wrote {} performance rows to {}", rows.len(), path.display());
        Ok(GeneratedReport { path, rows })
    }

    /// Run extraction, join, ranking and assembly, returning the rows
    /// in final report order without writing anything.
    pub fn analyse(&self) -> Result<Vec<Performance>> {
        let fund_map = extract::extract_funds(&read_file_lines(&self.fund_csv)?)
            .context("failed to extract fund data")?;

        // Benchmark reference data is parsed when supplied but the
        // join works purely off benchmark returns.
        if let Some(path) = &self.benchmark_csv {
            let benchmarks = extract::extract_benchmarks(&read_file_lines(path)?)
                .context("failed to extract benchmark data")?;
            debug!("loaded {} benchmark definitions", benchmarks.len());
        }

        let fund_returns = extract::extract_fund_returns(&read_file_lines(&self.fund_return_csv)?)
            .context("failed to extract fund returns")?;

        let benchmark_returns =
            extract::extract_benchmark_returns(&read_file_lines(&self.benchmark_return_csv)?)
                .context("failed to extract benchmark returns")?;

        let mut buckets = aggregate_performance(fund_returns, &benchmark_returns, &fund_map)?;
        Ok(assemble_report(&mut buckets))
    }
}

/// Join each fund return to the benchmark return for the same date and
/// bucket the resulting performance rows by period.
///
/// A fund return with no benchmark return on its date is dropped; a
/// fund return whose code is missing from the fund map aborts the run.
/// Benchmark coverage may be sparse, fund reference data may not.
pub fn aggregate_performance(
    fund_returns: Vec<ReturnRecord>,
    benchmark_returns: &BTreeMap<NaiveDate, ReturnRecord>,
    fund_map: &HashMap<String, Fund>,
) -> Result<BTreeMap<NaiveDate, Vec<Performance>>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Performance>> = BTreeMap::new();

    for fund_return in fund_returns {
        let Some(benchmark_return) = benchmark_returns.get(&fund_return.date) else {
            debug!(
                "no benchmark return on {}, dropping fund return for {}",
                fund_return.date, fund_return.code
            );
            continue;
        };

        let fund = fund_map
            .get(&fund_return.code)
            .ok_or_else(|| AnalyserError::MissingFund(fund_return.code.clone()))?;

        let excess = excess::compute_excess(fund_return.value, benchmark_return.value);

        buckets.entry(fund_return.date).or_default().push(Performance {
            fund_name: fund.name.clone(),
            date: fund_return.date,
            excess,
            classification: excess::classify(excess),
            returns: round_to_two_scale(fund_return.value),
            rank: 0,
        });
    }

    Ok(buckets)
}

/// Rank every bucket and flatten the map into the final ordering:
/// dates newest first, ranks ascending within each date.
pub fn assemble_report(buckets: &mut BTreeMap<NaiveDate, Vec<Performance>>) -> Vec<Performance> {
    let mut report = Vec::new();

    for bucket in buckets.values_mut().rev() {
        rank::rank_bucket(bucket);
        report.append(bucket);
    }

    report
}
