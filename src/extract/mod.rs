//! Record extraction - typed records from raw CSV rows
//!
//! Three independent parsers turn headerless comma-separated rows into
//! the fund map, the fund return series and the benchmark return map.
//! Rows with the wrong field count are skipped; a date or decimal that
//! fails to parse once the field count matches aborts the run.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::models::{Benchmark, Fund, ReturnKind, ReturnRecord};
use crate::utils::parse_default_date;

/// Run the CSV reader over pre-read lines, yielding one record per row.
///
/// Inputs are headerless and rows may legitimately vary in width, so
/// the reader is flexible; field-count policy is applied per parser.
fn raw_records(lines: &[String]) -> Result<Vec<StringRecord>> {
    let joined = lines.join("\n");
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(joined.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result.context("failed to read CSV record")?);
    }
    Ok(records)
}

/// Extract fund reference data from `code,name,benchmarkCode` rows.
///
/// Returns a map keyed by fund code; a later row with the same code
/// overwrites the earlier entry.
pub fn extract_funds(lines: &[String]) -> Result<HashMap<String, Fund>> {
    let mut funds = HashMap::new();

    for record in raw_records(lines)? {
        if record.len() != 3 {
            warn!("skipping fund row with {} fields: {:?}", record.len(), record);
            continue;
        }
        let fund = Fund {
            code: record[0].to_string(),
            name: record[1].to_string(),
            benchmark_code: record[2].to_string(),
        };
        funds.insert(fund.code.clone(), fund);
    }

    debug!("extracted {} funds", funds.len());
    Ok(funds)
}

/// Extract benchmark reference data from `code,name` rows.
///
/// Not consulted by the date join; parsed for completeness when a
/// benchmark file is supplied. Exact duplicate rows collapse to one.
pub fn extract_benchmarks(lines: &[String]) -> Result<Vec<Benchmark>> {
    let mut benchmarks: Vec<Benchmark> = Vec::new();

    for record in raw_records(lines)? {
        if record.len() != 2 {
            warn!(
                "skipping benchmark row with {} fields: {:?}",
                record.len(),
                record
            );
            continue;
        }
        let benchmark = Benchmark {
            code: record[0].to_string(),
            name: record[1].to_string(),
        };
        if !benchmarks.contains(&benchmark) {
            benchmarks.push(benchmark);
        }
    }

    debug!("extracted {} benchmarks", benchmarks.len());
    Ok(benchmarks)
}

/// Extract the fund return series from `code,date,return` rows.
///
/// The result is sorted by date descending; rows sharing a date keep
/// their input order (stable sort).
pub fn extract_fund_returns(lines: &[String]) -> Result<Vec<ReturnRecord>> {
    let mut returns = Vec::new();

    for record in raw_records(lines)? {
        if record.len() != 3 {
            warn!(
                "skipping fund return row with {} fields: {:?}",
                record.len(),
                record
            );
            continue;
        }
        returns.push(parse_return_record(&record, ReturnKind::Fund)?);
    }

    returns.sort_by(|a, b| b.date.cmp(&a.date));

    debug!("extracted {} fund returns", returns.len());
    Ok(returns)
}

/// Extract benchmark returns from `code,date,return` rows into a map
/// keyed by date. One benchmark return is assumed per date; a later
/// row for the same date silently replaces the earlier one.
pub fn extract_benchmark_returns(lines: &[String]) -> Result<BTreeMap<NaiveDate, ReturnRecord>> {
    let mut returns = BTreeMap::new();

    for record in raw_records(lines)? {
        if record.len() != 3 {
            warn!(
                "skipping benchmark return row with {} fields: {:?}",
                record.len(),
                record
            );
            continue;
        }
        let benchmark_return = parse_return_record(&record, ReturnKind::Benchmark)?;
        returns.insert(benchmark_return.date, benchmark_return);
    }

    debug!("extracted {} benchmark returns", returns.len());
    Ok(returns)
}

/// Parse one `code,date,return` record. Date and decimal failures are
/// fatal here: a row that matched the field count is expected to be
/// well formed.
fn parse_return_record(record: &StringRecord, kind: ReturnKind) -> Result<ReturnRecord> {
    let date = parse_default_date(&record[1])?;
    let value = Decimal::from_str(&record[2])
        .with_context(|| format!("unable to parse decimal: {}", &record[2]))?;

    Ok(ReturnRecord {
        kind,
        code: record[0].to_string(),
        date,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lines(rows: &[&str]) -> Vec<String> {
        rows.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_extract_funds() {
        let funds = extract_funds(&lines(&[
            "F1,Alpha Fund,BM1",
            "F2,Beta Fund,BM2",
        ]))
        .unwrap();
        assert_eq!(funds.len(), 2);
        assert_eq!(funds["F1"].name, "Alpha Fund");
        assert_eq!(funds["F2"].benchmark_code, "BM2");
    }

    #[test]
    fn test_extract_funds_skips_wrong_field_count() {
        let funds = extract_funds(&lines(&[
            "F1,Alpha Fund,BM1",
            "F2,Beta Fund",
            "F3,Gamma Fund,BM3,extra",
        ]))
        .unwrap();
        assert_eq!(funds.len(), 1);
        assert!(funds.contains_key("F1"));
    }

    #[test]
    fn test_extract_funds_later_duplicate_wins() {
        let funds = extract_funds(&lines(&[
            "F1,Alpha Fund,BM1",
            "F1,Alpha Fund Renamed,BM9",
        ]))
        .unwrap();
        assert_eq!(funds.len(), 1);
        assert_eq!(funds["F1"].name, "Alpha Fund Renamed");
        assert_eq!(funds["F1"].benchmark_code, "BM9");
    }

    #[test]
    fn test_extract_funds_trims_fields() {
        let funds = extract_funds(&lines(&[" F1 , Alpha Fund , BM1 "])).unwrap();
        assert_eq!(funds["F1"].name, "Alpha Fund");
    }

    #[test]
    fn test_extract_benchmarks() {
        let benchmarks = extract_benchmarks(&lines(&[
            "BM1,FTSE 100",
            "BM2,S&P 500",
            "BM1,FTSE 100",
            "F1,skipped,row",
        ]))
        .unwrap();
        assert_eq!(benchmarks.len(), 2);
        assert_eq!(benchmarks[0].code, "BM1");
        assert_eq!(benchmarks[1].name, "S&P 500");
    }

    #[test]
    fn test_extract_fund_returns_sorted_date_descending() {
        let returns = extract_fund_returns(&lines(&[
            "F1,01/01/2016,1.5",
            "F2,01/03/2016,2.5",
            "F3,01/02/2016,3.5",
        ]))
        .unwrap();
        assert_eq!(returns.len(), 3);
        assert_eq!(returns[0].code, "F2");
        assert_eq!(returns[1].code, "F3");
        assert_eq!(returns[2].code, "F1");
        assert!(returns.iter().all(|r| r.kind == ReturnKind::Fund));
    }

    #[test]
    fn test_extract_fund_returns_stable_on_equal_dates() {
        let returns = extract_fund_returns(&lines(&[
            "F1,01/02/2016,1.0",
            "F2,01/02/2016,2.0",
            "F3,01/02/2016,3.0",
        ]))
        .unwrap();
        let codes: Vec<&str> = returns.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["F1", "F2", "F3"]);
    }

    #[test]
    fn test_extract_fund_returns_skips_wrong_field_count() {
        let returns = extract_fund_returns(&lines(&[
            "F1,01/02/2016,1.0",
            "F2,01/02/2016",
        ]))
        .unwrap();
        assert_eq!(returns.len(), 1);
    }

    #[test]
    fn test_extract_fund_returns_bad_date_is_fatal() {
        let result = extract_fund_returns(&lines(&["F1,02/June/2016,1.0"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_fund_returns_bad_decimal_is_fatal() {
        let result = extract_fund_returns(&lines(&["F1,01/02/2016,abc"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_benchmark_returns_keyed_by_date() {
        let returns = extract_benchmark_returns(&lines(&[
            "BM1,01/02/2016,2.00",
            "BM1,01/03/2016,3.00",
        ]))
        .unwrap();
        assert_eq!(returns.len(), 2);
        let feb = NaiveDate::from_ymd_opt(2016, 2, 1).unwrap();
        assert_eq!(returns[&feb].value, dec!(2.00));
        assert_eq!(returns[&feb].kind, ReturnKind::Benchmark);
    }

    #[test]
    fn test_extract_benchmark_returns_last_duplicate_wins() {
        let returns = extract_benchmark_returns(&lines(&[
            "BM1,01/02/2016,2.00",
            "BM1,01/02/2016,4.00",
        ]))
        .unwrap();
        assert_eq!(returns.len(), 1);
        let feb = NaiveDate::from_ymd_opt(2016, 2, 1).unwrap();
        assert_eq!(returns[&feb].value, dec!(4.00));
    }

    #[test]
    fn test_empty_input_yields_empty_collections() {
        assert!(extract_funds(&[]).unwrap().is_empty());
        assert!(extract_fund_returns(&[]).unwrap().is_empty());
        assert!(extract_benchmark_returns(&[]).unwrap().is_empty());
    }
}
