//! Report rendering - the fixed-width out-performance table
//!
//! Six right-justified columns in widths {15,15,15,20,15,15}, separated
//! by single spaces: a title row, a dash row, then one line per
//! performance row in the order handed over by the analyser.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::Performance;
use crate::utils::format_default_date;

/// Report file name used when the caller does not supply one
pub const DEFAULT_REPORT_NAME: &str = "monthlyOutPerformance.csv";

fn format_row(
    fund_name: &str,
    date: &str,
    excess: &str,
    out_performance: &str,
    returns: &str,
    rank: &str,
) -> String {
    format!(
        "{:>15} {:>15} {:>15} {:>20} {:>15} {:>15}",
        fund_name, date, excess, out_performance, returns, rank
    )
}

fn header() -> String {
    let titles = format_row("FundName", "Date", "Excess", "OutPerformance", "Return", "Rank");
    let rule = format_row(
        "------------",
        "-----------",
        "----------",
        "---------------",
        "----------",
        "--------",
    );
    format!("{}\n{}\n", titles, rule)
}

fn render_line(performance: &Performance) -> String {
    let mut line = format_row(
        &performance.fund_name,
        &format_default_date(performance.date),
        &format!("{:.2}", performance.excess),
        performance.classification,
        &format!("{:.2}", performance.returns),
        &performance.rank.to_string(),
    );
    line.push('\n');
    line
}

/// Render the complete report as a single string.
pub fn render_report(performances: &[Performance]) -> String {
    let mut output = header();
    for performance in performances {
        output.push_str(&render_line(performance));
    }
    output
}

/// Write the rendered report into `destination_dir`, using
/// `file_name` or [`DEFAULT_REPORT_NAME`]. Returns the written path.
pub fn write_report(
    performances: &[Performance],
    destination_dir: &Path,
    file_name: Option<&str>,
) -> Result<PathBuf> {
    let path = destination_dir.join(file_name.unwrap_or(DEFAULT_REPORT_NAME));
    info!("writing report to {}", path.display());

    fs::write(&path, render_report(performances))
        .with_context(|| format!("unable to write file {}", path.display()))?;

    Ok(path)
}
