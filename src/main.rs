use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use fundperf::analyser::OutPerformanceAnalyser;
use fundperf::utils::format_default_date;

#[derive(Parser)]
#[command(name = "fundperf")]
#[command(version, about = "Fund vs benchmark out-performance analyser")]
#[command(
    long_about = "Joins fund return series against benchmark return series by date, \
computes excess returns, ranks funds within each period and writes a fixed-width \
out-performance report."
)]
struct Cli {
    /// Path to the fund CSV file (code,name,benchmarkCode)
    #[arg(long)]
    funds: PathBuf,

    /// Path to the benchmark CSV file (code,name); optional
    #[arg(long)]
    benchmarks: Option<PathBuf>,

    /// Path to the fund return series CSV (code,date,return)
    #[arg(long = "fund-returns")]
    fund_returns: PathBuf,

    /// Path to the benchmark return series CSV (code,date,return)
    #[arg(long = "benchmark-returns")]
    benchmark_returns: PathBuf,

    /// Destination directory for the report (must exist)
    #[arg(short, long, default_value = ".")]
    dest: PathBuf,

    /// Output report file name, must end in .csv (default: monthlyOutPerformance.csv)
    #[arg(short, long)]
    output: Option<String>,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color")]
    no_color: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("generating out-performance report into {:?}", cli.dest);

    let analyser = OutPerformanceAnalyser::new(
        cli.funds,
        cli.benchmarks,
        cli.fund_returns,
        cli.benchmark_returns,
    );

    let report = analyser.generate_monthly_out_performance(&cli.dest, cli.output.as_deref())?;

    println!(
        "\n{} Wrote {} performance rows to {}\n",
        "✓".green().bold(),
        report.rows.len(),
        report.path.display()
    );

    // Display preview
    #[derive(Tabled)]
    struct PerformancePreview {
        #[tabled(rename = "Fund")]
        fund: String,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Excess")]
        excess: String,
        #[tabled(rename = "OutPerformance")]
        out_performance: String,
        #[tabled(rename = "Return")]
        returns: String,
        #[tabled(rename = "Rank")]
        rank: u32,
    }

    let preview: Vec<PerformancePreview> = report
        .rows
        .iter()
        .take(10)
        .map(|row| PerformancePreview {
            fund: row.fund_name.clone(),
            date: format_default_date(row.date),
            excess: format!("{:.2}", row.excess),
            out_performance: row.classification.trim().to_string(),
            returns: format!("{:.2}", row.returns),
            rank: row.rank,
        })
        .collect();

    if !preview.is_empty() {
        let table = Table::new(preview).with(Style::rounded()).to_string();
        println!("{}", table);
    }

    if report.rows.len() > 10 {
        println!("\n... and {} more rows", report.rows.len() - 10);
    }

    Ok(())
}
