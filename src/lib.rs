//! Fundperf - fund vs benchmark out-performance analyser
//!
//! This library joins fund return series against benchmark return series
//! by date, computes excess returns, classifies and ranks funds within
//! each period, and renders a fixed-width out-performance report.

pub mod analyser;
pub mod error;
pub mod extract;
pub mod models;
pub mod reports;
pub mod utils;
