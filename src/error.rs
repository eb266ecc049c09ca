//! Error handling for the out-performance analyser
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for report generation
#[derive(Error, Debug)]
pub enum AnalyserError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("fund code not found in fund data: {0}")]
    MissingFund(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for analyser operations
pub type Result<T> = anyhow::Result<T>;
