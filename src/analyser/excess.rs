//! Excess return computation and classification

use rust_decimal::Decimal;

use crate::utils::round_to_two_scale;

/// Classification for an out-performing fund
pub const OUT_PERFORMED: &str = "Out Performed";
/// Classification for an under-performing fund
pub const UNDER_PERFORMED: &str = "Under Performed";
/// Placeholder emitted when the excess is within (-1, 1). A single
/// space, not an empty string: the report format depends on it.
pub const UNCLASSIFIED: &str = " ";

/// Excess = fund return - benchmark return, rounded to two places.
pub fn compute_excess(fund_return: Decimal, benchmark_return: Decimal) -> Decimal {
    round_to_two_scale(fund_return - benchmark_return)
}

/// Classify an excess value by its truncated integer part.
///
/// Truncation, not rounding: 0.99 is unclassified while exactly 1.00
/// counts as out-performance. Symmetric on the negative side.
pub fn classify(excess: Decimal) -> &'static str {
    let whole = excess.trunc();

    if whole <= Decimal::NEGATIVE_ONE {
        return UNDER_PERFORMED;
    }
    if whole >= Decimal::ONE {
        return OUT_PERFORMED;
    }
    UNCLASSIFIED
}
