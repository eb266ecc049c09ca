//! Per-period dense ranking

use crate::models::Performance;

/// Rank one period bucket in place: highest raw return gets rank 1,
/// then 2, 3, ... with no gaps. The sort is stable, so rows with equal
/// returns keep the order in which they were aggregated.
pub fn rank_bucket(bucket: &mut [Performance]) {
    bucket.sort_by(|a, b| b.returns.cmp(&a.returns));

    for (index, performance) in bucket.iter_mut().enumerate() {
        performance.rank = (index + 1) as u32;
    }
}
