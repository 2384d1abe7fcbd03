use std::ops::RangeInclusive;

/// Source of the random draws used by wait-time estimation.
///
/// Injected so tests and reproducible deployments can pin the values.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `range`, both ends inclusive.
    fn int_in(&self, range: RangeInclusive<i32>) -> i32;
}
