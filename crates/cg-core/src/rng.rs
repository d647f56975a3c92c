//! Deterministic RNG wrapper for layout generation.
//!
//! Every random draw made while painting a city goes through a `CityRng`
//! passed in by the caller.  The same seed and grid dimensions always
//! reproduce the identical layout and warehouse selection.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable RNG used by the layout generator.
///
/// Used only in single-threaded contexts.
pub struct CityRng(SmallRng);

impl CityRng {
    pub fn new(seed: u64) -> Self {
        CityRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Pick `amount` distinct elements of `slice` (without replacement).
    ///
    /// Returns fewer than `amount` when the slice is shorter.
    pub fn sample<T: Copy>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        use rand::seq::SliceRandom;
        slice.choose_multiple(&mut self.0, amount).copied().collect()
    }
}
