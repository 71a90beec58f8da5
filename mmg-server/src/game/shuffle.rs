//! Uniform random permutation

use rand::seq::SliceRandom;
use rand::Rng;

/// Return a uniformly shuffled copy of `items` (Fisher-Yates)
///
/// The input is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
