//! Working pool sampling

use super::shuffle;
use crate::catalog::{CatalogItem, ValidatedCatalog};
use rand::Rng;

/// Draw `number_of_movies` distinct items from the catalog at random
///
/// Returns the whole catalog (shuffled) when it is smaller than requested.
pub fn sample<R: Rng + ?Sized>(
    catalog: &ValidatedCatalog,
    number_of_movies: usize,
    rng: &mut R,
) -> Vec<CatalogItem> {
    let mut pool = shuffle(catalog.items(), rng);
    pool.truncate(number_of_movies);
    pool
}
