//! On-screen card selection
//!
//! After every non-repeat click the next screen must contain at least one
//! card that has not been clicked yet, otherwise the player could be left
//! with only losing moves. The remaining slots are filled from the whole
//! pool, clicked cards included.

use super::shuffle;
use crate::catalog::CatalogItem;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Fresh screen: random `number_of_cards` items of the pool
pub fn initial_display<R: Rng + ?Sized>(
    pool: &[CatalogItem],
    number_of_cards: usize,
    rng: &mut R,
) -> Vec<CatalogItem> {
    let mut display = shuffle(pool, rng);
    display.truncate(number_of_cards);
    display
}

/// Screen after a non-repeat click
///
/// One card is drawn uniformly from the unclicked part of the pool; the
/// other `number_of_cards - 1` come from the rest of the pool; the slate is
/// then shuffled. When every pool item has been clicked this falls back to
/// [`initial_display`].
pub fn next_display<R: Rng + ?Sized>(
    pool: &[CatalogItem],
    clicked: &HashSet<String>,
    number_of_cards: usize,
    rng: &mut R,
) -> Vec<CatalogItem> {
    if number_of_cards == 0 {
        return Vec::new();
    }

    let unclicked: Vec<&CatalogItem> = pool
        .iter()
        .filter(|item| !clicked.contains(item.title()))
        .collect();

    let Some(&guaranteed) = unclicked.choose(rng) else {
        return initial_display(pool, number_of_cards, rng);
    };

    let others: Vec<CatalogItem> = pool
        .iter()
        .filter(|item| item.title() != guaranteed.title())
        .cloned()
        .collect();

    let mut slate = shuffle(&others, rng);
    slate.truncate(number_of_cards - 1);
    slate.push(guaranteed.clone());
    slate.shuffle(rng);
    slate
}
