//! # Interleaver
//!
//! Reorders a selected list so adjacent items come from different
//! categories wherever possible. Interleaved practice improves
//! discrimination learning over blocked practice (Rohrer & Taylor 2007),
//! so the drill surface runs every finished selection through this pass.
//!
//! The shuffle touches only the *category key order* (so a different
//! category leads each session); within a category the selector's ranking
//! is preserved. [`measure_interleaving`] is the companion metric: the
//! fraction of adjacent pairs that switch category, usable directly in
//! tests against any sequence however it was produced.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::cards::Categorized;

/// Round-robin the items across their categories.
///
/// Order-preserving for one-or-fewer items or a single-category input.
/// Otherwise items are grouped by [`Categorized::group_key`] (first-seen
/// group order), the key list is shuffled with the injected `rng`, and
/// groups are drained one item per turn, skipping exhausted groups.
/// Always a permutation of the input.
pub fn interleave<T, R>(items: Vec<T>, rng: &mut R) -> Vec<T>
where
    T: Categorized,
    R: Rng + ?Sized,
{
    if items.len() <= 1 {
        return items;
    }

    let mut groups: Vec<(String, VecDeque<T>)> = Vec::new();
    for item in items {
        match groups.iter().position(|(key, _)| key.as_str() == item.group_key()) {
            Some(index) => groups[index].1.push_back(item),
            None => groups.push((item.group_key().to_string(), VecDeque::from([item]))),
        }
    }

    if groups.len() == 1 {
        let (_, group) = groups.pop().unwrap_or_default();
        return group.into();
    }

    // Vary which category leads across calls; items inside a group keep
    // their selection order
    groups.shuffle(rng);

    let mut ordered = Vec::with_capacity(groups.iter().map(|(_, g)| g.len()).sum());
    while !groups.is_empty() {
        groups.retain_mut(|(_, group)| {
            if let Some(item) = group.pop_front() {
                ordered.push(item);
            }
            !group.is_empty()
        });
    }
    ordered
}

/// Fraction of adjacent pairs whose category differs, in `[0, 1]`.
///
/// Zero for sequences of length one or less. A strict two-category
/// alternation scores 1.0; a single-category block scores 0.0.
pub fn measure_interleaving<T: Categorized>(items: &[T]) -> f64 {
    if items.len() <= 1 {
        return 0.0;
    }
    let switches = items
        .windows(2)
        .filter(|pair| pair[0].group_key() != pair[1].group_key())
        .count();
    switches as f64 / (items.len() - 1) as f64
}
