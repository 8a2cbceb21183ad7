//! Mode and count computation over grouping keys
//!
//! Ties are broken by first appearance: when several values share the
//! highest count, the one seen earliest in the input wins.

use crate::report::{Mode, PairMode};
use crate::{BikeshareError, Result, TripRecord};
use std::collections::HashMap;
use std::hash::Hash;

/// Count occurrences of each key, in order of first appearance
pub fn tally<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for key in keys {
        match positions.get(&key) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts
}

/// Most frequent key and its count
pub fn mode<K, I>(keys: I) -> Result<Mode<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut best: Option<(K, usize)> = None;
    for (key, count) in tally(keys) {
        // strict comparison keeps the earliest of tied keys
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((key, count));
        }
    }

    best.map(|(value, count)| Mode { value, count })
        .ok_or(BikeshareError::NoDataForAggregation)
}

/// Mode of a key extracted from each record
pub fn mode_by<'a, K, F>(records: &'a [TripRecord], key: F) -> Result<Mode<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&'a TripRecord) -> K,
{
    mode(records.iter().map(key))
}

/// Joint mode of two keys plus the independent mode of each
pub fn pair_mode<'a, A, B, FA, FB>(
    records: &'a [TripRecord],
    first: FA,
    second: FB,
) -> Result<PairMode<A, B>>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
    FA: Fn(&'a TripRecord) -> A,
    FB: Fn(&'a TripRecord) -> B,
{
    let joint = mode(records.iter().map(|r| (first(r), second(r))))?;
    let first = mode_by(records, first)?;
    let second = mode_by(records, second)?;

    Ok(PairMode {
        joint,
        first,
        second,
    })
}
