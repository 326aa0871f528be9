//! Pluggable comparator sort for sweep events
//!
//! Every strategy yields the same order for a strict total order comparator;
//! the choice only changes how the work is done.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    Insertion,
    #[default]
    Merge,
    Quick,
}

impl std::str::FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insertion" | "i" => Ok(SortStrategy::Insertion),
            "merge" | "m" => Ok(SortStrategy::Merge),
            "quick" | "q" => Ok(SortStrategy::Quick),
            other => Err(format!("unknown sort strategy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub strategy: SortStrategy,
    /// Inputs up to this length are always insertion sorted
    pub insertion_threshold: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            strategy: SortStrategy::Merge,
            insertion_threshold: 10,
        }
    }
}

/// Sort `items` in place with the configured strategy
pub fn sort_by<T, F>(items: &mut [T], config: &SortConfig, mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= config.insertion_threshold {
        insertion_sort(items, &mut compare);
        return;
    }

    match config.strategy {
        SortStrategy::Insertion => insertion_sort(items, &mut compare),
        SortStrategy::Merge => merge_sort(items, config.insertion_threshold, &mut compare),
        SortStrategy::Quick => items.sort_unstable_by(compare),
    }
}

fn insertion_sort<T, F>(items: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn merge_sort<T, F>(items: &mut [T], threshold: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= threshold.max(1) {
        insertion_sort(items, compare);
        return;
    }

    let mid = items.len() / 2;
    merge_sort(&mut items[..mid], threshold, compare);
    merge_sort(&mut items[mid..], threshold, compare);

    // Already ordered halves need no merge
    if compare(&items[mid - 1], &items[mid]) != Ordering::Greater {
        return;
    }

    let left = items[..mid].to_vec();
    let right = items[mid..].to_vec();
    let (mut i, mut j) = (0, 0);
    for slot in items.iter_mut() {
        let take_left =
            j >= right.len() || (i < left.len() && compare(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}
