use crate::prelude::{DashboardError, DashboardResult};
use std::cmp::Ordering;

pub struct StatsHelper;

impl StatsHelper {
    /// Stable top-down merge sort returning a new vector.
    ///
    /// Equal elements keep their relative order: on a tie the head of the
    /// left half is emitted first.
    pub fn merge_sort_by<T, F>(values: &[T], mut compare: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        Self::merge_sort_inner(values, &mut compare)
    }

    fn merge_sort_inner<T, F>(values: &[T], compare: &mut F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        if values.len() <= 1 {
            return values.to_vec();
        }

        let mid = values.len() / 2;
        let left = Self::merge_sort_inner(&values[..mid], compare);
        let right = Self::merge_sort_inner(&values[mid..], compare);

        let mut merged = Vec::with_capacity(values.len());
        let mut left_iter = left.into_iter().peekable();
        let mut right_iter = right.into_iter().peekable();

        loop {
            let take_left = match (left_iter.peek(), right_iter.peek()) {
                (Some(l), Some(r)) => compare(l, r) != Ordering::Greater,
                _ => break,
            };
            let head = if take_left {
                left_iter.next()
            } else {
                right_iter.next()
            };
            merged.extend(head);
        }
        merged.extend(left_iter);
        merged.extend(right_iter);
        merged
    }

    /// Ascending sort of reals under the IEEE total order.
    pub fn sort(values: &[f64]) -> Vec<f64> {
        Self::merge_sort_by(values, |a, b| a.total_cmp(b))
    }

    /// Nearest-rank percentile over an ascending sequence.
    ///
    /// Picks `sorted[floor(p * (n - 1))]` without interpolation. An empty
    /// sequence yields `0.0`.
    pub fn percentile(sorted: &[f64], p: f64) -> DashboardResult<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(DashboardError::InvalidArgument(format!(
                "percentile rank {} outside [0, 1]",
                p
            )));
        }
        if sorted.is_empty() {
            return Ok(0.0);
        }
        let index = (p * (sorted.len() - 1) as f64).floor() as usize;
        Ok(sorted[index.min(sorted.len() - 1)])
    }

    pub fn sum(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    /// Arithmetic mean; `0.0` for an empty slice.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        Self::sum(values) / values.len() as f64
    }

    /// Indices of the `k` largest keys, largest first.
    ///
    /// Repeated linear max-scan; ties resolve to the lower index.
    pub fn top_k_indices<T, K, F>(items: &[T], k: usize, mut key: F) -> Vec<usize>
    where
        K: PartialOrd,
        F: FnMut(&T) -> K,
    {
        let keys: Vec<K> = items.iter().map(&mut key).collect();
        let mut used = vec![false; keys.len()];
        let mut picked = Vec::with_capacity(k.min(keys.len()));

        for _ in 0..k.min(keys.len()) {
            let mut best: Option<usize> = None;
            for (idx, candidate) in keys.iter().enumerate() {
                if used[idx] {
                    continue;
                }
                match best {
                    Some(current) if *candidate <= keys[current] => {}
                    _ => best = Some(idx),
                }
            }
            match best {
                Some(idx) => {
                    used[idx] = true;
                    picked.push(idx);
                }
                None => break,
            }
        }
        picked
    }
}
