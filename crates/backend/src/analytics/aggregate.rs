use std::collections::HashMap;
use std::hash::Hash;

/// Group rows by key and count them. Output preserves first-seen key order.
pub fn count_by<T, K, F>(rows: impl IntoIterator<Item = T>, key: F) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut order: Vec<K> = Vec::new();
    let mut counts: HashMap<K, u64> = HashMap::new();
    for row in rows {
        let k = key(&row);
        if !counts.contains_key(&k) {
            order.push(k.clone());
        }
        *counts.entry(k).or_insert(0) += 1;
    }
    order
        .into_iter()
        .map(|k| {
            let count = counts[&k];
            (k, count)
        })
        .collect()
}

/// Group rows by key and sum a measure. Rows with an absent measure
/// contribute nothing to the sum but still create their group, so an order
/// without a payment shows up with zero revenue rather than vanishing.
pub fn sum_by<T, K, F, V>(rows: impl IntoIterator<Item = T>, key: F, value: V) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
    V: Fn(&T) -> Option<f64>,
{
    let mut order: Vec<K> = Vec::new();
    let mut sums: HashMap<K, f64> = HashMap::new();
    for row in rows {
        let k = key(&row);
        if !sums.contains_key(&k) {
            order.push(k.clone());
        }
        let entry = sums.entry(k).or_insert(0.0);
        if let Some(v) = value(&row) {
            *entry += v;
        }
    }
    order
        .into_iter()
        .map(|k| {
            let sum = sums[&k];
            (k, sum)
        })
        .collect()
}

/// Group rows by key and average a measure. Rows with an absent measure are
/// excluded from both the numerator and the denominator; groups with no
/// numeric rows are dropped entirely.
pub fn mean_by<T, K, F, V>(rows: impl IntoIterator<Item = T>, key: F, value: V) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
    V: Fn(&T) -> Option<f64>,
{
    let mut order: Vec<K> = Vec::new();
    let mut acc: HashMap<K, (f64, u64)> = HashMap::new();
    for row in rows {
        let Some(v) = value(&row) else { continue };
        let k = key(&row);
        if !acc.contains_key(&k) {
            order.push(k.clone());
        }
        let entry = acc.entry(k).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }
    order
        .into_iter()
        .map(|k| {
            let (sum, n) = acc[&k];
            (k, sum / n as f64)
        })
        .collect()
}

/// Top N rows by measure, descending. The sort is stable, so ties keep
/// their incoming (first-seen) order.
pub fn top_n<K, M>(mut rows: Vec<(K, M)>, n: usize) -> Vec<(K, M)>
where
    M: PartialOrd + Copy,
{
    rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    rows.truncate(n);
    rows
}

/// Ratio with a nominal epsilon substituted for a zero denominator, so a
/// state with customers but no sellers reads as a large finite ratio
/// instead of an error or infinity.
pub fn ratio_or_epsilon(numerator: f64, denominator: f64) -> f64 {
    const EPSILON: f64 = 0.1;
    let denominator = if denominator == 0.0 { EPSILON } else { denominator };
    numerator / denominator
}
