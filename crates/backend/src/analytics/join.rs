use std::collections::HashMap;
use std::hash::Hash;

/// Index rows by a unique key. When the key repeats, the first row wins;
/// one-to-many measures must be pre-aggregated before indexing.
pub fn index_unique_by<'a, T, K, F>(rows: &'a [T], key: F) -> HashMap<K, &'a T>
where
    K: Eq + Hash,
    F: Fn(&'a T) -> K,
{
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry(key(row)).or_insert(row);
    }
    index
}

/// Index rows by a non-unique key, keeping every match
pub fn index_group_by<'a, T, K, F>(rows: &'a [T], key: F) -> HashMap<K, Vec<&'a T>>
where
    K: Eq + Hash,
    F: Fn(&'a T) -> K,
{
    let mut index: HashMap<K, Vec<&T>> = HashMap::new();
    for row in rows {
        index.entry(key(row)).or_default().push(row);
    }
    index
}

/// Left-outer join: every left row is kept in order; an unmatched row pairs
/// with `None` instead of being dropped or raising. Output length always
/// equals the left length.
pub fn left_join<'a, L, R, K, F>(
    left: &'a [L],
    right: &HashMap<K, &'a R>,
    key: F,
) -> Vec<(&'a L, Option<&'a R>)>
where
    K: Eq + Hash,
    F: Fn(&'a L) -> K,
{
    left.iter()
        .map(|row| (row, right.get(&key(row)).copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_join_preserves_left_cardinality() {
        let left = vec![("o1", 1), ("o2", 2), ("o3", 3)];
        // o1 matched, o2 unmatched, o3 matched; extra right rows are dropped
        let right = vec![("o1", "a"), ("o3", "b"), ("o9", "z")];
        let index = index_unique_by(&right, |r| r.0);

        let joined = left_join(&left, &index, |l| l.0);
        assert_eq!(joined.len(), left.len());
        assert!(joined[0].1.is_some());
        assert!(joined[1].1.is_none());
        assert_eq!(joined[2].1.unwrap().1, "b");
    }

    #[test]
    fn test_left_join_empty_right() {
        let left = vec![1, 2, 3];
        let right: HashMap<i32, &i32> = HashMap::new();
        let joined = left_join(&left, &right, |l| *l);
        assert_eq!(joined.len(), 3);
        assert!(joined.iter().all(|(_, r)| r.is_none()));
    }

    #[test]
    fn test_index_unique_first_wins() {
        let rows = vec![("k", 1), ("k", 2)];
        let index = index_unique_by(&rows, |r| r.0);
        assert_eq!(index["k"].1, 1);
    }

    #[test]
    fn test_index_group_keeps_all() {
        let rows = vec![("k", 1), ("k", 2), ("j", 3)];
        let index = index_group_by(&rows, |r| r.0);
        assert_eq!(index["k"].len(), 2);
        assert_eq!(index["j"].len(), 1);
    }
}
