//! Set algebra over sorted vertex sequences.
//!
//! Every function in this module expects strictly increasing, duplicate-free
//! input slices; the contract is asserted in debug builds and silently
//! assumed in release builds. All scans are linear in the combined input
//! length.

use crate::graph::Vertex;

/// Number of new elements at or below which [`merge_insert`] uses pointwise
/// binary-search insertion instead of rebuilding the sequence with a full
/// merge. Tunable; either strategy is correct.
const POINTWISE_MERGE_LIMIT: usize = 8;

pub(crate) fn is_sorted_set(s: &[Vertex]) -> bool {
    s.windows(2).all(|w| w[0] < w[1])
}

/// Number of elements common to both sequences.
pub fn intersection_size(a: &[Vertex], b: &[Vertex]) -> usize {
    debug_assert!(is_sorted_set(a) && is_sorted_set(b));
    let mut count = 0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            i += 1;
        } else if b[j] < a[i] {
            j += 1;
        } else {
            count += 1;
            i += 1;
            j += 1;
        }
    }
    count
}

/// Number of elements of `a` that do not occur in `b`.
pub fn difference_size(a: &[Vertex], b: &[Vertex]) -> usize {
    debug_assert!(is_sorted_set(a) && is_sorted_set(b));
    let mut count = 0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            count += 1;
            i += 1;
        } else if b[j] < a[i] {
            j += 1;
        } else {
            i += 1;
            j += 1;
        }
    }
    count + (a.len() - i)
}

/// Appends the elements common to `a` and `b` onto `out`.
pub fn intersect_into(a: &[Vertex], b: &[Vertex], out: &mut Vec<Vertex>) {
    debug_assert!(is_sorted_set(a) && is_sorted_set(b));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            i += 1;
        } else if b[j] < a[i] {
            j += 1;
        } else {
            out.push(a[i]);
            i += 1;
            j += 1;
        }
    }
}

/// Splits `a` and `b` into the elements exclusive to each and the shared
/// subset, in one pass. `ignore` is excluded from all three outputs, so a
/// vertex under elimination can be dropped from the downstream sets without a
/// separate filtering scan. Results are appended to the output vectors in
/// sorted order.
pub fn decompose(
    a: &[Vertex],
    b: &[Vertex],
    ignore: Vertex,
    only_a: &mut Vec<Vertex>,
    only_b: &mut Vec<Vertex>,
    both: &mut Vec<Vertex>,
) {
    debug_assert!(is_sorted_set(a) && is_sorted_set(b));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            if a[i] != ignore {
                only_a.push(a[i]);
            }
            i += 1;
        } else if b[j] < a[i] {
            if b[j] != ignore {
                only_b.push(b[j]);
            }
            j += 1;
        } else {
            if a[i] != ignore {
                both.push(a[i]);
            }
            i += 1;
            j += 1;
        }
    }
    // At most one tail is non-empty; it can only still contain `ignore` if
    // its first element does not already exceed it.
    if i < a.len() {
        if a[i] <= ignore {
            only_a.extend(a[i..].iter().copied().filter(|&v| v != ignore));
        } else {
            only_a.extend_from_slice(&a[i..]);
        }
    } else if j < b.len() {
        if b[j] <= ignore {
            only_b.extend(b[j..].iter().copied().filter(|&v| v != ignore));
        } else {
            only_b.extend_from_slice(&b[j..]);
        }
    }
}

/// Merges the sorted sequence `new_items` into `dst`, keeping `dst` sorted
/// and duplicate-free. `new_items` must be disjoint from `dst`. Small inputs
/// are inserted pointwise to avoid rebuilding the whole sequence.
pub fn merge_insert(dst: &mut Vec<Vertex>, new_items: &[Vertex]) {
    debug_assert!(is_sorted_set(dst) && is_sorted_set(new_items));
    if new_items.is_empty() {
        return;
    }
    if new_items.len() <= POINTWISE_MERGE_LIMIT {
        let mut from = 0;
        for &item in new_items {
            let at = from + dst[from..].partition_point(|&v| v < item);
            debug_assert!(at == dst.len() || dst[at] != item);
            dst.insert(at, item);
            from = at + 1;
        }
    } else {
        let mut merged = Vec::with_capacity(dst.len() + new_items.len());
        let (mut i, mut j) = (0, 0);
        while i < dst.len() && j < new_items.len() {
            if dst[i] < new_items[j] {
                merged.push(dst[i]);
                i += 1;
            } else if new_items[j] < dst[i] {
                merged.push(new_items[j]);
                j += 1;
            } else {
                debug_assert!(false, "merge_insert inputs must be disjoint");
                merged.push(dst[i]);
                i += 1;
                j += 1;
            }
        }
        merged.extend_from_slice(&dst[i..]);
        merged.extend_from_slice(&new_items[j..]);
        *dst = merged;
    }
    debug_assert!(is_sorted_set(dst));
}

/// Inserts `value` into the sorted sequence, returning false if it was
/// already present.
pub fn insert_sorted(seq: &mut Vec<Vertex>, value: Vertex) -> bool {
    match seq.binary_search(&value) {
        Ok(_) => false,
        Err(at) => {
            seq.insert(at, value);
            true
        }
    }
}

/// Removes `value` from the sorted sequence, returning false if it was
/// absent.
pub fn remove_sorted(seq: &mut Vec<Vertex>, value: Vertex) -> bool {
    match seq.binary_search(&value) {
        Ok(at) => {
            seq.remove(at);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        let a = [1, 3, 5, 7, 9];
        let b = [2, 3, 4, 7, 10, 11];
        assert_eq!(intersection_size(&a, &b), 2);
        assert_eq!(difference_size(&a, &b), 3);
        assert_eq!(difference_size(&b, &a), 4);
        assert_eq!(intersection_size(&a, &[]), 0);
        assert_eq!(difference_size(&a, &[]), 5);
        assert_eq!(difference_size(&[], &a), 0);
    }

    #[test]
    fn decompose_drops_ignored() {
        let a = [1, 3, 5, 7];
        let b = [2, 3, 6, 7, 8];
        let (mut only_a, mut only_b, mut both) = (vec![], vec![], vec![]);
        decompose(&a, &b, 5, &mut only_a, &mut only_b, &mut both);
        assert_eq!(only_a, vec![1]);
        assert_eq!(only_b, vec![2, 6, 8]);
        assert_eq!(both, vec![3, 7]);
    }

    #[test]
    fn decompose_ignores_in_tail() {
        let a = [1, 2];
        let b = [1, 2, 4, 6];
        let (mut only_a, mut only_b, mut both) = (vec![], vec![], vec![]);
        decompose(&a, &b, 6, &mut only_a, &mut only_b, &mut both);
        assert!(only_a.is_empty());
        assert_eq!(only_b, vec![4]);
        assert_eq!(both, vec![1, 2]);
    }

    #[test]
    fn merge_small_and_large() {
        let mut pointwise = vec![10, 20, 30];
        merge_insert(&mut pointwise, &[5, 25, 40]);
        assert_eq!(pointwise, vec![5, 10, 20, 25, 30, 40]);

        let mut rebuilt = vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18];
        let odd: Vec<Vertex> = (0..10).map(|k| 2 * k + 1).collect();
        merge_insert(&mut rebuilt, &odd);
        assert_eq!(rebuilt, (0..20).collect::<Vec<Vertex>>());
    }

    #[test]
    fn sorted_insert_remove() {
        let mut seq = vec![2, 4, 8];
        assert!(insert_sorted(&mut seq, 6));
        assert!(!insert_sorted(&mut seq, 6));
        assert_eq!(seq, vec![2, 4, 6, 8]);
        assert!(remove_sorted(&mut seq, 4));
        assert!(!remove_sorted(&mut seq, 5));
        assert_eq!(seq, vec![2, 6, 8]);
    }
}
