//! Order bookkeeping: every model computes in rank-sorted order, so the
//! shared orchestration needs an invertible sort, an adjacent-neighbor
//! pairing for the partial models, and a tie-aware placement transform.

/// Stably sort `values` by ascending `keys`, also returning each element's
/// pre-sort position. Feeding the output straight back through `unwind`
/// restores the original order, which is how `rate` puts teams back after
/// computing in rank order.
pub fn unwind<T>(values: Vec<T>, keys: &[f64]) -> (Vec<T>, Vec<f64>) {
    let mut zipped: Vec<(f64, f64, T)> = keys
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (&key, value))| (key, i as f64, value))
        .collect();
    zipped.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut sorted = Vec::with_capacity(zipped.len());
    let mut indices = Vec::with_capacity(zipped.len());
    for (_, index, value) in zipped {
        sorted.push(value);
        indices.push(index);
    }
    (sorted, indices)
}

/// For each position, the elements immediately adjacent to it. Endpoints get
/// a single neighbor; an empty or one-element slice gets a single entry with
/// no neighbors at all.
pub fn ladder_pairs<T>(items: &[T]) -> Vec<Vec<&T>> {
    if items.len() <= 1 {
        return vec![vec![]];
    }
    (0..items.len())
        .map(|i| {
            let mut adjacent = Vec::with_capacity(2);
            if i > 0 {
                adjacent.push(&items[i - 1]);
            }
            if i + 1 < items.len() {
                adjacent.push(&items[i + 1]);
            }
            adjacent
        })
        .collect()
}

/// 1-based ascending ranking with minimum-rank ties: every member of a tied
/// group receives the lowest rank in the group, e.g. `[9., 1., 1.]`
/// becomes `[3., 1., 1.]`. The ranking is undefined for NaN keys; callers
/// reject those up front.
pub fn placements(keys: &[f64]) -> Vec<f64> {
    keys.iter()
        .map(|&key| 1. + keys.iter().filter(|&&other| other < key).count() as f64)
        .collect()
}
