use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::VertexId;

/// Folds a stream of candidates down to the cheapest one per ordered
/// `(from, to)` vertex pair; the first candidate wins a cost tie.
///
/// Two places need this rule: the builder reduces each line's candidate rides
/// by road distance (a linear line covers inner stop pairs twice), and the
/// router's matrix initialization reduces parallel edges from different lines
/// by weight. Keeping it in one place keeps the two from diverging. The
/// `BTreeMap` makes downstream commit order deterministic regardless of the
/// candidate stream's order source.
pub(crate) fn reduce_cheapest<T>(
    candidates: impl IntoIterator<Item = (VertexId, VertexId, T)>,
    cost: impl Fn(&T) -> f64,
) -> BTreeMap<(VertexId, VertexId), T> {
    let mut table: BTreeMap<(VertexId, VertexId), T> = BTreeMap::new();
    for (from, to, candidate) in candidates {
        match table.entry((from, to)) {
            Entry::Occupied(mut kept) => {
                if cost(&candidate) < cost(kept.get()) {
                    kept.insert(candidate);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }
    table
}
