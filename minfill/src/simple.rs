//! Straightforward min-fill ordering that re-derives fill values from
//! scratch instead of repairing them incrementally.
//!
//! Same contract, tie-breaking, and termination as [`crate::elim`], but each
//! elimination inserts its fill edges by direct sorted-membership updates and
//! then recomputes the full fill formula for every vertex within distance two
//! of the eliminated vertex. Quadratic-ish per step and perfectly adequate
//! for small or sparse graphs; kept as ground truth for differential testing
//! of the incremental engine.

use itertools::Itertools;
use rand::Rng;

use crate::adjacency::AdjacencyStore;
use crate::fill::{fill_value, PoolSampler};
use crate::graph::{Vertex, VertexSource};
use crate::VertexOrdering;

/// Computes a min-fill elimination ordering of `source` by full
/// recomputation.
pub fn compute_ordering<S: VertexSource, R: Rng>(source: &S, rng: &mut R) -> VertexOrdering {
    compute_ordering_with_abort(source, rng, || false)
}

/// As [`compute_ordering`], polling `is_aborted` once per eliminated vertex
/// and returning a partial ordering when it turns true.
pub fn compute_ordering_with_abort<S, R, F>(
    source: &S,
    rng: &mut R,
    mut is_aborted: F,
) -> VertexOrdering
where
    S: VertexSource,
    R: Rng,
    F: FnMut() -> bool,
{
    let mut store = AdjacencyStore::build(source);
    let n = store.len();

    let mut fill: Vec<usize> = (0..n as Vertex).map(|v| fill_value(&store, v)).collect();
    let mut total: usize = fill.iter().sum();

    let mut live = PoolSampler::full(n);
    let mut pool: Vec<Vertex> = Vec::new();
    let mut degree_pool: Vec<Vertex> = Vec::new();
    let mut touched = vec![false; n];
    let mut scratch: Vec<Vertex> = Vec::new();

    let mut order = Vec::with_capacity(n);
    let mut max_bag = 0;
    let mut fill_edges = 0;
    let mut aborted = false;

    while total > 0 {
        if is_aborted() {
            aborted = true;
            break;
        }

        // Minimum fill over the live vertices, then minimum degree among
        // those, then a uniform draw.
        pool.clear();
        let mut min_fill = std::usize::MAX;
        for &v in live.members() {
            let value = fill[v as usize];
            if value < min_fill {
                min_fill = value;
                pool.clear();
            }
            if value == min_fill {
                pool.push(v);
            }
        }
        degree_pool.clear();
        let mut min_degree = std::usize::MAX;
        for &v in &pool {
            let degree = store.degree(v);
            if degree < min_degree {
                min_degree = degree;
                degree_pool.clear();
            }
            if degree == min_degree {
                degree_pool.push(v);
            }
        }
        let s = degree_pool[rng.gen_range(0..degree_pool.len())];
        let s_fill = fill[s as usize];
        debug_assert_eq!(s_fill, min_fill);
        total -= s_fill;

        let bag = store.degree(s) + 1;
        if bag > max_bag {
            max_bag = bag;
        }

        let neighbors: Vec<Vertex> = store.neighbors(s).to_vec();

        let mut inserted = 0;
        for (a, b) in neighbors.iter().copied().tuple_combinations::<(Vertex, Vertex)>() {
            if !store.has_edge(a, b) {
                store.insert_edge(a, b);
                inserted += 1;
            }
        }
        debug_assert_eq!(inserted, s_fill);
        for &w in &neighbors {
            store.remove_edge(s, w);
        }
        live.remove(s);

        // Fill values can only have changed within distance two of `s`.
        scratch.clear();
        for &w in &neighbors {
            if !touched[w as usize] {
                touched[w as usize] = true;
                scratch.push(w);
            }
        }
        for &w in &neighbors {
            for &x in store.neighbors(w) {
                if !touched[x as usize] {
                    touched[x as usize] = true;
                    scratch.push(x);
                }
            }
        }
        for &w in &scratch {
            let updated = fill_value(&store, w);
            total -= fill[w as usize];
            total += updated;
            fill[w as usize] = updated;
            touched[w as usize] = false;
        }

        order.push(store.name(s));
        fill_edges += s_fill;
    }

    if aborted {
        let remaining = live.members().iter().map(|&v| store.name(v)).collect();
        return VertexOrdering {
            order,
            remaining,
            max_bag_size: max_bag,
            fill_edges,
        };
    }

    for &v in live.members() {
        let bag = store.degree(v) + 1;
        if bag > max_bag {
            max_bag = bag;
        }
        order.push(store.name(v));
    }

    VertexOrdering {
        order,
        remaining: Vec::new(),
        max_bag_size: max_bag,
        fill_edges,
    }
}
