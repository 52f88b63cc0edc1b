//! Incremental min-fill elimination engine.
//!
//! Each step selects a candidate of minimum fill value (ties broken by
//! minimum degree, then uniformly at random), eliminates it, and repairs the
//! fill values of only those vertices whose neighborhoods the elimination
//! touched: the direct neighbors gain the fill edges, and second-degree
//! neighbors may lose missing pairs that the new edges closed. Relationships
//! to the eliminated vertex's neighborhood are classified once per vertex per
//! step through a three-way set decomposition, guarded by per-vertex status
//! flags.
//!
//! While a run is in progress every live vertex's own id is kept inside its
//! neighbor sequence, so a sequence is the vertex's closed neighborhood and
//! its length minus one is the vertex's degree. Fill values are unaffected by
//! the convention. The id is dropped the moment the vertex is selected for
//! elimination.

use rand::Rng;

use crate::adjacency::AdjacencyStore;
use crate::fill::{FillTracker, PoolSampler};
use crate::graph::{Vertex, VertexSource};
use crate::setops;
use crate::VertexOrdering;

const UNPROCESSED: u8 = 0;
const VISITED: u8 = 1;
const AFFECTED: u8 = 2;
const ELIMINATED: u8 = 4;

/// Computes a min-fill elimination ordering of `source`.
pub fn compute_ordering<S: VertexSource, R: Rng>(source: &S, rng: &mut R) -> VertexOrdering {
    compute_ordering_with_abort(source, rng, || false)
}

/// Computes a min-fill elimination ordering, polling `is_aborted` once per
/// eliminated vertex. When the poll turns true the partial ordering produced
/// so far is returned together with the vertices not yet ordered.
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
    let mut tracker = FillTracker::new(&store);

    // Closed-neighborhood bookkeeping for the rest of the run.
    for v in 0..n as Vertex {
        let fresh = setops::insert_sorted(store.seq_mut(v), v);
        debug_assert!(fresh);
    }

    let mut live = PoolSampler::full(n);
    let mut status: Vec<u8> = vec![UNPROCESSED; n];
    let mut additional: Vec<Vec<Vertex>> = vec![Vec::new(); n];
    let mut unaffected: Vec<Vec<Vertex>> = vec![Vec::new(); n];
    let mut existing: Vec<Vec<Vertex>> = vec![Vec::new(); n];
    let mut affected: Vec<Vertex> = Vec::with_capacity(n);

    let mut order = Vec::with_capacity(n);
    let mut max_bag = 0;
    let mut fill_edges = 0;
    let mut aborted = false;

    while tracker.total_fill() > 0 {
        if is_aborted() {
            aborted = true;
            break;
        }
        if tracker.pool_is_empty() {
            tracker.refill(live.members().iter().map(|&v| (v, store.degree(v) - 1)));
        }

        let s = tracker.select(rng);
        let s_fill = tracker.fill(s);
        debug_assert_eq!(s_fill, tracker.min_fill());
        status[s as usize] = ELIMINATED;
        affected.clear();
        tracker.retire(s);

        let mut selected = store.take_seq(s);
        if selected.len() > max_bag {
            max_bag = selected.len();
        }
        let had_self = setops::remove_sorted(&mut selected, s);
        debug_assert!(had_self);

        if s_fill == 0 {
            // The neighborhood is already a clique; dropping `s` can only
            // shrink fill values, by the count of each neighbor's vertices
            // outside the clique.
            for &w in &selected {
                let found = setops::remove_sorted(store.seq_mut(w), s);
                debug_assert!(found);
                let old = tracker.fill(w);
                if old > 0 {
                    let reduction = setops::difference_size(store.neighbors(w), &selected);
                    if reduction > 0 {
                        let updated = old - reduction;
                        tracker.store_fill(w, updated);
                        tracker.admit(w, updated, store.degree(w) - 1);
                    }
                }
            }
        } else {
            // Classification: decompose each touched vertex's neighborhood
            // against the selected one exactly once, tracking progress in the
            // status flags.
            for &nb in &selected {
                if status[nb as usize] == UNPROCESSED {
                    let found = setops::remove_sorted(store.seq_mut(nb), s);
                    debug_assert!(found);
                    setops::decompose(
                        &selected,
                        store.neighbors(nb),
                        s,
                        &mut additional[nb as usize],
                        &mut unaffected[nb as usize],
                        &mut existing[nb as usize],
                    );
                }
                status[nb as usize] |= VISITED;

                for at in 0..store.degree(nb) {
                    let m = store.neighbors(nb)[at];
                    let st = status[m as usize];
                    if st < AFFECTED {
                        if st == UNPROCESSED {
                            if setops::remove_sorted(store.seq_mut(m), s) {
                                // Also a direct neighbor of `s`; classify it
                                // fully now, its own turn will skip this.
                                setops::decompose(
                                    &selected,
                                    store.neighbors(m),
                                    s,
                                    &mut additional[m as usize],
                                    &mut unaffected[m as usize],
                                    &mut existing[m as usize],
                                );
                            } else {
                                setops::intersect_into(
                                    &selected,
                                    store.neighbors(m),
                                    &mut existing[m as usize],
                                );
                                affected.push(m);
                            }
                        }
                        status[m as usize] |= AFFECTED;
                    }
                }
            }

            // Repair the direct neighbors: insert the fill edges, then apply
            // the fill deltas those edges imply.
            for &v in &selected {
                let vi = v as usize;
                let added = additional[vi].len();
                let untouched = unaffected[vi].len();
                if added > 0 {
                    setops::merge_insert(store.seq_mut(v), &additional[vi]);
                }
                let degree = store.degree(v) - 1;
                let old = tracker.fill(v);

                if untouched > 0 {
                    if added > 0 {
                        // The neighborhood grew: pairs between new and
                        // outside-the-clique neighbors may raise the fill
                        // value, pairs closed by other insertions lower it.
                        let mut delta = -(untouched as i64);
                        for &a in &additional[vi] {
                            delta += untouched as i64;
                            delta -= setops::intersection_size(
                                &unaffected[vi],
                                &unaffected[a as usize],
                            ) as i64;
                        }
                        let members = &existing[vi];
                        for (i, &e) in members.iter().enumerate() {
                            let closed = &additional[e as usize];
                            if !closed.is_empty() {
                                delta -= setops::intersection_size(&members[i + 1..], closed) as i64;
                            }
                        }
                        if delta != 0 {
                            let updated = (old as i64 + delta) as usize;
                            tracker.store_fill(v, updated);
                            if delta > 0 {
                                tracker.evict(v);
                            } else {
                                tracker.admit(v, updated, degree);
                            }
                        }
                    } else {
                        let mut updated = old;
                        let members = &existing[vi];
                        for (i, &e) in members.iter().enumerate() {
                            if updated <= untouched {
                                break;
                            }
                            let closed = &additional[e as usize];
                            if !closed.is_empty() {
                                updated -=
                                    setops::intersection_size(&members[i + 1..], closed);
                            }
                        }
                        updated -= untouched;
                        tracker.store_fill(v, updated);
                        tracker.admit(v, updated, degree);
                    }
                } else {
                    // Every remaining neighbor is inside the new clique.
                    tracker.store_fill(v, 0);
                    tracker.admit(v, 0, degree);
                }
                status[vi] = UNPROCESSED;
            }

            // Second-degree vertices gain no edges; they only lose missing
            // pairs that the inserted edges closed.
            for &m in &affected {
                let mi = m as usize;
                if existing[mi].len() > 1 {
                    let mut updated = tracker.fill(m);
                    let members = &existing[mi];
                    for (i, &e) in members.iter().enumerate() {
                        if updated == 0 {
                            break;
                        }
                        let closed = &additional[e as usize];
                        if !closed.is_empty() {
                            updated -= setops::intersection_size(&members[i + 1..], closed);
                        }
                    }
                    if updated != tracker.fill(m) {
                        tracker.store_fill(m, updated);
                    }
                    tracker.admit(m, updated, store.degree(m) - 1);
                }
                existing[mi].clear();
                status[mi] = UNPROCESSED;
            }

            for &v in &selected {
                additional[v as usize].clear();
                unaffected[v as usize].clear();
                existing[v as usize].clear();
            }
        }

        live.remove(s);
        order.push(store.name(s));
        fill_edges += s_fill;

        #[cfg(debug_assertions)]
        verify_live_state(&store, &tracker, &live);
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

    // No fill remains: the live vertices form a clique and can be appended in
    // any order without inserting further edges.
    for &v in live.members() {
        if store.degree(v) > max_bag {
            max_bag = store.degree(v);
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

/// Debug-build check of the central bookkeeping invariants: every live fill
/// value matches the from-scratch formula, the running total matches their
/// sum, and pool members carry the tracked minimum.
#[cfg(debug_assertions)]
fn verify_live_state(store: &AdjacencyStore, tracker: &FillTracker, live: &PoolSampler) {
    let mut total = 0;
    for &v in live.members() {
        let expected = crate::fill::fill_value(store, v);
        assert_eq!(
            tracker.fill(v),
            expected,
            "fill value of vertex {} diverged",
            v
        );
        total += expected;
    }
    assert_eq!(tracker.total_fill(), total, "total fill diverged");
    for &v in tracker.pool_members() {
        assert_eq!(tracker.fill(v), tracker.min_fill());
    }
}
