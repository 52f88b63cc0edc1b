//! End-to-end checks of the two elimination engines: canonical small graphs
//! with known behavior, randomized graphs replayed through an independent
//! simulator, identifier renumbering, and abort handling.

use std::collections::HashSet;

use rand::Rng;
use rand_pcg::Lcg64Xsh32;

use minfill::graph::{Graph, Vertex, VertexSource};
use minfill::{elim, simple, VertexOrdering};

const SEED: u64 = 0xcafef00dd15ea5e5;

fn incremental(graph: &Graph, stream: u64) -> VertexOrdering {
    let mut rng = Lcg64Xsh32::new(SEED, stream);
    elim::compute_ordering(graph, &mut rng)
}

fn recomputing(graph: &Graph, stream: u64) -> VertexOrdering {
    let mut rng = Lcg64Xsh32::new(SEED, stream);
    simple::compute_ordering(graph, &mut rng)
}

fn assert_permutation(ordering: &VertexOrdering, n: usize) {
    assert!(ordering.is_complete());
    assert_eq!(ordering.order.len(), n);
    let mut sorted = ordering.order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..n as Vertex).collect::<Vec<_>>());
}

/// Replays `order` over an independent adjacency-set representation of
/// `graph`, returning the fill edges inserted and the largest closed
/// neighborhood met.
fn replay(graph: &Graph, order: &[Vertex]) -> (usize, usize) {
    let n = graph.nvertices();
    let mut adjacency: Vec<HashSet<Vertex>> = (0..n)
        .map(|v| graph.neighbors(v as Vertex).iter().copied().collect())
        .collect();
    let mut cost = 0;
    let mut max_bag = 0;
    for &v in order {
        let neighbors: Vec<Vertex> = adjacency[v as usize].iter().copied().collect();
        max_bag = max_bag.max(neighbors.len() + 1);
        for (i, &a) in neighbors.iter().enumerate() {
            for &b in &neighbors[i + 1..] {
                if adjacency[a as usize].insert(b) {
                    adjacency[b as usize].insert(a);
                    cost += 1;
                }
            }
        }
        for &w in &neighbors {
            adjacency[w as usize].remove(&v);
        }
        adjacency[v as usize].clear();
    }
    (cost, max_bag)
}

fn assert_replay_consistent(graph: &Graph, ordering: &VertexOrdering) {
    let (cost, max_bag) = replay(graph, &ordering.order);
    assert_eq!(ordering.fill_edges, cost);
    assert_eq!(ordering.max_bag_size, max_bag);
}

fn random_connected_graph(nvertices: usize, extra_edges: usize, stream: u64) -> Graph {
    let mut rng = Lcg64Xsh32::new(SEED, stream);
    let mut edges: HashSet<(Vertex, Vertex)> = HashSet::new();
    for v in 1..nvertices as Vertex {
        edges.insert((rng.gen_range(0..v), v));
    }
    while edges.len() < nvertices - 1 + extra_edges {
        let u = rng.gen_range(0..nvertices as Vertex);
        let v = rng.gen_range(0..nvertices as Vertex);
        if u != v {
            edges.insert((u.min(v), u.max(v)));
        }
    }
    let edges: Vec<_> = edges.into_iter().collect();
    Graph::from_edges(nvertices, &edges)
}

#[test]
fn empty_graph_yields_empty_ordering() {
    let graph = Graph::from_edges(0, &[]);
    for ordering in [incremental(&graph, 0), recomputing(&graph, 0)].iter() {
        assert!(ordering.is_complete());
        assert!(ordering.order.is_empty());
        assert_eq!(ordering.fill_edges, 0);
        assert_eq!(ordering.max_bag_size, 0);
    }
}

#[test]
fn single_vertex() {
    let graph = Graph::from_edges(1, &[]);
    let ordering = incremental(&graph, 0);
    assert_eq!(ordering.order, vec![0]);
    assert_eq!(ordering.max_bag_size, 1);
}

#[test]
fn clique_needs_no_fill() {
    let edges = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
    let graph = Graph::from_edges(4, &edges);
    for stream in 0..5 {
        for ordering in [incremental(&graph, stream), recomputing(&graph, stream)].iter() {
            assert_permutation(ordering, 4);
            assert_eq!(ordering.fill_edges, 0);
            assert_eq!(ordering.max_bag_size, 4);
        }
    }
}

#[test]
fn path_eliminates_endpoints_first() {
    // Path 0-1-2-3-4: the interior vertices cost a fill edge, the endpoints
    // are free, so no elimination may ever pay.
    let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    for stream in 0..10 {
        for ordering in [incremental(&graph, stream), recomputing(&graph, stream)].iter() {
            assert_permutation(ordering, 5);
            let first = ordering.order[0];
            assert!(first == 0 || first == 4, "paid elimination of {}", first);
            assert_eq!(ordering.fill_edges, 0);
            assert_eq!(ordering.max_bag_size, 2);
        }
    }
}

#[test]
fn star_spares_the_center() {
    // Center 0, leaves 1..=5. The center costs C(5,2) = 10 while any leaf is
    // free, so the first four eliminations must all be leaves.
    let graph = Graph::from_edges(6, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
    for stream in 0..10 {
        for ordering in [incremental(&graph, stream), recomputing(&graph, stream)].iter() {
            assert_permutation(ordering, 6);
            assert!(!ordering.order[..4].contains(&0));
            assert_eq!(ordering.fill_edges, 0);
            assert_eq!(ordering.max_bag_size, 2);
        }
    }
}

#[test]
fn tree_orderings_are_free() {
    let graph = random_connected_graph(64, 0, 3);
    for stream in 0..4 {
        let a = incremental(&graph, stream);
        let b = recomputing(&graph, stream);
        assert_permutation(&a, 64);
        assert_permutation(&b, 64);
        assert_eq!(a.fill_edges, 0);
        assert_eq!(b.fill_edges, 0);
        assert_eq!(a.max_bag_size, 2);
        assert_eq!(b.max_bag_size, 2);
    }
}

#[test]
fn cycle_cost_is_invariant_to_tie_breaking() {
    // Eliminating any vertex of a k-cycle costs one fill edge and leaves a
    // (k-1)-cycle, so every ordering of an n-cycle costs n - 3.
    for n in [4usize, 7, 12, 25].iter().copied() {
        let edges: Vec<(Vertex, Vertex)> = (0..n as Vertex)
            .map(|v| (v, (v + 1) % n as Vertex))
            .collect();
        let graph = Graph::from_edges(n, &edges);
        for stream in 0..5 {
            let a = incremental(&graph, stream);
            let b = recomputing(&graph, stream);
            assert_permutation(&a, n);
            assert_permutation(&b, n);
            assert_eq!(a.fill_edges, n - 3);
            assert_eq!(b.fill_edges, n - 3);
            assert_eq!(a.fill_edges, b.fill_edges);
            assert_eq!(a.max_bag_size, 3);
            assert_eq!(b.max_bag_size, 3);
        }
    }
}

#[test]
fn random_graphs_replay_to_the_reported_cost() {
    for (nvertices, extra) in [(20, 15), (40, 40), (60, 90)].iter().copied() {
        for stream in 0..4 {
            let graph = random_connected_graph(nvertices, extra, 100 + stream);
            let a = incremental(&graph, stream);
            let b = recomputing(&graph, stream);
            assert_permutation(&a, nvertices);
            assert_permutation(&b, nvertices);
            assert_replay_consistent(&graph, &a);
            assert_replay_consistent(&graph, &b);
        }
    }
}

#[test]
fn disconnected_clique_components() {
    // Two triangles and an isolated vertex: zero fill everywhere, so the
    // whole run is the clique fast path.
    let graph = Graph::from_edges(7, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
    for ordering in [incremental(&graph, 0), recomputing(&graph, 0)].iter() {
        assert_permutation(ordering, 7);
        assert_eq!(ordering.fill_edges, 0);
        assert_eq!(ordering.max_bag_size, 3);
    }
}

struct Labeled {
    ids: Vec<Vertex>,
    edges: Vec<(Vertex, Vertex)>,
}

impl VertexSource for Labeled {
    fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    fn vertex_at(&self, position: usize) -> Vertex {
        self.ids[position]
    }

    fn copy_neighbors_into(&self, vertex: Vertex, out: &mut Vec<Vertex>) {
        for &(a, b) in &self.edges {
            if a == vertex {
                out.push(b);
            }
            if b == vertex {
                out.push(a);
            }
        }
    }
}

#[test]
fn orderings_carry_external_identifiers() {
    // Path 10-42-7-99 under sparse identifiers.
    let source = Labeled {
        ids: vec![10, 42, 7, 99],
        edges: vec![(10, 42), (42, 7), (7, 99)],
    };
    let mut rng = Lcg64Xsh32::new(SEED, 11);
    let ordering = elim::compute_ordering(&source, &mut rng);
    assert!(ordering.is_complete());
    let mut sorted = ordering.order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![7, 10, 42, 99]);
    assert_eq!(ordering.fill_edges, 0);
}

#[test]
fn abort_returns_a_partial_but_consistent_ordering() {
    let graph = Graph::from_edges(
        10,
        &(0..9u32).map(|v| (v, v + 1)).collect::<Vec<_>>(),
    );
    for use_simple in [false, true].iter().copied() {
        let mut polls = 0;
        let mut rng = Lcg64Xsh32::new(SEED, 21);
        let is_aborted = || {
            polls += 1;
            polls > 2
        };
        let ordering = if use_simple {
            simple::compute_ordering_with_abort(&graph, &mut rng, is_aborted)
        } else {
            elim::compute_ordering_with_abort(&graph, &mut rng, is_aborted)
        };
        assert!(!ordering.is_complete());
        assert_eq!(ordering.order.len(), 2);
        assert_eq!(ordering.remaining.len(), 8);
        let mut all: Vec<Vertex> = ordering
            .order
            .iter()
            .chain(ordering.remaining.iter())
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }
}
