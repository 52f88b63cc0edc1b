//! Fill-value accounting and the candidate pool for min-fill elimination.
//!
//! The fill value of a vertex is the number of neighbor pairs that are not
//! yet adjacent, i.e. the number of edges its elimination would insert. The
//! tracker keeps every live fill value, their running total, and a pool of
//! candidates achieving the current minimum fill (refined by minimum degree
//! at admission time) that a uniform-random selection draws from.

use rand::Rng;

use crate::adjacency::AdjacencyStore;
use crate::graph::Vertex;
use crate::setops;

const NOT_IN_POOL: u32 = std::u32::MAX;

/// A uniform sampler over subsets of 0..n which allows:
///
///  - constant-time insertion into the domain
///  - constant-time removal from the domain
///  - constant-time sampling
pub(crate) struct PoolSampler {
    members: Vec<Vertex>,
    slot: Vec<u32>,
}

impl PoolSampler {
    /// An empty sampler over the domain 0..n.
    pub(crate) fn empty(n: usize) -> Self {
        Self {
            members: Vec::new(),
            slot: vec![NOT_IN_POOL; n],
        }
    }

    /// A sampler initially containing the entire domain 0..n.
    pub(crate) fn full(n: usize) -> Self {
        Self {
            members: (0..n as Vertex).collect(),
            slot: (0..n as u32).collect(),
        }
    }

    /// No-op if `v` is already a member.
    pub(crate) fn insert(&mut self, v: Vertex) {
        if self.slot[v as usize] != NOT_IN_POOL {
            return;
        }
        self.slot[v as usize] = self.members.len() as u32;
        self.members.push(v);
    }

    /// No-op if `v` is not a member.
    pub(crate) fn remove(&mut self, v: Vertex) {
        let at = self.slot[v as usize];
        if at == NOT_IN_POOL {
            return;
        }
        self.members.swap_remove(at as usize);
        if (at as usize) < self.members.len() {
            self.slot[self.members[at as usize] as usize] = at;
        }
        self.slot[v as usize] = NOT_IN_POOL;
    }

    pub(crate) fn clear(&mut self) {
        for &m in &self.members {
            self.slot[m as usize] = NOT_IN_POOL;
        }
        self.members.clear();
    }

    /// Samples uniformly from the current members.
    pub(crate) fn sample<R: Rng>(&self, rng: &mut R) -> Vertex {
        self.members[rng.gen_range(0..self.members.len())]
    }

    pub(crate) fn members(&self) -> &[Vertex] {
        &self.members
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// `n * (n - 1) / 2`, the number of unordered pairs among `n` elements.
pub(crate) fn pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Number of edges present between the vertices of `set`, which must be
/// sorted. A pair `(a, b)` with `a < b` is counted when `b` occurs in `a`'s
/// stored sequence.
pub(crate) fn edges_within(store: &AdjacencyStore, set: &[Vertex]) -> usize {
    let mut count = 0;
    for (i, &v) in set.iter().enumerate() {
        let seq = store.neighbors(v);
        let above = seq.partition_point(|&x| x <= v);
        count += setops::intersection_size(&set[i + 1..], &seq[above..]);
    }
    count
}

/// Fill value of `v` re-derived from scratch: pairs of stored neighbors minus
/// the edges already present between them. The result is the same whether the
/// stored sequence does or does not contain `v` itself, since a vertex is
/// adjacent to all of its neighbors.
pub(crate) fn fill_value(store: &AdjacencyStore, v: Vertex) -> usize {
    let seq = store.neighbors(v);
    pairs(seq.len()) - edges_within(store, seq)
}

/// Live fill values, their total, and the candidate pool.
pub struct FillTracker {
    fill: Vec<usize>,
    total: usize,
    min_fill: usize,
    min_degree: usize,
    pool: PoolSampler,
}

impl FillTracker {
    /// Computes the initial fill value of every vertex of `store` and seeds
    /// the pool with the vertices achieving minimum fill, refined to minimum
    /// degree among those.
    pub fn new(store: &AdjacencyStore) -> Self {
        let n = store.len();
        let mut tracker = FillTracker {
            fill: vec![0; n],
            total: 0,
            min_fill: std::usize::MAX,
            min_degree: std::usize::MAX,
            pool: PoolSampler::empty(n),
        };
        for v in 0..n as Vertex {
            let value = fill_value(store, v);
            tracker.fill[v as usize] = value;
            tracker.total += value;
            tracker.admit(v, value, store.degree(v));
        }
        tracker
    }

    pub fn fill(&self, v: Vertex) -> usize {
        self.fill[v as usize]
    }

    pub fn total_fill(&self) -> usize {
        self.total
    }

    pub fn min_fill(&self) -> usize {
        self.min_fill
    }

    pub fn pool_is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    #[cfg(debug_assertions)]
    pub(crate) fn pool_members(&self) -> &[Vertex] {
        self.pool.members()
    }

    /// Records a new fill value for a live vertex, keeping the running total
    /// in sync.
    pub fn store_fill(&mut self, v: Vertex, value: usize) {
        let old = self.fill[v as usize];
        self.total -= old;
        self.total += value;
        self.fill[v as usize] = value;
    }

    /// Removes an eliminated vertex's fill value from the running total. Its
    /// per-vertex entry is left behind; dead vertices are never read again.
    pub fn retire(&mut self, v: Vertex) {
        self.total -= self.fill[v as usize];
    }

    /// Admits `v` to the pool when it matches the current minima, lowering
    /// them (and restarting the pool) when it beats them. The degree seen at
    /// admission is not revisited if the vertex's degree later drifts.
    pub fn admit(&mut self, v: Vertex, fill: usize, degree: usize) {
        if fill > self.min_fill {
            return;
        }
        if fill < self.min_fill {
            self.min_fill = fill;
            self.min_degree = degree;
            self.pool.clear();
        }
        if degree > self.min_degree {
            return;
        }
        if degree < self.min_degree {
            self.min_degree = degree;
            self.pool.clear();
        }
        self.pool.insert(v);
    }

    /// Drops `v` from the pool (used when its fill value rises above the
    /// minimum). No-op if absent.
    pub fn evict(&mut self, v: Vertex) {
        self.pool.remove(v);
    }

    /// Rescans the live vertices to find the new minima after the pool has
    /// been exhausted. `live` yields each live vertex with its degree.
    pub fn refill<I: Iterator<Item = (Vertex, usize)>>(&mut self, live: I) {
        self.min_fill = std::usize::MAX;
        self.min_degree = std::usize::MAX;
        self.pool.clear();
        for (v, degree) in live {
            self.admit(v, self.fill[v as usize], degree);
        }
    }

    /// Draws a candidate uniformly at random and removes it from the pool.
    pub fn select<R: Rng>(&mut self, rng: &mut R) -> Vertex {
        debug_assert!(!self.pool.is_empty());
        let v = self.pool.sample(rng);
        self.pool.remove(v);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::AdjacencyStore;
    use crate::graph::Graph;
    use rand_pcg::Lcg64Xsh32;

    #[test]
    fn sampler_membership() {
        let mut pool = PoolSampler::empty(5);
        pool.insert(3);
        pool.insert(1);
        pool.insert(3);
        assert_eq!(pool.members().len(), 2);
        pool.remove(3);
        pool.remove(3);
        assert_eq!(pool.members(), &[1]);
        pool.clear();
        assert!(pool.is_empty());

        let full = PoolSampler::full(4);
        assert_eq!(full.members(), &[0, 1, 2, 3]);
    }

    #[test]
    fn sampler_draws_members_only() {
        let mut pool = PoolSampler::empty(10);
        for v in [2, 4, 9].iter().copied() {
            pool.insert(v);
        }
        let mut rng = Lcg64Xsh32::new(0xcafef00dd15ea5e5, 7);
        for _ in 0..100 {
            let v = pool.sample(&mut rng);
            assert!(pool.members().contains(&v));
        }
    }

    #[test]
    fn initial_fill_values() {
        // Path 0-1-2-3: endpoints 0, middles 1.
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let store = AdjacencyStore::build(&g);
        let tracker = FillTracker::new(&store);
        assert_eq!(tracker.fill(0), 0);
        assert_eq!(tracker.fill(1), 1);
        assert_eq!(tracker.fill(2), 1);
        assert_eq!(tracker.fill(3), 0);
        assert_eq!(tracker.total_fill(), 2);
        assert_eq!(tracker.min_fill(), 0);
    }

    #[test]
    fn admission_refines_by_degree() {
        let mut tracker = FillTracker {
            fill: vec![0; 4],
            total: 0,
            min_fill: std::usize::MAX,
            min_degree: std::usize::MAX,
            pool: PoolSampler::empty(4),
        };
        tracker.admit(0, 2, 5);
        tracker.admit(1, 2, 3);
        assert_eq!(tracker.pool.members(), &[1]);
        tracker.admit(2, 2, 3);
        assert_eq!(tracker.pool.members(), &[1, 2]);
        tracker.admit(3, 1, 9);
        assert_eq!(tracker.pool.members(), &[3]);
        assert_eq!(tracker.min_fill(), 1);
        // Higher fill or higher degree is turned away.
        tracker.admit(0, 1, 10);
        tracker.admit(1, 2, 1);
        assert_eq!(tracker.pool.members(), &[3]);
    }

    #[test]
    fn edge_counting() {
        // Triangle plus a pendant vertex.
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
        let store = AdjacencyStore::build(&g);
        assert_eq!(edges_within(&store, &[0, 1, 2]), 3);
        assert_eq!(edges_within(&store, &[0, 1, 3]), 1);
        assert_eq!(fill_value(&store, 2), 2);
        assert_eq!(fill_value(&store, 0), 0);
    }
}
