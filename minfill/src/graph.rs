//! Compact graph data structure and the input contract of the ordering
//! engines.

use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelRefMutIterator;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSlice;

/// Vertex identifier. Externally an arbitrary `u32` name; internally (after
/// renumbering, see [`crate::adjacency::AdjacencyStore`]) a dense index in
/// `[0, n)`.
pub type Vertex = u32;

/// Read-only view of an input graph, consumed exactly once while building the
/// adjacency store. Positions enumerate the vertex set; identifiers may be
/// arbitrary as long as every neighbor identifier also occurs at some
/// position.
pub trait VertexSource {
    fn vertex_count(&self) -> usize;

    /// The identifier of the vertex at `position` in `[0, vertex_count())`.
    fn vertex_at(&self, position: usize) -> Vertex;

    /// Appends the neighbor identifiers of `vertex` onto `out`, in any order,
    /// duplicates permitted.
    fn copy_neighbors_into(&self, vertex: Vertex, out: &mut Vec<Vertex>);
}

/// A compact adjacency list intended for sparse graphs.
///
/// The space of vertices is a contiguous range of u32 ints
/// from [0, nvertices).
pub struct Graph {
    offsets: Vec<usize>,
    neighbors: Vec<Vertex>,
}

impl Graph {
    /// `offsets.len()` should be one greater than the number of vertices
    /// with `neighbors[offsets[i]..offsets[i+1]]` being the edges incident
    /// from `i`, which should be necessarily sorted and bidirectional.
    /// Isolated vertices are allowed (empty neighbor ranges).
    pub(crate) fn new(offsets: Vec<usize>, neighbors: Vec<Vertex>) -> Self {
        assert!(offsets.len() <= (1 << 32));
        debug_assert!(offsets.par_windows(2).enumerate().all(|(i, s)| {
            s[0] <= s[1]
                && neighbors[s[0]..s[1]].windows(2).all(|ss| ss[0] < ss[1])
                && neighbors[s[0]..s[1]].iter().copied().all(|j| {
                    let i = &(i as u32);
                    j == *i
                        || neighbors[offsets[j as usize]..offsets[1 + j as usize]]
                            .binary_search(i)
                            .is_ok()
                })
        }));
        Self { offsets, neighbors }
    }

    /// Builds a graph over the vertex space `[0, nvertices)` from an edge
    /// list. Edges are symmetrized and deduplicated; a self-loop contributes
    /// a single entry to its vertex's neighbor list.
    pub fn from_edges(nvertices: usize, edges: &[(Vertex, Vertex)]) -> Self {
        let mut adjacency = vec![Vec::new(); nvertices];
        for &(u, v) in edges {
            assert!(
                (u as usize) < nvertices && (v as usize) < nvertices,
                "edge ({}, {}) outside vertex range [0, {})",
                u,
                v,
                nvertices
            );
            adjacency[u as usize].push(v);
            if u != v {
                adjacency[v as usize].push(u);
            }
        }
        adjacency.par_iter_mut().for_each(|list| {
            list.sort_unstable();
            list.dedup();
        });
        let mut offsets = Vec::with_capacity(nvertices + 1);
        offsets.push(0);
        let mut neighbors = Vec::with_capacity(2 * edges.len());
        for list in &adjacency {
            neighbors.extend_from_slice(list);
            offsets.push(neighbors.len());
        }
        Self::new(offsets, neighbors)
    }

    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        let v = v as usize;
        let lo = self.offsets[v];
        let hi = self.offsets[v + 1];
        &self.neighbors[lo..hi]
    }

    pub fn degree(&self, v: Vertex) -> usize {
        let v = v as usize;
        let lo = self.offsets[v];
        let hi = self.offsets[v + 1];
        hi - lo
    }

    pub fn nvertices(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn nedges(&self) -> usize {
        self.neighbors.len() / 2
    }
}

impl VertexSource for Graph {
    fn vertex_count(&self) -> usize {
        self.nvertices()
    }

    fn vertex_at(&self, position: usize) -> Vertex {
        position as Vertex
    }

    fn copy_neighbors_into(&self, vertex: Vertex, out: &mut Vec<Vertex>) {
        out.extend_from_slice(self.neighbors(vertex));
    }
}
