//! Renumbered adjacency storage for the elimination engines.
//!
//! The input graph's arbitrary vertex identifiers are replaced by dense
//! zero-based indices so that plain vectors can be used everywhere downstream;
//! the original identifiers are kept in a name table and restored when an
//! ordering is handed back to the caller.

use std::collections::HashMap;

use crate::graph::{Vertex, VertexSource};
use crate::setops;

/// Per-vertex sorted neighbor sequences over dense vertex indices, together
/// with the name table produced by renumbering.
///
/// Neighbor sequences are strictly increasing and never contain the owning
/// vertex; self-loops in the input are recorded separately and play no role in
/// fill computation. Symmetry (`u` lists `v` iff `v` lists `u`) holds after
/// construction and after every `insert_edge`/`remove_edge`.
pub struct AdjacencyStore {
    names: Vec<Vertex>,
    seqs: Vec<Vec<Vertex>>,
    loops: Vec<Vertex>,
}

impl AdjacencyStore {
    /// Renumbers `source` into dense indices and copies its adjacency into
    /// sorted, deduplicated sequences.
    ///
    /// When the source identifiers are already `0..n` the mapping is the
    /// identity and no hash lookup is built. Panics if the source lists a
    /// vertex twice or a neighbor identifier that is not a vertex.
    pub fn build<S: VertexSource>(source: &S) -> Self {
        let size = source.vertex_count();
        let ids: Vec<Vertex> = (0..size).map(|at| source.vertex_at(at)).collect();
        let dense = ids.iter().enumerate().all(|(at, &id)| id as usize == at);

        let mut store = AdjacencyStore {
            names: Vec::with_capacity(size),
            seqs: vec![Vec::new(); size],
            loops: Vec::new(),
        };
        let mut mapping: HashMap<Vertex, Vertex> = HashMap::new();
        if dense {
            store.names = ids;
        } else {
            mapping.reserve(size);
            for &id in &ids {
                register(id, &mut mapping, &mut store.names);
            }
            assert!(
                store.names.len() == size,
                "duplicate vertex identifier in input graph"
            );
        }

        let mut raw = Vec::new();
        for (v, &id) in store.names.iter().enumerate() {
            raw.clear();
            source.copy_neighbors_into(id, &mut raw);
            let seq = &mut store.seqs[v];
            seq.reserve(raw.len());
            if dense {
                for &n in &raw {
                    assert!((n as usize) < size, "neighbor {} out of range", n);
                    seq.push(n);
                }
            } else {
                for &n in &raw {
                    let mapped = *mapping
                        .get(&n)
                        .unwrap_or_else(|| panic!("neighbor {} is not a vertex", n));
                    seq.push(mapped);
                }
            }
            seq.sort_unstable();
            seq.dedup();
            if setops::remove_sorted(seq, v as Vertex) {
                store.loops.push(v as Vertex);
            }
        }
        store
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    /// The external identifier of dense vertex `v`.
    pub fn name(&self, v: Vertex) -> Vertex {
        self.names[v as usize]
    }

    /// The stored neighbor sequence of `v` (sorted, duplicate-free).
    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        &self.seqs[v as usize]
    }

    /// Length of the stored sequence of `v`.
    pub fn degree(&self, v: Vertex) -> usize {
        self.seqs[v as usize].len()
    }

    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.seqs[u as usize].binary_search(&v).is_ok()
    }

    pub fn has_self_loop(&self, v: Vertex) -> bool {
        self.loops.binary_search(&v).is_ok()
    }

    /// Inserts the edge `{u, v}` on both endpoints. Panics if it is already
    /// present or if `u == v`.
    pub fn insert_edge(&mut self, u: Vertex, v: Vertex) {
        assert!(u != v, "cannot insert a loop edge on vertex {}", u);
        let fresh = setops::insert_sorted(&mut self.seqs[u as usize], v);
        assert!(fresh, "edge ({}, {}) already present", u, v);
        let fresh = setops::insert_sorted(&mut self.seqs[v as usize], u);
        assert!(fresh, "asymmetric adjacency at ({}, {})", v, u);
    }

    /// Removes the edge `{u, v}` from both endpoints. Panics if it is absent.
    pub fn remove_edge(&mut self, u: Vertex, v: Vertex) {
        let found = setops::remove_sorted(&mut self.seqs[u as usize], v);
        assert!(found, "edge ({}, {}) not present", u, v);
        let found = setops::remove_sorted(&mut self.seqs[v as usize], u);
        assert!(found, "asymmetric adjacency at ({}, {})", v, u);
    }

    pub(crate) fn seq_mut(&mut self, v: Vertex) -> &mut Vec<Vertex> {
        &mut self.seqs[v as usize]
    }

    /// Moves the sequence of `v` out of the store, leaving an empty slot.
    pub(crate) fn take_seq(&mut self, v: Vertex) -> Vec<Vertex> {
        std::mem::take(&mut self.seqs[v as usize])
    }
}

fn register(id: Vertex, mapping: &mut HashMap<Vertex, Vertex>, names: &mut Vec<Vertex>) -> Vertex {
    match mapping.entry(id) {
        std::collections::hash_map::Entry::Occupied(slot) => *slot.get(),
        std::collections::hash_map::Entry::Vacant(slot) => {
            let mapped = names.len() as Vertex;
            names.push(id);
            slot.insert(mapped);
            mapped
        }
    }
}
