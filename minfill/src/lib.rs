//! # `minfill` - greedy elimination orderings for treewidth bounding
//!
//! Computes vertex elimination orderings of sparse graphs with the min-fill
//! heuristic: repeatedly eliminate a vertex whose neighborhood needs the
//! fewest edges to become a clique. The width of the resulting ordering
//! bounds the treewidth of the graph, which makes it the combinatorial
//! workhorse behind tree and hypertree decomposition.
//!
//! Two interchangeable engines are provided: [`elim`] repairs fill values
//! incrementally after each elimination, [`simple`] re-derives them from
//! scratch and serves as ground truth. Both consume any [`graph::VertexSource`]
//! and are deterministic given a fixed [`rand::Rng`].

use std::collections::HashMap;

use ordered_float::NotNan;

use crate::graph::Vertex;

pub mod adjacency;
pub mod elim;
pub mod fill;
pub mod graph;
pub mod graphio;
pub mod setops;
pub mod simple;

/// Result of an elimination run.
pub struct VertexOrdering {
    /// Eliminated vertices in order, as external identifiers. A full
    /// permutation of the input vertex set unless the run was aborted.
    pub order: Vec<Vertex>,
    /// Vertices not yet ordered when an abort was observed; empty otherwise.
    pub remaining: Vec<Vertex>,
    /// Largest closed neighborhood met while eliminating; the induced
    /// treewidth bound is this minus one.
    pub max_bag_size: usize,
    /// Total number of fill edges the ordering inserted (its cost).
    pub fill_edges: usize,
}

impl VertexOrdering {
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

const NSTAT_PERCENTILES: usize = 5;
const STAT_PERCENTILES: [f64; NSTAT_PERCENTILES] = [0.05, 0.25, 0.50, 0.75, 0.95];

/// Small percentile summary of a nonempty sample, used by the demo binaries
/// to report degree and cost distributions.
pub struct SummaryStats {
    min: f64,
    max: f64,
    mean: f64,
    percentiles: [f64; NSTAT_PERCENTILES],
}

impl SummaryStats {
    pub fn from(it: impl Iterator<Item = f64>) -> Self {
        let mut v: Vec<NotNan<f64>> = it.map(|f| NotNan::new(f).unwrap()).collect();
        assert!(!v.is_empty(), "summary of an empty sample");
        v.sort_unstable();
        let mut stats = SummaryStats {
            min: v[0].into_inner(),
            max: v[v.len() - 1].into_inner(),
            mean: v.iter().map(|f| f.into_inner()).sum::<f64>() / v.len() as f64,
            percentiles: Default::default(),
        };
        STAT_PERCENTILES
            .iter()
            .copied()
            .map(|f| v[((v.len() - 1) as f64 * f) as usize].into_inner())
            .zip(stats.percentiles.iter_mut())
            .for_each(|(val, p)| *p = val);
        stats
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        let mut map: HashMap<_, _> = STAT_PERCENTILES
            .iter()
            .map(|f| format!("p{:.2}", f))
            .zip(self.percentiles.iter().copied())
            .collect();
        map.insert("min".to_string(), self.min);
        map.insert("max".to_string(), self.max);
        map.insert("mean".to_string(), self.mean);
        map
    }
}
