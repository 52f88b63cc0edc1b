//! Samples a low-degree connected simple graph and writes it out in `.gr`
//! format.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use rand::Rng;
use rand_pcg::Lcg64Xsh32;
use serde_json::json;
use structopt::StructOpt;

use minfill::graph::{Graph, Vertex};
use minfill::graphio;

/// Generate a connected simple graph with the provided average degree.
#[derive(Debug, StructOpt)]
#[structopt(name = "sample", about = "Sample a connected graph.")]
struct Opt {
    /// Output path for the graph.
    #[structopt(long)]
    out: PathBuf,

    /// Average degree less two (the true average degree ends up larger by
    /// about two because a random spanning tree is laid down first to keep
    /// the graph connected).
    #[structopt(long)]
    degree: usize,

    /// Number of vertices.
    #[structopt(long)]
    nvertices: usize,

    /// Random sampling seed.
    #[structopt(long, default_value = "1")]
    seed: u64,
}

fn main() {
    let opt = Opt::from_args();
    assert!(opt.nvertices >= 2, "need at least two vertices");

    let sample_start = Instant::now();
    let mut rng = Lcg64Xsh32::new(0xcafef00dd15ea5e5, opt.seed);
    let mut edges: HashSet<(Vertex, Vertex)> = HashSet::new();

    // Random spanning tree: attach each vertex to an earlier one.
    for v in 1..opt.nvertices as Vertex {
        let u = rng.gen_range(0..v);
        edges.insert((u, v));
    }

    let extra = opt.nvertices * opt.degree / 2;
    let mut rejected = 0;
    while edges.len() < opt.nvertices - 1 + extra {
        let u = rng.gen_range(0..opt.nvertices as Vertex);
        let v = rng.gen_range(0..opt.nvertices as Vertex);
        if u == v || edges.contains(&(u.min(v), u.max(v))) {
            rejected += 1;
            if rejected > 100 * (extra + 1) {
                break;
            }
            continue;
        }
        edges.insert((u.min(v), u.max(v)));
    }

    let edges: Vec<(Vertex, Vertex)> = edges.into_iter().collect();
    let graph = Graph::from_edges(opt.nvertices, &edges);
    graphio::write(&opt.out, &graph);

    println!(
        "{}",
        json!({
            "nvertices": graph.nvertices(),
            "nedges": graph.nedges(),
            "rejected_samples": rejected,
            "sample_time": format!("{:.0?}", Instant::now().duration_since(sample_start)),
        })
    );
}
