//! Computes a min-fill elimination ordering for a graph stored in `.gr`
//! format and reports its cost and width bound.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use rand_pcg::Lcg64Xsh32;
use serde_json::json;
use structopt::StructOpt;

use minfill::graph::Vertex;
use minfill::{elim, graphio, simple, SummaryStats};

/// Reads a `.gr` graph file and emits an elimination ordering.
#[derive(Debug, StructOpt)]
#[structopt(name = "order", about = "Compute a min-fill elimination ordering.")]
struct Opt {
    /// Input graph in `.gr` format.
    #[structopt(long)]
    graph: PathBuf,

    /// Seed for tie-breaking among equally good candidates.
    #[structopt(long, default_value = "1")]
    seed: u64,

    /// Use the recomputing engine instead of the incremental one.
    #[structopt(long)]
    simple: bool,

    /// Optional output path for the ordering, one 1-based vertex per line.
    #[structopt(long)]
    out: Option<PathBuf>,
}

fn main() {
    let opt = Opt::from_args();

    let graph = graphio::read(&opt.graph);
    let degrees = SummaryStats::from((0..graph.nvertices()).map(|v| graph.degree(v as Vertex) as f64));
    println!("{}", json!({ "degrees": degrees.to_map() }));

    let mut rng = Lcg64Xsh32::new(0xcafef00dd15ea5e5, opt.seed);
    let order_start = Instant::now();
    let ordering = if opt.simple {
        simple::compute_ordering(&graph, &mut rng)
    } else {
        elim::compute_ordering(&graph, &mut rng)
    };
    println!(
        "{}",
        json!({
            "engine": if opt.simple { "simple" } else { "incremental" },
            "ordering_time": format!("{:.0?}", Instant::now().duration_since(order_start)),
            "fill_edges": ordering.fill_edges,
            "max_bag_size": ordering.max_bag_size,
            "treewidth_bound": ordering.max_bag_size.saturating_sub(1),
        })
    );
    assert!(ordering.is_complete());

    if let Some(path) = opt.out {
        let file = File::create(&path).unwrap_or_else(|e| panic!("write ordering: {:?}\n{}", path, e));
        let mut out = BufWriter::new(file);
        for &v in &ordering.order {
            writeln!(out, "{}", v + 1).expect("write vertex");
        }
        out.flush().expect("flush ordering");
    }
}
