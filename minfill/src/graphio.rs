//! Reader and writer for the `.gr` graph format.
//!
//! The format is line-oriented: `c`-prefixed comment lines, a single
//! `p tw <nvertices> <nedges>` problem line, and one `<u> <v>` line per edge
//! with 1-based vertex identifiers. Duplicate edges and self-loops are
//! tolerated on input. Malformed input is a panic, not a recoverable error.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use bstr::ByteSlice;
use serde_json::json;

use crate::graph::{Graph, Vertex};

const BUFSIZE: usize = 64 * 1024;

/// Reads a `.gr` file into an in-memory graph, reporting parse timings.
pub fn read(path: &Path) -> Graph {
    let file = File::open(path).unwrap_or_else(|e| panic!("read graph: {:?}\n{}", path, e));
    let read_start = Instant::now();
    let graph = parse_gr(BufReader::with_capacity(BUFSIZE, file));
    println!(
        "{}",
        json!({
            "graph_read_time": format!("{:.0?}", Instant::now().duration_since(read_start)),
            "nvertices": graph.nvertices(),
            "nedges": graph.nedges(),
        })
    );
    graph
}

/// Parses `.gr` content from any buffered reader.
pub fn parse_gr<R: BufRead>(reader: R) -> Graph {
    let mut nvertices: Option<usize> = None;
    let mut declared_edges = 0;
    let mut edges: Vec<(Vertex, Vertex)> = Vec::new();

    for line in reader.split(b'\n') {
        let line = line.expect("line read");
        let mut words = line.fields();
        let head = match words.next() {
            None => continue,
            Some(w) => w,
        };
        match head {
            b"c" => continue,
            b"p" => {
                assert!(nvertices.is_none(), "repeated problem line");
                let descriptor = words.next().expect("problem descriptor");
                assert_eq!(descriptor, b"tw" as &[u8], "unsupported problem descriptor");
                nvertices = Some(parse_word(words.next().expect("vertex count")));
                declared_edges = parse_word(words.next().expect("edge count"));
                edges.reserve(declared_edges);
            }
            first => {
                let n = nvertices.expect("edge line before problem line");
                let u: usize = parse_word(first);
                let v: usize = parse_word(words.next().expect("edge endpoint"));
                assert!(
                    (1..=n).contains(&u) && (1..=n).contains(&v),
                    "edge ({}, {}) outside 1..={}",
                    u,
                    v,
                    n
                );
                edges.push(((u - 1) as Vertex, (v - 1) as Vertex));
            }
        }
    }

    let n = nvertices.expect("missing problem line");
    assert_eq!(
        edges.len(),
        declared_edges,
        "problem line declares {} edges, found {}",
        declared_edges,
        edges.len()
    );
    Graph::from_edges(n, &edges)
}

/// Writes `graph` to `path` in `.gr` form, one line per deduplicated edge.
pub fn write(path: &Path, graph: &Graph) {
    let file = File::create(path).unwrap_or_else(|e| panic!("write graph: {:?}\n{}", path, e));
    let mut out = BufWriter::with_capacity(BUFSIZE, file);

    let nedges: usize = (0..graph.nvertices() as Vertex)
        .map(|u| graph.neighbors(u).iter().filter(|&&w| w >= u).count())
        .sum();
    writeln!(out, "p tw {} {}", graph.nvertices(), nedges).expect("write header");
    for u in 0..graph.nvertices() as Vertex {
        for &w in graph.neighbors(u) {
            if w >= u {
                writeln!(out, "{} {}", u + 1, w + 1).expect("write edge");
            }
        }
    }
    out.flush().expect("flush graph");
}

fn parse_word<T: std::str::FromStr>(word: &[u8]) -> T
where
    T::Err: std::fmt::Debug,
{
    std::str::from_utf8(word)
        .expect("utf-8")
        .parse()
        .expect("parse number")
}
