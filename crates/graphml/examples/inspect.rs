//! Simple decoder to inspect GraphML files.

use std::fs::File;
use std::io::BufReader;

use graphml::{Data, Graph, Node, Scope, decode_document, validate_document};

fn format_data(data: &Data) -> String {
    match data.payload.text() {
        Ok(text) => {
            let text = text.trim();
            let preview: String = text.chars().take(60).collect();
            if text.chars().count() > 60 {
                format!("{}=\"{}...\" ({} tokens)", data.key, preview, data.payload.len())
            } else {
                format!("{}=\"{}\" ({} tokens)", data.key, preview, data.payload.len())
            }
        }
        Err(e) => format!("{}=<unreadable: {}>", data.key, e),
    }
}

#[derive(Default)]
struct Counts {
    graphs: usize,
    nodes: usize,
    edges: usize,
    data: usize,
    max_depth: usize,
}

fn count_graph(graph: &Graph, depth: usize, counts: &mut Counts) {
    counts.graphs += 1;
    counts.edges += graph.edges.len();
    counts.data += graph.data.len() + graph.edges.iter().map(|e| e.data.len()).sum::<usize>();
    counts.max_depth = counts.max_depth.max(depth);
    for node in &graph.nodes {
        count_node(node, depth, counts);
    }
}

fn count_node(node: &Node, depth: usize, counts: &mut Counts) {
    counts.nodes += 1;
    counts.data += node.data.len();
    for graph in &node.graphs {
        count_graph(graph, depth + 1, counts);
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "graph.graphml".to_string());

    println!("Reading: {}", path);

    let file = File::open(&path).expect("Failed to open file");
    println!("File size: {} bytes", file.metadata().map(|m| m.len()).unwrap_or(0));

    let doc = match decode_document(BufReader::new(file)) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Decode failed ({}): {}", e.kind().as_str(), e);
            std::process::exit(1);
        }
    };

    println!("\n=== Prologue ({}) ===", doc.instructions.len());
    for pi in &doc.instructions {
        println!("  <?{}?>", pi);
    }

    println!("\n=== Keys ({}) ===", doc.keys.len());
    for key in &doc.keys {
        let name = if key.name.is_empty() { "-" } else { key.name.as_str() };
        let ty = if key.ty.is_empty() { "-" } else { key.ty.as_str() };
        let default = if key.default.is_some() { " (default)" } else { "" };
        println!("  {:<12} for={:<10} name={} type={}{}", key.id, key.scope, name, ty, default);
    }
    let per_scope = |scope: Scope| doc.keys.iter().filter(|k| k.scope == scope).count();
    println!(
        "  all={} graph={} node={} edge={}",
        per_scope(Scope::All),
        per_scope(Scope::Graph),
        per_scope(Scope::Node),
        per_scope(Scope::Edge)
    );

    if !doc.data.is_empty() {
        println!("\n=== Document data ===");
        for data in &doc.data {
            println!("  {}", format_data(data));
        }
    }

    let mut counts = Counts {
        data: doc.data.len(),
        ..Counts::default()
    };
    for graph in &doc.graphs {
        count_graph(graph, 1, &mut counts);
    }

    println!("\n=== Graphs ===");
    for graph in &doc.graphs {
        println!(
            "  {} (edgedefault={}): {} nodes, {} edges",
            graph.id().unwrap_or("<anonymous>"),
            graph.edge_default.map(|d| d.as_str()).unwrap_or("-"),
            graph.nodes.len(),
            graph.edges.len()
        );
        for node in graph.nodes.iter().take(5) {
            let data: Vec<String> = node.data.iter().map(format_data).collect();
            println!("    node {} {}", node.id().unwrap_or("?"), data.join(", "));
        }
        if graph.nodes.len() > 5 {
            println!("    ... and {} more nodes", graph.nodes.len() - 5);
        }
    }

    println!("\n=== Summary ===");
    println!("Graphs: {} (max nesting {})", counts.graphs, counts.max_depth);
    println!("Nodes: {}", counts.nodes);
    println!("Edges: {}", counts.edges);
    println!("Data elements: {}", counts.data);

    validate_document(&doc).expect("decoded document must validate");
}
