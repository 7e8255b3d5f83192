//! Benchmark for GraphML encoding/decoding using a synthetic document.
//!
//! Builds a graph of `N` nodes (first argument, default 100k) where every
//! tenth node carries a nested subgraph, and every node and edge carries
//! custom attribute data.

use std::time::Instant;

use graphml::{
    Data, Document, Edge, EdgeDefault, EncodeOptions, Graph, Key, Node, Payload, Scope,
    decode_document, encode_document, encode_document_with_options, validate_document,
};

/// Builds the benchmark document.
fn build_document(count: usize) -> Document {
    let mut graph = Graph::new("G", Some(EdgeDefault::Directed)).with_data(Data::text("name", "bench"));

    for i in 0..count {
        let mut node = Node::new(format!("n{}", i))
            .with_data(Data::text("label", &format!("Node {} <{}>", i, i % 7)))
            .with_data(Data::text("weight", &format!("{:.3}", i as f64 / 3.0)));

        if i % 10 == 0 {
            let sub = Graph::new(format!("n{}::", i), None)
                .with_node(Node::new(format!("n{}::a", i)))
                .with_node(Node::new(format!("n{}::b", i)))
                .with_edge(Edge::new(format!("n{}::a", i), format!("n{}::b", i)));
            node = node.with_graph(sub);
        }
        graph = graph.with_node(node);

        if i > 0 {
            graph = graph.with_edge(
                Edge::new(format!("n{}", i - 1), format!("n{}", i))
                    .with_id(format!("e{}", i))
                    .with_data(Data::text("weight", "1.0")),
            );
        }
    }

    Document::new()
        .with_key(Key::new(Scope::Graph, "name", "name", "string"))
        .with_key(Key::new(Scope::All, "label", "label", "string").with_default(Payload::from_text("?")))
        .with_key(Key::new(Scope::Node, "weight", "weight", "double"))
        .with_key(Key::new(Scope::Edge, "weight", "weight", "double"))
        .with_graph(graph)
}

fn main() {
    let count: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);

    println!("Building document with {} nodes", count);

    let build_start = Instant::now();
    let doc = build_document(count);
    let build_time = build_start.elapsed();
    println!("Built in {:?}", build_time);

    let validate_start = Instant::now();
    validate_document(&doc).expect("Benchmark document should validate");
    println!("Validated in {:?}", validate_start.elapsed());

    // Benchmark encoding (compact)
    let encode_start = Instant::now();
    let mut encoded = Vec::new();
    encode_document(&mut encoded, &doc).expect("Failed to encode");
    let encode_time = encode_start.elapsed();

    println!("\nCompact: {} bytes in {:?}", encoded.len(), encode_time);
    println!(
        "  Throughput: {:.2} MB/s",
        (encoded.len() as f64 / 1_000_000.0) / encode_time.as_secs_f64()
    );

    // Benchmark encoding (pretty)
    let pretty_start = Instant::now();
    let mut pretty = Vec::new();
    encode_document_with_options(&mut pretty, &doc, &EncodeOptions::pretty())
        .expect("Failed to encode pretty");
    let pretty_time = pretty_start.elapsed();

    println!("\nPretty: {} bytes in {:?}", pretty.len(), pretty_time);
    println!(
        "  Overhead vs compact: {:.1}% larger",
        (pretty.len() as f64 / encoded.len() as f64 - 1.0) * 100.0
    );

    // Compressed size for reference
    let compress_start = Instant::now();
    let compressed = zstd::encode_all(&encoded[..], 3).expect("Failed to compress");
    let compress_time = compress_start.elapsed();

    println!(
        "\nCompressed (zstd level 3): {} bytes in {:?}",
        compressed.len(),
        compress_time
    );
    println!(
        "  Compression ratio: {:.1}x",
        encoded.len() as f64 / compressed.len() as f64
    );

    // Benchmark decoding
    const DECODE_ITERS: u32 = 5;

    // Warmup
    let _ = decode_document(&encoded[..]).expect("Failed to decode");

    let decode_start = Instant::now();
    let mut decoded = None;
    for _ in 0..DECODE_ITERS {
        decoded = Some(decode_document(&encoded[..]).expect("Failed to decode"));
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;
    let decoded = decoded.unwrap();

    println!(
        "\nDecode: {:?} (avg of {} iterations)",
        decode_time, DECODE_ITERS
    );
    println!(
        "  Throughput: {:.2} MB/s",
        (encoded.len() as f64 / 1_000_000.0) / decode_time.as_secs_f64()
    );
    assert_eq!(decoded, doc, "Round-trip should preserve the document");

    let decoded_pretty = decode_document(&pretty[..]).expect("Failed to decode pretty");
    assert_eq!(decoded_pretty, doc, "Pretty output should decode to the same document");

    let decompressed = zstd::decode_all(&compressed[..]).expect("Failed to decompress");
    assert_eq!(decompressed, encoded);

    println!("\nRound-trip verified");
}
