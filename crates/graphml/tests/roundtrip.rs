//! Round-trip tests over whole documents.
//!
//! Decoding an encoded document must give back the same tree, and encoding
//! must be stable: a second decode/encode cycle reproduces the first output
//! byte for byte.

use graphml::{
    Attr, Data, Document, Edge, EdgeDefault, EncodeOptions, ErrorKind, Graph, Key, Node, Payload,
    Scope, Token, decode_document_str, encode_document_to_string, encode_document_with_options,
    validate_document,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// =============================================================================
// Fixtures
// =============================================================================

const SIMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">
  <key id="d0" for="node" attr.name="color" attr.type="string">
    <default>yellow</default>
  </key>
  <key id="d1" for="edge" attr.name="weight" attr.type="double"/>
  <graph id="G" edgedefault="undirected">
    <node id="n0">
      <data key="d0">green</data>
    </node>
    <node id="n1"/>
    <node id="n2">
      <data key="d0">blue</data>
    </node>
    <edge id="e0" source="n0" target="n2">
      <data key="d1">1.0</data>
    </edge>
    <edge id="e1" source="n0" target="n1">
      <data key="d1">1.0</data>
    </edge>
    <edge id="e2" source="n1" target="n2"/>
  </graph>
</graphml>
"#;

const YED: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:java="http://www.yworks.com/xml/yfiles-common/1.0/java" xmlns:y="http://www.yworks.com/xml/graphml" xmlns:yed="http://www.yworks.com/xml/yed/3">
  <!--Created by yEd 3.21-->
  <key for="port" id="d0" yfiles.type="portgraphics"/>
  <key attr.name="Description" attr.type="string" for="graph" id="d2"/>
  <key attr.name="url" attr.type="string" for="node" id="d3"/>
  <key for="node" id="d6" yfiles.type="nodegraphics"/>
  <key for="graphml" id="d7" yfiles.type="resources"/>
  <key for="edge" id="d10" yfiles.type="edgegraphics"/>
  <graph edgedefault="directed" id="G">
    <data key="d2"/>
    <node id="n0">
      <data key="d6">
        <y:ShapeNode>
          <y:Geometry height="30.0" width="30.0" x="0.0" y="0.0"/>
          <y:Fill color="#FFCC00" transparent="false"/>
          <y:NodeLabel alignment="center" autoSizePolicy="content">A &amp; B<y:LabelModel><y:SmartNodeLabelModel distance="4.0"/></y:LabelModel></y:NodeLabel>
          <!-- shape is kept -->
          <y:Shape type="rectangle"/>
        </y:ShapeNode>
      </data>
    </node>
    <node id="n1" yfiles.foldertype="group">
      <data key="d6">
        <y:ProxyAutoBoundsNode>
          <y:Realizers active="0"><y:GroupNode><y:NodeLabel><![CDATA[Group <1>]]></y:NodeLabel></y:GroupNode></y:Realizers>
        </y:ProxyAutoBoundsNode>
      </data>
      <graph edgedefault="directed" id="n1:">
        <node id="n1::n0"/>
        <node id="n1::n1">
          <data key="d3">http://example.com/?a=1&amp;b=2</data>
        </node>
        <edge id="n1::e0" source="n1::n0" target="n1::n1"/>
      </graph>
    </node>
    <edge id="e0" source="n0" target="n1::n0">
      <data key="d10">
        <y:PolyLineEdge>
          <y:Path sx="0.0" sy="0.0" tx="0.0" ty="0.0"/>
          <y:Arrows source="none" target="standard"/>
        </y:PolyLineEdge>
      </data>
    </edge>
  </graph>
  <data key="d7">
    <y:Resources/>
  </data>
</graphml>
"##;

// =============================================================================
// Test Helpers
// =============================================================================

/// Decodes, encodes, decodes again and checks the cycle is stable.
fn assert_roundtrip(input: &str) -> Document {
    let doc = decode_document_str(input).unwrap();
    let encoded = encode_document_to_string(&doc).unwrap();
    let redecoded = decode_document_str(&encoded).unwrap();
    assert_eq!(redecoded, doc);
    assert_eq!(encode_document_to_string(&redecoded).unwrap(), encoded);
    doc
}

fn encode_pretty(doc: &Document) -> String {
    let mut out = Vec::new();
    encode_document_with_options(&mut out, doc, &EncodeOptions::pretty()).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Fixture round trips
// =============================================================================

#[test]
fn test_simple_roundtrip() {
    let doc = assert_roundtrip(SIMPLE);

    assert_eq!(doc.keys.len(), 2);
    assert_eq!(
        doc.keys[0].default.as_ref().map(|p| p.text().unwrap()),
        Some("yellow".to_string())
    );
    let graph = &doc.graphs[0];
    assert_eq!(graph.edge_default, Some(EdgeDefault::Undirected));
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 3);
    assert_eq!(graph.nodes[0].data[0].payload.text().unwrap(), "green");
    assert_eq!(graph.edges[2].source, "n1");
    assert_eq!(graph.edges[2].target, "n2");
    assert!(graph.edges[2].data.is_empty());
    assert_eq!(
        doc.attrs.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        vec!["xmlns", "xmlns:xsi", "xsi:schemaLocation"]
    );
}

#[test]
fn test_yed_roundtrip() {
    let doc = assert_roundtrip(YED);

    assert_eq!(doc.keys.len(), 6);
    assert_eq!(doc.keys[0].scope, Scope::Port);
    assert_eq!(doc.keys[1].scope, Scope::Graph);
    assert_eq!(doc.keys[3].unrecognized, vec![Attr::new("yfiles.type", "nodegraphics")]);
    assert_eq!(doc.data.len(), 1);

    let graph = &doc.graphs[0];
    assert_eq!(graph.data[0].key, "d2");
    assert!(graph.data[0].payload.is_empty());

    let group = &graph.nodes[1];
    assert_eq!(group.object.unrecognized, vec![Attr::new("yfiles.foldertype", "group")]);
    assert_eq!(group.graphs[0].id(), Some("n1:"));
    assert_eq!(
        group.graphs[0].nodes[1].data[0].payload.text().unwrap(),
        "http://example.com/?a=1&b=2"
    );

    let label = graph.nodes[0].data[0].payload.text().unwrap();
    assert!(label.contains("A & B"));
    assert!(group.data[0].payload.text().unwrap().contains("Group <1>"));
}

#[test]
fn test_yed_payload_bytes_preserved() {
    let doc = decode_document_str(YED).unwrap();
    let encoded = encode_document_to_string(&doc).unwrap();

    // Structural whitespace and comments outside payloads are gone...
    assert!(!encoded.contains("Created by yEd"));
    assert!(encoded.contains(r#"<key id="d0" for="port" yfiles.type="portgraphics"/>"#));
    assert!(encoded.contains(r#"<key id="d3" for="node" attr.name="url" attr.type="string"/>"#));
    assert!(encoded.contains(r#"<graph id="G" edgedefault="directed">"#));

    // ...while payload content is replayed exactly as read.
    for fragment in [
        r#"<y:NodeLabel alignment="center" autoSizePolicy="content">A &amp; B<y:LabelModel><y:SmartNodeLabelModel distance="4.0"/></y:LabelModel></y:NodeLabel>
          <!-- shape is kept -->
          <y:Shape type="rectangle"/>
        </y:ShapeNode>
      </data>"#,
        r#"<y:NodeLabel><![CDATA[Group <1>]]></y:NodeLabel>"#,
        r#"<data key="d3">http://example.com/?a=1&amp;b=2</data>"#,
        r#"<data key="d7">
    <y:Resources/>
  </data>"#,
    ] {
        assert!(encoded.contains(fragment), "missing fragment:\n{}", fragment);
    }
}

#[test]
fn test_prefixed_document_roundtrip() {
    let input = r#"<?xml version="1.0"?>
<g:graphml xmlns:g="http://graphml.graphdrawing.org/xmlns" xmlns:y="urn:y">
  <g:key id="label" attr.name="label"/>
  <g:graph id="G" edgedefault="directed">
    <g:data key="label">top</g:data>
    <g:node id="n0">
      <g:data key="label"><y:Label>n<y:b/></y:Label></g:data>
      <g:graph id="n0:"><g:node id="n0::n0"/></g:graph>
    </g:node>
    <g:node id="n1"/>
    <g:edge source="n0" target="n1"/>
  </g:graph>
</g:graphml>"#;
    let doc = assert_roundtrip(input);
    assert_eq!(doc.prefix.as_deref(), Some("g"));
    assert_eq!(doc.graphs[0].nodes[0].graphs[0].nodes[0].id(), Some("n0::n0"));

    let encoded = encode_pretty(&doc);
    assert!(encoded.contains(r#"<g:graph id="G" edgedefault="directed">"#));
    assert!(encoded.contains(r#"<g:data key="label"><y:Label>n<y:b/></y:Label></g:data>"#));
    assert_eq!(decode_document_str(&encoded).unwrap(), doc);
}

#[test]
fn test_empty_ids_roundtrip() {
    let doc = assert_roundtrip(
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"><graph id=""><node id=""/><node id=""/></graph></graphml>"#,
    );
    assert_eq!(doc.graphs[0].nodes.len(), 2);
    assert_eq!(validate_document(&doc), Ok(()));
}

#[test]
fn test_root_data_needs_graphml_scope() {
    let err = decode_document_str(
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"><key id="d0" for="node"/><data key="d0">x</data></graphml>"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownAttribute);

    let doc = decode_document_str(
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"><key id="d0" for="graphml"/><data key="d0">x</data></graphml>"#,
    )
    .unwrap();
    assert_eq!(doc.data[0].payload.text().unwrap(), "x");
}

#[test]
fn test_pretty_and_compact_decode_equal() {
    for input in [SIMPLE, YED] {
        let doc = decode_document_str(input).unwrap();
        let compact = encode_document_to_string(&doc).unwrap();
        let pretty = encode_pretty(&doc);
        assert_ne!(compact, pretty);
        assert_eq!(decode_document_str(&pretty).unwrap(), doc);
        assert_eq!(encode_pretty(&decode_document_str(&pretty).unwrap()), pretty);
    }
}

#[test]
fn test_built_document_roundtrip() {
    let doc = Document::new()
        .with_key(Key::new(Scope::All, "label", "label", "string"))
        .with_key(Key::new(Scope::Edge, "w", "weight", "double").with_default(Payload::from_text("1")))
        .with_data(Data::text("label", "top"))
        .with_graph(
            Graph::new("G", None)
                .with_node(Node::new("a").with_data(Data::text("label", "x < y & \"z\"")))
                .with_node(Node::new("b").with_graph(Graph::new("b:", Some(EdgeDefault::Undirected))))
                .with_edge(Edge::new("a", "b").with_data(Data::text("w", "2.5"))),
        );
    validate_document(&doc).unwrap();

    let encoded = encode_document_to_string(&doc).unwrap();
    let decoded = decode_document_str(&encoded).unwrap();
    assert_eq!(decoded, doc);
    assert_eq!(
        decoded.graphs[0].nodes[0].data[0].payload.text().unwrap(),
        "x < y & \"z\""
    );
}

#[test]
fn test_invalid_built_document_fails_on_decode() {
    // The encoder trusts its input; the decoder catches what validation would.
    let doc = Document::new().with_graph(
        Graph::new("G", None)
            .with_node(Node::new("n0"))
            .with_node(Node::new("n0")),
    );
    assert_eq!(validate_document(&doc).unwrap_err().kind(), ErrorKind::DuplicateId);

    let encoded = encode_document_to_string(&doc).unwrap();
    let err = decode_document_str(&encoded).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateId);
}

#[test]
fn test_payload_tokens_survive_roundtrip() {
    let doc = decode_document_str(YED).unwrap();
    let payload = &doc.graphs[0].edges[0].data[0].payload;
    let starts = payload
        .tokens()
        .iter()
        .filter(|t| matches!(t, Token::Start(_) | Token::Empty(_)))
        .count();
    assert_eq!(starts, 3);

    let redecoded = decode_document_str(&encode_document_to_string(&doc).unwrap()).unwrap();
    assert_eq!(redecoded.graphs[0].edges[0].data[0].payload.tokens(), payload.tokens());
}

// =============================================================================
// Property: encode then decode is the identity
// =============================================================================

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    }
}

/// One generated node: an optional label, an optional note attribute, and the
/// number of nodes in its subgraph (0 means no subgraph).
type NodeSpec = (Option<String>, Option<String>, usize);

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&'\"./:-]{0,16}"
}

fn node_strategy() -> impl Strategy<Value = NodeSpec> {
    (
        proptest::option::of(text_strategy()),
        proptest::option::of(text_strategy()),
        0usize..4,
    )
}

fn document_strategy() -> impl Strategy<Value = Document> {
    (
        prop::collection::vec(node_strategy(), 0..12),
        proptest::option::of(text_strategy()),
        any::<bool>(),
    )
        .prop_map(|(nodes, doc_label, directed)| build_document(nodes, doc_label, directed))
}

/// Builds a valid document: identifiers are unique and every data element
/// references a declared key.
fn build_document(nodes: Vec<NodeSpec>, doc_label: Option<String>, directed: bool) -> Document {
    let edge_default = if directed {
        EdgeDefault::Directed
    } else {
        EdgeDefault::Undirected
    };
    let mut graph = Graph::new("G", Some(edge_default));

    for (i, (label, note, sub_nodes)) in nodes.iter().enumerate() {
        let id = format!("n{}", i);
        let mut node = Node::new(id.as_str());
        if let Some(label) = label {
            node = node.with_data(Data::text("label", label));
        }
        if let Some(note) = note {
            node.object.unrecognized.push(Attr::new("note", note.as_str()));
        }
        if *sub_nodes > 0 {
            let mut sub = Graph::new(format!("{}:", id), None);
            for j in 0..*sub_nodes {
                sub = sub.with_node(Node::new(format!("{}::n{}", id, j)));
            }
            node = node.with_graph(sub);
        }
        graph = graph.with_node(node);

        if i > 0 {
            let mut edge = Edge::new(format!("n{}", i - 1), id.as_str());
            if let Some(note) = note {
                edge = edge.with_data(Data::text("weight", note));
            }
            graph = graph.with_edge(edge);
        }
    }

    let mut doc = Document::new()
        .with_key(Key::new(Scope::All, "label", "label", "string"))
        .with_key(Key::new(Scope::Edge, "weight", "weight", "double"))
        .with_graph(graph);
    if let Some(label) = doc_label {
        doc = doc.with_data(Data::text("label", &label));
    }
    doc
}

proptest! {
    #![proptest_config(config())]

    /// Generated documents validate and survive encode/decode unchanged.
    #[test]
    fn encode_decode_identity(doc in document_strategy()) {
        prop_assert!(validate_document(&doc).is_ok());

        let encoded = encode_document_to_string(&doc).unwrap();
        let decoded = decode_document_str(&encoded).unwrap();
        prop_assert_eq!(&decoded, &doc);

        let pretty = encode_pretty(&doc);
        prop_assert_eq!(decode_document_str(&pretty).unwrap(), doc);
    }

    /// Payload text comes back unescaped exactly as it went in.
    #[test]
    fn payload_text_preserved(text in text_strategy()) {
        let doc = build_document(vec![(Some(text.clone()), None, 0)], None, true);
        let decoded = decode_document_str(&encode_document_to_string(&doc).unwrap()).unwrap();
        prop_assert_eq!(decoded.graphs[0].nodes[0].data[0].payload.text().unwrap(), text);
    }
}
