use flowgraph::{
    canonical_hash, from_bytes, from_bytes_with_key, parse, serialize, to_bytes, Graph,
    GraphBuilder, KeyFn,
};
use serde_json::Value;

fn sample() -> Graph<String, u32> {
    let mut graph: Graph<String, u32> = GraphBuilder::new().undirected().weighted().build();
    graph.insert_all(["a", "b", "c", "lonely"].map(String::from));
    graph
        .connect(&"a".to_string(), &"b".to_string(), Some(3))
        .unwrap();
    graph
        .connect(&"c".to_string(), &"b".to_string(), Some(0))
        .unwrap();
    graph
        .connect(&"c".to_string(), &"c".to_string(), Some(9))
        .unwrap();
    graph
}

#[test]
fn json_shape_matches_the_wire_format() {
    let json: Value = serde_json::from_str(&serialize(&sample()).unwrap()).unwrap();
    assert_eq!(json["undirected"], true);
    assert_eq!(json["unweighted"], false);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 4);
    let edges = json["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[0]["source"], "a");
    assert_eq!(edges[0]["target"], "b");
    assert_eq!(edges[0]["value"], 3);

    let mut unweighted: Graph<u8> = GraphBuilder::new().unweighted().build();
    unweighted.insert_all([1, 2]);
    unweighted.connect(&1, &2, None).unwrap();
    let json: Value = serde_json::from_str(&serialize(&unweighted).unwrap()).unwrap();
    assert!(json["edges"][0].get("value").is_none());
}

#[test]
fn json_round_trip_preserves_structure() {
    let graph = sample();
    let restored = parse::<String, u32>(&serialize(&graph).unwrap()).expect("parsed");
    assert_eq!(canonical_hash(&graph).unwrap(), canonical_hash(&restored).unwrap());
    assert_eq!(restored.config(), graph.config());
    assert_eq!(restored.nodes(), graph.nodes());
    assert_eq!(restored.edges(), graph.edges());
}

#[test]
fn binary_round_trip_preserves_structure() {
    let graph = sample();
    let bytes = to_bytes(&graph).unwrap();
    let restored: Graph<String, u32> = from_bytes(&bytes).unwrap();
    assert_eq!(canonical_hash(&graph).unwrap(), canonical_hash(&restored).unwrap());
    assert!(from_bytes::<String, u32>(&bytes[..bytes.len() / 2]).is_err());
}

#[test]
fn hash_ignores_connection_order_and_orientation() {
    let mut first: Graph<u8, u8> = GraphBuilder::new().undirected().weighted().build();
    first.insert_all([1, 2, 3]);
    first.connect(&1, &2, Some(5)).unwrap();
    first.connect(&2, &3, Some(6)).unwrap();

    let mut second: Graph<u8, u8> = GraphBuilder::new().undirected().weighted().build();
    second.insert_all([3, 2, 1]);
    second.connect(&3, &2, Some(6)).unwrap();
    second.connect(&2, &1, Some(5)).unwrap();
    assert_eq!(canonical_hash(&first).unwrap(), canonical_hash(&second).unwrap());

    second.connect(&2, &1, Some(4)).unwrap();
    assert_ne!(canonical_hash(&first).unwrap(), canonical_hash(&second).unwrap());
}

#[test]
fn hash_distinguishes_modes_and_orientation() {
    let mut directed: Graph<u8, u8> = GraphBuilder::new().directed().weighted().build();
    directed.insert_all([1, 2]);
    directed.connect(&1, &2, Some(1)).unwrap();
    let mut reversed = directed.empty_like();
    reversed.insert_all([1, 2]);
    reversed.connect(&2, &1, Some(1)).unwrap();
    assert_ne!(canonical_hash(&directed).unwrap(), canonical_hash(&reversed).unwrap());

    let mut undirected: Graph<u8, u8> = GraphBuilder::new().undirected().weighted().build();
    undirected.insert_all([1, 2]);
    undirected.connect(&1, &2, Some(1)).unwrap();
    assert_ne!(canonical_hash(&directed).unwrap(), canonical_hash(&undirected).unwrap());
}

#[test]
fn binary_decode_with_key_collapses_values() {
    let mut graph: Graph<String> = Graph::builder().directed().unweighted().build();
    graph.insert_all(["ab", "cd", "e"].map(String::from));
    graph
        .connect(&"ab".to_string(), &"e".to_string(), None)
        .unwrap();
    let bytes = to_bytes(&graph).unwrap();

    let restored: Graph<String, (), usize> =
        from_bytes_with_key(&bytes, KeyFn::new(|value: &String| value.len())).unwrap();
    assert_eq!(restored.count(), 2);
    assert!(restored.contains(&"zz".to_string()));
    assert!(restored.has_edge(&"cd".to_string(), &"x".to_string()));
    assert!(restored.is_unweighted());
}
