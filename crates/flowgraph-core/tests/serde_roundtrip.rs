use flowgraph_core::errors::{ErrorInfo, GraphError};
use flowgraph_core::{Edge, EdgeId};

#[test]
fn edge_round_trip_json() {
    let edge = Edge {
        source: "A".to_string(),
        target: "B".to_string(),
        value: Some(4u32),
        undirected: false,
    };

    let json = serde_json::to_string_pretty(&edge).expect("serialize");
    let decoded: Edge<String, u32> = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(decoded, edge);
    assert_eq!(decoded.clone().reversed().source, "B");
}

#[test]
fn error_round_trip_json_is_tagged_by_family() {
    let err = GraphError::Serde(
        ErrorInfo::new("invalid-field", "field has the wrong type")
            .in_field("edges")
            .with_context("expected", "array"),
    );

    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Serde");
    assert_eq!(json["detail"]["code"], "invalid-field");
    assert_eq!(json["detail"]["field"], "edges");
    assert!(json["detail"].get("edge").is_none());
    assert!(json["detail"].get("hint").is_none());

    let decoded: GraphError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn edge_ids_expose_raw_value() {
    let id = EdgeId::from_raw(7);
    assert_eq!(id.as_raw(), 7);
    assert!(EdgeId::from_raw(1) < id);
}
