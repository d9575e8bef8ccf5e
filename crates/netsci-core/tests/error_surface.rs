use netsci_core::errors::{ErrorInfo, NetError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("id", "1")
        .with_context("reason", "example")
}

#[test]
fn invalid_parameter_surface() {
    let err = NetError::invalid_parameter("probability-range", "p", 1.5, "p must lie in [0, 1]");
    assert_eq!(err.info().code, "probability-range");
    assert_eq!(err.info().context.get("parameter"), Some(&"p".to_string()));
    assert_eq!(err.info().context.get("value"), Some(&"1.5".to_string()));
}

#[test]
fn unknown_node_surface() {
    let err = NetError::unknown_node("Node 42");
    assert_eq!(err.info().code, "unknown-node");
    assert_eq!(err.info().context.get("node"), Some(&"Node 42".to_string()));
}

#[test]
fn graph_error_surface() {
    let err = NetError::Graph(sample_info("self-loop", "edge connects a node to itself"));
    assert_eq!(err.info().code, "self-loop");
    assert!(err.info().context.contains_key("id"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = NetError::Config(sample_info("C001", "bad config").with_hint("check the seed"));
    let rendered = err.to_string();
    assert_eq!(
        rendered,
        "config error: [C001] bad config {id=1, reason=example} hint: check the seed"
    );
    let bare = NetError::Graph(ErrorInfo::new("self-loop", "edge connects a node to itself"));
    assert_eq!(bare.to_string(), "graph error: [self-loop] edge connects a node to itself");
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = NetError::Serde(sample_info("S001", "schema mismatch"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Serde");
    assert_eq!(json["detail"]["code"], "S001");
    let back: NetError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
