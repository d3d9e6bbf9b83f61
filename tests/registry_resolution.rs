//! Integration tests for building nodes from textual identifiers.

use serde::{Deserialize, Serialize};
use serde_json::json;
use stagekit::prelude::*;
use stagekit::{Error, TraceHook, registry};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct AdderParams {
    increment: i64,
}

impl Default for AdderParams {
    fn default() -> Self {
        Self { increment: 1 }
    }
}

impl Parameters for AdderParams {}

#[derive(Default)]
struct Adder;

impl Algorithm for Adder {
    type Params = AdderParams;

    fn run(&self, params: &AdderParams, input: NodeValue) -> stagekit::Result<NodeValue> {
        Ok(json!(input.as_i64().unwrap_or_default() + params.increment))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EncoderParams {
    filters: Vec<String>,
}

impl Parameters for EncoderParams {}

#[derive(Default)]
struct Encoder;

impl Algorithm for Encoder {
    type Params = EncoderParams;

    fn run(&self, params: &EncoderParams, _input: NodeValue) -> stagekit::Result<NodeValue> {
        Ok(json!(params.filters.len()))
    }
}

stagekit::register_algorithm!(Adder, "pipeline.nodes.Adder");
stagekit::register_algorithm!(Encoder);

#[test]
fn test_missing_identifier_is_lookup_error() {
    let err = instantiate("pipeline.nodes.DoesNotExist", Args::new())
        .err()
        .unwrap();
    assert!(matches!(err, Error::Lookup(ref id) if id == "pipeline.nodes.DoesNotExist"));
    assert!(err.to_string().contains("pipeline.nodes.DoesNotExist"));
}

#[test]
fn test_resolved_matches_direct_construction() {
    let args = json!({ "increment": 7 });

    let resolved =
        instantiate("pipeline.nodes.Adder", Args::from_json(args.clone()).unwrap()).unwrap();
    let direct = Node::<Adder>::new(Args::from_json(args).unwrap()).unwrap();

    assert_eq!(resolved.name(), "Adder");
    assert_eq!(Executable::params(&direct), resolved.params());
    assert_eq!(resolved.call(json!(1)).unwrap(), direct.call(json!(1)).unwrap());

    let concrete = resolved.downcast_ref::<Adder>().unwrap();
    assert_eq!(concrete.params(), direct.params());
}

#[test]
fn test_validation_failure_passes_through_resolver() {
    let err = instantiate(
        "pipeline.nodes.Adder",
        Args::new().param("increment", "seven"),
    )
    .err()
    .unwrap();
    assert!(matches!(err, Error::Validation { type_name: "AdderParams", .. }));
}

#[test]
fn test_default_identifier_is_rust_path() {
    let identifier = concat!(module_path!(), "::Encoder");
    assert!(registry::global().contains(identifier));

    let node = instantiate(
        identifier,
        Args::from_json(json!({ "filters": ["gabor", "sobel"] })).unwrap(),
    )
    .unwrap();
    assert_eq!(node.execute(json!(null)).unwrap(), json!(2));
}

#[test]
fn test_resolver_forwards_callbacks() {
    let trace = TraceHook::new("resolved");
    let hooks: Vec<Box<dyn Hook>> = vec![Box::new(trace.clone())];

    let node = instantiate("pipeline.nodes.Adder", Args::new().callbacks(&hooks)).unwrap();
    assert_eq!(node.hook_count(), 1);

    node.call(json!(1)).unwrap();
    assert_eq!(trace.get_traces().len(), 2);
}

#[test]
fn test_explicit_registry_is_isolated_from_global() {
    let mut local = Registry::new();
    local.register::<Encoder>("local.Encoder");

    assert!(local.contains("local.Encoder"));
    assert!(!local.contains("pipeline.nodes.Adder"));
    assert!(!registry::global().contains("local.Encoder"));
    assert!(matches!(
        local.instantiate("pipeline.nodes.Adder", Args::new()).err(),
        Some(Error::Lookup(_))
    ));
}

#[test]
fn test_global_lists_submitted_identifiers() {
    let ids = registry::global().identifiers();
    assert!(ids.contains(&"pipeline.nodes.Adder"));
    assert!(ids.windows(2).all(|pair| pair[0] <= pair[1]));
}
