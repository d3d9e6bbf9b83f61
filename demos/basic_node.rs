//! A two-stage walk-through: build one node directly, one through the registry,
//! and trace both.
//!
//! Run with `cargo run --example basic_node`.

use serde::{Deserialize, Serialize};
use serde_json::json;
use stagekit::prelude::*;
use stagekit::{LogHook, TraceHook};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct NormalizeParams {
    low: f64,
    high: f64,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self { low: 0.0, high: 1.0 }
    }
}

impl Parameters for NormalizeParams {
    fn validate(&self) -> stagekit::Result<()> {
        if self.low >= self.high {
            return Err(stagekit::Error::validation(
                "NormalizeParams",
                format!("low ({}) must be below high ({})", self.low, self.high),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
struct Normalize;

impl Algorithm for Normalize {
    type Params = NormalizeParams;

    fn run(&self, params: &NormalizeParams, input: NodeValue) -> stagekit::Result<NodeValue> {
        let samples: Vec<f64> = serde_json::from_value(input)
            .map_err(|e| stagekit::Error::execution("Normalize", e.to_string()))?;
        let span = params.high - params.low;
        let scaled: Vec<f64> = samples
            .iter()
            .map(|x| ((x - params.low) / span).clamp(0.0, 1.0))
            .collect();
        Ok(json!(scaled))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ThresholdParams {
    cutoff: f64,
}

impl Parameters for ThresholdParams {}

#[derive(Default)]
struct Threshold;

impl Algorithm for Threshold {
    type Params = ThresholdParams;

    fn run(&self, params: &ThresholdParams, input: NodeValue) -> stagekit::Result<NodeValue> {
        let samples: Vec<f64> = serde_json::from_value(input)
            .map_err(|e| stagekit::Error::execution("Threshold", e.to_string()))?;
        Ok(json!(samples.iter().filter(|x| **x >= params.cutoff).count()))
    }
}

stagekit::register_algorithm!(Threshold, "demo.Threshold");

fn main() -> stagekit::Result<()> {
    let trace = TraceHook::new("normalize");
    let hooks: Vec<Box<dyn Hook>> = vec![Box::new(LogHook::new("demo")), Box::new(trace.clone())];

    let normalize =
        Node::<Normalize>::new(Args::new().param("low", 10.0).param("high", 20.0).callbacks(&hooks))?;
    let threshold = instantiate(
        "demo.Threshold",
        Args::from_json(json!({ "cutoff": 0.5, "low": 10.0 }))?,
    )?;

    let normalized = normalize.call(json!([8.0, 12.0, 15.0, 19.0, 25.0]))?;
    let above = threshold.call(normalized.clone())?;

    println!("normalized: {normalized}");
    println!("samples above cutoff: {above}");

    for entry in trace.get_traces() {
        println!("{:?} -> {}", entry.phase, entry.value);
    }

    match Node::<Normalize>::new(Args::new().param("low", 5.0).param("high", 1.0)) {
        Ok(_) => println!("unexpectedly accepted inverted range"),
        Err(e) => println!("rejected: {e}"),
    }

    Ok(())
}
