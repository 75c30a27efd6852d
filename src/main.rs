//! tickgraph demo
//!
//! Builds a small graph, drives it to completion and prints the results
//! along with the graph in DOT form. An optional first argument names a
//! TOML config file.

use anyhow::Context;
use tickgraph::pipeline::nodes::{Collect, Combine, IterSource, Map};
use tickgraph::{Pipeline, PipelineConfig};

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => PipelineConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path))?,
        None => PipelineConfig::default(),
    };

    tickgraph::logging::init(&config.log_filter);
    tracing::info!("Starting tickgraph demo");

    let mut pipeline = Pipeline::with_config(config);

    let numbers = pipeline.create_node(IterSource::new(1..=5).named("numbers"));
    let squares = pipeline.create_node(Map::new(|x: &i32| x * x).named("square"));
    let labels = pipeline.create_node(
        IterSource::new(["a", "b", "c", "d", "e"].map(String::from)).named("labels"),
    );
    let pairs = pipeline.create_node(
        Combine::new(|label: &String, value: &i32| format!("{}={}", label, value)).named("pair"),
    );
    let out = pipeline.create_node(Collect::<String>::new().named("collect"));

    pipeline.connect(numbers, squares, 0)?;
    pipeline.connect(labels, pairs, 0)?;
    pipeline.connect(squares, pairs, 1)?;
    pipeline.connect(pairs, out, 0)?;

    for issue in pipeline.validate() {
        tracing::warn!("{}", issue);
    }

    let finished = pipeline.drive();
    if !finished {
        tracing::warn!("Stopped at the tick limit before every node closed");
    }

    if let Some(collected) = pipeline.get_node_as::<Collect<String>>(out) {
        for item in collected.items() {
            println!("{}", item);
        }
    }
    print!("{}", pipeline);

    Ok(())
}
