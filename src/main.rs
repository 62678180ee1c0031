// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use std::env;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use leafgraph::config::{load_and_validate_config, RuntimeBuilder};
use leafgraph::graph::{Graph, GraphNode};
use leafgraph::operations::TextUnit;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <config.yaml|config.toml> <input_text>", args[0]);
        eprintln!(
            "Example: {} configs/sequential-pipeline.yaml \"Ada wrote code. Babbage built engines.\"",
            args[0]
        );
        std::process::exit(1);
    }

    let config_file = &args[1];
    // Everything after the config file is the input text
    let input_text = args[2..].join(" ");

    let config = load_and_validate_config(config_file)
        .with_context(|| format!("failed to load config '{}'", config_file))?;
    let runtime = RuntimeBuilder::from_config(&config)
        .await
        .context("failed to build runtime")?;

    println!("🚀 leafgraph pipeline");
    println!("═══════════════════════════════════");
    println!("Config:   {}", config_file);
    println!("Backend:  {}", runtime.backend.name());
    println!("Strategy: {}", runtime.options.strategy);
    println!("Input:    \"{}\"", input_text);
    println!();

    let graph = Graph::from_root(GraphNode::root(TextUnit::document(input_text)));
    let start = Instant::now();
    let (graph, reports) = runtime.run(graph).await?;
    let elapsed = start.elapsed();

    for (i, report) in reports.iter().enumerate() {
        let m = &report.metrics;
        println!(
            "Stage {} '{}': {} leaves -> {} nodes in {:?} (cache {} hit / {} miss, ~{} tokens)",
            i + 1,
            report.operation,
            m.nodes_processed,
            m.nodes_created,
            m.duration,
            m.cache_hits,
            m.cache_misses,
            m.tokens_consumed
        );
        for failure in &report.errors {
            println!("   ❌ {}", failure);
        }
    }

    println!();
    println!("📋 Final leaves ({}):", graph.leaves().len());
    for leaf in graph.leaves() {
        println!("   • {}", leaf.data());
    }

    let stats = runtime.executor.cache().stats().await;
    println!();
    println!("🗄️  Executor cache:");
    println!("{}", serde_json::to_string_pretty(&stats)?);
    println!();
    println!("⏱️  Total: {:?} across {} nodes", elapsed, graph.len());

    Ok(())
}
