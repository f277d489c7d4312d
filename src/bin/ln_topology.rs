//! Lightning Network topology analysis CLI.
//!
//! Reads a topology snapshot (or a previously cached graph), prints a
//! table of enriched node records, and optionally computes graph distance
//! statistics.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: log level filter (default: warn)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development
//!   (default: pretty)
//!
//! ## Usage
//!
//! ```bash
//! ln-topology describegraph.json --stats
//! ln-topology --graph ln_graph_20240305_070911.json --stats --pseudo-diameter
//! ```

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use ln_topology::{
    cache, distance, enrich, snapshot, DistanceOptions, EdgeDirection, EnrichedNode,
    TopologyError, TopologyGraph,
};

/// Analyze a Lightning Network topology snapshot.
#[derive(Debug, Parser)]
#[command(name = "ln-topology", version)]
#[command(group = ArgGroup::new("source").required(true).args(["snapshot", "graph"]))]
struct Cli {
    /// Path to a Lightning Network JSON snapshot (lncli describegraph output).
    snapshot: Option<PathBuf>,

    /// Load a previously cached graph instead of parsing a snapshot.
    #[arg(long, value_name = "PATH")]
    graph: Option<PathBuf>,

    /// Compute distance statistics (average shortest path, diameter, radius).
    #[arg(long)]
    stats: bool,

    /// Approximate the diameter with a double-sweep heuristic instead of
    /// the exact maximum.
    #[arg(long)]
    pseudo_diameter: bool,

    /// Build a directed graph, preserving node1 -> node2 orientation.
    #[arg(long)]
    directed: bool,

    /// Skip writing the graph cache after building from a snapshot.
    #[arg(long)]
    no_cache: bool,

    /// Number of enriched node rows to print (highest capacity first).
    #[arg(long, default_value_t = 10, value_name = "N")]
    top: usize,
}

/// Initialize the tracing subscriber with JSON or pretty format.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}

fn load_or_build(cli: &Cli) -> Result<TopologyGraph, TopologyError> {
    let direction = if cli.directed {
        EdgeDirection::Directed
    } else {
        EdgeDirection::Undirected
    };

    match (&cli.graph, &cli.snapshot) {
        (Some(path), _) => {
            if !path.exists() {
                return Err(TopologyError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("cached graph {} not found", path.display()),
                )));
            }
            cache::load_graph(path)
        }
        (None, Some(path)) => {
            let parsed = snapshot::parse_file(path)?;
            let graph = TopologyGraph::from_snapshot(parsed, direction)?;

            if !cli.no_cache {
                let cache_path = cache::save_graph(&graph, ".")?;
                println!("Saved graph cache to {}", cache_path.display());
            }

            Ok(graph)
        }
        // The clap group requires one of the two, but nothing here relies
        // on that.
        (None, None) => Err(TopologyError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "provide a snapshot path or --graph",
        ))),
    }
}

fn print_enriched_table(enriched: &[EnrichedNode], top: usize) {
    let mut rows: Vec<&EnrichedNode> = enriched.iter().collect();
    rows.sort_by(|a, b| {
        b.total_node_capacity
            .cmp(&a.total_node_capacity)
            .then_with(|| a.node.pub_key.cmp(&b.node.pub_key))
    });

    println!(
        "{:<20} {:<24} {:>8} {:>8} {:>8} {:>16}",
        "pub_key", "alias", "chans", "enabled", "pct", "capacity"
    );
    for row in rows.iter().take(top) {
        let short_key: String = row.node.pub_key.as_str().chars().take(18).collect();
        let alias: String = row
            .node
            .alias
            .as_deref()
            .unwrap_or("-")
            .chars()
            .take(24)
            .collect();
        let pct = row
            .percent_enabled_chan
            .map_or_else(|| "-".to_string(), |p| format!("{:.2}", p));
        println!(
            "{:<20} {:<24} {:>8} {:>8} {:>8} {:>16}",
            short_key,
            alias,
            row.num_channels,
            row.num_enabled_channels,
            pct,
            row.total_node_capacity
        );
    }
}

fn print_stats(graph: &TopologyGraph, opts: &DistanceOptions) -> Result<(), TopologyError> {
    match distance::distance_measures(graph, opts) {
        Ok(report) => {
            match report.average_distance {
                Some(avg) => println!("Average shortest distance: {:.2}", avg),
                None => println!("Average shortest distance: n/a (no reachable pairs)"),
            }
            let label = if report.approximate_diameter {
                "Pseudo-diameter"
            } else {
                "Diameter"
            };
            match report.diameter {
                Some(d) => println!("{label}: {d}"),
                None => println!("{label}: n/a"),
            }
            match report.radius {
                Some(r) => println!("Radius: {r}"),
                None => println!("Radius: n/a"),
            }
            Ok(())
        }
        // Degrade gracefully: report the condition, keep the rest of the
        // output.
        Err(TopologyError::UnavailableDependency(msg)) => {
            warn!(reason = msg, "skipping distance statistics");
            println!("Distance statistics unavailable: {msg}");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn run(cli: Cli) -> Result<(), TopologyError> {
    let graph = load_or_build(&cli)?;

    info!(
        nodes = graph.node_count(),
        channels = graph.channel_count(),
        directed = graph.is_directed(),
        "graph ready"
    );
    println!(
        "Graph: {} nodes, {} channels ({})",
        graph.node_count(),
        graph.channel_count(),
        if graph.is_directed() {
            "directed"
        } else {
            "undirected"
        }
    );

    let enriched = enrich::enrich_graph(&graph);
    print_enriched_table(&enriched, cli.top);

    if cli.stats {
        let opts = DistanceOptions {
            pseudo_diameter: cli.pseudo_diameter,
        };
        print_stats(&graph, &opts)?;
    }

    Ok(())
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
