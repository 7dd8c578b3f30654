use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use strata::bfs::config::{
    DEFAULT_MAX_VALUE, DEFAULT_PERCENT, DEFAULT_SEARCH_VALUE, DEFAULT_SEED, DEFAULT_START_NODE,
};
use strata::bfs::{sequential_bfs, BfsConfig, ParallelBfs, Partitioning, CHUNK_SIZE};
use strata::graph::{NodeValue, ValueGraph};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Count matching nodes reachable from a start node with a parallel BFS", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Number of nodes of the generated graph
    node_count: usize,

    /// Number of worker threads
    worker_count: usize,

    /// Start node
    #[arg(long, default_value_t = DEFAULT_START_NODE)]
    start: usize,

    /// Value to search for
    #[arg(long, default_value_t = DEFAULT_SEARCH_VALUE)]
    search: NodeValue,

    /// Node values are drawn from 1..=max
    #[arg(long, default_value_t = DEFAULT_MAX_VALUE)]
    max: NodeValue,

    /// Generator seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u32,

    /// Probability (percent) of each upward edge
    #[arg(long, default_value_t = DEFAULT_PERCENT)]
    percent: u32,

    /// Generate exactly this many edges instead of using --percent
    #[arg(long)]
    edges: Option<usize>,

    /// Frontier indices per chunk for chunked partitioning
    #[arg(long, default_value_t = CHUNK_SIZE)]
    chunk_size: usize,

    /// Frontier partitioning policy
    #[arg(long, value_enum, default_value_t = PartitionArg::Chunked)]
    partition: PartitionArg,

    /// Traversal engine
    #[arg(long, value_enum, default_value_t = EngineArg::Threads)]
    engine: EngineArg,

    /// Load the graph from a JSON file instead of generating it
    #[arg(long)]
    load: Option<PathBuf>,

    /// Save the graph as JSON before searching
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the graph in DOT syntax
    #[arg(long, default_value_t = false)]
    dot: bool,

    /// Cross-check the result against the sequential BFS
    #[arg(long, default_value_t = false)]
    verify: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PartitionArg {
    Chunked,
    Even,
}

#[derive(Clone, Copy, ValueEnum)]
enum EngineArg {
    Threads,
    Sequential,
    Rayon,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let graph = load_graph(&cli)?;

    if let Some(path) = &cli.save {
        graph
            .save_json(path)
            .with_context(|| format!("Failed to save graph to {}", path.display()))?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.dot {
        graph.write_dot(&mut out)?;
    }

    let partitioning = match cli.partition {
        PartitionArg::Chunked => Partitioning::Chunked {
            chunk_size: cli.chunk_size,
        },
        PartitionArg::Even => Partitioning::EvenSplit,
    };
    let config = BfsConfig::default()
        .with_workers(cli.worker_count)
        .with_partitioning(partitioning);

    let started = Instant::now();
    let occurrences = match cli.engine {
        EngineArg::Threads => {
            ParallelBfs::new(config)?
                .run(&graph, cli.start, cli.search)?
                .occurrences
        }
        EngineArg::Sequential => sequential_bfs(&graph, cli.start, cli.search)?,
        EngineArg::Rayon => run_rayon(&graph, cli.start, cli.search, &config)?,
    };
    info!(
        elapsed = ?started.elapsed(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "search finished"
    );

    if cli.verify {
        let expected = sequential_bfs(&graph, cli.start, cli.search)?;
        if expected != occurrences {
            bail!("verification failed: engine found {occurrences}, sequential found {expected}");
        }
    }

    writeln!(out, "Occurrences: {occurrences}")?;
    Ok(())
}

fn load_graph(cli: &Cli) -> Result<ValueGraph> {
    let started = Instant::now();
    let graph = if let Some(path) = &cli.load {
        ValueGraph::load_json(path)
            .with_context(|| format!("Failed to load graph from {}", path.display()))?
    } else if let Some(edges) = cli.edges {
        ValueGraph::generate_sparse(cli.node_count, edges, cli.seed, cli.max)
            .context("Failed to generate graph")?
    } else {
        ValueGraph::generate(cli.node_count, cli.seed, cli.max, cli.percent)
            .context("Failed to generate graph")?
    };
    info!(elapsed = ?started.elapsed(), "graph ready");
    Ok(graph)
}

#[cfg(feature = "parallel")]
fn run_rayon(
    graph: &ValueGraph,
    start: usize,
    search: NodeValue,
    config: &BfsConfig,
) -> Result<usize> {
    Ok(strata::bfs::rayon_bfs(graph, start, search, config)?.occurrences)
}

#[cfg(not(feature = "parallel"))]
fn run_rayon(_: &ValueGraph, _: usize, _: NodeValue, _: &BfsConfig) -> Result<usize> {
    bail!("the rayon engine requires building with `--features parallel`")
}
