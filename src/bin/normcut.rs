use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use normcut::{ClusterMap, CoarsenConfig, Coarsener, NormalizedCut, VisitOrder, WeightedGraph};

#[derive(Parser)]
#[command(name = "normcut")]
#[command(about = "Greedy normalized-cut graph coarsening", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one matching pass and print the cluster map
    Match {
        /// Graph JSON: {"num_nodes": n, "edges": [[row, col, weight], ...]}
        graph: PathBuf,

        /// Explicit visit order, comma separated
        #[arg(long, value_delimiter = ',', conflicts_with = "seed")]
        order: Option<Vec<usize>>,

        /// Seed for a random visit order
        #[arg(long)]
        seed: Option<u64>,

        /// Add missing reverse edges before matching
        #[arg(long, default_value_t = false)]
        symmetrize: bool,
    },
    /// Build a multilevel hierarchy and print every level
    Coarsen {
        /// Graph JSON: {"num_nodes": n, "edges": [[row, col, weight], ...]}
        graph: PathBuf,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of levels (overrides the config file)
        #[arg(long)]
        levels: Option<usize>,

        /// Base seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Keep intra-cluster weight as self-loops
        #[arg(long, default_value_t = false)]
        keep_self_loops: bool,

        /// Add missing reverse edges before coarsening
        #[arg(long, default_value_t = false)]
        symmetrize: bool,
    },
}

#[derive(Serialize)]
struct MatchReport {
    seed: Option<u64>,
    clusters: usize,
    pairs: usize,
    cluster_map: ClusterMap,
}

#[derive(Serialize)]
struct LevelReport<'a> {
    nodes: usize,
    clusters: usize,
    cluster_map: &'a ClusterMap,
}

#[derive(Serialize)]
struct CoarsenReport<'a> {
    seed: u64,
    levels: Vec<LevelReport<'a>>,
    assignment: ClusterMap,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Match {
            graph,
            order,
            seed,
            symmetrize,
        } => {
            let graph = load_graph(&graph, symmetrize)?;
            let order = match (order, seed) {
                (Some(rid), _) => VisitOrder::Explicit(rid),
                (None, Some(seed)) => VisitOrder::Seeded(seed),
                (None, None) => VisitOrder::from_entropy(),
            };
            run_match(&graph, &order)
        }
        Commands::Coarsen {
            graph,
            config,
            levels,
            seed,
            keep_self_loops,
            symmetrize,
        } => {
            let graph = load_graph(&graph, symmetrize)?;
            let mut config = match config {
                Some(path) => CoarsenConfig::from_path(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => CoarsenConfig::default(),
            };
            if let Some(levels) = levels {
                config.levels = levels;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            config.keep_self_loops |= keep_self_loops;
            run_coarsen(&graph, config)
        }
    }
}

fn load_graph(path: &Path, symmetrize: bool) -> Result<WeightedGraph> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph {}", path.display()))?;
    let graph = WeightedGraph::from_json_str(&json)
        .with_context(|| format!("Failed to parse graph {}", path.display()))?;

    if symmetrize {
        return Ok(graph.symmetrized());
    }
    if !graph.is_symmetric() {
        tracing::warn!(
            path = %path.display(),
            "graph is not symmetric; pass --symmetrize to add reverse edges"
        );
    }
    Ok(graph)
}

fn run_match(graph: &WeightedGraph, order: &VisitOrder) -> Result<()> {
    let matching = NormalizedCut::new(graph)
        .run(order)
        .context("Matching pass failed")?;

    let report = MatchReport {
        seed: matching.seed(),
        clusters: matching.cluster_count(),
        pairs: matching.pair_count(),
        cluster_map: matching.into_cluster_map(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_coarsen(graph: &WeightedGraph, config: CoarsenConfig) -> Result<()> {
    let coarsener = Coarsener::new(config).context("Invalid coarsening configuration")?;
    let hierarchy = coarsener.coarsen(graph).context("Coarsening failed")?;
    if hierarchy.levels().is_empty() && graph.node_count() > 1 {
        tracing::info!("no level merged any nodes");
    }

    let assignment = hierarchy.assignment()?;

    let levels = hierarchy
        .levels()
        .iter()
        .map(|level| LevelReport {
            nodes: level.cluster_map().len(),
            clusters: level.cluster_map().cluster_count(),
            cluster_map: level.cluster_map(),
        })
        .collect();

    let report = CoarsenReport {
        seed: hierarchy.seed(),
        levels,
        assignment,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
