//! Route search from the command line.
//!
//! Run: cargo run --bin trailblazer -- --map demos/maps/campus.json --from gates --to oval
//!  or: cargo run --bin trailblazer -- --width 20 --height 12 --seed 7 -a all

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use trailblazer_core::{GridRoadGen, NodeId, RoadGraph};
use trailblazer_demos::{MapFile, RouteReport, run_search};
use trailblazer_paths::{Algorithm, SUFFICIENT_DIFFERENCE};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Bfs,
    Dijkstra,
    Astar,
    Alternative,
    All,
}

impl AlgorithmArg {
    fn algorithms(self) -> Vec<Algorithm> {
        match self {
            AlgorithmArg::Bfs => vec![Algorithm::BreadthFirst],
            AlgorithmArg::Dijkstra => vec![Algorithm::Dijkstra],
            AlgorithmArg::Astar => vec![Algorithm::AStar],
            AlgorithmArg::Alternative => vec![Algorithm::Alternative],
            AlgorithmArg::All => Algorithm::ALL.to_vec(),
        }
    }
}

/// Find routes over a road network.
#[derive(Parser, Debug)]
#[command(name = "trailblazer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON map file to load. Without it a random grid network is generated
    #[arg(long, short)]
    map: Option<PathBuf>,

    /// Towns per row of the random grid
    #[arg(long, default_value_t = 10, conflicts_with = "map")]
    width: u32,

    /// Rows of the random grid
    #[arg(long, default_value_t = 10, conflicts_with = "map")]
    height: u32,

    /// Seed for the random grid
    #[arg(long, default_value_t = 42, conflicts_with = "map")]
    seed: u64,

    /// Search to run
    #[arg(long, short, value_enum, default_value = "all")]
    algorithm: AlgorithmArg,

    /// Name of the start node (random grids default to the top-left town)
    #[arg(long)]
    from: Option<String>,

    /// Name of the end node (random grids default to the bottom-right town)
    #[arg(long)]
    to: Option<String>,

    /// Divergence an alternative route needs over the best route
    #[arg(long, default_value_t = SUFFICIENT_DIFFERENCE)]
    difference: f64,

    /// Write the network as a JSON map file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let graph = load_graph(&cli)?;
    log::info!(
        "road network: {} nodes, {} roads, max speed {}",
        graph.node_count(),
        graph.edge_count(),
        graph.max_road_speed()
    );

    if let Some(path) = &cli.export {
        let json = serde_json::to_string_pretty(&MapFile::from_graph(&graph))?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    let start = endpoint(&graph, cli.from.as_deref(), cli.map.is_none().then(|| GridRoadGen::town_name(0, 0)))?;
    let end = endpoint(
        &graph,
        cli.to.as_deref(),
        cli.map
            .is_none()
            .then(|| GridRoadGen::town_name(cli.width.saturating_sub(1), cli.height.saturating_sub(1))),
    )?;

    let mut reports: Vec<RouteReport> = Vec::new();
    for algorithm in cli.algorithm.algorithms() {
        let report = run_search(&graph, algorithm, start, end, cli.difference)
            .with_context(|| format!("{algorithm} search from {} to {}", graph.name(start), graph.name(end)))?;
        reports.push(report);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("{} -> {}", graph.name(start), graph.name(end));
        for report in &reports {
            println!("{report}");
        }
    }
    Ok(())
}

fn load_graph(cli: &Cli) -> Result<RoadGraph> {
    match &cli.map {
        Some(path) => {
            let map = MapFile::load(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(map.to_graph()?)
        }
        None => {
            if cli.width == 0 || cli.height == 0 {
                bail!("random grid needs a non-zero width and height");
            }
            let mut rng = StdRng::seed_from_u64(cli.seed);
            Ok(GridRoadGen::new(cli.width, cli.height).generate(&mut rng)?)
        }
    }
}

/// Resolve a node by name, falling back to `default` when no name was given.
fn endpoint(graph: &RoadGraph, name: Option<&str>, default: Option<String>) -> Result<NodeId> {
    let Some(name) = name.map(str::to_owned).or(default) else {
        bail!("--from and --to are required with --map");
    };
    graph
        .find(&name)
        .with_context(|| format!("no node named \u{201c}{name}\u{201d}"))
}
