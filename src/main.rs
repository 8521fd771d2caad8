//! Command-line driver for vastu-plan.
//!
//! Usage:
//!   vastu-plan plan --start 0,0 --goal 10,0
//!   vastu-plan plan --config configs/plan.yaml --start 0,0,0 --goal 5,5,5 --seed 7
//!   vastu-plan search --graph roads.yaml --from A --to H --heuristic euclidean

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use vastu_plan::config::{PlanConfig, PlannerVariant};
use vastu_plan::core::Point;
use vastu_plan::graph::{
    AStarConfig, AStarSearch, ConstantHeuristic, EuclideanHeuristic, ZeroHeuristic,
};
use vastu_plan::io::GraphFile;
use vastu_plan::planner::RrtStarPlanner;
use vastu_plan::PlanningResult;

/// Path planning with RRT* and A*
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan in continuous space with RRT* (2D or 3D)
    Plan {
        /// Scenario file (planner + collision sections)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Start coordinates, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        start: Vec<f64>,

        /// Goal coordinates, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        goal: Vec<f64>,

        /// Override the random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the iteration budget
        #[arg(long)]
        iterations: Option<usize>,

        /// Use plain RRT instead of RRT*
        #[arg(long)]
        rrt: bool,

        /// Also print every tree edge
        #[arg(long)]
        tree: bool,
    },

    /// Exact A* search over a graph file
    Search {
        /// Graph file (YAML)
        #[arg(short, long)]
        graph: PathBuf,

        /// Start node id
        #[arg(long)]
        from: String,

        /// Goal node id
        #[arg(long)]
        to: String,

        #[arg(long, value_enum, default_value_t = HeuristicKind::Zero)]
        heuristic: HeuristicKind,

        /// Value for the constant heuristic
        #[arg(long, default_value_t = 1.0)]
        constant: f64,

        /// Give up after this many expansions
        #[arg(long)]
        max_expansions: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicKind {
    Zero,
    Constant,
    Euclidean,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Plan {
            config,
            start,
            goal,
            seed,
            iterations,
            rrt,
            tree,
        } => run_plan(PlanArgs {
            config,
            start,
            goal,
            seed,
            iterations,
            rrt,
            tree,
        }),
        Command::Search {
            graph,
            from,
            to,
            heuristic,
            constant,
            max_expansions,
        } => run_search(graph, &from, &to, heuristic, constant, max_expansions),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct PlanArgs {
    config: Option<PathBuf>,
    start: Vec<f64>,
    goal: Vec<f64>,
    seed: Option<u64>,
    iterations: Option<usize>,
    rrt: bool,
    tree: bool,
}

fn run_plan(args: PlanArgs) -> Result<(), Box<dyn Error>> {
    let mut scenario = match &args.config {
        Some(path) => {
            info!("Loading scenario from {}", path.display());
            PlanConfig::load(path)?
        }
        None => PlanConfig::load_default()?,
    };

    if let Some(seed) = args.seed {
        scenario.planner.seed = seed;
    }
    if let Some(iterations) = args.iterations {
        scenario.planner.max_iterations = iterations;
    }
    if args.rrt {
        scenario.planner.variant = PlannerVariant::Rrt;
    }

    if args.start.len() != args.goal.len() {
        return Err(format!(
            "start has {} coordinates but goal has {}",
            args.start.len(),
            args.goal.len()
        )
        .into());
    }

    match args.start.len() {
        2 => plan_in::<2>(&scenario, &args),
        3 => plan_in::<3>(&scenario, &args),
        n => Err(format!("only 2D and 3D planning is supported, got {} coordinates", n).into()),
    }
}

fn plan_in<const D: usize>(scenario: &PlanConfig, args: &PlanArgs) -> Result<(), Box<dyn Error>> {
    let start = Point::<D>::from_slice(&args.start).ok_or("bad start coordinates")?;
    let goal = Point::<D>::from_slice(&args.goal).ok_or("bad goal coordinates")?;

    let field = scenario.collision.to_field::<D>()?;
    if field.obstacles().is_empty() {
        warn!("No obstacles configured, planning in free space");
    }

    let planner = RrtStarPlanner::new(scenario.planner.clone(), field)?;
    let result = planner.plan(start, goal)?;
    print_plan(&result, args.tree);
    Ok(())
}

fn print_plan<const D: usize>(result: &PlanningResult<Point<D>>, show_tree: bool) {
    let stats = &result.stats;
    match result.failure {
        Some(reason) => println!("No path: {}", reason),
        None => {
            println!("Path ({} waypoints, cost {:.4}):", result.path.len(), result.cost);
            for p in &result.path {
                println!("  {}", p);
            }
        }
    }

    println!(
        "State: {} after {} iterations ({:.1} ms)",
        stats.state,
        stats.iterations,
        stats.duration.as_secs_f64() * 1000.0
    );
    println!(
        "Nodes: {} generated, {} rewires, {} goal improvements",
        stats.nodes_generated, stats.rewires, stats.goal_improvements
    );
    println!(
        "Rejected samples: {} in collision, {} duplicates",
        stats.rejected_collision, stats.rejected_duplicate
    );
    if let Some(breakdown) = &stats.breakdown {
        let deltas: Vec<String> = breakdown
            .axis_deltas
            .iter()
            .zip(&breakdown.weights)
            .map(|(d, w)| format!("{:.3}x{}", d, w))
            .collect();
        println!(
            "Weighted cost: {:.4} ({})",
            breakdown.weighted_total,
            deltas.join(" + ")
        );
    }

    if show_tree {
        println!("Tree ({} edges):", result.search_tree.len());
        for edge in &result.search_tree {
            println!("  {} -> {}", edge.parent, edge.child);
        }
    }
}

fn run_search(
    graph_path: PathBuf,
    from: &str,
    to: &str,
    heuristic: HeuristicKind,
    constant: f64,
    max_expansions: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    let graph = GraphFile::load(&graph_path)?.to_graph()?;
    info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let config = AStarConfig { max_expansions };
    let start = from.to_string();
    let goal = to.to_string();
    let result = match heuristic {
        HeuristicKind::Zero => AStarSearch::new(&graph, &ZeroHeuristic)
            .with_config(config)
            .find_path(&start, &goal),
        HeuristicKind::Constant => AStarSearch::new(&graph, &ConstantHeuristic(constant))
            .with_config(config)
            .find_path(&start, &goal),
        HeuristicKind::Euclidean => AStarSearch::new(&graph, &EuclideanHeuristic::default())
            .with_config(config)
            .find_path(&start, &goal),
    };

    match result.failure {
        Some(reason) => println!("No path from {} to {}: {}", from, to, reason),
        None => {
            println!("Path: {}", result.path.join(" -> "));
            println!("Cost: {:.4}", result.cost);
        }
    }
    println!(
        "Expanded {} nodes, generated {} ({:.2} ms)",
        result.stats.nodes_expanded,
        result.stats.nodes_generated,
        result.stats.duration.as_secs_f64() * 1000.0
    );
    Ok(())
}
