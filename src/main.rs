//! u-qap: tabu search for grouped Quadratic Assignment Problem instances.
//!
//! Reads a problem file, runs the search and rewrites the solution file
//! every time a better assignment is found. A run always leaves at least
//! one assignment in the solution file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use u_numflow::random::create_rng;
use u_qap::ils::{IlsConfig, IlsRunner};
use u_qap::model::{read_problem, ProblemModel};
use u_qap::output::SolutionWriter;
use u_qap::tabu::{FallbackExit, TabuConfig, TabuSearch};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "u-qap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Problem data file
    data: PathBuf,

    /// Iteration budget (generations with --ils); 0 runs until the time
    /// limit or forever
    #[arg(default_value_t = 0)]
    iterations: usize,

    /// File rewritten with every new best assignment
    #[arg(short, long, value_name = "FILE", default_value = "soln")]
    output: PathBuf,

    /// Do not echo assignments to standard output
    #[arg(short, long)]
    quiet: bool,

    /// Random seed; drawn at random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Candidate swaps sampled per tabu iteration
    #[arg(long, default_value_t = 10_000)]
    neighborhood_size: usize,

    /// Non-improving tabu iterations before the fallback phase
    #[arg(long, default_value_t = 2_500)]
    max_fails: usize,

    /// Tabu list capacity; derived from the dimension if omitted
    #[arg(long)]
    tabu_length: Option<usize>,

    /// Wall-clock limit in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Never sample a swap of a slot with itself
    #[arg(long)]
    no_self_moves: bool,

    /// Return from the fallback phase to tabu search after a cooling period
    #[arg(long)]
    reheat: bool,

    /// Run the population-based iterated local search instead
    #[arg(long)]
    ils: bool,

    /// Individuals in the iterated local search population
    #[arg(long, default_value_t = 5)]
    population: usize,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> TabuConfig {
        let mut config = TabuConfig::default()
            .with_neighborhood_size(self.neighborhood_size)
            .with_max_fails(self.max_fails)
            .with_max_iterations(self.iterations)
            .with_self_moves(!self.no_self_moves)
            .with_parallel(cfg!(feature = "parallel"));
        if let Some(length) = self.tabu_length {
            config = config.with_tabu_length(length);
        }
        if let Some(ms) = self.time_limit_ms {
            config = config.with_time_limit_ms(ms);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.reheat {
            config = config.with_fallback_exit(FallbackExit::cooling());
        }
        config
    }

    fn ils_config(&self) -> IlsConfig {
        let mut config = IlsConfig::default()
            .with_population_size(self.population)
            .with_max_generations(self.iterations)
            .with_parallel(cfg!(feature = "parallel"));
        if let Some(ms) = self.time_limit_ms {
            config = config.with_time_limit_ms(ms);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let model = read_problem(&args.data)
        .with_context(|| format!("failed to load {}", args.data.display()))?;
    info!(
        dimension = model.dimension(),
        edges = model.edge_count(),
        "problem loaded"
    );
    let echo = (!args.quiet).then(std::io::stdout);
    let mut writer = SolutionWriter::new(&args.output, echo);
    if args.ils {
        run_ils(args, &model, &mut writer)
    } else {
        run_tabu(args, &model, &mut writer)
    }
}

fn run_tabu<W: Write>(
    args: &Args,
    model: &ProblemModel,
    writer: &mut SolutionWriter<W>,
) -> Result<()> {
    let config = args.config();
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "starting tabu search");

    let mut search = TabuSearch::new(model, config, create_rng(seed))?;
    writer
        .write_search(model, &mut search)
        .with_context(|| format!("failed to write {}", writer.path().display()))?;

    info!(
        best_cost = search.best_cost(),
        iterations = search.iterations(),
        resamples = search.resamples(),
        phase = ?search.phase(),
        "search stopped"
    );
    Ok(())
}

fn run_ils<W: Write>(
    args: &Args,
    model: &ProblemModel,
    writer: &mut SolutionWriter<W>,
) -> Result<()> {
    let config = args.ils_config();
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "starting iterated local search");

    let result = IlsRunner::run(model, &config.with_seed(seed))?;
    writer
        .write(model, &result.best)
        .with_context(|| format!("failed to write {}", writer.path().display()))?;

    info!(
        best_cost = result.best_cost,
        generations = result.generations,
        perturbations = result.perturbations,
        "search stopped"
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
