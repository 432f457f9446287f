// Tabu search - approximate an image with semi-transparent polygons.
// Writes periodic side-by-side snapshots and the final result as .png and .svg.

// # Basic usage
// cargo run --release --bin shapeme-tabu -- MonaLisa.png
//
// # Longer tabu list, explore sooner when stuck
// cargo run --release --bin shapeme-tabu -- MonaLisa.png -t 500 --stagnation 2000
//
// # Different seed
// cargo run --release --bin shapeme-tabu -- MonaLisa.png --seed 42

use clap::Parser;
use shapeme_search::config::RunArgs;
use shapeme_search::search::{DEFAULT_STAGNATION_THRESHOLD, DEFAULT_TABU_CAPACITY};
use shapeme_search::TabuSearch;

#[derive(Parser, Debug)]
#[command(name = "shapeme-tabu")]
#[command(
    author,
    version,
    about = "Approximate images using polygons via tabu search"
)]
struct Args {
    #[command(flatten)]
    run: RunArgs,

    /// Number of polygons
    #[arg(short, long, default_value_t = 200)]
    polygons: usize,

    /// Tabu list capacity
    #[arg(short, long, default_value_t = DEFAULT_TABU_CAPACITY)]
    tabu_capacity: usize,

    /// Non-improving iterations before perturbations widen
    #[arg(long, default_value_t = DEFAULT_STAGNATION_THRESHOLD)]
    stagnation: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.run.log_level()))
        .init();

    let mut search = TabuSearch::new(args.run.iterations, args.tabu_capacity)?
        .with_stagnation_threshold(args.stagnation);
    let config = args.run.into_config(args.polygons)?;
    let result = shapeme_search::app::run(&mut search, &config)?;

    log::info!(
        "final best score: {:.4} ({} exhausted neighbourhoods)",
        result.best_score,
        result.exhausted
    );
    Ok(())
}
