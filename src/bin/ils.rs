// Iterated local search - approximate an image with semi-transparent polygons.
// Writes periodic side-by-side snapshots and the final result as .png and .svg.

// # Basic usage
// cargo run --release --bin shapeme-ils -- MonaLisa.png
//
// # Fewer iterations, structural similarity instead of MSE
// cargo run --release --bin shapeme-ils -- MonaLisa.png -i 100000 -m ssim
//
// # Quadrilaterals, more polygons
// cargo run --release --bin shapeme-ils -- MonaLisa.png -v 4 -p 150
//
// # No snapshots, quiet
// cargo run --release --bin shapeme-ils -- MonaLisa.png --snapshot-interval 0 -q

use clap::Parser;
use shapeme_search::IteratedLocalSearch;
use shapeme_search::config::RunArgs;

#[derive(Parser, Debug)]
#[command(name = "shapeme-ils")]
#[command(
    author,
    version,
    about = "Approximate images using polygons via iterated local search"
)]
struct Args {
    #[command(flatten)]
    run: RunArgs,

    /// Number of polygons
    #[arg(short, long, default_value_t = 110)]
    polygons: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.run.log_level()))
        .init();

    let mut search = IteratedLocalSearch::new(args.run.iterations);
    let config = args.run.into_config(args.polygons)?;
    let result = shapeme_search::app::run(&mut search, &config)?;

    log::info!("final best score: {:.4}", result.best_score);
    Ok(())
}
