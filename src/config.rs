//! Command line arguments shared by both binaries, and the validated run
//! configuration built from them.

use crate::chromosome::PolygonLayout;
use crate::error::Result;
use crate::fitness::Metric;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Reference image path
    pub input: PathBuf,

    /// Vertices per polygon
    #[arg(short = 'v', long, default_value_t = 3)]
    pub vertices: usize,

    /// Number of iterations
    #[arg(short, long, default_value_t = 1_200_000)]
    pub iterations: u64,

    /// Random seed
    #[arg(long, default_value_t = 1234)]
    pub seed: u64,

    /// Difference metric
    #[arg(short, long, value_enum, default_value_t = Metric::Mse)]
    pub metric: Metric,

    /// Iterations between log output (0 to disable)
    #[arg(long, default_value_t = 1000)]
    pub log_interval: u64,

    /// Iterations between snapshots (0 to disable)
    #[arg(long, default_value_t = 1000)]
    pub snapshot_interval: u64,

    /// Root directory for snapshots
    #[arg(long, default_value = "images/results")]
    pub results_dir: PathBuf,

    /// Output PNG path (reference and result side by side)
    #[arg(short, long, default_value = "polygons.png")]
    pub output_png: PathBuf,

    /// Output SVG path
    #[arg(long, default_value = "polygons.svg")]
    pub output_svg: PathBuf,

    /// Quiet mode - only warnings and errors
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

/// Immutable settings for one run. The iteration budget belongs to the
/// search itself.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub layout: PolygonLayout,
    pub seed: u64,
    pub metric: Metric,
    pub log_interval: u64,
    pub snapshot_interval: u64,
    pub results_dir: PathBuf,
    pub output_png: PathBuf,
    pub output_svg: PathBuf,
}

impl RunArgs {
    /// Validates the arguments for a run with `polygons` polygons.
    pub fn into_config(self, polygons: usize) -> Result<RunConfig> {
        Ok(RunConfig {
            layout: PolygonLayout::new(polygons, self.vertices)?,
            input: self.input,
            seed: self.seed,
            metric: self.metric,
            log_interval: self.log_interval,
            snapshot_interval: self.snapshot_interval,
            results_dir: self.results_dir,
            output_png: self.output_png,
            output_svg: self.output_svg,
        })
    }

    /// Log filter for `env_logger` when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }
}
