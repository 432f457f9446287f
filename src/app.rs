//! End-to-end run shared by the command line binaries.

use crate::config::RunConfig;
use crate::error::Result;
use crate::fitness::Fitness;
use crate::frame_buffer::FrameBuffer;
use crate::monitor::ProgressMonitor;
use crate::save_svg;
use crate::search::{Search, SearchResult};
use crate::snapshot::{SnapshotWriter, run_dir};
use log::{debug, info};
use rand_core::SeedableRng;
use rand_pcg::Pcg64;

/// Loads the reference, runs `search` and writes the final PNG and SVG.
pub fn run<S: Search>(search: &mut S, config: &RunConfig) -> Result<SearchResult> {
    let reference = FrameBuffer::load(&config.input)?;
    let (width, height) = (reference.width, reference.height);
    info!("loaded reference image: {width}x{height}");
    info!(
        "{}: polygons={}, vertices={}, iterations={}, metric={:?}, seed={}",
        search.name(),
        config.layout.polygon_count(),
        config.layout.vertex_count(),
        search.iterations(),
        config.metric,
        config.seed
    );

    let writer = SnapshotWriter::new(
        reference.clone(),
        config.layout,
        run_dir(&config.results_dir, &config.layout),
    );
    let mut monitor = ProgressMonitor::new(config.log_interval)
        .with_snapshots(writer, config.snapshot_interval);

    let fitness = Fitness::new(reference.clone(), config.layout, config.metric)?;
    let mut rng = Pcg64::seed_from_u64(config.seed);
    let result = search.run(&fitness, &mut rng, &mut monitor)?;
    debug!("best chromosome: {:?}", result.best.genes());

    info!("saving PNG to {}", config.output_png.display());
    let final_writer = SnapshotWriter::new(reference, config.layout, config.results_dir.clone());
    final_writer.save_to(&result.best, &config.output_png)?;

    info!("saving SVG to {}", config.output_svg.display());
    let polygons = config.layout.decode(&result.best, width, height)?;
    save_svg(&config.output_svg, &polygons, width, height)?;

    Ok(result)
}
