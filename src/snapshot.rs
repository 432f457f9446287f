//! Side-by-side comparison images written to disk.

use crate::chromosome::{Chromosome, PolygonLayout};
use crate::error::{Error, Result};
use crate::fitness::render;
use crate::frame_buffer::FrameBuffer;
use std::path::{Path, PathBuf};

/// Results directory for one run: `<root>/run-<vertices>-<polygons>`.
pub fn run_dir<P: AsRef<Path>>(root: P, layout: &PolygonLayout) -> PathBuf {
    root.as_ref().join(format!(
        "run-{}-{}",
        layout.vertex_count(),
        layout.polygon_count()
    ))
}

/// Renders a chromosome next to the reference and saves the pair as PNG.
pub struct SnapshotWriter {
    reference: FrameBuffer,
    layout: PolygonLayout,
    dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(reference: FrameBuffer, layout: PolygonLayout, dir: PathBuf) -> Self {
        Self {
            reference,
            layout,
            dir,
        }
    }

    /// Reference on the left, `chromosome` rendered on the right.
    pub fn compose(&self, chromosome: &Chromosome) -> Result<FrameBuffer> {
        let image = render(
            chromosome,
            &self.layout,
            self.reference.width,
            self.reference.height,
        )?;
        FrameBuffer::side_by_side(&self.reference, &image)
    }

    pub fn save_to(&self, chromosome: &Chromosome, path: &Path) -> Result<()> {
        let pair = self.compose(chromosome)?;
        pair.save_png(path).map_err(|source| Error::Snapshot {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes `after-<iteration>-gen.png`, creating the directory if needed.
    pub fn save(&self, iteration: u64, chromosome: &Chromosome) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("after-{iteration}-gen.png"));
        self.save_to(chromosome, &path)?;
        Ok(path)
    }
}
