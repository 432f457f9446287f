//! Periodic progress logging and snapshotting for command line runs.

use crate::chromosome::Chromosome;
use crate::search::{IterationReport, SearchMonitor, SearchResult};
use crate::snapshot::SnapshotWriter;
use log::{debug, info, warn};

/// Logs a progress line every `log_interval` iterations and saves a
/// side-by-side snapshot of the best chromosome every `snapshot_interval`
/// iterations. An interval of 0 disables that output. Snapshot failures are
/// logged and never stop the search.
pub struct ProgressMonitor {
    log_interval: u64,
    snapshot_interval: u64,
    snapshots: Option<SnapshotWriter>,
    saved: u64,
}

impl ProgressMonitor {
    pub fn new(log_interval: u64) -> Self {
        Self {
            log_interval,
            snapshot_interval: 0,
            snapshots: None,
            saved: 0,
        }
    }

    pub fn with_snapshots(mut self, writer: SnapshotWriter, interval: u64) -> Self {
        self.snapshots = Some(writer);
        self.snapshot_interval = interval;
        self
    }

    /// Number of snapshots written so far.
    pub fn saved(&self) -> u64 {
        self.saved
    }
}

impl SearchMonitor for ProgressMonitor {
    fn on_start(&mut self, initial_score: f64) {
        info!("initial score: {initial_score:.4}");
    }

    fn on_iteration(&mut self, report: &IterationReport, best: &Chromosome) {
        let i = report.iteration;
        if self.log_interval > 0 && i % self.log_interval == 0 {
            info!(
                "iteration {i}: best={:.4}, candidate={:.4}{}",
                report.best_score,
                report.candidate_score,
                if report.exploring { " (exploring)" } else { "" }
            );
        }

        if self.snapshot_interval > 0
            && i % self.snapshot_interval == 0
            && let Some(writer) = &self.snapshots
        {
            match writer.save(i, best) {
                Ok(path) => {
                    self.saved += 1;
                    debug!("saved snapshot {}", path.display());
                }
                Err(e) => warn!("snapshot at iteration {i} failed: {e}"),
            }
        }
    }

    fn on_finish(&mut self, result: &SearchResult) {
        info!(
            "finished after {} iterations: best={:.4}, accepted={}",
            result.iterations, result.best_score, result.accepted
        );
        if result.exhausted > 0 {
            warn!(
                "tabu neighbourhood was exhausted in {} iterations",
                result.exhausted
            );
        }
    }
}
