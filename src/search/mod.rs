//! Single-solution search controllers and their monitoring hooks.

mod ils;
mod tabu;

pub use ils::IteratedLocalSearch;
pub use tabu::{DEFAULT_STAGNATION_THRESHOLD, DEFAULT_TABU_CAPACITY, TabuSearch};

use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::fitness::Fitness;
use rand_core::RngCore;

/// What happened in one iteration, after the acceptance decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationReport {
    pub iteration: u64,
    pub best_score: f64,
    pub candidate_score: f64,
    pub accepted: bool,
    /// Tabu search only: the perturbation ran with widened magnitudes.
    pub exploring: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub best: Chromosome,
    pub best_score: f64,
    pub iterations: u64,
    pub accepted: u64,
    /// Iterations whose tabu perturbation ran out of retries. Always 0 for ILS.
    pub exhausted: u64,
}

/// Observer of a running search. Every hook defaults to doing nothing.
pub trait SearchMonitor {
    /// Called once with the score of the random starting chromosome.
    fn on_start(&mut self, _initial_score: f64) {}

    /// Called after every iteration with the best chromosome so far.
    fn on_iteration(&mut self, _report: &IterationReport, _best: &Chromosome) {}

    fn on_finish(&mut self, _result: &SearchResult) {}
}

/// A monitor that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpMonitor;

impl SearchMonitor for NoOpMonitor {}

impl<M: SearchMonitor + ?Sized> SearchMonitor for &mut M {
    fn on_start(&mut self, initial_score: f64) {
        (**self).on_start(initial_score);
    }

    fn on_iteration(&mut self, report: &IterationReport, best: &Chromosome) {
        (**self).on_iteration(report, best);
    }

    fn on_finish(&mut self, result: &SearchResult) {
        (**self).on_finish(result);
    }
}

/// A metaheuristic driving the perturb, evaluate and accept loop.
pub trait Search {
    fn name(&self) -> &str;

    /// Iteration budget of one run.
    fn iterations(&self) -> u64;

    /// Runs the search from a uniform random chromosome drawn from `rng`.
    fn run<R, M>(&mut self, fitness: &Fitness, rng: &mut R, monitor: M) -> Result<SearchResult>
    where
        R: RngCore + ?Sized,
        M: SearchMonitor;
}
