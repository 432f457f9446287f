//! Tabu search over chromosomes.
//!
//! Every iteration perturbs the best known solution, mutates the result and
//! scores it. The candidate is recorded in the tabu memory whether or not it
//! is accepted, so recently generated neighbours are not drawn again.
//!
//! # Exploration
//!
//! After `stagnation_threshold` consecutive non-improving iterations the
//! search switches to exploring: perturbation magnitudes are widened until
//! the next accepted candidate.

use super::{IterationReport, Search, SearchMonitor, SearchResult};
use crate::chromosome::Chromosome;
use crate::error::{Error, Result};
use crate::fitness::Fitness;
use crate::operators::{mutate, perturb_tabu};
use crate::tabu_memory::TabuMemory;
use log::warn;
use rand_core::RngCore;

pub const DEFAULT_TABU_CAPACITY: usize = 200;
pub const DEFAULT_STAGNATION_THRESHOLD: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct TabuSearch {
    iterations: u64,
    stagnation_threshold: u64,
    memory: TabuMemory,
}

impl TabuSearch {
    pub fn new(iterations: u64, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroTabuCapacity);
        }
        Ok(Self {
            iterations,
            stagnation_threshold: DEFAULT_STAGNATION_THRESHOLD,
            memory: TabuMemory::new(capacity),
        })
    }

    pub fn with_stagnation_threshold(mut self, threshold: u64) -> Self {
        self.stagnation_threshold = threshold;
        self
    }

    pub fn memory(&self) -> &TabuMemory {
        &self.memory
    }
}

impl Search for TabuSearch {
    fn name(&self) -> &str {
        "TabuSearch"
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn run<R, M>(&mut self, fitness: &Fitness, rng: &mut R, mut monitor: M) -> Result<SearchResult>
    where
        R: RngCore + ?Sized,
        M: SearchMonitor,
    {
        self.memory.clear();
        let layout = *fitness.layout();

        let mut best = Chromosome::random(rng, layout.chromosome_len());
        let mut best_score = fitness.evaluate(&best)?;
        monitor.on_start(best_score);

        let mut stagnation = 0u64;
        let mut accepted = 0;
        let mut exhausted = 0;
        for iteration in 0..self.iterations {
            let exploring = stagnation > self.stagnation_threshold;
            let neighbour = perturb_tabu(rng, &best, &layout, &self.memory, exploring);
            if neighbour.is_exhausted() {
                exhausted += 1;
                warn!("iteration {iteration}: tabu neighbourhood exhausted, accepting a tabu candidate");
            }
            let candidate = mutate(rng, &neighbour.into_chromosome());
            let candidate_score = fitness.evaluate(&candidate)?;

            let accept = candidate_score <= best_score;
            if accept {
                self.memory.push(candidate.clone());
                best = candidate;
                best_score = candidate_score;
                stagnation = 0;
                accepted += 1;
            } else {
                self.memory.push(candidate);
                stagnation += 1;
            }

            monitor.on_iteration(
                &IterationReport {
                    iteration,
                    best_score,
                    candidate_score,
                    accepted: accept,
                    exploring,
                },
                &best,
            );
        }

        let result = SearchResult {
            best,
            best_score,
            iterations: self.iterations,
            accepted,
            exhausted,
        };
        monitor.on_finish(&result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::Metric;
    use crate::search::NoOpMonitor;
    use crate::search::testing::{Recorder, square_fitness};
    use rand_core::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_initialization() {
        let ts = TabuSearch::new(10, 5).unwrap();
        assert_eq!(ts.name(), "TabuSearch");
        assert_eq!(ts.iterations(), 10);
        assert_eq!(ts.memory().capacity(), 5);
        assert_eq!(ts.stagnation_threshold, DEFAULT_STAGNATION_THRESHOLD);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(matches!(TabuSearch::new(10, 0), Err(Error::ZeroTabuCapacity)));
    }

    #[test]
    fn best_score_never_increases() {
        let fitness = square_fitness(Metric::Mse);
        let mut recorder = Recorder::default();
        let result = TabuSearch::new(200, 20)
            .unwrap()
            .run(&fitness, &mut Pcg64::seed_from_u64(1234), &mut recorder)
            .unwrap();

        assert_eq!(recorder.reports.len(), 200);
        let mut previous = recorder.initial.unwrap();
        for r in &recorder.reports {
            assert!(r.best_score <= previous);
            previous = r.best_score;
        }
        assert_eq!(result.best_score, previous);
        assert_eq!(fitness.evaluate(&result.best).unwrap(), result.best_score);
        assert!(result.best.genes().iter().all(|g| (0.0..=1.0).contains(g)));
    }

    #[test]
    fn memory_is_filled_every_iteration_and_bounded() {
        let fitness = square_fitness(Metric::Mse);
        let mut ts = TabuSearch::new(30, 8).unwrap();
        ts.run(&fitness, &mut Pcg64::seed_from_u64(2), NoOpMonitor)
            .unwrap();
        assert_eq!(ts.memory().len(), 8);

        let mut ts = TabuSearch::new(5, 8).unwrap();
        ts.run(&fitness, &mut Pcg64::seed_from_u64(2), NoOpMonitor)
            .unwrap();
        assert_eq!(ts.memory().len(), 5);
    }

    #[test]
    fn stagnation_turns_on_exploration() {
        let fitness = square_fitness(Metric::Mse);
        let mut recorder = Recorder::default();
        TabuSearch::new(300, 50)
            .unwrap()
            .with_stagnation_threshold(0)
            .run(&fitness, &mut Pcg64::seed_from_u64(9), &mut recorder)
            .unwrap();

        // exploring exactly when the previous iteration was rejected
        let mut stagnation = 0u64;
        for r in &recorder.reports {
            assert_eq!(r.exploring, stagnation > 0, "iteration {}", r.iteration);
            stagnation = if r.accepted { 0 } else { stagnation + 1 };
        }
    }

    #[test]
    fn same_seed_same_run() {
        let fitness = square_fitness(Metric::Mse);
        let run = |seed| {
            TabuSearch::new(40, 10)
                .unwrap()
                .run(&fitness, &mut Pcg64::seed_from_u64(seed), NoOpMonitor)
                .unwrap()
        };
        assert_eq!(run(77), run(77));
    }
}
