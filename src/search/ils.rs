use super::{IterationReport, Search, SearchMonitor, SearchResult};
use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::fitness::Fitness;
use crate::operators::perturb;
use rand_core::RngCore;

/// Iterated local search.
///
/// Perturbs the current solution and keeps the candidate whenever it scores
/// no worse, so ties drift across plateaus. The current solution is always
/// the best seen.
#[derive(Debug, Clone)]
pub struct IteratedLocalSearch {
    iterations: u64,
}

impl IteratedLocalSearch {
    pub fn new(iterations: u64) -> Self {
        Self { iterations }
    }
}

impl Search for IteratedLocalSearch {
    fn name(&self) -> &str {
        "IteratedLocalSearch"
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn run<R, M>(&mut self, fitness: &Fitness, rng: &mut R, mut monitor: M) -> Result<SearchResult>
    where
        R: RngCore + ?Sized,
        M: SearchMonitor,
    {
        let mut current = Chromosome::random(rng, fitness.layout().chromosome_len());
        let mut current_score = fitness.evaluate(&current)?;
        monitor.on_start(current_score);

        let mut accepted = 0;
        for iteration in 0..self.iterations {
            let candidate = perturb(rng, &current);
            let candidate_score = fitness.evaluate(&candidate)?;

            let accept = candidate_score <= current_score;
            if accept {
                current = candidate;
                current_score = candidate_score;
                accepted += 1;
            }

            monitor.on_iteration(
                &IterationReport {
                    iteration,
                    best_score: current_score,
                    candidate_score,
                    accepted: accept,
                    exploring: false,
                },
                &current,
            );
        }

        let result = SearchResult {
            best: current,
            best_score: current_score,
            iterations: self.iterations,
            accepted,
            exhausted: 0,
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
    fn test_name() {
        let ils = IteratedLocalSearch::new(1);
        assert_eq!(ils.name(), "IteratedLocalSearch");
        assert_eq!(ils.iterations(), 1);
    }

    #[test]
    fn zero_iterations_returns_the_seeded_start() {
        let fitness = square_fitness(Metric::Mse);
        let a = IteratedLocalSearch::new(0)
            .run(&fitness, &mut Pcg64::seed_from_u64(1234), NoOpMonitor)
            .unwrap();
        let b = IteratedLocalSearch::new(0)
            .run(&fitness, &mut Pcg64::seed_from_u64(1234), NoOpMonitor)
            .unwrap();
        let bits = |r: &SearchResult| r.best.genes().iter().map(|g| g.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
        assert_eq!(a.best.len(), fitness.layout().chromosome_len());
        assert_eq!(a.iterations, 0);
    }

    #[test]
    fn best_score_never_increases() {
        let fitness = square_fitness(Metric::Mse);
        let mut recorder = Recorder::default();
        let result = IteratedLocalSearch::new(300)
            .run(&fitness, &mut Pcg64::seed_from_u64(7), &mut recorder)
            .unwrap();

        assert_eq!(recorder.reports.len(), 300);
        let mut previous = recorder.initial.unwrap();
        for r in &recorder.reports {
            assert!(r.best_score <= previous);
            assert_eq!(r.accepted, r.candidate_score <= previous);
            previous = r.best_score;
        }
        assert_eq!(result.best_score, previous);
        assert_eq!(fitness.evaluate(&result.best).unwrap(), result.best_score);
        assert_eq!(recorder.finished.unwrap().accepted, result.accepted);
    }

    #[test]
    fn same_seed_same_run() {
        let fitness = square_fitness(Metric::Ssim);
        let run = |seed| {
            IteratedLocalSearch::new(50)
                .run(&fitness, &mut Pcg64::seed_from_u64(seed), NoOpMonitor)
                .unwrap()
        };
        assert_eq!(run(3), run(3));
    }
}
