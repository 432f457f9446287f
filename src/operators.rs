//! Neighbour generation for the two search variants.

use crate::chromosome::{Chromosome, PolygonLayout};
use crate::tabu_memory::TabuMemory;
use crate::{rand_between, rand_uniform};
use rand_core::RngCore;

/// One gene in this many is mutated by [`perturb`].
pub const ILS_MUTATION_ODDS: i64 = 128;
pub const ILS_STEP: f64 = 0.1;

pub const TABU_COORDINATE_STEP: f64 = 0.005;
pub const TABU_COLOUR_STEP: f64 = 0.05;
pub const TABU_MUTATION_STEP: f64 = 0.002;

/// Magnitude multiplier while the tabu search is exploring, and for the
/// second half of the retry budget.
pub const WIDEN_FACTOR: f64 = 2.0;

/// Draws at the base magnitude before widening.
pub const TABU_RETRIES: usize = 4;
/// Draws at the widened magnitude before giving up.
pub const TABU_WIDENED_RETRIES: usize = 4;

/// Iterated local search perturbation.
///
/// Each gene independently has a 1 in 128 chance of receiving a uniform
/// offset in `[-0.1, 0.1]`, after which it is clamped to `[0, 1]`.
pub fn perturb<R: RngCore + ?Sized>(rng: &mut R, chromosome: &Chromosome) -> Chromosome {
    let genes = chromosome
        .genes()
        .iter()
        .map(|&g| {
            if rand_between(rng, 1, ILS_MUTATION_ODDS) == 1 {
                (g + rand_uniform(rng, -ILS_STEP, ILS_STEP)).clamp(0.0, 1.0)
            } else {
                g
            }
        })
        .collect();
    Chromosome::new(genes)
}

/// Result of a tabu perturbation.
#[derive(Clone, Debug, PartialEq)]
pub enum Neighbour {
    /// A candidate absent from the tabu memory, found after `attempts` draws.
    Fresh {
        chromosome: Chromosome,
        attempts: usize,
    },
    /// Every draw in the retry budget was tabu; holds the last draw.
    Exhausted(Chromosome),
}

impl Neighbour {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Neighbour::Exhausted(_))
    }

    pub fn into_chromosome(self) -> Chromosome {
        match self {
            Neighbour::Fresh { chromosome, .. } | Neighbour::Exhausted(chromosome) => chromosome,
        }
    }
}

// shift every gene by a role-dependent step, clamped to [0, 1]
fn shift_all<R: RngCore + ?Sized>(
    rng: &mut R,
    chromosome: &Chromosome,
    layout: &PolygonLayout,
    scale: f64,
) -> Chromosome {
    let coordinate_step = TABU_COORDINATE_STEP * scale;
    let colour_step = TABU_COLOUR_STEP * scale;
    let genes = chromosome
        .genes()
        .iter()
        .enumerate()
        .map(|(i, &g)| {
            let step = if layout.is_coordinate(i) {
                coordinate_step
            } else {
                colour_step
            };
            (g + rand_uniform(rng, -step, step)).clamp(0.0, 1.0)
        })
        .collect();
    Chromosome::new(genes)
}

/// Tabu search perturbation.
///
/// Coordinate genes move by up to `±0.005`, colour and alpha genes by up to
/// `±0.05`, all clamped to `[0, 1]`. `exploring` doubles both magnitudes.
/// A draw found in `memory` is retried, first [`TABU_RETRIES`] times at the
/// current magnitude and then [`TABU_WIDENED_RETRIES`] times at a widened one.
pub fn perturb_tabu<R: RngCore + ?Sized>(
    rng: &mut R,
    chromosome: &Chromosome,
    layout: &PolygonLayout,
    memory: &TabuMemory,
    exploring: bool,
) -> Neighbour {
    let base = if exploring { WIDEN_FACTOR } else { 1.0 };
    let budget = TABU_RETRIES + TABU_WIDENED_RETRIES;

    let mut last = None;
    for attempt in 0..budget {
        let scale = if attempt < TABU_RETRIES {
            base
        } else {
            base * WIDEN_FACTOR
        };
        let candidate = shift_all(rng, chromosome, layout, scale);
        if !memory.contains(&candidate) {
            return Neighbour::Fresh {
                chromosome: candidate,
                attempts: attempt + 1,
            };
        }
        last = Some(candidate);
    }
    Neighbour::Exhausted(last.unwrap_or_else(|| chromosome.clone()))
}

/// Tabu search mutation: every gene moves by up to `±0.002`, clamped to `[0, 1]`.
pub fn mutate<R: RngCore + ?Sized>(rng: &mut R, chromosome: &Chromosome) -> Chromosome {
    let genes = chromosome
        .genes()
        .iter()
        .map(|&g| (g + rand_uniform(rng, -TABU_MUTATION_STEP, TABU_MUTATION_STEP)).clamp(0.0, 1.0))
        .collect();
    Chromosome::new(genes)
}
