//! Core definitions for the GA framework.
//!
//! [`Chromosome`] is the candidate representation and [`GaProblem`] is the
//! contract between the generic evolutionary loop and a concrete problem.

use super::operators::{per_gene_mutation, single_point_crossover};
use rand::Rng;

/// A fixed-length gene vector with a cached fitness.
///
/// The fitness is a cache filled in by the runner every generation; it is
/// `None` for freshly bred chromosomes. Operators never modify a
/// chromosome in place: they return new ones.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome<G> {
    pub genes: Vec<G>,
    pub fitness: Option<f64>,
}

impl<G> Chromosome<G> {
    pub fn new(genes: Vec<G>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Cached fitness, or negative infinity when not evaluated or NaN.
    pub fn fitness_or_worst(&self) -> f64 {
        match self.fitness {
            Some(f) if !f.is_nan() => f,
            _ => f64::NEG_INFINITY,
        }
    }
}

/// Defines a GA optimization problem.
///
/// Users plug their domain-specific logic into the generic loop by
/// implementing:
///
/// 1. **Gene domain**: [`random_gene`](GaProblem::random_gene) for each position
/// 2. **Evaluation**: [`fitness`](GaProblem::fitness), higher is better
/// 3. Optionally **crossover**, **mutation** and **repair** overrides
///
/// The defaults give single-point crossover, per-gene resampling mutation
/// and no repair.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// chromosomes in parallel with rayon (feature `parallel`).
pub trait GaProblem: Send + Sync {
    /// Gene type stored at each position.
    type Gene: Clone + PartialEq + std::fmt::Debug + Send + Sync;

    /// Number of genes in every chromosome.
    fn chromosome_length(&self) -> usize;

    /// Draws a random value from the domain of `position`.
    fn random_gene<R: Rng>(&self, position: usize, rng: &mut R) -> Self::Gene;

    /// Creates a random chromosome.
    fn create_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome<Self::Gene> {
        let genes = (0..self.chromosome_length())
            .map(|position| self.random_gene(position, rng))
            .collect();
        Chromosome::new(genes)
    }

    /// Scores a gene vector. Higher is better.
    fn fitness(&self, genes: &[Self::Gene]) -> f64;

    /// Best fitness this problem can reach, if known.
    ///
    /// The runner stops as soon as a chromosome reaches it.
    fn max_fitness(&self) -> Option<f64> {
        None
    }

    /// Produces two children from two parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome<Self::Gene>,
        parent2: &Chromosome<Self::Gene>,
        rng: &mut R,
    ) -> (Chromosome<Self::Gene>, Chromosome<Self::Gene>) {
        single_point_crossover(parent1, parent2, rng)
    }

    /// Returns a mutated copy: each gene is redrawn with probability `rate`.
    fn mutate<R: Rng>(
        &self,
        chromosome: &Chromosome<Self::Gene>,
        rate: f64,
        rng: &mut R,
    ) -> Chromosome<Self::Gene> {
        per_gene_mutation(chromosome, rate, rng, |position, rng| {
            self.random_gene(position, rng)
        })
    }

    /// Restores hard constraints after breeding.
    ///
    /// Called on every created and bred chromosome before it joins a
    /// population. The default accepts the chromosome unchanged.
    fn repair<R: Rng>(
        &self,
        chromosome: Chromosome<Self::Gene>,
        _rng: &mut R,
    ) -> Chromosome<Self::Gene> {
        chromosome
    }
}
