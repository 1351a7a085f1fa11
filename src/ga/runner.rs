//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repair → repeat.

use super::config::GaConfig;
use super::types::{Chromosome, GaProblem};
use crate::error::{Result, SearchError};
use crate::observer::{GenerationSnapshot, NoopObserver, Observer, SearchEvent};
use crate::random::rng_from_seed;
use rand::Rng;

/// Result of a GA optimization run.
///
/// Contains the best chromosome found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult<G> {
    /// The fittest chromosome seen during the entire run.
    pub best: Chromosome<G>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations evaluated, counting the final population
    /// only when it reached the target.
    pub generations: usize,

    /// Whether the run stopped because the target fitness was reached.
    pub reached_target: bool,

    /// Best fitness after every population evaluation, including the
    /// evaluation of the final bred population.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_heuristic::ga::{GaConfig, GaRunner, TargetSequence};
///
/// let problem = TargetSequence::new(vec![2, 5, 1, 8, 3], 0, 9).unwrap();
/// let config = GaConfig::default().with_mutation_rate(0.05).with_seed(42);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(result.best_fitness <= 500.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Gene>> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with(problem, config, &mut rng, &mut NoopObserver)
    }

    /// Runs the GA with an explicit random source and progress observer.
    ///
    /// Every generation evaluates the whole population, records the
    /// generation best (first among equals), and stops early once it
    /// reaches the target fitness. Otherwise it breeds a replacement
    /// population of exactly `population_size` chromosomes. The best
    /// chromosome is replaced only by a strictly fitter one.
    /// `config.seed` is ignored here.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidConfig`] if the configuration is invalid
    /// - [`SearchError::InvalidProblem`] if the chromosome length is zero
    /// - [`SearchError::DimensionMismatch`] if a problem hook produces a
    ///   chromosome of the wrong length
    pub fn run_with<P, R, O>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<GaResult<P::Gene>>
    where
        P: GaProblem,
        R: Rng,
        O: Observer,
    {
        config.validate()?;

        let length = problem.chromosome_length();
        if length == 0 {
            return Err(SearchError::InvalidProblem(
                "chromosome length must be at least 1".into(),
            ));
        }

        let target = config.target_fitness.or_else(|| problem.max_fitness());
        let report_every = config.report_every();

        log::debug!(
            "ga start: population {}, {} generations, {:?}, mutation {}, target {target:?}",
            config.population_size,
            config.max_generations,
            config.selection,
            config.mutation_rate
        );

        // 1. Initialize population
        let mut population = (0..config.population_size)
            .map(|_| {
                let chromosome = problem.create_chromosome(rng);
                checked(problem.repair(chromosome, rng), length)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut best: Option<Chromosome<P::Gene>> = None;
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        let mut generations = 0;
        let mut reached_target = false;

        // 2. Evolutionary loop
        for generation in 1..=config.max_generations {
            evaluate_population(problem, &mut population, config.parallel);

            let (elite, generation_best) = find_best(&population);
            let best_fitness = track_best(&mut best, &population[elite]);
            fitness_history.push(best_fitness);
            generations = generation;

            let hit = target.is_some_and(|t| generation_best >= t);
            if hit || generation % report_every == 0 {
                observer.observe(&SearchEvent::Generation(GenerationSnapshot {
                    generation,
                    generation_best,
                    mean_fitness: mean_fitness(&population),
                    best_fitness,
                }));
            }

            if hit {
                log::debug!("ga reached target fitness {generation_best} at generation {generation}");
                reached_target = true;
                break;
            }

            population = breed(problem, config, &population, elite, rng)?;
        }

        // 3. The last bred population is evaluated too
        if !reached_target {
            evaluate_population(problem, &mut population, config.parallel);
            let (elite, generation_best) = find_best(&population);
            let best_fitness = track_best(&mut best, &population[elite]);
            fitness_history.push(best_fitness);

            if target.is_some_and(|t| generation_best >= t) {
                generations += 1;
                reached_target = true;
                log::debug!("ga reached target fitness {generation_best} in the final population");
                observer.observe(&SearchEvent::Generation(GenerationSnapshot {
                    generation: generations,
                    generation_best,
                    mean_fitness: mean_fitness(&population),
                    best_fitness,
                }));
            }
        }

        let best = best.ok_or_else(|| {
            SearchError::InvalidProblem("no chromosome was evaluated".into())
        })?;
        let best_fitness = best.fitness_or_worst();

        log::info!(
            "ga finished: best fitness {best_fitness} after {generations} generations (target reached: {reached_target})"
        );

        Ok(GaResult {
            best,
            best_fitness,
            generations,
            reached_target,
            fitness_history,
        })
    }
}

/// Produces the next population from an evaluated one.
///
/// Parents are selected up front and paired in order; with an odd count
/// the last parent pairs with the first.
fn breed<P, R>(
    problem: &P,
    config: &GaConfig,
    population: &[Chromosome<P::Gene>],
    elite: usize,
    rng: &mut R,
) -> Result<Vec<Chromosome<P::Gene>>>
where
    P: GaProblem,
    R: Rng,
{
    let size = config.population_size;
    let length = problem.chromosome_length();

    let parents: Vec<usize> = (0..size)
        .map(|_| config.selection.select(population, rng))
        .collect();

    let mut next = Vec::with_capacity(size + 2);
    if config.elitism {
        next.push(population[elite].clone());
    }

    for pair in parents.chunks(2) {
        if next.len() >= size {
            break;
        }
        let first = &population[pair[0]];
        let second = &population[*pair.get(1).unwrap_or(&parents[0])];

        let (child1, child2) = if rng.random::<f64>() < config.crossover_rate {
            problem.crossover(first, second, rng)
        } else {
            (first.clone(), second.clone())
        };

        for child in [child1, child2] {
            let child = problem.mutate(&child, config.mutation_rate, rng);
            let mut child = checked(problem.repair(child, rng), length)?;
            child.fitness = None;
            next.push(child);
        }
    }

    next.truncate(size);
    Ok(next)
}

fn checked<G>(chromosome: Chromosome<G>, length: usize) -> Result<Chromosome<G>> {
    if chromosome.len() != length {
        return Err(SearchError::DimensionMismatch {
            expected: length,
            actual: chromosome.len(),
        });
    }
    Ok(chromosome)
}

/// Evaluate all chromosomes in the population.
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [Chromosome<P::Gene>],
    parallel: bool,
) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if parallel {
            population.par_iter_mut().for_each(|c| {
                c.fitness = Some(problem.fitness(&c.genes));
            });
            return;
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for c in population.iter_mut() {
        c.fitness = Some(problem.fitness(&c.genes));
    }
}

/// Index and fitness of the first fittest chromosome.
fn find_best<G>(population: &[Chromosome<G>]) -> (usize, f64) {
    let mut best = (0, population[0].fitness_or_worst());
    for (i, c) in population.iter().enumerate().skip(1) {
        let fitness = c.fitness_or_worst();
        if fitness > best.1 {
            best = (i, fitness);
        }
    }
    best
}

/// Replaces `best` on strict improvement and returns the best fitness.
fn track_best<G: Clone>(best: &mut Option<Chromosome<G>>, candidate: &Chromosome<G>) -> f64 {
    let improved = best
        .as_ref()
        .is_none_or(|b| candidate.fitness_or_worst() > b.fitness_or_worst());
    if improved {
        *best = Some(candidate.clone());
    }
    best.as_ref()
        .map_or(f64::NEG_INFINITY, Chromosome::fitness_or_worst)
}

fn mean_fitness<G>(population: &[Chromosome<G>]) -> f64 {
    let total: f64 = population.iter().map(Chromosome::fitness_or_worst).sum();
    total / population.len() as f64
}

// ============================================================================
// Tests
// ============================================================================
