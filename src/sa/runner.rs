//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::error::Result;
use crate::observer::{AnnealSnapshot, NoopObserver, Observer, SearchEvent};
use crate::random::rng_from_seed;
use rand::Rng;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Best cost at the start and at every progress snapshot.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with a generator seeded from `config.seed`.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with(problem, config, &mut rng, &mut NoopObserver)
    }

    /// Runs SA with an explicit random source and progress observer.
    ///
    /// Each iteration draws one neighbor and applies the Metropolis rule:
    /// improvements are always accepted, a worsening move of size `delta`
    /// with probability `exp(-delta / T)`. Accepting a worse move changes
    /// the working solution only; the best solution is replaced only by a
    /// strictly lower cost. `config.seed` is ignored here.
    pub fn run_with<P, R, O>(
        problem: &P,
        config: &SaConfig,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<SaResult<P::Solution>>
    where
        P: SaProblem,
        R: Rng,
        O: Observer,
    {
        config.validate()?;

        let mut current = problem.initial_solution(rng);
        let mut current_cost = problem.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let report_every = config.report_every();
        let mut cost_history = vec![best_cost];

        log::debug!(
            "sa start: T0={}, {:?}, {} iterations, initial cost {current_cost:.4}",
            config.initial_temperature,
            config.cooling,
            config.max_iterations
        );

        for iteration in 0..config.max_iterations {
            let heat = temperature / config.initial_temperature;
            let candidate = problem.neighbor(&current, heat, rng);
            let candidate_cost = problem.cost(&candidate);
            let delta = candidate_cost - current_cost;

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else if temperature > 0.0 {
                let probability = (-delta / temperature).exp();
                rng.random::<f64>() < probability
            } else {
                false
            };

            if accept {
                current = candidate;
                current_cost = candidate_cost;
                accepted_moves += 1;

                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                }
            }

            temperature = config.cooling.cool(temperature);

            if iteration % report_every == 0 {
                cost_history.push(best_cost);
                observer.observe(&SearchEvent::Annealing(AnnealSnapshot {
                    iteration,
                    temperature,
                    current_cost,
                    best_cost,
                }));
            }
        }

        if cost_history
            .last()
            .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        log::info!(
            "sa finished: best cost {best_cost:.4}, accepted {accepted_moves}/{}, final T {temperature:.3e}",
            config.max_iterations
        );

        Ok(SaResult {
            best,
            best_cost,
            iterations: config.max_iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cost_history,
        })
    }
}
