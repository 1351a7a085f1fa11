//! Selection strategies for the GA.
//!
//! Selection determines which chromosomes are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Chromosome;
use crate::random::distinct_indices;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better) and
/// read the cached fitness; unevaluated chromosomes count as worst.
///
/// # Examples
///
/// ```
/// use u_heuristic::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: sample `k` distinct members, select the best.
    ///
    /// Ties go to the member drawn first. A `k` larger than the
    /// population degenerates to picking the population best.
    /// - k=2: light pressure (good for diversity)
    /// - k=3-5: moderate pressure (typical default)
    /// - k>5: strong pressure (risk of premature convergence)
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Weights are fitness shifted by the population minimum, so negative
    /// scores are handled.
    ///
    /// **Warning**: Susceptible to super-individual dominance when
    /// fitness variance is high.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Rank-based selection.
    ///
    /// Chromosomes are sorted by fitness and selection probability is
    /// proportional to rank position, not raw fitness value. This avoids
    /// the scaling problems of roulette wheel selection.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<G, R: Rng>(&self, population: &[Chromosome<G>], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

fn tournament<G, R: Rng>(population: &[Chromosome<G>], k: usize, rng: &mut R) -> usize {
    let contestants = distinct_indices(population.len(), k.max(1), rng);

    let mut best_idx = contestants[0];
    for &idx in &contestants[1..] {
        if population[idx].fitness_or_worst() > population[best_idx].fitness_or_worst() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection on fitness shifted to be non-negative.
///
/// weight_i = fitness_i - min_fitness + epsilon
fn roulette<G, R: Rng>(population: &[Chromosome<G>], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let fitnesses: Vec<f64> = population
        .iter()
        .map(|c| c.fitness.unwrap_or(f64::NAN))
        .collect();
    let min_fitness = fitnesses
        .iter()
        .copied()
        .filter(|f| f.is_finite())
        .fold(f64::INFINITY, f64::min);
    if !min_fitness.is_finite() {
        return rng.random_range(0..n);
    }

    let epsilon = 1e-10;
    let weights: Vec<f64> = fitnesses
        .iter()
        .map(|&f| {
            if f.is_finite() {
                f - min_fitness + epsilon
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Rank-based selection using linear ranking.
///
/// Chromosomes are sorted best first, then selection probability is
/// proportional to `n - rank`.
fn rank<G, R: Rng>(population: &[Chromosome<G>], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<(usize, f64)> = population
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.fitness_or_worst()))
        .collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &(original_idx, _)) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed[n - 1].0 // fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Chromosome<u8>> {
        fitnesses
            .iter()
            .map(|&f| Chromosome {
                genes: vec![0],
                fitness: Some(f),
            })
            .collect()
    }

    fn counts(selection: Selection, pop: &[Chromosome<u8>], seed: u64) -> Vec<u32> {
        let mut rng = create_rng(seed);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..10_000 {
            counts[selection.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_full_size_always_best() {
        // Distinct sampling: a tournament over the whole population is deterministic
        let pop = make_population(&[10.0, 5.0, 100.0, 8.0]);
        let counts = counts(Selection::Tournament(4), &pop, 42);
        assert_eq!(counts[2], 10_000);
    }

    #[test]
    fn test_tournament_oversized_clamps() {
        let pop = make_population(&[1.0, 3.0, 2.0]);
        let counts = counts(Selection::Tournament(50), &pop, 7);
        assert_eq!(counts[1], 10_000);
    }

    #[test]
    fn test_tournament_never_picks_worst_with_k2() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = counts(Selection::Tournament(2), &pop, 42);
        assert_eq!(counts[2], 0);
        assert!(counts[0] > counts[3]);
    }

    #[test]
    fn test_tournament_ties_go_to_first_drawn() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        let counts = counts(Selection::Tournament(2), &pop, 42);
        for &c in &counts {
            assert!(
                c > 1500,
                "expected roughly uniform with equal fitness, got {counts:?}"
            );
        }
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = counts(Selection::Tournament(1), &pop, 42);
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[1.0, 50.0, 100.0, 20.0]);
        let counts = counts(Selection::Roulette, &pop, 42);
        assert!(
            counts[2] > counts[0],
            "best should be selected more often: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_negative_fitness() {
        let pop = make_population(&[-400.0, -10.0, -300.0]);
        let counts = counts(Selection::Roulette, &pop, 42);
        assert!(counts[1] > counts[2]);
        assert!(counts[0] < 100, "minimum gets only epsilon weight: {counts:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[1.0, 50.0, 100.0, 20.0]);
        let counts = counts(Selection::Rank, &pop, 42);
        assert!(
            counts[2] > counts[0],
            "best should be selected more: {counts:?}"
        );
    }

    #[test]
    fn test_nan_fitness_ranks_last() {
        let fitnesses: Vec<f64> = (0..40)
            .map(|i| if i % 3 == 0 { f64::NAN } else { f64::from(i) })
            .collect();
        let pop = make_population(&fitnesses);

        let rank = counts(Selection::Rank, &pop, 11);
        assert!(rank[38] > rank[1], "best should outdraw the low end: {rank:?}");

        let tournament = counts(Selection::Tournament(40), &pop, 11);
        assert_eq!(tournament[38], 10_000);
    }

    #[test]
    fn test_single_chromosome() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);

        assert_eq!(Selection::Tournament(3).select(&pop, &mut rng), 0);
        assert_eq!(Selection::Roulette.select(&pop, &mut rng), 0);
        assert_eq!(Selection::Rank.select(&pop, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Chromosome<u8>> = vec![];
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&pop, &mut rng);
    }
}
