//! Numeric target matching: evolve a gene vector toward a hidden target.

use super::types::GaProblem;
use crate::error::{Result, SearchError};
use rand::Rng;

/// A hidden integer target over an inclusive domain `[min, max]`.
///
/// Fitness rewards exact matches and penalizes distance:
///
/// `fitness = 100 * exact_matches - Σ |gene_i - target_i|`
///
/// so the maximum is `100 * len`, reached only by the target itself.
/// Fitness may be negative.
///
/// # Examples
///
/// ```
/// use u_heuristic::ga::TargetSequence;
///
/// let problem = TargetSequence::new(vec![2, 5, 1, 8, 3], 0, 9).unwrap();
/// assert_eq!(problem.score(&[2, 5, 1, 8, 3]).unwrap(), 500.0);
/// assert_eq!(problem.score(&[2, 5, 1, 8, 4]).unwrap(), 399.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetSequence {
    target: Vec<i64>,
    min: i64,
    max: i64,
}

impl TargetSequence {
    /// Reward for each gene equal to its target.
    pub const MATCH_REWARD: f64 = 100.0;

    /// Creates the problem.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidProblem`] if the target is empty, the domain
    /// is inverted, or a target value lies outside the domain.
    pub fn new(target: Vec<i64>, min: i64, max: i64) -> Result<Self> {
        if target.is_empty() {
            return Err(SearchError::InvalidProblem("target must not be empty".into()));
        }
        if min > max {
            return Err(SearchError::InvalidProblem(format!(
                "gene domain [{min}, {max}] is empty"
            )));
        }
        if let Some(v) = target.iter().find(|v| !(min..=max).contains(*v)) {
            return Err(SearchError::InvalidProblem(format!(
                "target value {v} outside gene domain [{min}, {max}]"
            )));
        }
        Ok(Self { target, min, max })
    }

    pub fn target(&self) -> &[i64] {
        &self.target
    }

    /// Scores `genes`, rejecting vectors of the wrong length.
    pub fn score(&self, genes: &[i64]) -> Result<f64> {
        if genes.len() != self.target.len() {
            return Err(SearchError::DimensionMismatch {
                expected: self.target.len(),
                actual: genes.len(),
            });
        }
        Ok(self.fitness(genes))
    }
}

impl GaProblem for TargetSequence {
    type Gene = i64;

    fn chromosome_length(&self) -> usize {
        self.target.len()
    }

    fn random_gene<R: Rng>(&self, _position: usize, rng: &mut R) -> i64 {
        rng.random_range(self.min..=self.max)
    }

    fn fitness(&self, genes: &[i64]) -> f64 {
        let (matches, distance) = genes
            .iter()
            .zip(&self.target)
            .fold((0u32, 0i64), |(matches, distance), (g, t)| {
                (matches + u32::from(g == t), distance + (g - t).abs())
            });
        Self::MATCH_REWARD * f64::from(matches) - distance as f64
    }

    fn max_fitness(&self) -> Option<f64> {
        Some(Self::MATCH_REWARD * self.target.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GaConfig, GaRunner, Selection};
    use crate::observer::EventLog;
    use crate::random::create_rng;

    fn problem() -> TargetSequence {
        TargetSequence::new(vec![2, 5, 1, 8, 3], 0, 9).unwrap()
    }

    #[test]
    fn test_score() {
        let p = problem();
        assert_eq!(p.score(&[2, 5, 1, 8, 3]), Ok(500.0));
        assert_eq!(p.score(&[0, 0, 0, 0, 0]), Ok(-19.0));
        assert_eq!(p.score(&[2, 5, 9, 9, 9]), Ok(200.0 - 15.0));
        assert_eq!(p.max_fitness(), Some(500.0));
    }

    #[test]
    fn test_score_wrong_length() {
        assert_eq!(
            problem().score(&[1, 2]),
            Err(SearchError::DimensionMismatch {
                expected: 5,
                actual: 2
            })
        );
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(TargetSequence::new(vec![], 0, 9).is_err());
        assert!(TargetSequence::new(vec![1], 9, 0).is_err());
        assert!(TargetSequence::new(vec![1, 10], 0, 9).is_err());
    }

    #[test]
    fn test_random_genes_in_domain() {
        let p = problem();
        let mut rng = create_rng(8);
        let mut seen = [false; 10];
        for _ in 0..500 {
            let c = p.create_chromosome(&mut rng);
            assert_eq!(c.len(), 5);
            for &g in &c.genes {
                assert!((0..=9).contains(&g));
                seen[g as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "both domain ends must be reachable");
    }

    #[test]
    fn test_evolves_to_target() {
        let config = GaConfig::default()
            .with_population_size(100)
            .with_max_generations(500)
            .with_mutation_rate(0.05)
            .with_selection(Selection::Tournament(5))
            .with_seed(42);

        let mut log = EventLog::new();
        let mut rng = create_rng(42);
        let result = GaRunner::run_with(&problem(), &config, &mut rng, &mut log).unwrap();

        assert!(result.reached_target);
        assert_eq!(result.best_fitness, 500.0);
        assert_eq!(result.best.genes, [2, 5, 1, 8, 3]);
        assert!(result.generations <= 500);

        let last = log.generation_snapshots().last().copied().unwrap();
        assert_eq!(last.generation, result.generations);
        assert_eq!(last.best_fitness, 500.0);
    }
}
