//! Continuous optimization over a bounded box.

use super::config::SaConfig;
use super::runner::{SaResult, SaRunner};
use super::types::SaProblem;
use crate::error::{Result, SearchError};
use rand::Rng;

/// Closed interval `[min, max]` for one coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

/// A cost function over a fixed-length real vector with per-coordinate bounds.
///
/// Moves perturb one random coordinate by a uniform offset in `[-d, d]`
/// with `d = width * heat * step_fraction`, then clamp it back into its
/// bound. The move size therefore shrinks in proportion to the
/// temperature.
pub struct BoundedProblem<F> {
    bounds: Vec<Bound>,
    cost: F,
    step_fraction: f64,
}

impl<F> BoundedProblem<F>
where
    F: Fn(&[f64]) -> f64,
{
    /// Default fraction of a coordinate's width used as the hot move size.
    pub const DEFAULT_STEP_FRACTION: f64 = 0.1;

    /// Creates a problem from `(min, max)` pairs and a cost closure.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidProblem`] if `bounds` is empty
    /// - [`SearchError::InvalidBound`] if a bound is inverted or not finite
    pub fn new<I>(bounds: I, cost: F) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let bounds = bounds
            .into_iter()
            .enumerate()
            .map(|(index, (min, max))| {
                if min.is_finite() && max.is_finite() && min <= max {
                    Ok(Bound { min, max })
                } else {
                    Err(SearchError::InvalidBound { index, min, max })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        if bounds.is_empty() {
            return Err(SearchError::InvalidProblem(
                "at least one bounded coordinate is required".into(),
            ));
        }

        Ok(Self {
            bounds,
            cost,
            step_fraction: Self::DEFAULT_STEP_FRACTION,
        })
    }

    /// Sets the hot move size as a fraction of each coordinate's width.
    pub fn with_step_fraction(mut self, fraction: f64) -> Self {
        self.step_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    /// Evaluates the cost of `x`, rejecting vectors of the wrong length.
    pub fn evaluate(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.bounds.len() {
            return Err(SearchError::DimensionMismatch {
                expected: self.bounds.len(),
                actual: x.len(),
            });
        }
        Ok((self.cost)(x))
    }
}

impl<F> SaProblem for BoundedProblem<F>
where
    F: Fn(&[f64]) -> f64,
{
    type Solution = Vec<f64>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.bounds
            .iter()
            .map(|b| rng.random_range(b.min..=b.max))
            .collect()
    }

    fn cost(&self, solution: &Vec<f64>) -> f64 {
        (self.cost)(solution)
    }

    fn neighbor<R: Rng>(&self, solution: &Vec<f64>, heat: f64, rng: &mut R) -> Vec<f64> {
        let mut next = solution.clone();
        let i = rng.random_range(0..next.len());
        let bound = self.bounds[i];
        let deviation = bound.width() * heat * self.step_fraction;
        if deviation > 0.0 && deviation.is_finite() {
            next[i] += rng.random_range(-deviation..=deviation);
        }
        next[i] = bound.clamp(next[i]);
        next
    }
}

/// Minimizes `cost` over the box described by `bounds`.
///
/// # Examples
///
/// ```
/// use u_heuristic::sa::{anneal, SaConfig};
///
/// let config = SaConfig::default().with_max_iterations(5_000).with_cooling_rate(0.999).with_seed(1);
/// let result = anneal(|x: &[f64]| (x[0] - 2.0).powi(2), &[(-10.0, 10.0)], &config).unwrap();
/// assert!((result.best[0] - 2.0).abs() < 1.0);
/// ```
pub fn anneal<F>(cost: F, bounds: &[(f64, f64)], config: &SaConfig) -> Result<SaResult<Vec<f64>>>
where
    F: Fn(&[f64]) -> f64,
{
    let problem = BoundedProblem::new(bounds.iter().copied(), cost)?;
    SaRunner::run(&problem, config)
}
