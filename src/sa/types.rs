//! Core trait for Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The user implements neighbor generation and cost evaluation.
/// The SA framework handles temperature management, the acceptance
/// criterion, and cooling.
///
/// # Minimization
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_heuristic::sa::SaProblem;
///
/// struct Parabola;
///
/// impl SaProblem for Parabola {
///     type Solution = f64;
///
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
///         rng.random_range(-10.0..10.0)
///     }
///
///     fn cost(&self, x: &f64) -> f64 {
///         (x - 3.0).powi(2)
///     }
///
///     fn neighbor<R: Rng>(&self, x: &f64, heat: f64, rng: &mut R) -> f64 {
///         let step = 2.0 * heat + 1e-3;
///         x + rng.random_range(-step..step)
///     }
/// }
/// ```
pub trait SaProblem {
    /// The solution representation type.
    type Solution: Clone;

    /// Creates a random initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of `solution` without modifying it.
    ///
    /// `heat` is the current temperature divided by the initial
    /// temperature, in `(0, 1]`. Problems can use it to shrink the move
    /// size as the run cools.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, heat: f64, rng: &mut R)
        -> Self::Solution;
}
