//! Core trait and beam entries.

/// A partial sequence and its heuristic score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeamEntry<T> {
    pub sequence: Vec<T>,
    pub score: f64,
}

/// Defines a staged sequence-construction problem.
///
/// Stage `i` lists the candidate tokens for output position `i`.
/// Higher scores are better.
pub trait BeamProblem {
    /// Token placed at each position.
    type Token: Clone;

    /// Candidate tokens, one list per output position.
    fn stages(&self) -> &[Vec<Self::Token>];

    /// Scores a full partial sequence (all positions chosen so far).
    fn score(&self, sequence: &[Self::Token]) -> f64;
}

/// A [`BeamProblem`] backed by a stage table and a scoring closure.
///
/// # Examples
///
/// ```
/// use u_heuristic::beam::{BeamConfig, BeamRunner, StagedCandidates};
///
/// let stages = vec![vec!["enter", "enters"], vec!["the", "a"]];
/// let problem = StagedCandidates::new(stages, |seq: &[&str]| {
///     seq.iter().filter(|w| ["enter", "the"].contains(*w)).count() as f64
/// });
/// let result = BeamRunner::run(&problem, &BeamConfig::default().with_beam_width(2)).unwrap();
/// assert_eq!(result.sequence, ["enter", "the"]);
/// ```
pub struct StagedCandidates<T, F> {
    stages: Vec<Vec<T>>,
    scorer: F,
}

impl<T, F> StagedCandidates<T, F>
where
    T: Clone,
    F: Fn(&[T]) -> f64,
{
    pub fn new(stages: Vec<Vec<T>>, scorer: F) -> Self {
        Self { stages, scorer }
    }
}

impl<T, F> BeamProblem for StagedCandidates<T, F>
where
    T: Clone,
    F: Fn(&[T]) -> f64,
{
    type Token = T;

    fn stages(&self) -> &[Vec<T>] {
        &self.stages
    }

    fn score(&self, sequence: &[T]) -> f64 {
        (self.scorer)(sequence)
    }
}
