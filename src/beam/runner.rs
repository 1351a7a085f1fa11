//! Beam search execution.

use super::config::BeamConfig;
use super::types::{BeamEntry, BeamProblem};
use crate::error::{Result, SearchError};
use crate::observer::{NoopObserver, Observer, SearchEvent};

/// Result of a beam search run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeamResult<T> {
    /// Highest-scoring complete sequence.
    pub sequence: Vec<T>,

    /// Score of `sequence`.
    pub score: f64,

    /// Surviving complete sequences, best first.
    pub final_beam: Vec<BeamEntry<T>>,

    /// Number of scoring calls made.
    pub evaluations: usize,
}

/// Executes beam search.
pub struct BeamRunner;

impl BeamRunner {
    /// Runs beam search without progress reporting.
    pub fn run<P: BeamProblem>(problem: &P, config: &BeamConfig) -> Result<BeamResult<P::Token>> {
        Self::run_with(problem, config, &mut NoopObserver)
    }

    /// Runs beam search, reporting a [`SearchEvent::BeamStage`] per stage.
    ///
    /// Extensions are ranked by descending score with a stable sort, so
    /// ties keep their generation order: earlier beam entries first, then
    /// candidate order within a stage.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidConfig`] if `beam_width` is zero
    /// - [`SearchError::EmptyStage`] if any stage has no candidates
    pub fn run_with<P: BeamProblem, O: Observer>(
        problem: &P,
        config: &BeamConfig,
        observer: &mut O,
    ) -> Result<BeamResult<P::Token>> {
        config.validate()?;

        let stages = problem.stages();
        if let Some(stage) = stages.iter().position(Vec::is_empty) {
            return Err(SearchError::EmptyStage { stage });
        }

        log::debug!(
            "beam search over {} stages, width {}",
            stages.len(),
            config.beam_width
        );

        let mut beam: Vec<BeamEntry<P::Token>> = vec![BeamEntry {
            sequence: Vec::new(),
            score: 0.0,
        }];
        let mut evaluations = 0;

        for (stage, candidates) in stages.iter().enumerate() {
            let mut extended = Vec::with_capacity(beam.len() * candidates.len());
            for entry in &beam {
                for token in candidates {
                    let mut sequence = Vec::with_capacity(entry.sequence.len() + 1);
                    sequence.extend_from_slice(&entry.sequence);
                    sequence.push(token.clone());
                    let score = problem.score(&sequence);
                    evaluations += 1;
                    extended.push(BeamEntry { sequence, score });
                }
            }

            let expanded = extended.len();
            extended.sort_by(|a, b| rank_key(b.score).total_cmp(&rank_key(a.score)));
            extended.truncate(config.beam_width);
            beam = extended;

            observer.observe(&SearchEvent::BeamStage {
                stage,
                expanded,
                retained: beam.len(),
                best_score: beam[0].score,
            });
        }

        // The beam starts with one entry and every stage is non-empty.
        let best = beam[0].clone();
        log::info!(
            "beam search finished: score {:.4} after {evaluations} evaluations",
            best.score
        );

        Ok(BeamResult {
            sequence: best.sequence,
            score: best.score,
            final_beam: beam,
            evaluations,
        })
    }
}

/// Sort key for scores: NaN ranks below every number.
fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}
