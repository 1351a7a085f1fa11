//! Beam search over staged candidates.
//!
//! Builds a sequence one position at a time. Every partial sequence in the
//! beam is extended with each candidate token of the next stage, the
//! extensions are scored, and only the best `beam_width` survive. Pruned
//! sequences are forgotten, so the result is a heuristic best, not a
//! guaranteed optimum (unless the beam is wide enough to hold every
//! sequence).
//!
//! # Key Types
//!
//! - [`BeamProblem`]: stages of candidate tokens plus a scoring function
//! - [`StagedCandidates`]: closure-backed [`BeamProblem`]
//! - [`BeamConfig`], [`BeamRunner`], [`BeamResult`]
//!
//! # References
//!
//! - Lowerre (1976), "The HARPY Speech Recognition System"

mod config;
mod runner;
mod types;

pub use config::BeamConfig;
pub use runner::{BeamResult, BeamRunner};
pub use types::{BeamEntry, BeamProblem, StagedCandidates};
