//! Genetic Algorithm framework.
//!
//! A generic GA over fixed-length gene vectors. Users define their problem
//! by implementing [`GaProblem`], which specifies the gene domain, fitness,
//! and optionally crossover, mutation and repair.
//!
//! # Core Types
//!
//! - [`Chromosome`]: gene vector with a cached fitness
//! - [`GaProblem`]: problem definition; higher fitness is better
//! - [`GaConfig`]: algorithm parameters (population size, selection, rates)
//! - [`GaRunner`]: executes the evolutionary loop
//! - [`GaResult`]: best chromosome and run statistics
//!
//! # Ready-made Problems
//!
//! - [`TargetSequence`]: evolve integers toward a hidden target
//! - [`ConstrainedAssignment`]: categorical fields scored by a
//!   [`ConstraintSet`] with one all-distinct group kept by repair
//!
//! # Submodules
//!
//! - [`operators`]: single-point crossover and per-gene mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod assignment;
mod config;
mod constraints;
pub mod operators;
mod runner;
mod selection;
mod target;
mod types;

pub use assignment::{ConstrainedAssignment, Domain};
pub use config::GaConfig;
pub use constraints::{Constraint, ConstraintSet, ConstraintTerm};
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
pub use target::TargetSequence;
pub use types::{Chromosome, GaProblem};
