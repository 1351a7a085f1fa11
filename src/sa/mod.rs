//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Worsening moves are accepted with a probability that
//! decreases as the temperature cools, which lets the search escape local
//! optima early and settle later.
//!
//! # Key Types
//!
//! - [`SaProblem`]: initial solution, cost, temperature-aware neighbor
//! - [`BoundedProblem`]: ready-made continuous problem over per-coordinate bounds
//! - [`SaConfig`], [`CoolingSchedule`], [`SaRunner`], [`SaResult`]
//! - [`anneal`]: one-call minimization of a closure over a bounded box
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod continuous;
mod runner;
mod types;

pub use config::{CoolingSchedule, SaConfig};
pub use continuous::{anneal, Bound, BoundedProblem};
pub use runner::{SaResult, SaRunner};
pub use types::SaProblem;
