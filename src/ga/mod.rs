//! Genetic algorithm.
//!
//! A trait-based GA loop plus its instantiation for capacity-constrained
//! assignment. Users of the assignment problem usually only need
//! [`genetic_algorithm`] or [`GeneticSolver`]. The traits are public so
//! other vector encodings can reuse [`GaRunner`].
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Initialization, evaluation, crossover, mutation, repair
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, generations, rates, stop conditions
//! - [`GaRunner`]: Executes the generation loop with size-1 elitism
//! - [`AssignmentProblem`]: Penalized fitness and repair for assignment
//! - [`GaResult`]: Best individual and per-generation history
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Chu & Beasley (1997), "A genetic algorithm for the generalised
//!   assignment problem"
//! - Coello (2002), "Theoretical and numerical constraint-handling
//!   techniques used with evolutionary algorithms"

mod assignment;
mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use assignment::{AssignmentProblem, Chromosome};
pub use config::{GaConfig, DEFAULT_PENALTY_WEIGHT};
pub use runner::{genetic_algorithm, GaResult, GaRunner, GeneticSolver};
pub use selection::Selection;
pub use types::{Fitness, GaProblem, Individual};
