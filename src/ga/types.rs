//! Core trait definitions for the GA.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! generation loop in [`GaRunner`](super::GaRunner) and a concrete
//! encoding such as [`AssignmentProblem`](super::AssignmentProblem).

use rand::Rng;

/// Marker trait for fitness values.
///
/// Lower fitness is better (minimization).
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// A value no real individual can be worse than.
    ///
    /// Used for individuals that have not been evaluated yet.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for logging and history.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness. The runner calls
/// [`GaProblem::evaluate`] and stores the result via
/// [`set_fitness`](Individual::set_fitness).
///
/// Implementors should override [`Clone::clone_from`] to reuse buffers:
/// the runner copies the elite into an existing population slot every
/// generation.
pub trait Individual: Clone + Send + Sync {
    type Fitness: Fitness;

    fn fitness(&self) -> Self::Fitness;

    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a GA optimization problem.
///
/// The runner owns the loop (elitism, parent selection, buffer swapping).
/// The problem owns everything that depends on the encoding:
///
/// 1. **Initialization**: a random individual
/// 2. **Evaluation**: fitness, lower is better
/// 3. **Crossover**: recombine two parents into an existing child slot
/// 4. **Mutation**: per-gene perturbation at a given rate
/// 5. **Repair**: restore feasibility after the stochastic operators
///
/// `GaProblem` is `Send + Sync` because evaluation may run on rayon when
/// the `parallel` feature is enabled.
pub trait GaProblem: Send + Sync {
    type Individual: Individual;

    /// Creates a random individual. It does not have to be feasible.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Computes the fitness of an individual.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Overwrites `child` with a recombination of the two parents.
    ///
    /// `child` is a population slot from the previous-but-one generation;
    /// its contents are garbage. The default copies `parent1`.
    fn crossover_into<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        child: &mut Self::Individual,
        _rng: &mut R,
    ) {
        child.clone_from(parent1);
    }

    /// Mutates an individual in place. `rate` is a per-gene probability.
    ///
    /// The default is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rate: f64, _rng: &mut R) {}

    /// Restores feasibility in place. The default is a no-op.
    fn repair<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Called after each generation with the running best fitness.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}
