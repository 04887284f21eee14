//! The assignment problem expressed as a [`GaProblem`].

use super::config::{GaConfig, DEFAULT_PENALTY_WEIGHT};
use super::operators::{reset_mutation, uniform_crossover_into};
use super::types::{Fitness, GaProblem, Individual};
use crate::problem::{overflow_of, ProblemInstance, Solution};
use rand::Rng;

/// A vector-form solution together with its fitness.
#[derive(Debug)]
pub struct Chromosome {
    pub solution: Solution,
    pub fitness: f64,
}

impl Clone for Chromosome {
    fn clone(&self) -> Self {
        Self {
            solution: self.solution.clone(),
            fitness: self.fitness,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.solution.clone_from(&source.solution);
        self.fitness = source.fitness;
    }
}

impl Individual for Chromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// Capacity-constrained assignment over a borrowed instance.
///
/// Fitness is `total_cost + overflow × penalty_weight`, where overflow
/// counts agents beyond capacity summed over resources. Infeasible
/// individuals stay comparable but lose to any feasible one whenever
/// the penalty weight exceeds the cost spread.
///
/// ```
/// use u_assign::ga::AssignmentProblem;
/// use u_assign::problem::{ProblemInstance, Solution};
///
/// let instance = ProblemInstance::new(vec![vec![1.0, 2.0]; 2], vec![1, 1]).unwrap();
/// let problem = AssignmentProblem::new(&instance);
/// assert_eq!(problem.fitness(&Solution::new(vec![0, 1])), 3.0);
/// assert_eq!(problem.fitness(&Solution::new(vec![0, 0])), 2.0 + 1e5);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentProblem<'a> {
    instance: &'a ProblemInstance,
    penalty_weight: f64,
    crossover_bias: f64,
}

impl<'a> AssignmentProblem<'a> {
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            penalty_weight: DEFAULT_PENALTY_WEIGHT,
            crossover_bias: 0.5,
        }
    }

    /// Takes penalty weight and crossover bias from `config`.
    pub fn from_config(instance: &'a ProblemInstance, config: &GaConfig) -> Self {
        Self {
            instance,
            penalty_weight: config.penalty_weight,
            crossover_bias: config.crossover_bias,
        }
    }

    pub fn instance(&self) -> &'a ProblemInstance {
        self.instance
    }

    pub fn penalty_weight(&self) -> f64 {
        self.penalty_weight
    }

    /// Cost plus capacity-violation penalty.
    pub fn fitness(&self, solution: &Solution) -> f64 {
        let used = solution.usage(self.instance.resources());
        let overflow = overflow_of(&used, self.instance.capacity());
        solution.total_cost(self.instance) + overflow as f64 * self.penalty_weight
    }

    /// Moves agents off over-capacity resources until every resource fits.
    ///
    /// Resources are processed in index order. While resource `j` is over
    /// capacity, a uniformly chosen agent on `j` moves to a uniformly
    /// chosen resource with spare room. Each move removes one unit of
    /// overflow, so at most `len()` moves happen.
    ///
    /// Returns the overflow left over: 0 unless no resource had spare room,
    /// which a validated instance rules out.
    pub fn repair_solution<R: Rng>(&self, solution: &mut Solution, rng: &mut R) -> usize {
        let capacity = self.instance.capacity();
        let n = capacity.len();
        let mut used = solution.usage(n);
        let mut budget = solution.len();
        let genes = solution.genes_mut();
        let mut holders = Vec::new();
        let mut spare = Vec::new();

        for j in 0..n {
            while used[j] > capacity[j] && budget > 0 {
                spare.clear();
                spare.extend((0..n).filter(|&k| used[k] < capacity[k]));
                if spare.is_empty() {
                    let left = overflow_of(&used, capacity);
                    tracing::warn!(resource = j, overflow = left, "repair found no spare capacity");
                    return left;
                }

                holders.clear();
                holders.extend(
                    genes
                        .iter()
                        .enumerate()
                        .filter(|&(_, &g)| g == j)
                        .map(|(i, _)| i),
                );
                let agent = holders[rng.random_range(0..holders.len())];
                let target = spare[rng.random_range(0..spare.len())];

                genes[agent] = target;
                used[j] -= 1;
                used[target] += 1;
                budget -= 1;
            }
        }

        overflow_of(&used, capacity)
    }
}

impl GaProblem for AssignmentProblem<'_> {
    type Individual = Chromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        let n = self.instance.resources();
        let genes = (0..self.instance.agents())
            .map(|_| rng.random_range(0..n))
            .collect();
        Chromosome {
            solution: Solution::new(genes),
            fitness: f64::worst(),
        }
    }

    fn evaluate(&self, individual: &Chromosome) -> f64 {
        self.fitness(&individual.solution)
    }

    fn crossover_into<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        child: &mut Chromosome,
        rng: &mut R,
    ) {
        uniform_crossover_into(
            parent1.solution.genes(),
            parent2.solution.genes(),
            self.crossover_bias,
            child.solution.genes_mut(),
            rng,
        );
        child.fitness = f64::worst();
    }

    fn mutate<R: Rng>(&self, individual: &mut Chromosome, rate: f64, rng: &mut R) {
        reset_mutation(
            individual.solution.genes_mut(),
            self.instance.resources(),
            rate,
            rng,
        );
    }

    fn repair<R: Rng>(&self, individual: &mut Chromosome, rng: &mut R) {
        self.repair_solution(&mut individual.solution, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        tracing::trace!(generation, best_fitness, "generation complete");
    }
}
