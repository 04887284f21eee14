//! GA generation loop.
//!
//! [`GaRunner`] drives the search:
//! initialize → evaluate → repeat { elite → reproduce → mutate → repair →
//! evaluate }.
//!
//! The population lives in two fixed-size buffers. Each generation writes
//! the next population into the spare buffer, slot by slot, and then the
//! buffers swap. After the first generation no individual is allocated or
//! dropped.

use super::assignment::{AssignmentProblem, Chromosome};
use super::config::GaConfig;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::AssignError;
use crate::problem::{ProblemInstance, Solution};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Generations actually executed.
    pub generations: usize,

    /// Stopped because `stagnation_limit` generations passed without improvement.
    pub stagnated: bool,

    /// Stopped because `time_limit_ms` elapsed.
    pub timed_out: bool,

    /// Stopped because the cancellation flag was raised.
    pub cancelled: bool,

    /// Running best fitness: the initial population first, then one entry
    /// per executed generation. Never increases.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA generation loop.
///
/// ```
/// use u_assign::ga::{AssignmentProblem, GaConfig, GaRunner};
/// use u_assign::problem::ProblemInstance;
/// use u_assign::random::create_rng;
///
/// let instance = ProblemInstance::new(
///     vec![vec![5.0, 1.0], vec![2.0, 2.0], vec![9.0, 3.0]],
///     vec![1, 2],
/// )
/// .unwrap();
/// let problem = AssignmentProblem::new(&instance);
/// let config = GaConfig::default().with_population_size(10).with_max_generations(20);
/// let result = GaRunner::run(&problem, &config, &mut create_rng(42)).unwrap();
/// assert!(result.best.solution.is_feasible(&instance));
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    ///
    /// Fails only if `config` does not validate.
    pub fn run<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual>, AssignError> {
        Self::run_with_cancel(problem, config, rng, None)
    }

    /// Runs the GA with an optional cancellation flag.
    ///
    /// The flag is checked at the start of each generation. When it is
    /// set, the run stops and returns the best individual so far.
    pub fn run_with_cancel<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>, AssignError> {
        config.validate().map_err(AssignError::InvalidConfig)?;

        let pop_size = config.population_size;
        let deadline = config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        // 1. Initialize and evaluate
        let mut current: Vec<P::Individual> = (0..pop_size)
            .map(|_| problem.create_individual(rng))
            .collect();
        evaluate_population(problem, &mut current, config.parallel);

        let mut best = current[best_index(&current)].clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness().to_f64());

        // Second buffer; its contents are overwritten before being read.
        let mut next = current.clone();

        let mut generations = 0usize;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut timed_out = false;
        let mut cancelled = false;

        // 2. Generation loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                timed_out = true;
                break;
            }

            // Elitism: the running best survives unchanged in slot 0
            next[0].clone_from(&best);

            for child in next[1..].iter_mut() {
                let (p1, p2) = config.selection.select_pair(&current, rng);
                problem.crossover_into(&current[p1], &current[p2], child, rng);
                problem.mutate(child, config.mutation_rate, rng);
                problem.repair(child, rng);
            }

            evaluate_population(problem, &mut next[1..], config.parallel);
            std::mem::swap(&mut current, &mut next);
            generations = gen + 1;

            let gen_best = &current[best_index(&current)];
            if gen_best.fitness() < best.fitness() {
                tracing::debug!(
                    generation = generations,
                    from = best.fitness().to_f64(),
                    to = gen_best.fitness().to_f64(),
                    "new best"
                );
                best.clone_from(gen_best);
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            fitness_history.push(best.fitness().to_f64());
            problem.on_generation(generations, best.fitness());

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        tracing::info!(
            generations,
            best_fitness = best.fitness().to_f64(),
            stagnated,
            timed_out,
            cancelled,
            "genetic search finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            stagnated,
            timed_out,
            cancelled,
            fitness_history,
        })
    }
}

/// Evaluates every individual in the slice.
fn evaluate_population<P: GaProblem>(problem: &P, population: &mut [P::Individual], parallel: bool) {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            population.par_iter_mut().for_each(|ind| {
                let f = problem.evaluate(ind);
                ind.set_fitness(f);
            });
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Index of the lowest fitness. Ties go to the lowest index.
fn best_index<I: Individual>(population: &[I]) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness() < population[best].fitness() {
            best = i;
        }
    }
    best
}

/// Runs the GA on an assignment instance.
///
/// Holds a [`GaConfig`] and wires it to an [`AssignmentProblem`].
#[derive(Debug, Clone, Default)]
pub struct GeneticSolver {
    config: GaConfig,
}

impl GeneticSolver {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(
            agents = instance.agents(),
            resources = instance.resources(),
            pop_size = self.config.population_size,
            generations = self.config.max_generations
        )
    )]
    pub fn solve<R: Rng>(
        &self,
        instance: &ProblemInstance,
        rng: &mut R,
    ) -> Result<GaResult<Chromosome>, AssignError> {
        let problem = AssignmentProblem::from_config(instance, &self.config);
        GaRunner::run(&problem, &self.config, rng)
    }
}

/// Best solution and its fitness for the given GA parameters.
///
/// For a feasible result the fitness is the plain total cost.
pub fn genetic_algorithm<R: Rng>(
    instance: &ProblemInstance,
    pop_size: usize,
    generations: usize,
    mutation_rate: f64,
    rng: &mut R,
) -> Result<(Solution, f64), AssignError> {
    let config = GaConfig {
        population_size: pop_size,
        max_generations: generations,
        mutation_rate,
        ..GaConfig::default()
    };
    let result = GeneticSolver::new(config).solve(instance, rng)?;
    Ok((result.best.solution, result.best_fitness))
}

// ============================================================================
// Tests
// ============================================================================
