//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generation loop.

use super::selection::Selection;

/// Surcharge per agent placed beyond a resource's capacity.
pub const DEFAULT_PENALTY_WEIGHT: f64 = 1e5;

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_assign::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// assert!((config.mutation_rate - 0.01).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_assign::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_max_generations(50)
///     .with_selection(Selection::Tournament(3))
///     .with_mutation_rate(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals per generation. At least 2.
    pub population_size: usize,

    /// Generations to run. 0 returns the best of the initial population.
    pub max_generations: usize,

    /// How the two parents of each child are picked.
    pub selection: Selection,

    /// Per-gene probability of resetting to a random resource (0.0–1.0).
    pub mutation_rate: f64,

    /// Per-gene probability of inheriting from the first parent in
    /// uniform crossover (0.0–1.0). 0.5 is unbiased.
    pub crossover_bias: f64,

    /// Fitness surcharge per unit of capacity overflow.
    pub penalty_weight: f64,

    /// Generations without improvement before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination (the default).
    pub stagnation_limit: usize,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked at the start of each generation, so a run may overshoot by
    /// up to one generation.
    pub time_limit_ms: Option<u64>,

    /// Evaluate fitness on rayon. Has no effect without the `parallel`
    /// feature. Results are identical either way.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            selection: Selection::default(),
            mutation_rate: 0.01,
            crossover_bias: 0.5,
            penalty_weight: DEFAULT_PENALTY_WEIGHT,
            stagnation_limit: 0,
            time_limit_ms: None,
            parallel: false,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover bias, clamped to `[0, 1]`.
    pub fn with_crossover_bias(mut self, bias: f64) -> Self {
        self.crossover_bias = bias.clamp(0.0, 1.0);
        self
    }

    /// Sets the penalty weight. Negative values become 0.
    pub fn with_penalty_weight(mut self, weight: f64) -> Self {
        self.penalty_weight = weight.max(0.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Small and quick: population 30, 50 generations.
    pub fn fast() -> Self {
        Self {
            population_size: 30,
            max_generations: 50,
            ..Self::default()
        }
    }

    /// Larger search with an early exit once progress stalls.
    ///
    /// - Population: 100, Generations: 500
    /// - Tournament(3) selection, mutation rate 0.02
    /// - Stagnation limit: 100
    pub fn thorough() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            selection: Selection::Tournament(3),
            mutation_rate: 0.02,
            stagnation_limit: 100,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_bias) {
            return Err("crossover_bias must be within [0, 1]".into());
        }
        if !self.penalty_weight.is_finite() || self.penalty_weight < 0.0 {
            return Err("penalty_weight must be finite and non-negative".into());
        }
        if self.selection == Selection::Tournament(0) {
            return Err("tournament size must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}
