//! Capacity-constrained assignment of agents to resources.
//!
//! Places M agents (e.g. vehicles) on N resources (e.g. stations), each
//! with a fixed number of slots, while keeping total assignment cost low.
//! Three strategies are provided:
//!
//! - **Random baseline** ([`construct::RandomAssigner`]): every agent on a
//!   uniformly random resource with room left.
//! - **Greedy** ([`construct::GreedyAssigner`]): every agent on its
//!   cheapest resource with room left.
//! - **Genetic algorithm** ([`ga`]): evolves vector-encoded solutions with
//!   uniform crossover, reset mutation, a capacity repair step and a
//!   penalty on remaining violations.
//!
//! # Usage
//!
//! ```
//! use u_assign::construct::{greedy_assignment, random_assignment};
//! use u_assign::ga::genetic_algorithm;
//! use u_assign::problem::ProblemInstance;
//! use u_assign::random::create_rng;
//!
//! let instance = ProblemInstance::new(
//!     vec![vec![5.0, 1.0], vec![2.0, 2.0], vec![9.0, 3.0]],
//!     vec![1, 2],
//! )?;
//! let mut rng = create_rng(42);
//!
//! let random = random_assignment(&instance, &mut rng);
//! let greedy = greedy_assignment(&instance);
//! let (solution, cost) = genetic_algorithm(&instance, 50, 100, 0.01, &mut rng)?;
//!
//! assert!(random.is_feasible(&instance));
//! assert_eq!(greedy.total_cost(&instance), 6.0);
//! assert!(solution.is_feasible(&instance));
//! assert_eq!(cost, 6.0);
//! # Ok::<(), u_assign::AssignError>(())
//! ```
//!
//! # Architecture
//!
//! Instances are validated once, at construction; solvers never see an
//! instance whose capacity cannot hold every agent. All randomness flows
//! through an explicit `&mut impl Rng`, so seeded runs are reproducible.

pub mod construct;
pub mod error;
pub mod ga;
pub mod problem;
pub mod random;

pub use error::AssignError;
