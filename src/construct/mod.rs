//! Constructive assignment heuristics.
//!
//! Both heuristics walk the agents in index order and decrement a private
//! copy of the capacity vector as they go. Neither revisits a decision.
//!
//! - [`RandomAssigner`]: uniform random resource among those with room.
//!   Used as a quality baseline.
//! - [`GreedyAssigner`]: cheapest resource with room, ties broken by
//!   lower index.

mod greedy;
mod random;

pub use greedy::{greedy_assignment, GreedyAssigner, GreedyOutcome};
pub use random::{random_assignment, RandomAssigner, DEFAULT_PROBES_PER_RESOURCE};
