//! Problem and solution data model.
//!
//! - [`ProblemInstance`]: validated cost matrix and capacity vector
//! - [`AssignmentMatrix`]: binary matrix form, used by the constructive
//!   heuristics
//! - [`Solution`]: one resource index per agent, used by the GA
//!
//! The two solution forms convert into each other by one-hot expansion
//! ([`Solution::to_matrix`]) and argmax reduction
//! ([`AssignmentMatrix::to_solution`]).

mod instance;
mod matrix;
mod solution;

pub use instance::ProblemInstance;
pub use matrix::AssignmentMatrix;
pub use solution::Solution;

pub(crate) use solution::overflow_of;
