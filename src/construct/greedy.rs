//! Cheapest-available-resource heuristic.

use crate::error::AssignError;
use crate::problem::{AssignmentMatrix, ProblemInstance, Solution};
use tracing::instrument;

/// Result of a greedy pass.
///
/// When capacity runs out before every agent is placed, the affected rows
/// of `assignment` stay all-zero and their agents are listed in
/// `unassigned`. That is a reported outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOutcome {
    pub assignment: AssignmentMatrix,
    /// Agents left without a resource, in ascending order.
    pub unassigned: Vec<usize>,
}

impl GreedyOutcome {
    /// `true` if at least one agent could not be placed.
    pub fn is_partial(&self) -> bool {
        !self.unassigned.is_empty()
    }

    pub fn total_cost(&self, instance: &ProblemInstance) -> f64 {
        self.assignment.total_cost(instance)
    }

    /// Vector form. Fails if the outcome is partial.
    pub fn to_solution(&self) -> Result<Solution, AssignError> {
        self.assignment.to_solution()
    }
}

/// Gives each agent, in index order, its cheapest resource that still has room.
///
/// Resources are visited in ascending cost. Equal costs go to the lower
/// resource index. No randomness is involved.
///
/// # Examples
///
/// ```
/// use u_assign::construct::GreedyAssigner;
/// use u_assign::problem::ProblemInstance;
///
/// let instance = ProblemInstance::new(
///     vec![vec![5.0, 1.0], vec![2.0, 2.0], vec![9.0, 3.0]],
///     vec![1, 2],
/// )
/// .unwrap();
/// let outcome = GreedyAssigner.assign(&instance);
/// assert!(!outcome.is_partial());
/// assert_eq!(outcome.total_cost(&instance), 6.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GreedyAssigner;

impl GreedyAssigner {
    /// Runs on a private copy of the instance's capacities.
    ///
    /// A validated instance always has room for every agent, so the
    /// outcome is complete.
    #[instrument(
        level = "debug",
        skip_all,
        fields(agents = instance.agents(), resources = instance.resources())
    )]
    pub fn assign(&self, instance: &ProblemInstance) -> GreedyOutcome {
        let mut remaining = instance.capacity().to_vec();
        fill(instance, &mut remaining)
    }

    /// Runs against caller-supplied residual capacity, consumed in place.
    ///
    /// Unlike the random baseline this does not require the residual to
    /// hold every agent. Agents that find no room are reported in
    /// [`GreedyOutcome::unassigned`].
    pub fn assign_with_capacity(
        &self,
        instance: &ProblemInstance,
        remaining: &mut [usize],
    ) -> Result<GreedyOutcome, AssignError> {
        if remaining.len() != instance.resources() {
            return Err(AssignError::CapacityLength {
                expected: instance.resources(),
                actual: remaining.len(),
            });
        }
        Ok(fill(instance, remaining))
    }
}

fn fill(instance: &ProblemInstance, remaining: &mut [usize]) -> GreedyOutcome {
    let n = instance.resources();
    let mut assignment = AssignmentMatrix::zeros(instance.agents(), n);
    let mut unassigned = Vec::new();
    let mut order: Vec<usize> = Vec::with_capacity(n);

    for agent in 0..instance.agents() {
        let row = instance.cost_row(agent);
        order.clear();
        order.extend(0..n);
        // Stable: ties keep ascending index order.
        order.sort_by(|&a, &b| row[a].total_cmp(&row[b]));

        match order.iter().copied().find(|&j| remaining[j] >= 1) {
            Some(resource) => {
                assignment.assign(agent, resource);
                remaining[resource] -= 1;
            }
            None => unassigned.push(agent),
        }
    }

    if !unassigned.is_empty() {
        tracing::warn!(
            unassigned = unassigned.len(),
            "greedy assignment ran out of capacity"
        );
    }

    GreedyOutcome {
        assignment,
        unassigned,
    }
}

/// Convenience wrapper around [`GreedyAssigner::assign`].
pub fn greedy_assignment(instance: &ProblemInstance) -> GreedyOutcome {
    GreedyAssigner.assign(instance)
}
