//! Error type shared by every strategy in the crate.

/// Errors raised while building an instance or running a strategy.
///
/// The instance-shape variants are all checked once, up front, by
/// [`ProblemInstance`](crate::problem::ProblemInstance) construction. A
/// value that passed construction never produces them later.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssignError {
    #[error("instance must have at least one agent and one resource, got {agents}x{resources}")]
    EmptyInstance { agents: usize, resources: usize },

    #[error(
        "cost matrix is {agents}x{resources}, expected {expected_agents}x{expected_resources}"
    )]
    DimensionMismatch {
        expected_agents: usize,
        expected_resources: usize,
        agents: usize,
        resources: usize,
    },

    #[error("capacity vector has {actual} entries, expected {expected}")]
    CapacityLength { expected: usize, actual: usize },

    #[error("capacity of resource {resource} is negative: {capacity}")]
    NegativeCapacity { resource: usize, capacity: i64 },

    #[error("cost[{agent}][{resource}] must be finite and non-negative, got {cost}")]
    InvalidCost {
        agent: usize,
        resource: usize,
        cost: f64,
    },

    #[error("total capacity {capacity} cannot hold {agents} agents")]
    InsufficientCapacity { capacity: usize, agents: usize },

    #[error("invalid GA configuration: {0}")]
    InvalidConfig(String),

    #[error("agent {agent} has no assigned resource")]
    UnassignedAgent { agent: usize },
}

impl AssignError {
    /// Returns `true` for the errors that mean "this instance cannot be solved".
    pub fn is_invalid_instance(&self) -> bool {
        matches!(
            self,
            AssignError::EmptyInstance { .. }
                | AssignError::DimensionMismatch { .. }
                | AssignError::CapacityLength { .. }
                | AssignError::NegativeCapacity { .. }
                | AssignError::InvalidCost { .. }
                | AssignError::InsufficientCapacity { .. }
        )
    }
}
