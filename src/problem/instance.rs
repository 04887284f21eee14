//! Validated problem instance.

use crate::error::AssignError;
use rand::Rng;

/// Cost matrix plus per-resource capacities, validated at construction.
///
/// A `ProblemInstance` always satisfies:
///
/// - at least one agent and one resource,
/// - every cost row has exactly `resources()` entries,
/// - every cost is finite and non-negative,
/// - `total_capacity() >= agents()`.
///
/// Strategies only ever borrow the instance. Capacity they consume is
/// taken from a private copy, so one instance can be handed to any number
/// of independent runs.
///
/// # Examples
///
/// ```
/// use u_assign::problem::ProblemInstance;
///
/// let instance = ProblemInstance::new(
///     vec![vec![5.0, 1.0], vec![2.0, 2.0], vec![9.0, 3.0]],
///     vec![1, 2],
/// )
/// .unwrap();
/// assert_eq!(instance.agents(), 3);
/// assert_eq!(instance.resources(), 2);
///
/// // Five agents cannot fit into two single-slot resources.
/// let err = ProblemInstance::new(vec![vec![1.0, 1.0]; 5], vec![1, 1]).unwrap_err();
/// assert!(err.is_invalid_instance());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "InstanceData", into = "InstanceData")
)]
pub struct ProblemInstance {
    agents: usize,
    resources: usize,
    /// Row-major `agents x resources`.
    costs: Vec<f64>,
    capacity: Vec<usize>,
}

impl ProblemInstance {
    /// Builds an instance, inferring `M` from the row count and `N` from
    /// the capacity length.
    pub fn new(cost: Vec<Vec<f64>>, capacity: Vec<i64>) -> Result<Self, AssignError> {
        let agents = cost.len();
        let resources = capacity.len();
        Self::with_dimensions(agents, resources, cost, capacity)
    }

    /// Builds an instance and checks it against declared dimensions.
    pub fn with_dimensions(
        agents: usize,
        resources: usize,
        cost: Vec<Vec<f64>>,
        capacity: Vec<i64>,
    ) -> Result<Self, AssignError> {
        if agents == 0 || resources == 0 {
            return Err(AssignError::EmptyInstance { agents, resources });
        }
        if capacity.len() != resources {
            return Err(AssignError::CapacityLength {
                expected: resources,
                actual: capacity.len(),
            });
        }
        if cost.len() != agents {
            return Err(AssignError::DimensionMismatch {
                expected_agents: agents,
                expected_resources: resources,
                agents: cost.len(),
                resources,
            });
        }
        if let Some(row) = cost.iter().find(|row| row.len() != resources) {
            return Err(AssignError::DimensionMismatch {
                expected_agents: agents,
                expected_resources: resources,
                agents,
                resources: row.len(),
            });
        }

        let mut slots = Vec::with_capacity(resources);
        for (resource, &c) in capacity.iter().enumerate() {
            if c < 0 {
                return Err(AssignError::NegativeCapacity {
                    resource,
                    capacity: c,
                });
            }
            slots.push(c as usize);
        }

        let mut costs = Vec::with_capacity(agents * resources);
        for (agent, row) in cost.into_iter().enumerate() {
            for (resource, &c) in row.iter().enumerate() {
                if !c.is_finite() || c < 0.0 {
                    return Err(AssignError::InvalidCost {
                        agent,
                        resource,
                        cost: c,
                    });
                }
            }
            costs.extend(row);
        }

        let total: usize = slots.iter().sum();
        if total < agents {
            return Err(AssignError::InsufficientCapacity {
                capacity: total,
                agents,
            });
        }

        Ok(Self {
            agents,
            resources,
            costs,
            capacity: slots,
        })
    }

    /// Generates a synthetic instance for tests and benchmarks.
    ///
    /// Capacities are drawn from `[10, 50)` and integer costs from
    /// `[1, 100)`. If the drawn capacities cannot hold `agents`, the
    /// deficit is spread round-robin over the resources so the result is
    /// always feasible.
    pub fn random<R: Rng>(agents: usize, resources: usize, rng: &mut R) -> Result<Self, AssignError> {
        if agents == 0 || resources == 0 {
            return Err(AssignError::EmptyInstance { agents, resources });
        }
        let mut capacity: Vec<i64> = (0..resources).map(|_| rng.random_range(10..50)).collect();
        let total: i64 = capacity.iter().sum();
        let mut deficit = (agents as i64 - total).max(0);
        let mut j = 0;
        while deficit > 0 {
            capacity[j % resources] += 1;
            deficit -= 1;
            j += 1;
        }
        let cost = (0..agents)
            .map(|_| {
                (0..resources)
                    .map(|_| rng.random_range(1..100) as f64)
                    .collect()
            })
            .collect();
        Self::with_dimensions(agents, resources, cost, capacity)
    }

    /// Number of agents (`M`).
    pub fn agents(&self) -> usize {
        self.agents
    }

    /// Number of resources (`N`).
    pub fn resources(&self) -> usize {
        self.resources
    }

    /// Cost of assigning `agent` to `resource`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn cost(&self, agent: usize, resource: usize) -> f64 {
        assert!(resource < self.resources, "resource index out of range");
        self.costs[agent * self.resources + resource]
    }

    /// All costs for one agent, indexed by resource.
    #[inline]
    pub fn cost_row(&self, agent: usize) -> &[f64] {
        let start = agent * self.resources;
        &self.costs[start..start + self.resources]
    }

    /// Original capacity of every resource.
    pub fn capacity(&self) -> &[usize] {
        &self.capacity
    }

    /// Sum of all capacities. Never less than [`agents`](Self::agents).
    pub fn total_capacity(&self) -> usize {
        self.capacity.iter().sum()
    }
}

/// Plain serialized shape; deserialization goes through validation.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct InstanceData {
    cost: Vec<Vec<f64>>,
    capacity: Vec<i64>,
}

#[cfg(feature = "serde")]
impl TryFrom<InstanceData> for ProblemInstance {
    type Error = AssignError;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        ProblemInstance::new(data.cost, data.capacity)
    }
}

#[cfg(feature = "serde")]
impl From<ProblemInstance> for InstanceData {
    fn from(instance: ProblemInstance) -> Self {
        InstanceData {
            cost: (0..instance.agents)
                .map(|i| instance.cost_row(i).to_vec())
                .collect(),
            capacity: instance.capacity.iter().map(|&c| c as i64).collect(),
        }
    }
}
