//! Randomized baseline.

use crate::error::AssignError;
use crate::problem::{AssignmentMatrix, ProblemInstance};
use rand::Rng;
use tracing::instrument;

/// Probes allowed per agent, per resource, when no explicit limit is set.
pub const DEFAULT_PROBES_PER_RESOURCE: usize = 64;

/// Places each agent on a uniformly random resource with spare capacity.
///
/// For every agent in order, resource indices are drawn uniformly until
/// one with remaining capacity is hit. Rejection sampling like this picks
/// uniformly among the open resources, so when the probe limit runs out
/// the agent is placed on a uniform draw from the open resources
/// directly. The distribution is the same either way.
///
/// # Examples
///
/// ```
/// use u_assign::construct::RandomAssigner;
/// use u_assign::problem::ProblemInstance;
/// use u_assign::random::create_rng;
///
/// let instance = ProblemInstance::new(vec![vec![1.0, 2.0]; 3], vec![1, 2]).unwrap();
/// let matrix = RandomAssigner::new().assign(&instance, &mut create_rng(42));
/// assert!(matrix.is_feasible(&instance));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomAssigner {
    max_probes: Option<usize>,
}

impl RandomAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of blind probes per agent (at least 1).
    pub fn with_max_probes(mut self, probes: usize) -> Self {
        self.max_probes = Some(probes.max(1));
        self
    }

    fn probe_limit(&self, resources: usize) -> usize {
        self.max_probes
            .unwrap_or(DEFAULT_PROBES_PER_RESOURCE * resources)
    }

    /// Assigns every agent of a validated instance.
    ///
    /// Works on a private copy of the capacities. The result is always
    /// complete and within capacity.
    #[instrument(
        level = "debug",
        skip_all,
        fields(agents = instance.agents(), resources = instance.resources())
    )]
    pub fn assign<R: Rng>(&self, instance: &ProblemInstance, rng: &mut R) -> AssignmentMatrix {
        let mut remaining = instance.capacity().to_vec();
        self.fill(instance, &mut remaining, rng)
    }

    /// Assigns every agent against caller-supplied residual capacity.
    ///
    /// `remaining` is consumed in place. Fails before touching it when it
    /// has the wrong length or cannot hold every agent.
    pub fn assign_with_capacity<R: Rng>(
        &self,
        instance: &ProblemInstance,
        remaining: &mut [usize],
        rng: &mut R,
    ) -> Result<AssignmentMatrix, AssignError> {
        if remaining.len() != instance.resources() {
            return Err(AssignError::CapacityLength {
                expected: instance.resources(),
                actual: remaining.len(),
            });
        }
        let total: usize = remaining.iter().sum();
        if total < instance.agents() {
            return Err(AssignError::InsufficientCapacity {
                capacity: total,
                agents: instance.agents(),
            });
        }
        Ok(self.fill(instance, remaining, rng))
    }

    /// Requires `sum(remaining) >= agents`.
    fn fill<R: Rng>(
        &self,
        instance: &ProblemInstance,
        remaining: &mut [usize],
        rng: &mut R,
    ) -> AssignmentMatrix {
        let n = instance.resources();
        let limit = self.probe_limit(n);
        let mut matrix = AssignmentMatrix::zeros(instance.agents(), n);

        for agent in 0..instance.agents() {
            let Some(resource) = pick_open(remaining, limit, rng) else {
                tracing::warn!(agent, "no resource has remaining capacity");
                break;
            };
            matrix.assign(agent, resource);
            remaining[resource] -= 1;
        }

        matrix
    }
}

/// Blind probing with a bounded retry count, then a direct draw.
fn pick_open<R: Rng>(remaining: &[usize], limit: usize, rng: &mut R) -> Option<usize> {
    let n = remaining.len();
    for _ in 0..limit {
        let j = rng.random_range(0..n);
        if remaining[j] >= 1 {
            return Some(j);
        }
    }

    let open: Vec<usize> = (0..n).filter(|&j| remaining[j] >= 1).collect();
    if open.is_empty() {
        return None;
    }
    tracing::trace!(limit, open = open.len(), "probe limit reached");
    Some(open[rng.random_range(0..open.len())])
}

/// Convenience wrapper around [`RandomAssigner::assign`].
pub fn random_assignment<R: Rng>(instance: &ProblemInstance, rng: &mut R) -> AssignmentMatrix {
    RandomAssigner::new().assign(instance, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_feasible_on_tight_instance() {
        // Total capacity equals the agent count: every slot gets used.
        let inst = ProblemInstance::new(vec![vec![1.0, 1.0, 1.0]; 6], vec![1, 2, 3]).unwrap();
        let mut rng = create_rng(42);
        let m = RandomAssigner::new().assign(&inst, &mut rng);
        assert!(m.is_feasible(&inst));
        assert_eq!(m.column_sums(), vec![1, 2, 3]);
    }

    #[test]
    fn test_instance_not_mutated() {
        let inst = ProblemInstance::new(vec![vec![1.0, 1.0]; 3], vec![2, 2]).unwrap();
        let before = inst.clone();
        let mut rng = create_rng(1);
        let _ = random_assignment(&inst, &mut rng);
        let _ = random_assignment(&inst, &mut rng);
        assert_eq!(inst, before);
    }

    #[test]
    fn test_single_probe_still_completes() {
        // One probe per agent forces the fallback draw most of the time.
        let inst = ProblemInstance::new(vec![vec![1.0; 10]; 10], vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 10])
            .unwrap();
        let mut rng = create_rng(9);
        let m = RandomAssigner::new()
            .with_max_probes(1)
            .assign(&inst, &mut rng);
        assert!(m.is_feasible(&inst));
        assert_eq!(m.column_sums()[9], 10);
    }

    #[test]
    fn test_residual_capacity_consumed() {
        let inst = ProblemInstance::new(vec![vec![1.0, 1.0]; 2], vec![5, 5]).unwrap();
        let mut remaining = vec![1, 1];
        let mut rng = create_rng(3);
        let m = RandomAssigner::new()
            .assign_with_capacity(&inst, &mut remaining, &mut rng)
            .unwrap();
        assert!(m.is_complete());
        assert_eq!(remaining, vec![0, 0]);
    }

    #[test]
    fn test_residual_capacity_insufficient() {
        let inst = ProblemInstance::new(vec![vec![1.0, 1.0]; 3], vec![5, 5]).unwrap();
        let mut remaining = vec![1, 1];
        let mut rng = create_rng(3);
        let err = RandomAssigner::new()
            .assign_with_capacity(&inst, &mut remaining, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            AssignError::InsufficientCapacity {
                capacity: 2,
                agents: 3
            }
        );
        assert_eq!(remaining, vec![1, 1]);
    }

    #[test]
    fn test_residual_capacity_wrong_length() {
        let inst = ProblemInstance::new(vec![vec![1.0, 1.0]], vec![1, 1]).unwrap();
        let mut remaining = vec![1];
        let err = RandomAssigner::new()
            .assign_with_capacity(&inst, &mut remaining, &mut create_rng(0))
            .unwrap_err();
        assert!(matches!(err, AssignError::CapacityLength { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let mut rng = create_rng(11);
        let inst = ProblemInstance::random(200, 8, &mut rng).unwrap();
        let a = random_assignment(&inst, &mut create_rng(5));
        let b = random_assignment(&inst, &mut create_rng(5));
        assert_eq!(a, b);
    }
}
