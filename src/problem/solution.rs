//! Vector-form assignment.

use super::instance::ProblemInstance;
use super::matrix::AssignmentMatrix;

/// One resource index per agent: `genes[i]` is the resource of agent `i`.
///
/// This is the encoding the genetic algorithm evolves. Unlike
/// [`AssignmentMatrix`] it cannot express an unassigned agent, but it can
/// express capacity violations, which is why [`overflow`](Self::overflow)
/// exists.
#[derive(Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    genes: Vec<usize>,
}

// Manual impl so `clone_from` reuses the gene buffer.
impl Clone for Solution {
    fn clone(&self) -> Self {
        Self {
            genes: self.genes.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.genes.clone_from(&source.genes);
    }
}

impl Solution {
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut Vec<usize> {
        &mut self.genes
    }

    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of agents on each of the `resources` resources.
    pub fn usage(&self, resources: usize) -> Vec<usize> {
        let mut used = vec![0usize; resources];
        for &g in &self.genes {
            used[g] += 1;
        }
        used
    }

    /// `Σ_i cost[i][genes[i]]`, ignoring capacity.
    pub fn total_cost(&self, instance: &ProblemInstance) -> f64 {
        self.genes
            .iter()
            .enumerate()
            .map(|(agent, &resource)| instance.cost(agent, resource))
            .sum()
    }

    /// Agents placed beyond capacity, summed over resources.
    pub fn overflow(&self, instance: &ProblemInstance) -> usize {
        overflow_of(&self.usage(instance.resources()), instance.capacity())
    }

    /// `true` when no resource holds more agents than its capacity.
    pub fn is_feasible(&self, instance: &ProblemInstance) -> bool {
        self.overflow(instance) == 0
    }

    /// One-hot expansion into an `len() x resources` matrix.
    pub fn to_matrix(&self, resources: usize) -> AssignmentMatrix {
        AssignmentMatrix::from_solution(self, resources)
    }
}

impl From<Vec<usize>> for Solution {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}

/// `Σ_j max(0, used[j] − capacity[j])`.
pub(crate) fn overflow_of(used: &[usize], capacity: &[usize]) -> usize {
    used.iter()
        .zip(capacity)
        .map(|(&u, &c)| u.saturating_sub(c))
        .sum()
}
