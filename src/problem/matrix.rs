//! Matrix-form assignment.

use super::instance::ProblemInstance;
use super::solution::Solution;
use crate::error::AssignError;

/// Binary `agents x resources` assignment matrix.
///
/// `get(i, j) == 1` means agent `i` is placed on resource `j`. A
/// complete, feasible assignment has exactly one `1` per row and no
/// column summing past the resource's original capacity. Rows may be
/// all-zero when a constructive heuristic runs out of capacity; see
/// [`unassigned_agents`](Self::unassigned_agents).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentMatrix {
    agents: usize,
    resources: usize,
    /// Row-major, each cell 0 or 1.
    cells: Vec<u8>,
}

impl AssignmentMatrix {
    /// All-zero matrix: nobody assigned yet.
    pub fn zeros(agents: usize, resources: usize) -> Self {
        Self {
            agents,
            resources,
            cells: vec![0; agents * resources],
        }
    }

    /// One-hot expansion of a vector-form solution.
    ///
    /// # Panics
    /// Panics if a gene is not below `resources`.
    pub fn from_solution(solution: &Solution, resources: usize) -> Self {
        let mut matrix = Self::zeros(solution.len(), resources);
        for (agent, &resource) in solution.genes().iter().enumerate() {
            matrix.assign(agent, resource);
        }
        matrix
    }

    pub fn agents(&self) -> usize {
        self.agents
    }

    pub fn resources(&self) -> usize {
        self.resources
    }

    #[inline]
    pub fn get(&self, agent: usize, resource: usize) -> u8 {
        assert!(resource < self.resources, "resource index out of range");
        self.cells[agent * self.resources + resource]
    }

    /// Sets cell `(agent, resource)` to 1.
    ///
    /// Does not clear other cells in the row.
    #[inline]
    pub fn assign(&mut self, agent: usize, resource: usize) {
        assert!(resource < self.resources, "resource index out of range");
        self.cells[agent * self.resources + resource] = 1;
    }

    pub fn row(&self, agent: usize) -> &[u8] {
        let start = agent * self.resources;
        &self.cells[start..start + self.resources]
    }

    pub fn row_sum(&self, agent: usize) -> usize {
        self.row(agent).iter().map(|&c| c as usize).sum()
    }

    /// Number of agents on each resource.
    pub fn column_sums(&self) -> Vec<usize> {
        let mut sums = vec![0usize; self.resources];
        for row in self.cells.chunks_exact(self.resources.max(1)) {
            for (s, &c) in sums.iter_mut().zip(row) {
                *s += c as usize;
            }
        }
        sums
    }

    /// Argmax reduction of one row. `None` for an all-zero row.
    pub fn assigned_resource(&self, agent: usize) -> Option<usize> {
        self.row(agent).iter().position(|&c| c == 1)
    }

    /// Agents whose row is all zero.
    pub fn unassigned_agents(&self) -> Vec<usize> {
        (0..self.agents)
            .filter(|&i| self.row_sum(i) == 0)
            .collect()
    }

    /// Every row sums to exactly 1.
    pub fn is_complete(&self) -> bool {
        (0..self.agents).all(|i| self.row_sum(i) == 1)
    }

    /// No column exceeds the instance's original capacity.
    pub fn respects_capacity(&self, instance: &ProblemInstance) -> bool {
        self.column_sums()
            .iter()
            .zip(instance.capacity())
            .all(|(&used, &cap)| used <= cap)
    }

    /// Complete and within capacity.
    pub fn is_feasible(&self, instance: &ProblemInstance) -> bool {
        self.is_complete() && self.respects_capacity(instance)
    }

    /// `Σ_ij A[i][j] * cost[i][j]`. Unassigned rows contribute nothing.
    pub fn total_cost(&self, instance: &ProblemInstance) -> f64 {
        let mut total = 0.0;
        for agent in 0..self.agents {
            for (resource, &c) in self.row(agent).iter().enumerate() {
                if c == 1 {
                    total += instance.cost(agent, resource);
                }
            }
        }
        total
    }

    /// Reduces to vector form.
    ///
    /// Fails with [`AssignError::UnassignedAgent`] on the first all-zero row.
    pub fn to_solution(&self) -> Result<Solution, AssignError> {
        let mut genes = Vec::with_capacity(self.agents);
        for agent in 0..self.agents {
            let resource = self
                .assigned_resource(agent)
                .ok_or(AssignError::UnassignedAgent { agent })?;
            genes.push(resource);
        }
        Ok(Solution::new(genes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> ProblemInstance {
        ProblemInstance::new(
            vec![vec![5.0, 1.0], vec![2.0, 2.0], vec![9.0, 3.0]],
            vec![1, 2],
        )
        .unwrap()
    }

    #[test]
    fn test_one_hot_and_back() {
        let sol = Solution::new(vec![1, 0, 1]);
        let m = sol.to_matrix(2);
        assert_eq!(m.row(0), &[0, 1]);
        assert_eq!(m.row(1), &[1, 0]);
        assert_eq!(m.row(2), &[0, 1]);
        assert_eq!(m.column_sums(), vec![1, 2]);
        assert_eq!(m.to_solution().unwrap(), sol);
    }

    #[test]
    fn test_cost_and_feasibility() {
        let inst = instance();
        let m = Solution::new(vec![1, 0, 1]).to_matrix(2);
        assert_eq!(m.total_cost(&inst), 6.0);
        assert!(m.is_feasible(&inst));

        let over = Solution::new(vec![0, 0, 1]).to_matrix(2);
        assert!(over.is_complete());
        assert!(!over.respects_capacity(&inst));
    }

    #[test]
    fn test_partial_rows() {
        let mut m = AssignmentMatrix::zeros(3, 2);
        m.assign(0, 1);
        m.assign(2, 0);
        assert!(!m.is_complete());
        assert_eq!(m.unassigned_agents(), vec![1]);
        assert_eq!(m.assigned_resource(1), None);
        assert_eq!(
            m.to_solution().unwrap_err(),
            AssignError::UnassignedAgent { agent: 1 }
        );
    }
}
