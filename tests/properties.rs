//! Property tests over randomly generated feasible instances.

use proptest::prelude::*;
use u_assign::construct::{greedy_assignment, random_assignment};
use u_assign::ga::{genetic_algorithm, AssignmentProblem};
use u_assign::problem::{ProblemInstance, Solution};
use u_assign::random::create_rng;

/// `(cost rows, capacity)` with `sum(capacity) >= agents`.
fn feasible_instance() -> impl Strategy<Value = ProblemInstance> {
    (1usize..25, 1usize..6).prop_flat_map(|(agents, resources)| {
        let costs = prop::collection::vec(
            prop::collection::vec(0.0f64..100.0, resources),
            agents,
        );
        let capacity = prop::collection::vec(0i64..8, resources);
        (costs, capacity).prop_map(move |(costs, mut capacity)| {
            // Top up the last resource until every agent fits.
            let total: i64 = capacity.iter().sum();
            if total < agents as i64 {
                capacity[resources - 1] += agents as i64 - total;
            }
            ProblemInstance::new(costs, capacity).expect("generator builds feasible instances")
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_assignment_is_feasible(inst in feasible_instance(), seed in any::<u64>()) {
        let m = random_assignment(&inst, &mut create_rng(seed));
        prop_assert!(m.is_complete());
        prop_assert!(m.respects_capacity(&inst));
        prop_assert_eq!(m.column_sums().iter().sum::<usize>(), inst.agents());
    }

    #[test]
    fn greedy_assignment_is_complete_and_feasible(inst in feasible_instance()) {
        let out = greedy_assignment(&inst);
        prop_assert!(!out.is_partial());
        prop_assert!(out.assignment.is_feasible(&inst));
        prop_assert_eq!(out.assignment.column_sums().iter().sum::<usize>(), inst.agents());
    }

    #[test]
    fn greedy_agent_gets_cheapest_open_resource(inst in feasible_instance()) {
        // Replaying the picks against a capacity ledger: no open resource
        // was strictly cheaper, or equally cheap with a lower index.
        let out = greedy_assignment(&inst);
        let mut remaining = inst.capacity().to_vec();
        for agent in 0..inst.agents() {
            let chosen = out.assignment.assigned_resource(agent).unwrap();
            let row = inst.cost_row(agent);
            for j in 0..inst.resources() {
                if remaining[j] > 0 {
                    prop_assert!(
                        row[j] > row[chosen] || (row[j] == row[chosen] && j >= chosen),
                        "agent {} took {} but {} was open and no worse", agent, chosen, j
                    );
                }
            }
            remaining[chosen] -= 1;
        }
    }

    #[test]
    fn ga_returns_feasible_solution(inst in feasible_instance(), seed in any::<u64>()) {
        let (sol, cost) = genetic_algorithm(&inst, 8, 5, 0.05, &mut create_rng(seed)).unwrap();
        prop_assert_eq!(sol.len(), inst.agents());
        prop_assert!(sol.is_feasible(&inst));
        prop_assert!((cost - sol.total_cost(&inst)).abs() < 1e-9);
    }

    #[test]
    fn repair_always_succeeds_on_feasible_instance(
        inst in feasible_instance(),
        seed in any::<u64>(),
    ) {
        let mut rng = create_rng(seed);
        let problem = AssignmentProblem::new(&inst);
        let genes = (0..inst.agents()).map(|i| i % inst.resources()).rev().collect();
        let mut sol = Solution::new(genes);
        prop_assert_eq!(problem.repair_solution(&mut sol, &mut rng), 0);
        prop_assert!(sol.is_feasible(&inst));
    }

    #[test]
    fn vector_and_matrix_forms_round_trip(inst in feasible_instance(), seed in any::<u64>()) {
        let m = random_assignment(&inst, &mut create_rng(seed));
        let sol = m.to_solution().unwrap();
        prop_assert_eq!(sol.to_matrix(inst.resources()), m.clone());
        prop_assert_eq!(sol.total_cost(&inst), m.total_cost(&inst));
    }
}
