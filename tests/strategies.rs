//! End-to-end behavior of the three strategies on shared instances.

use u_assign::construct::{greedy_assignment, random_assignment, GreedyAssigner, RandomAssigner};
use u_assign::ga::{genetic_algorithm, AssignmentProblem, GaConfig, GaRunner, GeneticSolver};
use u_assign::problem::ProblemInstance;
use u_assign::random::create_rng;
use u_assign::AssignError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn worked_example() -> ProblemInstance {
    ProblemInstance::with_dimensions(
        3,
        2,
        vec![vec![5.0, 1.0], vec![2.0, 2.0], vec![9.0, 3.0]],
        vec![1, 2],
    )
    .unwrap()
}

#[test]
fn greedy_reproduces_worked_example() {
    init_tracing();
    let inst = worked_example();
    let out = greedy_assignment(&inst);

    assert!(!out.is_partial());
    let a = &out.assignment;
    assert_eq!(a.row(0), &[0, 1]);
    assert_eq!(a.row(1), &[1, 0]);
    assert_eq!(a.row(2), &[0, 1]);
    assert_eq!(out.total_cost(&inst), 6.0);
}

#[test]
fn infeasible_instance_rejected_before_solving() {
    let err = ProblemInstance::new(vec![vec![1.0, 2.0]; 5], vec![1, 1]).unwrap_err();
    assert_eq!(
        err,
        AssignError::InsufficientCapacity {
            capacity: 2,
            agents: 5
        }
    );
    assert!(err.is_invalid_instance());
}

#[test]
fn all_strategies_feasible_on_driver_sized_instance() {
    init_tracing();
    let mut rng = create_rng(2025);
    let inst = ProblemInstance::random(1000, 10, &mut rng).unwrap();

    let random = random_assignment(&inst, &mut rng);
    assert!(random.is_feasible(&inst));
    assert_eq!(random.column_sums().iter().sum::<usize>(), 1000);

    let greedy = greedy_assignment(&inst);
    assert!(!greedy.is_partial());
    assert!(greedy.assignment.is_feasible(&inst));
    assert_eq!(greedy.assignment.column_sums().iter().sum::<usize>(), 1000);

    let (solution, cost) = genetic_algorithm(&inst, 30, 50, 0.01, &mut rng).unwrap();
    assert!(solution.is_feasible(&inst));
    assert_eq!(solution.usage(10).iter().sum::<usize>(), 1000);
    assert!((cost - solution.total_cost(&inst)).abs() < 1e-9);
}

#[test]
fn reported_cost_matches_assignment() {
    let mut rng = create_rng(8);
    let inst = ProblemInstance::random(120, 6, &mut rng).unwrap();

    for matrix in [
        random_assignment(&inst, &mut rng),
        greedy_assignment(&inst).assignment,
    ] {
        let solution = matrix.to_solution().unwrap();
        let by_hand: f64 = solution
            .genes()
            .iter()
            .enumerate()
            .map(|(i, &j)| inst.cost(i, j))
            .sum();
        assert_eq!(matrix.total_cost(&inst), by_hand);
        assert_eq!(solution.total_cost(&inst), by_hand);
    }
}

#[test]
fn greedy_never_worse_than_per_agent_lower_bound() {
    let mut rng = create_rng(31);
    let inst = ProblemInstance::random(200, 8, &mut rng).unwrap();
    let bound: f64 = (0..inst.agents())
        .map(|i| inst.cost_row(i).iter().cloned().fold(f64::INFINITY, f64::min))
        .sum();
    let out = greedy_assignment(&inst);
    assert!(out.total_cost(&inst) >= bound);
}

#[test]
fn strategies_are_deterministic_for_a_seed() {
    let inst = ProblemInstance::random(150, 7, &mut create_rng(99)).unwrap();

    assert_eq!(
        RandomAssigner::new().assign(&inst, &mut create_rng(1)),
        RandomAssigner::new().assign(&inst, &mut create_rng(1))
    );
    assert_eq!(GreedyAssigner.assign(&inst), GreedyAssigner.assign(&inst));

    let solver = GeneticSolver::new(GaConfig::fast());
    let a = solver.solve(&inst, &mut create_rng(1)).unwrap();
    let b = solver.solve(&inst, &mut create_rng(1)).unwrap();
    assert_eq!(a.best.solution, b.best.solution);
    assert_eq!(a.fitness_history, b.fitness_history);
}

#[test]
fn instance_is_unchanged_across_strategy_calls() {
    let inst = ProblemInstance::random(80, 4, &mut create_rng(4)).unwrap();
    let snapshot = inst.clone();
    let mut rng = create_rng(5);

    let _ = random_assignment(&inst, &mut rng);
    let _ = greedy_assignment(&inst);
    let _ = genetic_algorithm(&inst, 10, 5, 0.01, &mut rng).unwrap();
    // A second run sees the full capacities again.
    assert!(random_assignment(&inst, &mut rng).is_feasible(&inst));

    assert_eq!(inst, snapshot);
}

#[test]
fn ga_best_fitness_is_non_increasing() {
    let inst = ProblemInstance::random(300, 10, &mut create_rng(12)).unwrap();
    let problem = AssignmentProblem::new(&inst);
    let config = GaConfig::default().with_max_generations(40);
    let result = GaRunner::run(&problem, &config, &mut create_rng(12)).unwrap();

    assert_eq!(result.generations, 40);
    for window in result.fitness_history.windows(2) {
        assert!(window[1] <= window[0]);
    }
}

#[test]
fn ga_improves_on_random_baseline() {
    let mut rng = create_rng(64);
    let inst = ProblemInstance::random(100, 5, &mut rng).unwrap();
    let baseline = random_assignment(&inst, &mut rng).total_cost(&inst);
    let (_, cost) = genetic_algorithm(&inst, 50, 200, 0.01, &mut rng).unwrap();
    assert!(
        cost < baseline,
        "GA cost {cost} should beat random baseline {baseline}"
    );
}

#[test]
fn greedy_partial_on_residual_capacity() {
    let inst = worked_example();
    let mut remaining = vec![1, 0];
    let out = GreedyAssigner
        .assign_with_capacity(&inst, &mut remaining)
        .unwrap();
    assert_eq!(out.unassigned, vec![1, 2]);
    assert_eq!(out.assignment.assigned_resource(0), Some(0));
    assert_eq!(out.total_cost(&inst), 5.0);
}
