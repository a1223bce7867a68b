//! Makespan minimization for students sharing a pool of equipment.
//!
//! All strategies run on the same [`simulate::simulate`] primitive and return the same
//! [`Solution`] shape, so their results can be compared directly:
//!
//! - [`search_all_block_orderings`]: exhaustive over whole student blocks
//! - [`search_branch_and_bound`]: exact over all interleavings
//! - [`search_greedy`]: fast one-step lookahead
//!
//! For any instance, branch-and-bound is never worse than either of the others.

mod block_permutation;
mod branch_and_bound;
mod greedy;
mod simulate;

pub use block_permutation::search_all_block_orderings;
pub use branch_and_bound::search_branch_and_bound;
pub use greedy::search_greedy;
pub use simulate::validate_schedule;

use log::{error, info};
use std::time::Instant;

use crate::data::{Instance, Solution, Strategy, StrategyOutcome};
use crate::error::SolveError;

/// Runs a single strategy on `instance`.
pub fn run_strategy(instance: &Instance, strategy: Strategy) -> Result<Solution, SolveError> {
    let solution = match strategy {
        Strategy::BlockPermutation => search_all_block_orderings(instance)?,
        Strategy::BranchAndBound => search_branch_and_bound(instance)?,
        Strategy::Greedy => search_greedy(instance)?,
    };
    debug_assert!(validate_schedule(instance, &solution.schedule).is_ok());
    Ok(solution)
}

/// Runs every requested strategy independently. A failing strategy is
/// reported in its own outcome and does not stop the others.
pub fn solve(instance: &Instance, strategies: &[Strategy]) -> Vec<StrategyOutcome> {
    info!(
        "Solving instance with {} equipment, {} students and {} exercises...",
        instance.equipment_count,
        instance.student_count(),
        instance.exercise_count()
    );

    strategies
        .iter()
        .map(|&strategy| {
            info!("Starting {strategy} search...");
            let start_time = Instant::now();
            let result = run_strategy(instance, strategy);
            let duration = start_time.elapsed();

            match result {
                Ok(solution) => {
                    info!(
                        "{strategy} found makespan {:.2} in {:.2?}",
                        solution.makespan, duration
                    );
                    StrategyOutcome {
                        strategy,
                        solution: Some(solution),
                        error: None,
                        elapsed_ms: duration.as_secs_f64() * 1000.0,
                    }
                }
                Err(e) => {
                    error!("{strategy} failed: {e}");
                    StrategyOutcome {
                        strategy,
                        solution: None,
                        error: Some(e.to_string()),
                        elapsed_ms: duration.as_secs_f64() * 1000.0,
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Exercise, Student};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_instance(rng: &mut StdRng) -> Instance {
        let equipment_count = rng.gen_range(1..=3);
        let student_count = rng.gen_range(1..=3);
        let mut exercises = Vec::new();
        for student_id in 1..=student_count {
            for _ in 0..rng.gen_range(1..=3) {
                let equipment_id = rng.gen_range(1..=equipment_count);
                let duration = f64::from(rng.gen_range(1..=9u32));
                exercises.push(Exercise::new(student_id, equipment_id, duration));
            }
        }
        Instance::from_exercises(i64::from(equipment_count), exercises).unwrap()
    }

    #[test]
    fn test_cross_strategy_bounds() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..40 {
            let instance = random_instance(&mut rng);
            let blocks = search_all_block_orderings(&instance).unwrap();
            let exact = search_branch_and_bound(&instance).unwrap();
            let greedy = search_greedy(&instance).unwrap();

            assert!(exact.makespan <= blocks.makespan, "{instance:?}");
            assert!(exact.makespan <= greedy.makespan, "{instance:?}");
        }
    }

    #[test]
    fn test_every_strategy_respects_student_order() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..25 {
            let instance = random_instance(&mut rng);
            for strategy in Strategy::ALL {
                let solution = run_strategy(&instance, strategy).unwrap();
                assert!(validate_schedule(&instance, &solution.schedule).is_ok());

                // Returned start times agree with the reported makespan
                let max_finish = solution
                    .schedule
                    .iter()
                    .map(Exercise::finish_time)
                    .fold(0.0, f64::max);
                assert_eq!(max_finish, solution.makespan);
            }
        }
    }

    #[test]
    fn test_solve_runs_requested_strategies() {
        let instance = Instance::from_exercises(
            2,
            vec![
                Exercise::new(1, 1, 3.0),
                Exercise::new(1, 2, 2.0),
                Exercise::new(2, 2, 4.0),
            ],
        )
        .unwrap();

        let outcomes = solve(&instance, &Strategy::ALL);

        assert_eq!(outcomes.len(), 3);
        for outcome in &outcomes {
            assert!(outcome.error.is_none());
            assert_eq!(outcome.solution.as_ref().unwrap().makespan, 6.0);
        }
        assert_eq!(outcomes[1].strategy, Strategy::BranchAndBound);
    }

    #[test]
    fn test_failure_is_isolated_per_strategy() {
        // Bypasses validation to reach the simulator's equipment check
        let instance = Instance {
            equipment_count: 1,
            students: vec![Student {
                id: 1,
                exercises: vec![Exercise::new(1, 2, 1.0)],
            }],
            declared_student_count: None,
            declared_exercise_count: None,
        };

        let outcomes = solve(&instance, &[Strategy::Greedy, Strategy::BranchAndBound]);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.solution.is_none() && o.error.is_some()));
    }

    #[test]
    fn test_huge_equipment_count_does_not_allocate_per_equipment() {
        let instance = Instance::from_exercises(
            1_000_000_000_000,
            vec![
                Exercise::new(1, 1, 1.0),
                Exercise::new(2, 1, 2.0),
                Exercise::new(2, 5, 1.0),
            ],
        )
        .unwrap();

        for outcome in solve(&instance, &Strategy::ALL) {
            assert!(outcome.error.is_none(), "{:?}", outcome.error);
            // Student 2 first frees equipment 1 by 2; greedy starts student 1
            let expected = match outcome.strategy {
                Strategy::Greedy => 4.0,
                _ => 3.0,
            };
            assert_eq!(outcome.solution.unwrap().makespan, expected);
        }
    }

    #[test]
    fn test_degenerate_instance() {
        let instance = Instance::from_exercises(1, vec![]).unwrap();
        for outcome in solve(&instance, &Strategy::ALL) {
            let solution = outcome.solution.unwrap();
            assert!(solution.schedule.is_empty());
            assert_eq!(solution.makespan, 0.0);
        }
    }
}
