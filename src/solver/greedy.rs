//! One-step lookahead greedy construction.
//!
//! # Algorithm
//! 1. Keep a queue of pending exercises per student.
//! 2. For each non-empty queue, simulate the schedule so far plus the queue's
//!    head and subtract the head's duration.
//! 3. Append the head with the smallest value (first student wins ties) and
//!    drop queues that become empty.
//! 4. Repeat until every queue is empty.
//!
//! # Complexity
//! O(n * N) simulations of a growing prefix, so O(n^2 * N) overall. No
//! backtracking and no optimality guarantee.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::data::{Exercise, Instance, Minutes, Solution};
use crate::error::SolveError;

use super::simulate::simulate;

/// Makespan of `schedule + [next]` minus `next`'s duration, using `scratch`
/// as the simulation buffer.
fn incremental_makespan(
    equipment_count: usize,
    schedule: &[Exercise],
    next: &Exercise,
    scratch: &mut Vec<Exercise>,
) -> Result<Minutes, SolveError> {
    scratch.clear();
    scratch.extend_from_slice(schedule);
    scratch.push(*next);
    Ok(simulate(equipment_count, scratch)? - next.duration)
}

/// Builds a schedule greedily, one exercise at a time.
pub fn search_greedy(instance: &Instance) -> Result<Solution, SolveError> {
    if instance.equipment_count == 0 {
        return Err(SolveError::InvalidConfiguration { equipment_count: 0 });
    }

    let mut queues: Vec<VecDeque<Exercise>> = instance
        .students
        .iter()
        .filter(|s| !s.exercises.is_empty())
        .map(|s| s.exercises.iter().copied().collect())
        .collect();
    let mut schedule = Vec::with_capacity(instance.exercise_count());
    let mut scratch = Vec::with_capacity(instance.exercise_count());

    while !queues.is_empty() {
        let mut chosen: Option<(usize, Minutes)> = None;

        for (idx, queue) in queues.iter().enumerate() {
            let Some(head) = queue.front() else {
                continue;
            };
            let value = incremental_makespan(instance.equipment_count, &schedule, head, &mut scratch)?;
            if chosen.is_none_or(|(_, best)| value < best) {
                chosen = Some((idx, value));
            }
        }

        let Some((idx, value)) = chosen else {
            break;
        };
        if let Some(exercise) = queues[idx].pop_front() {
            trace!(
                "greedy step {}: student {} on equipment {} (estimate {:.2})",
                schedule.len() + 1,
                exercise.student_id,
                exercise.equipment_id,
                value
            );
            schedule.push(exercise);
        }
        queues.retain(|q| !q.is_empty());
    }

    debug!("greedy built a schedule of {} exercises", schedule.len());
    let makespan = simulate(instance.equipment_count, &mut schedule)?;
    Ok(Solution { schedule, makespan })
}
