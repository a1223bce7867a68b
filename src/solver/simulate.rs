//! Deterministic timeline simulation.
//!
//! Exercises are processed in schedule order. Each one starts as soon as both
//! its equipment and its student are free:
//!
//! `start = max(equipment_free[e], student_finish[s])`, `finish = start + duration`
//!
//! Both the equipment and the student are then busy until `finish`.

use std::collections::HashMap;

use crate::data::{Exercise, Instance, Minutes, StudentId};
use crate::error::SolveError;

/// Simulates `schedule` on `equipment_count` machines, writing each
/// exercise's `start_time`, and returns the makespan.
///
/// The schedule is expected to respect every student's own exercise order;
/// that is not checked here (see [`validate_schedule`]). An empty schedule
/// has a makespan of 0.
pub fn simulate(equipment_count: usize, schedule: &mut [Exercise]) -> Result<Minutes, SolveError> {
    if equipment_count == 0 {
        return Err(SolveError::InvalidConfiguration { equipment_count: 0 });
    }

    let slots = equipment_slots(equipment_count, schedule.iter());
    let mut equipment_free_time: Vec<Minutes> = vec![0.0; slots];
    let mut student_finish_time: HashMap<StudentId, Minutes> = HashMap::new();

    for exercise in schedule.iter_mut() {
        let idx = equipment_index(equipment_count, exercise)?;
        let student_time = student_finish_time.get(&exercise.student_id).copied().unwrap_or(0.0);
        let start_time = equipment_free_time[idx].max(student_time);
        let finish_time = start_time + exercise.duration;

        exercise.start_time = start_time;
        equipment_free_time[idx] = finish_time;
        student_finish_time.insert(exercise.student_id, finish_time);
    }

    Ok(student_finish_time.into_values().fold(0.0, Minutes::max))
}

/// Length of a free-time table able to hold every valid equipment id in
/// `exercises`: the largest id used, capped at `equipment_count`.
pub(crate) fn equipment_slots<'a>(
    equipment_count: usize,
    exercises: impl Iterator<Item = &'a Exercise>,
) -> usize {
    exercises
        .map(|e| e.equipment_id as usize)
        .max()
        .unwrap_or(0)
        .min(equipment_count)
}

/// Zero-based slot of the exercise's equipment, or an error when the id lies
/// outside `[1, equipment_count]`.
pub(crate) fn equipment_index(equipment_count: usize, exercise: &Exercise) -> Result<usize, SolveError> {
    let id = exercise.equipment_id as usize;
    if id == 0 || id > equipment_count {
        return Err(SolveError::MalformedInstance(format!(
            "equipment {} is outside [1, {}]",
            exercise.equipment_id, equipment_count
        )));
    }
    Ok(id - 1)
}

/// Checks that `schedule` contains every exercise of `instance` exactly once
/// and that each student's exercises keep their original relative order.
pub fn validate_schedule(instance: &Instance, schedule: &[Exercise]) -> Result<(), SolveError> {
    let expected = instance.exercise_count();
    if schedule.len() != expected {
        return Err(SolveError::MalformedInstance(format!(
            "schedule has {} exercises, expected {}",
            schedule.len(),
            expected
        )));
    }

    let positions: HashMap<StudentId, usize> = instance
        .students
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.id, idx))
        .collect();
    let mut progress = vec![0usize; instance.student_count()];

    for exercise in schedule {
        let Some(&student_idx) = positions.get(&exercise.student_id) else {
            return Err(SolveError::MalformedInstance(format!(
                "schedule references unknown student {}",
                exercise.student_id
            )));
        };
        let student = &instance.students[student_idx];
        let next = progress[student_idx];

        match student.exercises.get(next) {
            Some(expected) if expected.same_work(exercise) => progress[student_idx] += 1,
            _ => {
                return Err(SolveError::MalformedInstance(format!(
                    "student {} exercise {} is out of order",
                    exercise.student_id, next
                )));
            }
        }
    }

    Ok(())
}
