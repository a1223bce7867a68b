//! Branch-and-bound search over every valid interleaving.
//!
//! A node is a partial schedule plus the resource state it produces
//! (equipment free times, student finish times) and each student's progress.
//! Children schedule the next pending exercise of any student. The search
//! state lives in one [`BranchState`] that is mutated in place on the way
//! down and restored exactly on the way back up.
//!
//! # Bounding
//! A node is abandoned when its lower bound is not below the best makespan
//! found so far. The bound is the larger of the latest equipment free time
//! and, for every pending exercise, `max(equipment_free, student_finish) +
//! duration` against the current state. Free times only grow as exercises are
//! added, so the bound never overestimates.
//!
//! # Complexity
//! Depth is bounded by `n`, branching by `N`. Worst case is the number of
//! interleavings, `n! / (n_1! * ... * n_N!)`.

use log::debug;

use crate::data::{Exercise, Instance, Minutes, Solution};
use crate::error::SolveError;

use super::simulate::{equipment_index, equipment_slots, simulate};

struct BranchState<'a> {
    instance: &'a Instance,
    exercise_count: usize,
    current: Vec<Exercise>,
    equipment_free_time: Vec<Minutes>,
    /// Indexed by position in `instance.students`.
    student_finish_time: Vec<Minutes>,
    student_progress: Vec<usize>,
    best_schedule: Vec<Exercise>,
    best_makespan: Minutes,
    explored: u64,
    pruned: u64,
}

impl<'a> BranchState<'a> {
    fn new(instance: &'a Instance) -> Self {
        let slots = equipment_slots(instance.equipment_count, instance.all_exercises());
        Self {
            instance,
            exercise_count: instance.exercise_count(),
            current: Vec::with_capacity(instance.exercise_count()),
            equipment_free_time: vec![0.0; slots],
            student_finish_time: vec![0.0; instance.student_count()],
            student_progress: vec![0; instance.student_count()],
            best_schedule: Vec::new(),
            best_makespan: Minutes::INFINITY,
            explored: 0,
            pruned: 0,
        }
    }

    fn current_elapsed(&self) -> Minutes {
        self.equipment_free_time.iter().copied().fold(0.0, Minutes::max)
    }

    fn lower_bound(&self) -> Result<Minutes, SolveError> {
        let mut bound = self.current_elapsed();

        for (idx, student) in self.instance.students.iter().enumerate() {
            let student_time = self.student_finish_time[idx];
            for exercise in &student.exercises[self.student_progress[idx]..] {
                let slot = equipment_index(self.instance.equipment_count, exercise)?;
                let estimated_start = self.equipment_free_time[slot].max(student_time);
                bound = bound.max(estimated_start + exercise.duration);
            }
        }

        Ok(bound)
    }

    fn explore(&mut self) -> Result<(), SolveError> {
        self.explored += 1;

        if self.lower_bound()? >= self.best_makespan {
            self.pruned += 1;
            return Ok(());
        }

        if self.current.len() == self.exercise_count {
            let elapsed = self.current_elapsed();
            if elapsed < self.best_makespan {
                self.best_makespan = elapsed;
                self.best_schedule.clone_from(&self.current);
            }
            return Ok(());
        }

        let instance = self.instance;
        for (idx, student) in instance.students.iter().enumerate() {
            let progress = self.student_progress[idx];
            let Some(next) = student.exercises.get(progress) else {
                continue;
            };

            let slot = equipment_index(instance.equipment_count, next)?;
            let prev_equipment_time = self.equipment_free_time[slot];
            let prev_student_time = self.student_finish_time[idx];
            let start_time = prev_equipment_time.max(prev_student_time);
            let finish_time = start_time + next.duration;

            self.equipment_free_time[slot] = finish_time;
            self.student_finish_time[idx] = finish_time;
            self.current.push(Exercise { start_time, ..*next });
            self.student_progress[idx] = progress + 1;

            self.explore()?;

            // backtrack
            self.equipment_free_time[slot] = prev_equipment_time;
            self.student_finish_time[idx] = prev_student_time;
            self.current.pop();
            self.student_progress[idx] = progress;
        }

        Ok(())
    }
}

/// Finds a minimum-makespan schedule over all interleavings that respect each
/// student's exercise order. Returns the first schedule found with that
/// makespan.
pub fn search_branch_and_bound(instance: &Instance) -> Result<Solution, SolveError> {
    if instance.equipment_count == 0 {
        return Err(SolveError::InvalidConfiguration { equipment_count: 0 });
    }

    let mut state = BranchState::new(instance);
    state.explore()?;
    debug!(
        "branch-and-bound explored {} nodes, pruned {}",
        state.explored, state.pruned
    );

    let mut schedule = state.best_schedule;
    let makespan = simulate(instance.equipment_count, &mut schedule)?;
    Ok(Solution { schedule, makespan })
}
