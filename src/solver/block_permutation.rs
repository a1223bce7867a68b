//! Exhaustive search over student block orderings.
//!
//! Every permutation of the students is turned into a schedule by
//! concatenating each student's whole exercise block in that order, then
//! simulated. Two students' exercises are never interleaved, so only `N!`
//! candidates exist. Meant for small instances and as a baseline for the
//! other strategies.

use log::{debug, trace};

use crate::data::{Exercise, Instance, Solution, Student};
use crate::error::SolveError;

use super::simulate::simulate;

struct BlockSearch<'a> {
    equipment_count: usize,
    students: &'a [Student],
    placed: Vec<bool>,
    current: Vec<Exercise>,
    best: Option<Solution>,
    evaluated: u64,
}

impl BlockSearch<'_> {
    fn explore(&mut self, remaining: usize) -> Result<(), SolveError> {
        if remaining == 0 {
            return self.evaluate();
        }

        let students = self.students;
        for (idx, student) in students.iter().enumerate() {
            if self.placed[idx] {
                continue;
            }
            let block = &student.exercises;

            self.placed[idx] = true;
            self.current.extend_from_slice(block);
            self.explore(remaining - 1)?;
            // undo before trying the next student
            self.current.truncate(self.current.len() - block.len());
            self.placed[idx] = false;
        }

        Ok(())
    }

    fn evaluate(&mut self) -> Result<(), SolveError> {
        let makespan = simulate(self.equipment_count, &mut self.current)?;
        self.evaluated += 1;
        trace!("block permutation #{} makespan {:.2}", self.evaluated, makespan);

        let improves = self.best.as_ref().is_none_or(|best| makespan < best.makespan);
        if improves {
            self.best = Some(Solution {
                schedule: self.current.clone(),
                makespan,
            });
        }
        Ok(())
    }
}

/// Tries every ordering of whole student blocks and keeps the one with the
/// smallest makespan. Ties keep the first ordering found.
pub fn search_all_block_orderings(instance: &Instance) -> Result<Solution, SolveError> {
    let mut search = BlockSearch {
        equipment_count: instance.equipment_count,
        students: &instance.students,
        placed: vec![false; instance.student_count()],
        current: Vec::with_capacity(instance.exercise_count()),
        best: None,
        evaluated: 0,
    };

    search.explore(instance.student_count())?;
    debug!("evaluated {} block permutations", search.evaluated);

    let best = search.best.unwrap_or(Solution {
        schedule: Vec::new(),
        makespan: 0.0,
    });
    Ok(best)
}
