use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SolveError;

// Type aliases for clarity
pub type StudentId = u32;
pub type EquipmentId = u32;
pub type Minutes = f64;

/// One unit of work: a student using a piece of equipment for a fixed duration.
///
/// `start_time` is not part of the exercise's identity; it is filled in by the
/// simulator and only meaningful on a simulated schedule.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub student_id: StudentId,
    pub equipment_id: EquipmentId,
    pub duration: Minutes,
    #[serde(default)]
    pub start_time: Minutes,
}

impl Exercise {
    pub fn new(student_id: StudentId, equipment_id: EquipmentId, duration: Minutes) -> Self {
        Self {
            student_id,
            equipment_id,
            duration,
            start_time: 0.0,
        }
    }

    pub fn finish_time(&self) -> Minutes {
        self.start_time + self.duration
    }

    /// Same student, equipment and duration; ignores the computed start time.
    pub fn same_work(&self, other: &Exercise) -> bool {
        self.student_id == other.student_id
            && self.equipment_id == other.equipment_id
            && self.duration == other.duration
    }
}

/// A student and the exercises they must perform, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub exercises: Vec<Exercise>,
}

/// A parsed problem instance. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub equipment_count: usize,
    pub students: Vec<Student>,
    /// Counts announced by the input header, kept for diagnostics only.
    #[serde(skip)]
    pub declared_student_count: Option<usize>,
    #[serde(skip)]
    pub declared_exercise_count: Option<usize>,
}

impl Instance {
    /// Groups `exercises` by student in order of first appearance, keeping
    /// each student's exercises in input order.
    pub fn from_exercises(equipment_count: i64, exercises: Vec<Exercise>) -> Result<Self, SolveError> {
        if equipment_count <= 0 {
            return Err(SolveError::InvalidConfiguration { equipment_count });
        }
        let Ok(slots) = usize::try_from(equipment_count) else {
            return Err(SolveError::InvalidConfiguration { equipment_count });
        };
        let max_equipment = equipment_count as u64;

        for exercise in &exercises {
            if exercise.equipment_id == 0 || u64::from(exercise.equipment_id) > max_equipment {
                return Err(SolveError::MalformedInstance(format!(
                    "student {} references equipment {} outside [1, {}]",
                    exercise.student_id, exercise.equipment_id, equipment_count
                )));
            }
            if !exercise.duration.is_finite() || exercise.duration < 0.0 {
                return Err(SolveError::MalformedInstance(format!(
                    "student {} has an invalid duration {} on equipment {}",
                    exercise.student_id, exercise.duration, exercise.equipment_id
                )));
            }
        }

        let student_ids: Vec<StudentId> = exercises.iter().map(|e| e.student_id).unique().collect();
        let mut grouped = exercises.into_iter().into_group_map_by(|e| e.student_id);
        let students = student_ids
            .into_iter()
            .map(|id| Student {
                id,
                exercises: grouped
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|e| Exercise { start_time: 0.0, ..e })
                    .collect(),
            })
            .collect();

        Ok(Self {
            equipment_count: slots,
            students,
            declared_student_count: None,
            declared_exercise_count: None,
        })
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn exercise_count(&self) -> usize {
        self.all_exercises().count()
    }

    /// Every exercise, student block after student block.
    pub fn all_exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.students.iter().flat_map(|s| s.exercises.iter())
    }
}

/// The search strategies the solver offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Exhaustive search over whole per-student blocks.
    BlockPermutation,
    /// Exact search over all interleavings, pruned by a lower bound.
    BranchAndBound,
    /// One-step lookahead construction.
    Greedy,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::BlockPermutation,
        Strategy::BranchAndBound,
        Strategy::Greedy,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BlockPermutation => write!(f, "Block Permutation"),
            Strategy::BranchAndBound => write!(f, "Branch and Bound"),
            Strategy::Greedy => write!(f, "Approximate Heuristic"),
        }
    }
}

/// An ordered, simulated schedule and its makespan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub schedule: Vec<Exercise>,
    pub makespan: Minutes,
}

/// The result of running one strategy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: f64,
}

/// The JSON input accepted by the HTTP endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub equipment_count: i64,
    pub exercises: Vec<Exercise>,
    /// Strategies to run; all of them when omitted.
    #[serde(default)]
    pub strategies: Option<Vec<Strategy>>,
}

/// The final output of the solver.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub equipment_count: usize,
    pub student_count: usize,
    pub exercise_count: usize,
    pub outcomes: Vec<StrategyOutcome>,
}
