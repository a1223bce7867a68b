//! Console rendering of strategy outcomes.

use itertools::Itertools;
use std::fmt;

use crate::data::{Exercise, Solution, StrategyOutcome};

/// Plain-text report of one outcome: the lowest time, the ordered sequence
/// and a per-equipment timeline.
pub struct OutcomeReport<'a>(pub &'a StrategyOutcome);

impl fmt::Display for OutcomeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        writeln!(f, "== {} Solution ==", outcome.strategy)?;

        match (&outcome.solution, &outcome.error) {
            (Some(solution), _) => {
                writeln!(f, "Lowest time: {:.2} minutes", solution.makespan)?;
                writeln!(f, "Computed in {:.2} ms", outcome.elapsed_ms)?;
                write_sequence(f, solution)?;
                write_timeline(f, solution)
            }
            (None, Some(error)) => writeln!(f, "Failed: {error}"),
            (None, None) => writeln!(f, "No solution"),
        }
    }
}

/// Renders every outcome as a plain-text report.
pub fn render_outcomes(outcomes: &[StrategyOutcome]) -> String {
    outcomes.iter().map(OutcomeReport).join("\n")
}

fn write_sequence(f: &mut fmt::Formatter<'_>, solution: &Solution) -> fmt::Result {
    writeln!(f, "Sequence:")?;
    for (position, exercise) in solution.schedule.iter().enumerate() {
        writeln!(
            f,
            "  {:>3}. student {:>3}  equipment {:>3}  duration {:>7.2}  [{:>7.2} -> {:>7.2}]",
            position + 1,
            exercise.student_id,
            exercise.equipment_id,
            exercise.duration,
            exercise.start_time,
            exercise.finish_time()
        )?;
    }
    Ok(())
}

/// Busy intervals of each equipment in start order.
fn write_timeline(f: &mut fmt::Formatter<'_>, solution: &Solution) -> fmt::Result {
    let by_equipment = solution
        .schedule
        .iter()
        .into_group_map_by(|e| e.equipment_id);

    writeln!(f, "Timeline:")?;
    for (equipment_id, exercises) in by_equipment.into_iter().sorted_by_key(|(id, _)| *id) {
        let slots = exercises
            .into_iter()
            .sorted_by(|a, b| a.start_time.total_cmp(&b.start_time))
            .map(|e: &Exercise| {
                format!(
                    "S{} {:.2}-{:.2}",
                    e.student_id,
                    e.start_time,
                    e.finish_time()
                )
            })
            .join(" | ");
        writeln!(f, "  Equipment {equipment_id:>3}: {slots}")?;
    }
    Ok(())
}
