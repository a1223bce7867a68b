//! Reader for the flat text instance format.
//!
//! ```text
//! M = 2
//! N = 2
//! n = 3
//! 1 1 3
//! 1 2 2
//! 2 2 4
//! ```
//!
//! The first three lines are equipment, student and exercise counts; only the
//! value after `=` matters. Every following line is `studentId equipmentId
//! duration`, with the duration in minutes. Blank lines are ignored.

use anyhow::Context;
use log::{trace, warn};
use std::path::Path;

use crate::data::{Exercise, Instance};
use crate::error::ParseError;

/// Reads and parses an instance file.
pub fn load_instance(path: &Path) -> anyhow::Result<Instance> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read instance file {}", path.display()))?;
    let instance =
        parse_instance(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(instance)
}

/// Parses an instance from its text form.
pub fn parse_instance(content: &str) -> Result<Instance, ParseError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut header = [0i64; 3];
    for (expected, slot) in header.iter_mut().enumerate() {
        let (line_no, line) = lines
            .next()
            .ok_or(ParseError::MissingHeader { expected: expected + 1 })?;
        *slot = parse_header_value(line_no, line)?;
    }
    let [equipment_count, declared_students, declared_exercises] = header;

    let exercises = lines
        .map(|(line_no, line)| parse_exercise(line_no, line))
        .collect::<Result<Vec<_>, _>>()?;
    trace!("parsed {} exercise lines", exercises.len());

    let mut instance = Instance::from_exercises(equipment_count, exercises)?;
    instance.declared_student_count = usize::try_from(declared_students).ok();
    instance.declared_exercise_count = usize::try_from(declared_exercises).ok();

    if instance.declared_student_count != Some(instance.student_count()) {
        warn!(
            "header declares {} students but {} were found",
            declared_students,
            instance.student_count()
        );
    }
    if instance.declared_exercise_count != Some(instance.exercise_count()) {
        warn!(
            "header declares {} exercises but {} were found",
            declared_exercises,
            instance.exercise_count()
        );
    }

    Ok(instance)
}

fn parse_header_value(line_no: usize, line: &str) -> Result<i64, ParseError> {
    let malformed = || ParseError::MalformedHeader {
        line: line_no,
        content: line.to_string(),
    };
    let (_, value) = line.split_once('=').ok_or_else(malformed)?;
    value.trim().parse().map_err(|_| malformed())
}

fn parse_exercise(line_no: usize, line: &str) -> Result<Exercise, ParseError> {
    let malformed = |reason: String| ParseError::MalformedExercise { line: line_no, reason };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [student, equipment, duration] = fields.as_slice() else {
        return Err(malformed(format!(
            "expected `studentId equipmentId duration`, found {} fields",
            fields.len()
        )));
    };

    let student_id = student
        .parse()
        .map_err(|_| malformed(format!("invalid student id {student:?}")))?;
    let equipment_id = equipment
        .parse()
        .map_err(|_| malformed(format!("invalid equipment id {equipment:?}")))?;
    let duration = duration
        .parse()
        .map_err(|_| malformed(format!("invalid duration {duration:?}")))?;

    Ok(Exercise::new(student_id, equipment_id, duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;

    const EXAMPLE: &str = "M = 2\nN = 2\nn = 3\n1 1 3\n1 2 2\n2 2 4\n";

    #[test]
    fn test_parses_example() {
        let instance = parse_instance(EXAMPLE).unwrap();

        assert_eq!(instance.equipment_count, 2);
        assert_eq!(instance.student_count(), 2);
        assert_eq!(instance.exercise_count(), 3);
        assert_eq!(instance.declared_student_count, Some(2));
        assert_eq!(instance.students[0].exercises[1], Exercise::new(1, 2, 2.0));
        assert_eq!(instance.students[1].exercises[0].duration, 4.0);
    }

    #[test]
    fn test_accepts_fractional_durations_and_blank_lines() {
        let content = "equipments = 1\n\nstudents = 1\nexercises = 2\n\n3 1 2.5\n3   1\t0.75\n";
        let instance = parse_instance(content).unwrap();

        let durations: Vec<f64> = instance.all_exercises().map(|e| e.duration).collect();
        assert_eq!(durations, vec![2.5, 0.75]);
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            parse_instance("M = 2\nN = 1\n"),
            Err(ParseError::MissingHeader { expected: 3 })
        );
    }

    #[test]
    fn test_malformed_header() {
        let err = parse_instance("M 2\nN = 1\nn = 1\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedHeader { line: 1, .. }));
    }

    #[test]
    fn test_malformed_exercise_reports_line() {
        let err = parse_instance("M = 2\nN = 1\nn = 2\n1 1 3\n1 x 2\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedExercise { line: 5, .. }));

        let err = parse_instance("M = 2\nN = 1\nn = 1\n1 1\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedExercise { line: 4, .. }));
    }

    #[test]
    fn test_invalid_equipment_count() {
        let err = parse_instance("M = 0\nN = 0\nn = 0\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Instance(SolveError::InvalidConfiguration { equipment_count: 0 })
        );
    }

    #[test]
    fn test_equipment_out_of_range() {
        let err = parse_instance("M = 1\nN = 1\nn = 1\n1 2 3\n").unwrap_err();
        assert!(matches!(err, ParseError::Instance(SolveError::MalformedInstance(_))));
    }

    #[test]
    fn test_empty_instance() {
        let instance = parse_instance("M = 3\nN = 0\nn = 0\n").unwrap();
        assert_eq!(instance.exercise_count(), 0);
    }
}
