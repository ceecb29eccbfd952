use chrono::NaiveDate;

use crate::{ExerciseID, PerformedSet};

/// A dated training session from the host-owned history. Never mutated by
/// the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSession {
    pub date: NaiveDate,
    pub exercises: Vec<SessionExercise>,
}

impl TrainingSession {
    #[must_use]
    pub fn total_volume(&self) -> f32 {
        self.exercises.iter().map(SessionExercise::volume).sum()
    }

    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// All sets of the given exercise in this session. A session with no
    /// sets for the exercise does not qualify for trend calculations.
    #[must_use]
    pub fn sets_of(&self, exercise_id: ExerciseID) -> Vec<&PerformedSet> {
        self.exercises
            .iter()
            .filter(|e| e.exercise_id == exercise_id)
            .flat_map(|e| &e.sets)
            .collect()
    }
}

/// An exercise performed within a session, with its logged sets in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionExercise {
    pub exercise_id: ExerciseID,
    pub sets: Vec<PerformedSet>,
}

impl SessionExercise {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(PerformedSet::volume).sum()
    }

    /// The set maximizing weight times reps, or `None` for an empty set
    /// list.
    #[must_use]
    pub fn top_set(&self) -> Option<&PerformedSet> {
        self.sets
            .iter()
            .max_by(|a, b| a.volume().total_cmp(&b.volume()))
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Reps, Rir, Weight};

    use super::*;

    fn set(weight: f32, reps: u32, rir: f32) -> PerformedSet {
        PerformedSet {
            weight: Weight::new(weight).unwrap(),
            reps: Reps::new(reps).unwrap(),
            rir: Rir::new(rir).unwrap(),
        }
    }

    fn session() -> TrainingSession {
        TrainingSession {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            exercises: vec![
                SessionExercise {
                    exercise_id: 1.into(),
                    sets: vec![set(100.0, 5, 2.0), set(102.5, 4, 1.0)],
                },
                SessionExercise {
                    exercise_id: 2.into(),
                    sets: vec![set(40.0, 10, 3.0)],
                },
                SessionExercise {
                    exercise_id: 3.into(),
                    sets: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_training_session_total_volume() {
        assert_approx_eq!(session().total_volume(), 500.0 + 410.0 + 400.0);
    }

    #[test]
    fn test_training_session_total_sets() {
        assert_eq!(session().total_sets(), 3);
    }

    #[rstest]
    #[case(1.into(), 2)]
    #[case(2.into(), 1)]
    #[case(3.into(), 0)]
    #[case(4.into(), 0)]
    fn test_training_session_sets_of(#[case] exercise_id: ExerciseID, #[case] expected: usize) {
        assert_eq!(session().sets_of(exercise_id).len(), expected);
    }

    #[test]
    fn test_session_exercise_top_set() {
        assert_eq!(
            session().exercises[0].top_set(),
            Some(&set(100.0, 5, 2.0))
        );
        assert_eq!(session().exercises[2].top_set(), None);
    }
}
