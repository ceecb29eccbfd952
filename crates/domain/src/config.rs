use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ExerciseType, Muscle};

/// Tunable constants for the recovery, accumulation and progression
/// calculations. Passed explicitly into every call instead of living in
/// process-wide state, so hosts and tests can override values per user.
///
/// Unset fields of a deserialized config fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Readiness below which a deload is prescribed.
    pub deload_threshold: f32,

    /// Readiness required (both locally and systemically) before load is
    /// added.
    pub progression_threshold: f32,

    /// Average RIR at or below which the last session counts as hard
    /// enough to progress.
    pub rir_progression_threshold: f32,

    /// Weekly hard-set guidance per muscle.
    pub min_sets_per_week: f32,
    pub optimal_sets_per_week: f32,
    pub max_sets_per_week: f32,

    /// Daily decay rate for muscles without an explicit entry in
    /// `recovery_rates`.
    pub default_recovery_rate: f32,

    /// Daily decay rate of whole-body fatigue.
    pub systemic_recovery_rate: f32,

    /// Per-muscle daily decay rate overrides. Larger muscles recover
    /// slower.
    pub recovery_rates: BTreeMap<Muscle, f32>,

    /// Weight added on a progression recommendation, per exercise type.
    pub weight_increments: BTreeMap<ExerciseType, f32>,
}

impl EngineConfig {
    /// Fallback increment for exercise types without a configured entry.
    const DEFAULT_WEIGHT_INCREMENT: f32 = 2.5;

    #[must_use]
    pub fn recovery_rate(&self, muscle: Muscle) -> f32 {
        self.recovery_rates
            .get(&muscle)
            .copied()
            .unwrap_or(self.default_recovery_rate)
    }

    #[must_use]
    pub fn weight_increment(&self, exercise_type: ExerciseType) -> f32 {
        self.weight_increments
            .get(&exercise_type)
            .copied()
            .unwrap_or(Self::DEFAULT_WEIGHT_INCREMENT)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            deload_threshold: 0.6,
            progression_threshold: 0.8,
            rir_progression_threshold: 2.0,
            min_sets_per_week: 10.0,
            optimal_sets_per_week: 15.0,
            max_sets_per_week: 20.0,
            default_recovery_rate: 0.35,
            systemic_recovery_rate: 0.25,
            recovery_rates: BTreeMap::from([
                (Muscle::Quads, 0.28),
                (Muscle::Hamstrings, 0.28),
                (Muscle::Glutes, 0.30),
                (Muscle::Lats, 0.32),
                (Muscle::ErectorSpinae, 0.25),
                (Muscle::Pecs, 0.38),
                (Muscle::Biceps, 0.45),
                (Muscle::Triceps, 0.45),
                (Muscle::Calves, 0.50),
            ]),
            weight_increments: BTreeMap::from([
                (ExerciseType::CompoundLower, 5.0),
                (ExerciseType::CompoundUpper, 2.5),
                (ExerciseType::IsolationLower, 2.5),
                (ExerciseType::IsolationUpper, 1.25),
            ]),
        }
    }
}
