use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{EngineConfig, Exercise, ExerciseID, Muscle, TrainingSession};

/// Calibration factor converting set tonnage into fatigue units.
const LOCAL_FATIGUE_PER_KG: f32 = 0.001;
/// Calibration factor converting set tonnage into systemic fatigue units.
const SYSTEMIC_FATIGUE_PER_KG: f32 = 0.0001;
/// Extra local fatigue for spine-loading movements.
const AXIAL_LOCAL_FACTOR: f32 = 1.3;
/// Extra systemic fatigue for spine-loading movements.
const AXIAL_SYSTEMIC_FACTOR: f32 = 1.5;

/// Subjective ratings supplied by the caller per fold.
#[derive(Debug, Clone, PartialEq)]
pub struct Wellness {
    /// Perceived whole-body fatigue on a 0-10 scale; 5 is neutral.
    pub perceived_fatigue: f32,
    /// Per-muscle soreness rating, 0 or above; 0 means no correction.
    pub soreness: BTreeMap<Muscle, f32>,
}

impl Default for Wellness {
    fn default() -> Self {
        Wellness {
            perceived_fatigue: 5.0,
            soreness: BTreeMap::new(),
        }
    }
}

/// Accumulated training fatigue, the sole stateful entity of the engine.
///
/// Created empty for a new profile, replaced wholesale by [`fold`] once per
/// session, and persisted verbatim by the host between folds. Sessions must
/// be folded strictly in non-decreasing date order; folding out of order
/// silently corrupts the decay calculation.
///
/// Readiness is not stored: it is derived from fatigue on access, so the
/// `readiness = exp(-fatigue)` relation cannot be violated.
///
/// [`fold`]: FatigueState::fold
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueState {
    pub local_fatigue: BTreeMap<Muscle, f32>,
    pub systemic_fatigue: f32,
    /// Rolling stimulus accumulator. Not decayed by calendar weeks; the
    /// caller windows it via [`FatigueState::clear_weekly_stimulus`].
    pub weekly_stimulus: BTreeMap<Muscle, f32>,
    pub last_session_date: Option<NaiveDate>,
}

impl FatigueState {
    /// Per-muscle readiness in (0,1]; 1 for untracked muscles.
    #[must_use]
    pub fn muscle_readiness(&self, muscle: Muscle) -> f32 {
        (-self.local_fatigue.get(&muscle).copied().unwrap_or(0.0)).exp()
    }

    /// Whole-body readiness in (0,1].
    #[must_use]
    pub fn systemic_readiness(&self) -> f32 {
        (-self.systemic_fatigue).exp()
    }

    pub fn clear_weekly_stimulus(&mut self) {
        self.weekly_stimulus.clear();
    }

    /// Applies continuous exponential recovery for the whole days elapsed
    /// between the last session and `as_of`.
    ///
    /// The decay is exponentiated once per muscle, never compounded
    /// incrementally. States without a last session, and elapsed spans of
    /// zero or negative days, are returned unchanged; backdated dates are
    /// accepted as a no-op rather than rejected.
    #[must_use]
    pub fn recover(&self, as_of: NaiveDate, config: &EngineConfig) -> FatigueState {
        let Some(last_session_date) = self.last_session_date else {
            return self.clone();
        };

        let days_since = (as_of - last_session_date).num_days();
        if days_since <= 0 {
            return self.clone();
        }

        #[allow(clippy::cast_precision_loss)]
        let days = days_since as f32;

        FatigueState {
            local_fatigue: self
                .local_fatigue
                .iter()
                .map(|(muscle, fatigue)| {
                    (*muscle, fatigue * (-config.recovery_rate(*muscle) * days).exp())
                })
                .collect(),
            systemic_fatigue: self.systemic_fatigue
                * (-config.systemic_recovery_rate * days).exp(),
            weekly_stimulus: self.weekly_stimulus.clone(),
            last_session_date: self.last_session_date,
        }
    }

    /// Folds one session into the state: recovery up to the session date,
    /// then stimulus and fatigue accrual per set and muscle, then the
    /// subjective corrections.
    ///
    /// Sets whose exercise id is missing from `exercises` contribute
    /// nothing and are skipped silently.
    #[must_use]
    pub fn fold(
        &self,
        session: &TrainingSession,
        exercises: &BTreeMap<ExerciseID, Exercise>,
        wellness: &Wellness,
        config: &EngineConfig,
    ) -> FatigueState {
        let mut state = self.recover(session.date, config);

        for session_exercise in &session.exercises {
            let Some(exercise) = exercises.get(&session_exercise.exercise_id) else {
                debug!(
                    "skipping sets of unknown exercise {}",
                    *session_exercise.exercise_id
                );
                continue;
            };
            let roles = exercise.muscle_roles();
            let local_factor = if exercise.axial { AXIAL_LOCAL_FACTOR } else { 1.0 };
            let systemic_factor = if exercise.axial { AXIAL_SYSTEMIC_FACTOR } else { 1.0 };

            for set in &session_exercise.sets {
                let stimulus = set.effort() * set.load_factor();
                let tonnage = set.volume();

                for (muscle, role) in &roles {
                    *state.weekly_stimulus.entry(*muscle).or_insert(0.0) +=
                        stimulus * role.weight();
                    *state.local_fatigue.entry(*muscle).or_insert(0.0) +=
                        tonnage * role.weight() * local_factor * LOCAL_FATIGUE_PER_KG;
                }

                if !exercise.exercise_type.is_isolation() {
                    state.systemic_fatigue +=
                        tonnage * systemic_factor * SYSTEMIC_FATIGUE_PER_KG;
                }
            }
        }

        // A calm rating below neutral may reduce systemic fatigue, but
        // never below zero.
        state.systemic_fatigue =
            (state.systemic_fatigue + (wellness.perceived_fatigue - 5.0) * 0.1).max(0.0);

        for (muscle, fatigue) in &mut state.local_fatigue {
            if let Some(soreness) = wellness.soreness.get(muscle) {
                *fatigue *= 1.0 + soreness * 0.05;
            }
        }

        state.last_session_date = Some(session.date);
        state
    }
}
