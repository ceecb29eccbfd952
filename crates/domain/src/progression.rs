use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::{
    EngineConfig, Exercise, ExerciseID, FatigueState, PerformedSet, Rir, TrainingSession,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    FirstTime,
    Deload,
    Progress,
    PushHarder,
    Maintain,
    Reduce,
    Error,
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Advice::FirstTime => "first time",
                Advice::Deload => "deload",
                Advice::Progress => "progress",
                Advice::PushHarder => "push harder",
                Advice::Maintain => "maintain",
                Advice::Reduce => "reduce",
                Advice::Error => "error",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessLevel {
    High,
    Moderate,
    Low,
}

/// Performance trend between the two most recent qualifying sessions of an
/// exercise, with a ±5% deadband.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improved,
    Declined,
    Stable,
    InsufficientData,
}

/// A load-progression recommendation. Produced fresh on each call, never
/// stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub advice: Advice,
    pub suggestion: String,
    pub readiness: ReadinessLevel,
    /// Minimum readiness over the exercise's primary muscles.
    pub muscle_readiness: f32,
    pub systemic_readiness: f32,
    pub reason: Option<String>,
    pub recommended_weight: Option<f32>,
}

/// Produces a recommendation for the given exercise from its history and
/// the current fatigue state.
///
/// The checks are ordered; the first match wins: unknown exercise, no
/// history, deload conditions (systemic readiness short-circuits local),
/// then the readiness-gated progression decision.
#[must_use]
pub fn advise(
    exercise_id: ExerciseID,
    exercises: &BTreeMap<ExerciseID, Exercise>,
    history: &[TrainingSession],
    state: &FatigueState,
    config: &EngineConfig,
) -> Recommendation {
    let Some(exercise) = exercises.get(&exercise_id) else {
        debug!("no recommendation: unknown exercise {}", *exercise_id);
        return Recommendation {
            advice: Advice::Error,
            suggestion: String::from("Check the exercise selection"),
            readiness: ReadinessLevel::Low,
            muscle_readiness: 1.0,
            systemic_readiness: state.systemic_readiness(),
            reason: Some(String::from("exercise not found")),
            recommended_weight: None,
        };
    };

    // A session qualifies only with at least one logged set.
    let qualifying: Vec<(&TrainingSession, Vec<&PerformedSet>)> = history
        .iter()
        .filter_map(|session| {
            let sets = session.sets_of(exercise_id);
            (!sets.is_empty()).then_some((session, sets))
        })
        .collect();

    if qualifying.is_empty() {
        return Recommendation {
            advice: Advice::FirstTime,
            suggestion: String::from(
                "Start conservatively and find a weight you can handle for clean reps",
            ),
            readiness: ReadinessLevel::High,
            muscle_readiness: 1.0,
            systemic_readiness: 1.0,
            reason: None,
            recommended_weight: None,
        };
    }

    let muscle_readiness = exercise
        .primary
        .iter()
        .map(|muscle| state.muscle_readiness(*muscle))
        .fold(1.0, f32::min);
    let systemic_readiness = state.systemic_readiness();
    let readiness = readiness_level(muscle_readiness.min(systemic_readiness), config);

    let deload_reason = if systemic_readiness < config.deload_threshold {
        Some("systemic fatigue high")
    } else if muscle_readiness < config.deload_threshold {
        Some("local fatigue high")
    } else if mean_primary_stimulus(exercise, state) > config.max_sets_per_week {
        Some("volume excessive")
    } else {
        None
    };

    if let Some(reason) = deload_reason {
        let suggestion = if exercise.axial && !exercise.exercise_type.is_isolation() {
            format!(
                "Cut the weight by 30-40% and drop toward {} weekly sets",
                config.min_sets_per_week
            )
        } else {
            String::from("Keep the weight but leave 2 extra reps in reserve")
        };
        return Recommendation {
            advice: Advice::Deload,
            suggestion,
            readiness,
            muscle_readiness,
            systemic_readiness,
            reason: Some(reason.to_string()),
            recommended_weight: None,
        };
    }

    let (_, latest_sets) = &qualifying[qualifying.len() - 1];
    let top_set = top_set(latest_sets);
    let previous_top_volume = (qualifying.len() >= 2)
        .then(|| top_set_volume(&qualifying[qualifying.len() - 2].1));
    let trend = trend(top_set_volume(latest_sets), previous_top_volume);
    let avg_rir = Rir::avg(
        &latest_sets
            .iter()
            .map(|set| set.rir)
            .collect::<Vec<_>>(),
    )
    .unwrap_or(10.0);

    if muscle_readiness >= config.progression_threshold
        && systemic_readiness >= config.progression_threshold
    {
        if avg_rir <= config.rir_progression_threshold {
            let recommended_weight = top_set.map(|set| {
                f32::from(set.weight) + config.weight_increment(exercise.exercise_type)
            });
            Recommendation {
                advice: Advice::Progress,
                suggestion: String::from("Recovered and working hard: add load"),
                readiness,
                muscle_readiness,
                systemic_readiness,
                reason: None,
                recommended_weight,
            }
        } else if avg_rir >= 3.0 {
            Recommendation {
                advice: Advice::PushHarder,
                suggestion: String::from(
                    "Plenty of reps in reserve: take sets closer to failure before adding load",
                ),
                readiness,
                muscle_readiness,
                systemic_readiness,
                reason: None,
                recommended_weight: None,
            }
        } else {
            Recommendation {
                advice: Advice::Maintain,
                suggestion: String::from("Repeat the current loading"),
                readiness,
                muscle_readiness,
                systemic_readiness,
                reason: None,
                recommended_weight: None,
            }
        }
    } else if muscle_readiness >= 0.65 && systemic_readiness >= 0.65 {
        if trend == Trend::Declined {
            Recommendation {
                advice: Advice::Reduce,
                suggestion: String::from("Back off slightly and rebuild"),
                readiness,
                muscle_readiness,
                systemic_readiness,
                reason: Some(String::from("recent performance decline")),
                recommended_weight: None,
            }
        } else {
            Recommendation {
                advice: Advice::Maintain,
                suggestion: String::from("Hold the current loading while recovery catches up"),
                readiness,
                muscle_readiness,
                systemic_readiness,
                reason: None,
                recommended_weight: None,
            }
        }
    } else {
        Recommendation {
            advice: Advice::Reduce,
            suggestion: String::from("Reduce the load until readiness improves"),
            readiness,
            muscle_readiness,
            systemic_readiness,
            reason: Some(String::from("readiness below optimal")),
            recommended_weight: None,
        }
    }
}

fn readiness_level(readiness: f32, config: &EngineConfig) -> ReadinessLevel {
    if readiness >= config.progression_threshold {
        ReadinessLevel::High
    } else if readiness >= 0.65 {
        ReadinessLevel::Moderate
    } else {
        ReadinessLevel::Low
    }
}

fn mean_primary_stimulus(exercise: &Exercise, state: &FatigueState) -> f32 {
    if exercise.primary.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        exercise
            .primary
            .iter()
            .map(|muscle| state.weekly_stimulus.get(muscle).copied().unwrap_or(0.0))
            .sum::<f32>()
            / exercise.primary.len() as f32
    }
}

fn top_set<'a>(sets: &[&'a PerformedSet]) -> Option<&'a PerformedSet> {
    sets.iter()
        .copied()
        .max_by(|a, b| a.volume().total_cmp(&b.volume()))
}

fn top_set_volume(sets: &[&PerformedSet]) -> f32 {
    top_set(sets).map_or(0.0, PerformedSet::volume)
}

fn trend(latest: f32, previous: Option<f32>) -> Trend {
    let Some(previous) = previous else {
        return Trend::InsufficientData;
    };
    if previous <= 0.0 {
        return if latest > 0.0 { Trend::Improved } else { Trend::Stable };
    }
    let change = (latest - previous) / previous;
    if change > 0.05 {
        Trend::Improved
    } else if change < -0.05 {
        Trend::Declined
    } else {
        Trend::Stable
    }
}
