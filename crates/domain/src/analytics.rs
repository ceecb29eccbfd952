use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};

use crate::{Exercise, ExerciseID, Muscle, Name, PerformedSet, TrainingSession};

/// Aggregates for one calendar week of training.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub total_volume: f32,
    pub total_sets: usize,
    pub muscles: BTreeSet<Muscle>,
    /// Volume attributed per muscle; secondary muscles count 0.6 and
    /// tertiary muscles 0.3 of the exercise's volume.
    pub volume_per_muscle: BTreeMap<Muscle, f32>,
    pub exercise_frequency: BTreeMap<Name, u32>,
}

/// Direction of an exercise's session-to-session volume, classified with a
/// ±2% deadband per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadTrend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

/// Heaviest, highest-volume and highest-rep single sets of an exercise,
/// each tagged with its session date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalRecords {
    pub max_weight: Option<(NaiveDate, PerformedSet)>,
    pub max_volume: Option<(NaiveDate, PerformedSet)>,
    pub max_reps: Option<(NaiveDate, PerformedSet)>,
}

impl PersonalRecords {
    /// The best set is the highest-volume one.
    #[must_use]
    pub fn best_set(&self) -> Option<&(NaiveDate, PerformedSet)> {
        self.max_volume.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyReport {
    pub training_days: usize,
    /// Training days relative to an every-other-day baseline, 0-100.
    pub score: f32,
    pub rating: ConsistencyRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodTrend {
    Increasing,
    Decreasing,
    Stable,
}

/// Current window compared against the immediately preceding one.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodComparison {
    pub volume_change: f32,
    pub session_delta: i64,
    pub trend: PeriodTrend,
}

/// Summarizes the week starting at `week_start` (7 days inclusive).
///
/// Sets of exercises missing from the catalog still count toward total
/// volume and sets, but cannot be attributed to muscles or names.
#[must_use]
pub fn weekly_summary(
    history: &[TrainingSession],
    exercises: &BTreeMap<ExerciseID, Exercise>,
    week_start: NaiveDate,
) -> WeeklySummary {
    let week_end = week_start + Days::new(6);
    let mut summary = WeeklySummary {
        week_start,
        total_volume: 0.0,
        total_sets: 0,
        muscles: BTreeSet::new(),
        volume_per_muscle: BTreeMap::new(),
        exercise_frequency: BTreeMap::new(),
    };

    for session in history
        .iter()
        .filter(|s| s.date >= week_start && s.date <= week_end)
    {
        for session_exercise in &session.exercises {
            if session_exercise.sets.is_empty() {
                continue;
            }
            let volume = session_exercise.volume();
            summary.total_volume += volume;
            summary.total_sets += session_exercise.sets.len();

            let Some(exercise) = exercises.get(&session_exercise.exercise_id) else {
                continue;
            };
            for (muscle, role) in exercise.muscle_roles() {
                summary.muscles.insert(muscle);
                *summary.volume_per_muscle.entry(muscle).or_insert(0.0) +=
                    volume * role.volume_factor();
            }
            *summary
                .exercise_frequency
                .entry(exercise.name.clone())
                .or_insert(0) += 1;
        }
    }

    summary
}

/// Weekly summaries for the `weeks` trailing weeks ending at `as_of`,
/// oldest first.
#[must_use]
pub fn volume_trend(
    history: &[TrainingSession],
    exercises: &BTreeMap<ExerciseID, Exercise>,
    weeks: usize,
    as_of: NaiveDate,
) -> Vec<WeeklySummary> {
    (0..weeks)
        .rev()
        .filter_map(|weeks_back| {
            as_of
                .checked_sub_days(Days::new(7 * weeks_back as u64 + 6))
                .map(|week_start| weekly_summary(history, exercises, week_start))
        })
        .collect()
}

/// Classifies an exercise's long-term volume development across its
/// qualifying sessions.
#[must_use]
pub fn progressive_overload(
    history: &[TrainingSession],
    exercise_id: ExerciseID,
) -> OverloadTrend {
    let mut volumes: Vec<(NaiveDate, f32)> = history
        .iter()
        .filter_map(|session| {
            let sets = session.sets_of(exercise_id);
            (!sets.is_empty())
                .then(|| (session.date, sets.iter().map(|s| s.volume()).sum::<f32>()))
        })
        .collect();
    volumes.sort_by_key(|(date, _)| *date);

    if volumes.len() < 2 {
        return OverloadTrend::InsufficientData;
    }

    let mut increases = 0_usize;
    let mut decreases = 0_usize;
    for pair in volumes.windows(2) {
        let (previous, current) = (pair[0].1, pair[1].1);
        let change = if previous > 0.0 {
            (current - previous) / previous
        } else if current > 0.0 {
            1.0
        } else {
            0.0
        };
        if change > 0.02 {
            increases += 1;
        } else if change < -0.02 {
            decreases += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let increase_rate = increases as f32 / (volumes.len() - 1) as f32;
    if increase_rate > 0.6 {
        OverloadTrend::Increasing
    } else if increase_rate < 0.3 && decreases > increases {
        OverloadTrend::Decreasing
    } else {
        OverloadTrend::Stable
    }
}

/// Scans the full history for an exercise's record sets. All records are
/// `None` for an exercise that was never performed.
#[must_use]
pub fn personal_records(
    history: &[TrainingSession],
    exercise_id: ExerciseID,
) -> PersonalRecords {
    let mut records = PersonalRecords::default();

    for session in history {
        for set in session.sets_of(exercise_id) {
            replace_if_greater(&mut records.max_weight, session.date, set, |s| {
                f32::from(s.weight)
            });
            replace_if_greater(&mut records.max_volume, session.date, set, PerformedSet::volume);
            replace_if_greater(&mut records.max_reps, session.date, set, |s| {
                #[allow(clippy::cast_precision_loss)]
                {
                    u32::from(s.reps) as f32
                }
            });
        }
    }

    records
}

fn replace_if_greater(
    record: &mut Option<(NaiveDate, PerformedSet)>,
    date: NaiveDate,
    set: &PerformedSet,
    key: impl Fn(&PerformedSet) -> f32,
) {
    if record.is_none_or(|(_, best)| key(set) > key(&best)) {
        *record = Some((date, *set));
    }
}

/// Rates training frequency over the trailing `window_days` ending at
/// `as_of`, against an every-other-day baseline.
///
/// Windows shorter than two days carry no baseline and score zero.
#[must_use]
pub fn consistency(
    history: &[TrainingSession],
    window_days: u32,
    as_of: NaiveDate,
) -> ConsistencyReport {
    let training_days = sessions_in_window(history, window_days, as_of)
        .map(|session| session.date)
        .collect::<BTreeSet<_>>()
        .len();

    let expected = window_days / 2;
    let score = if expected == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        (training_days as f32 / expected as f32 * 100.0).min(100.0)
    };

    let rating = if score >= 90.0 {
        ConsistencyRating::Excellent
    } else if score >= 70.0 {
        ConsistencyRating::Good
    } else if score >= 50.0 {
        ConsistencyRating::Fair
    } else {
        ConsistencyRating::Poor
    };

    ConsistencyReport {
        training_days,
        score,
        rating,
    }
}

/// Compares the trailing `window_days` ending at `as_of` with the
/// immediately preceding window of the same length.
#[must_use]
pub fn compare_periods(
    history: &[TrainingSession],
    window_days: u32,
    as_of: NaiveDate,
) -> PeriodComparison {
    let current: Vec<_> = sessions_in_window(history, window_days, as_of).collect();
    let previous: Vec<_> = as_of
        .checked_sub_days(Days::new(u64::from(window_days)))
        .map(|end| sessions_in_window(history, window_days, end).collect())
        .unwrap_or_default();

    let current_volume: f32 = current.iter().map(|s| s.total_volume()).sum();
    let previous_volume: f32 = previous.iter().map(|s| s.total_volume()).sum();

    let volume_change = if previous_volume > 0.0 {
        (current_volume - previous_volume) / previous_volume * 100.0
    } else if current_volume > 0.0 {
        100.0
    } else {
        0.0
    };

    let trend = if volume_change > 5.0 {
        PeriodTrend::Increasing
    } else if volume_change < -5.0 {
        PeriodTrend::Decreasing
    } else {
        PeriodTrend::Stable
    };

    #[allow(clippy::cast_possible_wrap)]
    PeriodComparison {
        volume_change,
        session_delta: current.len() as i64 - previous.len() as i64,
        trend,
    }
}

fn sessions_in_window(
    history: &[TrainingSession],
    window_days: u32,
    end: NaiveDate,
) -> impl Iterator<Item = &TrainingSession> {
    let start = end
        .checked_sub_days(Days::new(u64::from(window_days.saturating_sub(1))))
        .unwrap_or(end);
    history
        .iter()
        .filter(move |session| session.date >= start && session.date <= end)
}
