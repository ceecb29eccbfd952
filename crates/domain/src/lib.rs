#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod analytics;
mod config;
mod exercise;
mod fatigue;
mod muscle;
mod progression;
mod training;
mod training_session;

pub use analytics::{
    ConsistencyRating, ConsistencyReport, OverloadTrend, PeriodComparison, PeriodTrend,
    PersonalRecords, WeeklySummary, compare_periods, consistency, personal_records,
    progressive_overload, volume_trend, weekly_summary,
};
pub use config::EngineConfig;
pub use exercise::{
    Exercise, ExerciseID, ExerciseType, MuscleRole, Name, NameError,
};
pub use fatigue::{FatigueState, Wellness};
pub use muscle::Muscle;
pub use progression::{Advice, ReadinessLevel, Recommendation, Trend, advise};
pub use training::{
    PerformedSet, Reps, RepsError, Rir, RirError, Weight, WeightError,
};
pub use training_session::{SessionExercise, TrainingSession};
