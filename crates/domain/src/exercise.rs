use std::collections::BTreeMap;

use derive_more::{AsRef, Deref, Display};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Muscle;

/// An exercise definition as supplied by the host application's catalog.
///
/// The muscle lists partition the role each muscle plays for the movement.
/// An exercise must not list the same muscle in more than one role; if it
/// does, the primary role wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub exercise_type: ExerciseType,
    /// Whether the movement loads the spine directly.
    pub axial: bool,
    pub primary: Vec<Muscle>,
    pub secondary: Vec<Muscle>,
    pub tertiary: Vec<Muscle>,
}

impl Exercise {
    /// The role of every involved muscle, computed once for reuse in
    /// per-set loops.
    #[must_use]
    pub fn muscle_roles(&self) -> BTreeMap<Muscle, MuscleRole> {
        let mut result = BTreeMap::new();
        for muscle in &self.tertiary {
            result.insert(*muscle, MuscleRole::Tertiary);
        }
        for muscle in &self.secondary {
            result.insert(*muscle, MuscleRole::Secondary);
        }
        for muscle in &self.primary {
            result.insert(*muscle, MuscleRole::Primary);
        }
        result
    }

    #[must_use]
    pub fn role(&self, muscle: Muscle) -> Option<MuscleRole> {
        if self.primary.contains(&muscle) {
            Some(MuscleRole::Primary)
        } else if self.secondary.contains(&muscle) {
            Some(MuscleRole::Secondary)
        } else if self.tertiary.contains(&muscle) {
            Some(MuscleRole::Tertiary)
        } else {
            None
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }

        if trimmed.len() > 80 {
            return Err(NameError::TooLong(trimmed.len()));
        }

        Ok(Name(trimmed.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Exercise name must not be empty")]
    Empty,
    #[error("Exercise name must be 80 characters or fewer ({0} > 80)")]
    TooLong(usize),
}

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub enum ExerciseType {
    CompoundLower,
    CompoundUpper,
    IsolationLower,
    IsolationUpper,
}

impl ExerciseType {
    #[must_use]
    pub fn is_isolation(self) -> bool {
        matches!(
            self,
            ExerciseType::IsolationLower | ExerciseType::IsolationUpper
        )
    }
}

/// The role a muscle plays for an exercise. Roles are mutually exclusive
/// per (exercise, muscle) pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MuscleRole {
    Primary,
    Secondary,
    Tertiary,
}

impl MuscleRole {
    /// Weighting applied to stimulus and fatigue contributions.
    #[must_use]
    pub fn weight(self) -> f32 {
        match self {
            MuscleRole::Primary => 1.0,
            MuscleRole::Secondary => 0.5,
            MuscleRole::Tertiary => 0.25,
        }
    }

    /// Share of an exercise's volume attributed to a muscle in the weekly
    /// volume breakdown.
    #[must_use]
    pub fn volume_factor(self) -> f32 {
        match self {
            MuscleRole::Primary => 1.0,
            MuscleRole::Secondary => 0.6,
            MuscleRole::Tertiary => 0.3,
        }
    }
}
