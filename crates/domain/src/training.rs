use std::fmt;

use derive_more::{Display, Into};

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Reps in reserve, stored in tenths to keep equality exact.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rir(u8);

impl Rir {
    pub const ZERO: Rir = Rir(0);
    pub const ONE: Rir = Rir(10);
    pub const TWO: Rir = Rir(20);
    pub const THREE: Rir = Rir(30);
    pub const FOUR: Rir = Rir(40);
    pub const FIVE: Rir = Rir(50);

    pub fn new(value: f32) -> Result<Self, RirError> {
        if !(0.0..=10.0).contains(&value) {
            return Err(RirError::OutOfRange);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = (value * 10.0) as u8;

        if v % 5 != 0 {
            return Err(RirError::InvalidResolution);
        }

        Ok(Self(v))
    }

    #[must_use]
    pub fn avg(values: &[Rir]) -> Option<f32> {
        if values.is_empty() {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(
                values.iter().map(|rir| f32::from(rir.0)).sum::<f32>()
                    / 10.0
                    / values.len() as f32,
            )
        }
    }
}

impl From<Rir> for f32 {
    fn from(value: Rir) -> Self {
        f32::from(value.0) / 10.0
    }
}

impl TryFrom<&str> for Rir {
    type Error = RirError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Rir::new(parsed_value),
            Err(_) => Err(RirError::ParseError),
        }
    }
}

impl fmt::Display for Rir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", f32::from(*self))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RirError {
    #[error("RIR must be in the range 0.0 to 10.0")]
    OutOfRange,
    #[error("RIR must be a multiple of 0.5")]
    InvalidResolution,
    #[error("RIR must be a decimal")]
    ParseError,
}

/// One logged set. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformedSet {
    pub weight: Weight,
    pub reps: Reps,
    pub rir: Rir,
}

impl PerformedSet {
    /// Tonnage of the set (weight times reps).
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        {
            f32::from(self.weight) * u32::from(self.reps) as f32
        }
    }

    /// Effort proxy in (0,1]; a lower RIR (harder set) yields a value
    /// closer to 1.
    #[must_use]
    pub fn effort(&self) -> f32 {
        (-0.2 * f32::from(self.rir)).exp()
    }

    /// One-rep max estimate projecting total reps at RPE-adjusted failure.
    #[must_use]
    pub fn estimated_one_rep_max(&self) -> f32 {
        let rpe = 10.0 - f32::from(self.rir);
        #[allow(clippy::cast_precision_loss)]
        let total_reps = u32::from(self.reps) as f32 / (1.0278 - 0.0278 * rpe);
        f32::from(self.weight) * (1.0 + total_reps / 30.0)
    }

    /// Normalized intensity: weight relative to the estimated one-rep max.
    /// Zero for a zero-weight set.
    #[must_use]
    pub fn load_factor(&self) -> f32 {
        let one_rep_max = self.estimated_one_rep_max();
        if one_rep_max > 0.0 {
            f32::from(self.weight) / one_rep_max
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn set(weight: f32, reps: u32, rir: f32) -> PerformedSet {
        PerformedSet {
            weight: Weight::new(weight).unwrap(),
            reps: Reps::new(reps).unwrap(),
            rir: Rir::new(rir).unwrap(),
        }
    }

    #[rstest]
    #[case(0.0, Ok(Weight(0.0)))]
    #[case(999.9, Ok(Weight(999.9)))]
    #[case(1000.0, Err(WeightError::OutOfRange))]
    #[case(-0.1, Err(WeightError::OutOfRange))]
    #[case(1.23, Err(WeightError::InvalidResolution))]
    fn test_weight_new(#[case] input: f32, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::new(input), expected);
    }

    #[rstest]
    #[case("2.0", Ok(Weight(2.0)))]
    #[case("8", Ok(Weight(8.0)))]
    #[case("1000", Err(WeightError::OutOfRange))]
    #[case("", Err(WeightError::ParseError))]
    fn test_weight_from_str(#[case] input: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(input), expected);
    }

    #[rstest]
    #[case(0, Ok(Reps(0)))]
    #[case(999, Ok(Reps(999)))]
    #[case(1000, Err(RepsError::OutOfRange))]
    fn test_reps_new(#[case] input: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(input), expected);
    }

    #[rstest]
    #[case("5", Ok(Reps(5)))]
    #[case("5.", Err(RepsError::ParseError))]
    #[case("", Err(RepsError::ParseError))]
    fn test_reps_from_str(#[case] input: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(input), expected);
    }

    #[rstest]
    #[case(0.0, Ok(Rir::ZERO))]
    #[case(2.0, Ok(Rir::TWO))]
    #[case(2.5, Ok(Rir(25)))]
    #[case(10.0, Ok(Rir(100)))]
    #[case(10.5, Err(RirError::OutOfRange))]
    #[case(-1.0, Err(RirError::OutOfRange))]
    #[case(2.2, Err(RirError::InvalidResolution))]
    fn test_rir_new(#[case] input: f32, #[case] expected: Result<Rir, RirError>) {
        assert_eq!(Rir::new(input), expected);
    }

    #[rstest]
    #[case("2.0", Ok(Rir::TWO))]
    #[case("11", Err(RirError::OutOfRange))]
    #[case("", Err(RirError::ParseError))]
    fn test_rir_from_str(#[case] input: &str, #[case] expected: Result<Rir, RirError>) {
        assert_eq!(Rir::try_from(input), expected);
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&[Rir::TWO], Some(2.0))]
    #[case(&[Rir::ONE, Rir::TWO], Some(1.5))]
    fn test_rir_avg(#[case] values: &[Rir], #[case] expected: Option<f32>) {
        assert_eq!(Rir::avg(values), expected);
    }

    #[rstest]
    #[case(Rir::TWO, "2")]
    #[case(Rir(25), "2.5")]
    fn test_rir_display(#[case] input: Rir, #[case] expected: &str) {
        assert_eq!(input.to_string(), expected);
    }

    #[test]
    fn test_performed_set_volume() {
        assert_approx_eq!(set(100.0, 5, 2.0).volume(), 500.0);
        assert_approx_eq!(set(0.0, 5, 2.0).volume(), 0.0);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(2.0, 0.670_32)]
    #[case(5.0, 0.367_879_4)]
    fn test_performed_set_effort(#[case] rir: f32, #[case] expected: f32) {
        assert_approx_eq!(set(100.0, 5, rir).effort(), expected, 1e-5);
    }

    #[test]
    fn test_performed_set_estimated_one_rep_max() {
        // 100 kg x 5 @ RIR 2 -> RPE 8, 5 / (1.0278 - 0.2224) = 6.208 reps
        // at failure, e1rm = 100 * (1 + 6.208 / 30)
        assert_approx_eq!(set(100.0, 5, 2.0).estimated_one_rep_max(), 120.695, 1e-2);
    }

    #[test]
    fn test_performed_set_load_factor() {
        let s = set(100.0, 5, 2.0);

        assert_approx_eq!(s.load_factor(), 100.0 / s.estimated_one_rep_max());
        assert_approx_eq!(set(0.0, 5, 2.0).load_factor(), 0.0);
    }

    #[test]
    fn test_performed_set_load_factor_bounded() {
        for (weight, reps, rir) in [(60.0, 12, 3.0), (140.0, 1, 0.0), (20.0, 30, 5.0)] {
            let load_factor = set(weight, reps, rir).load_factor();
            assert!(load_factor > 0.0 && load_factor <= 1.0);
        }
    }
}
