// src/autotune/error.rs

//! Errors reported by gain synthesis and by committing its result.

use core::fmt;

use crate::Axis;

/// Identified plant parameter that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlantParameter {
    /// The time constant, after exponentiation.
    TimeConstant,
    /// The gain of one axis, after exponentiation.
    Gain(Axis),
}

/// Tuning dial that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuningParameter {
    /// Desired closed loop damping ratio. Must be positive.
    Damping,
    /// High frequency gain weight. Must not be negative.
    Noise,
}

/// Failure of a gain synthesis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SynthesisError {
    /// Identified plant parameter is non-finite or not positive.
    InvalidPlantParameter(PlantParameter),
    /// Tuning input is out of its valid range.
    InvalidTuningInput(TuningParameter),
    /// The solve produced a non-finite value or a non-positive bandwidth or
    /// filter time constant.
    DegenerateSolution,
}

impl fmt::Display for PlantParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantParameter::TimeConstant => write!(f, "time constant"),
            PlantParameter::Gain(axis) => write!(f, "{} gain", axis),
        }
    }
}

impl fmt::Display for TuningParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningParameter::Damping => write!(f, "damping"),
            TuningParameter::Noise => write!(f, "noise"),
        }
    }
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisError::InvalidPlantParameter(param) => {
                write!(f, "invalid identified {}", param)
            }
            SynthesisError::InvalidTuningInput(param) => write!(f, "invalid {} setting", param),
            SynthesisError::DegenerateSolution => {
                write!(f, "pole placement did not produce a usable solution")
            }
        }
    }
}

/// Failure of a commit, either while recomputing or while writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommitError<E> {
    /// Recomputing the gains failed; nothing was written.
    Synthesis(SynthesisError),
    /// The settings store rejected the write.
    Store(E),
}

impl<E> From<SynthesisError> for CommitError<E> {
    fn from(e: SynthesisError) -> Self {
        CommitError::Synthesis(e)
    }
}

impl<E: fmt::Display> fmt::Display for CommitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitError::Synthesis(e) => write!(f, "commit aborted: {}", e),
            CommitError::Store(e) => write!(f, "settings write failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::format;

    #[test]
    fn test_synthesis_error_display() {
        let error = SynthesisError::InvalidPlantParameter(PlantParameter::Gain(Axis::Pitch));
        assert_eq!(format!("{}", error), "invalid identified pitch gain");

        let error: CommitError<&str> = CommitError::Store("flash busy");
        assert_eq!(format!("{}", error), "settings write failed: flash busy");
    }

    #[test]
    fn test_commit_error_from_synthesis_error() {
        let error: CommitError<()> =
            SynthesisError::InvalidTuningInput(TuningParameter::Damping).into();
        assert_eq!(
            error,
            CommitError::Synthesis(SynthesisError::InvalidTuningInput(
                TuningParameter::Damping
            ))
        );
    }
}
