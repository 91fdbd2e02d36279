// src/autotune/tuning.rs

//! # Tuning Inputs Module
//!
//! The two operator dials that shape the synthesized response. They are kept
//! in the integer units of the dials and scaled on read.

use crate::{Real, SynthesisError, TuningParameter};

/// Divisor from the noise dial to the high frequency gain weight.
pub const NOISE_SCALE: f64 = 1000.0;

/// Divisor from the damping dial to the damping ratio.
pub const DAMPING_SCALE: f64 = 100.0;

/// Operator tuning dials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TuningInputs {
    /// High frequency gain weight in thousandths. Higher values accept more
    /// noise in exchange for a faster derivative filter.
    pub noise: i32,
    /// Desired closed loop damping ratio in hundredths. Higher values make
    /// oscillation less likely.
    pub damping: i32,
}

impl TuningInputs {
    /// Creates tuning inputs with the default dial positions: damping 1.1 and
    /// a high frequency gain weight of 1%.
    pub fn new() -> Self {
        Self {
            noise: 10,
            damping: 110,
        }
    }

    /// Creates tuning inputs from raw dial positions.
    pub fn with_dials(noise: i32, damping: i32) -> Self {
        Self { noise, damping }
    }

    /// High frequency gain weight, `ghf`.
    pub fn ghf<T: Real>(&self) -> T {
        T::constant(f64::from(self.noise) / NOISE_SCALE)
    }

    /// Damping ratio, `damp`.
    pub fn damp<T: Real>(&self) -> T {
        T::constant(f64::from(self.damping) / DAMPING_SCALE)
    }

    /// Scales and validates both dials, returning `(ghf, damp)`.
    pub fn scaled<T: Real>(&self) -> Result<(T, T), SynthesisError> {
        let ghf: T = self.ghf();
        let damp: T = self.damp();

        if !(damp.is_finite() && damp > T::zero()) {
            return Err(SynthesisError::InvalidTuningInput(TuningParameter::Damping));
        }
        if !(ghf.is_finite() && ghf >= T::zero()) {
            return Err(SynthesisError::InvalidTuningInput(TuningParameter::Noise));
        }

        Ok((ghf, damp))
    }
}

impl Default for TuningInputs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_tuning_scaling() {
        let tuning = TuningInputs::with_dials(20, 50);
        let (ghf, damp): (f64, f64) = tuning.scaled().unwrap();

        assert!(value_close(0.02, ghf));
        assert!(value_close(0.5, damp));
    }

    #[test]
    fn test_tuning_defaults() {
        let tuning = TuningInputs::default();
        assert!(value_close(1.1, tuning.damp::<f64>()));
        assert!(value_close(0.01, tuning.ghf::<f64>()));
    }

    #[test]
    fn test_tuning_rejects_non_positive_damping() {
        for damping in [0, -10] {
            let tuning = TuningInputs::with_dials(10, damping);
            assert_eq!(
                tuning.scaled::<f64>(),
                Err(SynthesisError::InvalidTuningInput(TuningParameter::Damping))
            );
        }
    }

    #[test]
    fn test_tuning_rejects_negative_noise() {
        let tuning = TuningInputs::with_dials(-1, 110);
        assert_eq!(
            tuning.scaled::<f64>(),
            Err(SynthesisError::InvalidTuningInput(TuningParameter::Noise))
        );
        assert!(TuningInputs::with_dials(0, 110).scaled::<f64>().is_ok());
    }
}
