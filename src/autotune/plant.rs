// src/autotune/plant.rs

//! # Identified Plant Module
//!
//! Plant parameters reported by system identification. The identification
//! estimates the logarithm of each parameter, so every value is exponentiated
//! before it enters the synthesis math. The model for each axis is
//! `beta / (s * (tau * s + 1))` from actuator command to angular rate.

use core::fmt;

use crate::{PlantParameter, Real, SynthesisError};

/// Rotational axis handled by the synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Roll axis.
    Roll,
    /// Pitch axis.
    Pitch,
}

impl Axis {
    /// Both axes, roll first.
    pub const ALL: [Axis; 2] = [Axis::Roll, Axis::Pitch];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Roll => write!(f, "roll"),
            Axis::Pitch => write!(f, "pitch"),
        }
    }
}

/// Log-domain plant parameters as published by system identification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentifiedPlant<T> {
    /// Natural logarithm of the actuator time constant in seconds.
    pub tau: T,
    /// Natural logarithm of the roll gain.
    pub beta_roll: T,
    /// Natural logarithm of the pitch gain.
    pub beta_pitch: T,
}

impl<T: Real> IdentifiedPlant<T> {
    /// Creates a plant from log-domain values.
    pub fn new(tau: T, beta_roll: T, beta_pitch: T) -> Self {
        Self {
            tau,
            beta_roll,
            beta_pitch,
        }
    }

    /// Creates a plant from linear-domain values by taking their logarithm.
    ///
    /// ```
    /// use free_flight_autotune::IdentifiedPlant;
    ///
    /// let plant = IdentifiedPlant::from_linear(0.03_f64, 22000.0, 22000.0);
    /// assert!((plant.time_constant() - 0.03).abs() < 1e-12);
    /// ```
    pub fn from_linear(tau: T, beta_roll: T, beta_pitch: T) -> Self {
        Self::new(tau.ln(), beta_roll.ln(), beta_pitch.ln())
    }

    /// The log-domain gain for `axis`.
    pub fn log_gain(&self, axis: Axis) -> T {
        match axis {
            Axis::Roll => self.beta_roll,
            Axis::Pitch => self.beta_pitch,
        }
    }

    /// Time constant in seconds.
    pub fn time_constant(&self) -> T {
        self.tau.exp()
    }

    /// Linear gain for `axis`.
    pub fn gain(&self, axis: Axis) -> T {
        self.log_gain(axis).exp()
    }

    /// Exponentiates and validates all parameters.
    pub fn model(&self) -> Result<PlantModel<T>, SynthesisError> {
        let tau = self.time_constant();
        if !positive_finite(tau) {
            return Err(SynthesisError::InvalidPlantParameter(
                PlantParameter::TimeConstant,
            ));
        }

        let mut gains = [T::zero(); 2];
        for (gain, axis) in gains.iter_mut().zip(Axis::ALL) {
            *gain = self.gain(axis);
            if !positive_finite(*gain) {
                return Err(SynthesisError::InvalidPlantParameter(PlantParameter::Gain(
                    axis,
                )));
            }
        }

        Ok(PlantModel {
            tau,
            beta_roll: gains[0],
            beta_pitch: gains[1],
        })
    }
}

/// Linear-domain plant parameters that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantModel<T> {
    /// Time constant in seconds. Finite and positive.
    pub tau: T,
    /// Roll gain. Finite and positive.
    pub beta_roll: T,
    /// Pitch gain. Finite and positive.
    pub beta_pitch: T,
}

impl<T: Copy> PlantModel<T> {
    /// Linear gain for `axis`.
    pub fn gain(&self, axis: Axis) -> T {
        match axis {
            Axis::Roll => self.beta_roll,
            Axis::Pitch => self.beta_pitch,
        }
    }
}

pub(crate) fn positive_finite<T: Real>(value: T) -> bool {
    value.is_finite() && value > T::zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_plant_model_exponentiates() {
        let plant = IdentifiedPlant::new(-3.5, 10.0, 9.0);
        let model = plant.model().unwrap();

        assert!(relative_close((-3.5f64).exp(), model.tau));
        assert!(relative_close(10.0f64.exp(), model.gain(Axis::Roll)));
        assert!(relative_close(9.0f64.exp(), model.gain(Axis::Pitch)));
    }

    #[test]
    fn test_plant_model_from_linear_round_trip() {
        let plant = IdentifiedPlant::from_linear(0.3, 1.0, 2.0);
        assert!(value_close(0.0, plant.beta_roll));
        assert!(relative_close(0.3, plant.model().unwrap().tau));
    }

    /// A zero time constant is a log-domain value of negative infinity.
    #[test]
    fn test_plant_model_rejects_zero_tau() {
        let plant = IdentifiedPlant::from_linear(0.0, 1.0, 1.0);
        assert_eq!(
            plant.model(),
            Err(SynthesisError::InvalidPlantParameter(
                PlantParameter::TimeConstant
            ))
        );
    }

    #[test]
    fn test_plant_model_rejects_non_finite_values() {
        let plant = IdentifiedPlant::new(f64::NAN, 10.0, 10.0);
        assert_eq!(
            plant.model(),
            Err(SynthesisError::InvalidPlantParameter(
                PlantParameter::TimeConstant
            ))
        );

        // exp overflows to infinity
        let plant = IdentifiedPlant::new(-3.5, 10.0, 1000.0);
        assert_eq!(
            plant.model(),
            Err(SynthesisError::InvalidPlantParameter(PlantParameter::Gain(
                Axis::Pitch
            )))
        );
    }
}
