// src/stabilizer/flight_stabilizer.rs

//! A module specifying the shared interface for roll/pitch flight stabilizers.
//! This module is designed for embedded systems in no_std environments. It
//! includes a configuration structure for the cascade gains, built from a
//! stabilization settings record, and a trait defining the stabilization
//! functionality.

use piddiy::Number as PiddiyNumber;

use crate::{Real, StabilizationSettings};

/// Custom trait to encapsulate base number requirements.
pub trait Number: PiddiyNumber {
    /// Clamps generic PartialOrd values within a given range.
    fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if max < self {
            max
        } else {
            self
        }
    }
}

impl<T: PiddiyNumber> Number for T {}

/// Configuration for cascade gains and other settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightStabilizerConfig<T> {
    /// Proportional gain for roll rate control.
    pub kp_roll_rate: T,
    /// Integral gain for roll rate control.
    pub ki_roll_rate: T,
    /// Derivative gain for roll rate control.
    pub kd_roll_rate: T,
    /// Proportional gain for pitch rate control.
    pub kp_pitch_rate: T,
    /// Integral gain for pitch rate control.
    pub ki_pitch_rate: T,
    /// Derivative gain for pitch rate control.
    pub kd_pitch_rate: T,
    /// Proportional gain for roll attitude control.
    pub kp_roll_attitude: T,
    /// Integral gain for roll attitude control.
    pub ki_roll_attitude: T,
    /// Proportional gain for pitch attitude control.
    pub kp_pitch_attitude: T,
    /// Integral gain for pitch attitude control.
    pub ki_pitch_attitude: T,
    /// Upper limit for the roll rate integral term.
    pub i_limit_roll_rate: T,
    /// Upper limit for the pitch rate integral term.
    pub i_limit_pitch_rate: T,
    /// Upper limit for the roll attitude integral term.
    pub i_limit_roll_attitude: T,
    /// Upper limit for the pitch attitude integral term.
    pub i_limit_pitch_attitude: T,
    /// Time constant of the rate loop derivative filter in seconds.
    pub derivative_tau: T,
    /// Scale factor applied to the rate loop output to match actuator range.
    pub scale: T,
}

impl<T: Number> FlightStabilizerConfig<T> {
    /// Creates a new configuration with default values for all parameters.
    /// Proportional gains, integral limits and the scale are one, everything
    /// else is zero.
    /// These should be replaced with synthesized or hand tuned values.
    ///
    /// Example Usage
    /// ```
    /// use free_flight_autotune::FlightStabilizerConfig;
    ///
    /// let mut config = FlightStabilizerConfig::<f32>::new();
    ///
    /// config.kp_roll_rate = 0.15;
    /// config.ki_roll_rate = 0.2;
    /// config.kd_roll_rate = 0.0002;
    /// config.kp_roll_attitude = 5.0;
    ///
    /// // Filter the rate derivative with a 5 ms time constant.
    /// config.derivative_tau = 0.005;
    ///
    /// use free_flight_autotune::CascadeStabilizer;
    ///
    /// let flight_stabilizer = CascadeStabilizer::with_config(config);
    /// ```
    pub fn new() -> Self {
        Self {
            kp_roll_rate: T::one(),
            ki_roll_rate: T::zero(),
            kd_roll_rate: T::zero(),
            kp_pitch_rate: T::one(),
            ki_pitch_rate: T::zero(),
            kd_pitch_rate: T::zero(),
            kp_roll_attitude: T::one(),
            ki_roll_attitude: T::zero(),
            kp_pitch_attitude: T::one(),
            ki_pitch_attitude: T::zero(),
            i_limit_roll_rate: T::one(),
            i_limit_pitch_rate: T::one(),
            i_limit_roll_attitude: T::one(),
            i_limit_pitch_attitude: T::one(),
            derivative_tau: T::zero(),
            scale: T::one(),
        }
    }
}

impl<T: Number> Default for FlightStabilizerConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> FlightStabilizerConfig<T> {
    /// Creates a configuration from a stabilization settings record. The
    /// derivative cutoff is converted to a filter time constant.
    ///
    /// ```
    /// use free_flight_autotune::{FlightStabilizerConfig, StabilizationSettings};
    ///
    /// let mut settings = StabilizationSettings::<f64>::new();
    /// settings.roll_rate.kp = 0.002;
    /// settings.derivative_cutoff = 25.0;
    ///
    /// let config = FlightStabilizerConfig::from_settings(&settings);
    /// assert_eq!(config.kp_roll_rate, 0.002);
    /// assert!((config.derivative_tau - 0.0063662).abs() < 1e-6);
    /// ```
    pub fn from_settings(settings: &StabilizationSettings<T>) -> Self {
        Self {
            kp_roll_rate: settings.roll_rate.kp,
            ki_roll_rate: settings.roll_rate.ki,
            kd_roll_rate: settings.roll_rate.kd,
            kp_pitch_rate: settings.pitch_rate.kp,
            ki_pitch_rate: settings.pitch_rate.ki,
            kd_pitch_rate: settings.pitch_rate.kd,
            kp_roll_attitude: settings.roll_attitude.kp,
            ki_roll_attitude: settings.roll_attitude.ki,
            kp_pitch_attitude: settings.pitch_attitude.kp,
            ki_pitch_attitude: settings.pitch_attitude.ki,
            i_limit_roll_rate: settings.roll_rate.i_limit,
            i_limit_pitch_rate: settings.pitch_rate.i_limit,
            i_limit_roll_attitude: settings.roll_attitude.i_limit,
            i_limit_pitch_attitude: settings.pitch_attitude.i_limit,
            derivative_tau: settings.derivative_time_constant(),
            scale: settings.scale,
        }
    }
}

impl<T> FlightStabilizerConfig<T> {
    /// Converts every field with `f`, for example into a fixed point type.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> FlightStabilizerConfig<U> {
        FlightStabilizerConfig {
            kp_roll_rate: f(self.kp_roll_rate),
            ki_roll_rate: f(self.ki_roll_rate),
            kd_roll_rate: f(self.kd_roll_rate),
            kp_pitch_rate: f(self.kp_pitch_rate),
            ki_pitch_rate: f(self.ki_pitch_rate),
            kd_pitch_rate: f(self.kd_pitch_rate),
            kp_roll_attitude: f(self.kp_roll_attitude),
            ki_roll_attitude: f(self.ki_roll_attitude),
            kp_pitch_attitude: f(self.kp_pitch_attitude),
            ki_pitch_attitude: f(self.ki_pitch_attitude),
            i_limit_roll_rate: f(self.i_limit_roll_rate),
            i_limit_pitch_rate: f(self.i_limit_pitch_rate),
            i_limit_roll_attitude: f(self.i_limit_roll_attitude),
            i_limit_pitch_attitude: f(self.i_limit_pitch_attitude),
            derivative_tau: f(self.derivative_tau),
            scale: f(self.scale),
        }
    }
}

/// A trait for flight stabilizers that handle roll and pitch control based
/// on attitude and gyro data and dt.
pub trait FlightStabilizer<T: Number> {
    /// Takes desired setpoints, current IMU attitude, and gyro rates, then computes the control outputs.
    ///
    /// - `set_point`: A tuple of (roll, pitch) desired attitude.
    /// - `imu_attitude`: A tuple of (roll, pitch) current IMU measurements.
    /// - `gyro_rate`: A tuple of (roll rate, pitch rate) from the gyroscope.
    /// - `dt`: Time delta since the last update.
    /// - `low_throttle`: Flag indicating if the throttle is low. Used for anti-integral windup.
    ///
    /// Returns a tuple of (roll control, pitch control) outputs scaled for actuation.
    fn control(
        &mut self,
        set_point: (T, T),
        imu_attitude: (T, T),
        gyro_rate: (T, T),
        dt: T,
        low_throttle: bool,
    ) -> (T, T);
}
