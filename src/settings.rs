// src/settings.rs

//! # Stabilization Settings Module
//!
//! The stabilization settings record holds the rate loop PID gains, the
//! attitude loop PI gains, their integral limits, the shared derivative filter
//! cutoff and the output scale for roll and pitch. Gain synthesis overwrites
//! the gains and the cutoff and leaves the limits and the scale alone.

use num_traits::{Float, NumCast};

/// Three-term gains of a rate loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidGains<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Derivative gain.
    pub kd: T,
}

/// Rate loop settings of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidSettings<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Derivative gain.
    pub kd: T,
    /// Upper limit for the integral term to prevent integral windup.
    pub i_limit: T,
}

impl<T: Copy> PidSettings<T> {
    /// The gains without the integral limit.
    pub fn gains(&self) -> PidGains<T> {
        PidGains {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
        }
    }

    /// Replaces the gains, keeping the integral limit.
    pub fn set_gains(&mut self, gains: PidGains<T>) {
        self.kp = gains.kp;
        self.ki = gains.ki;
        self.kd = gains.kd;
    }
}

/// Attitude loop settings of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PiSettings<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Upper limit for the integral term to prevent integral windup.
    pub i_limit: T,
}

/// Administrative state of the autotune module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdminState {
    /// The module runs and publishes identification data.
    Enabled,
    /// The module does not run.
    #[default]
    Disabled,
}

impl From<bool> for AdminState {
    fn from(enabled: bool) -> Self {
        if enabled {
            AdminState::Enabled
        } else {
            AdminState::Disabled
        }
    }
}

impl AdminState {
    /// Whether the module is enabled.
    pub fn is_enabled(self) -> bool {
        self == AdminState::Enabled
    }
}

/// Stabilization settings for roll and pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StabilizationSettings<T> {
    /// Roll rate loop.
    pub roll_rate: PidSettings<T>,
    /// Pitch rate loop.
    pub pitch_rate: PidSettings<T>,
    /// Roll attitude loop.
    pub roll_attitude: PiSettings<T>,
    /// Pitch attitude loop.
    pub pitch_attitude: PiSettings<T>,
    /// Derivative low pass filter cutoff in Hz.
    pub derivative_cutoff: T,
    /// Scale factor applied to the rate loop output to match actuator range.
    pub scale: T,
}

impl<T: Float> StabilizationSettings<T> {
    /// Creates settings with every gain zero, integral limits of one, no
    /// derivative filtering and unit output scale.
    /// These should be replaced by synthesized or hand tuned values.
    ///
    /// Example Usage
    /// ```
    /// use free_flight_autotune::StabilizationSettings;
    ///
    /// let mut settings = StabilizationSettings::<f64>::new();
    ///
    /// // Set the integral limits, which synthesis leaves alone.
    /// settings.roll_rate.i_limit = 0.3;
    /// settings.pitch_rate.i_limit = 0.3;
    /// settings.roll_attitude.i_limit = 50.0;
    /// settings.pitch_attitude.i_limit = 50.0;
    ///
    /// assert_eq!(settings.roll_rate.kp, 0.0);
    /// assert!(settings.derivative_cutoff.is_infinite());
    /// ```
    pub fn new() -> Self {
        let rate = PidSettings {
            kp: T::zero(),
            ki: T::zero(),
            kd: T::zero(),
            i_limit: T::one(),
        };
        let attitude = PiSettings {
            kp: T::zero(),
            ki: T::zero(),
            i_limit: T::one(),
        };

        Self {
            roll_rate: rate,
            pitch_rate: rate,
            roll_attitude: attitude,
            pitch_attitude: attitude,
            derivative_cutoff: T::infinity(),
            scale: T::one(),
        }
    }

    /// Time constant of the derivative filter, `1 / (2 * pi * cutoff)`.
    ///
    /// An infinite cutoff gives zero, meaning no filtering.
    pub fn derivative_time_constant(&self) -> T {
        let two_pi = <T as NumCast>::from(core::f64::consts::TAU).unwrap_or_else(T::nan);
        (two_pi * self.derivative_cutoff).recip()
    }
}

impl<T: Float> Default for StabilizationSettings<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StabilizationSettings<T> {
    /// Converts every field with `f`, for example into a fixed point type.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> StabilizationSettings<U> {
        let mut rate = |s: PidSettings<T>| PidSettings {
            kp: f(s.kp),
            ki: f(s.ki),
            kd: f(s.kd),
            i_limit: f(s.i_limit),
        };
        let roll_rate = rate(self.roll_rate);
        let pitch_rate = rate(self.pitch_rate);

        let mut attitude = |s: PiSettings<T>| PiSettings {
            kp: f(s.kp),
            ki: f(s.ki),
            i_limit: f(s.i_limit),
        };
        let roll_attitude = attitude(self.roll_attitude);
        let pitch_attitude = attitude(self.pitch_attitude);

        StabilizationSettings {
            roll_rate,
            pitch_rate,
            roll_attitude,
            pitch_attitude,
            derivative_cutoff: f(self.derivative_cutoff),
            scale: f(self.scale),
        }
    }
}
