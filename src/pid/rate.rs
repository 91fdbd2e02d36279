// src/pid/rate.rs

//! # Rate-Based PID Control Module
//!
//! This module provides a compute function and control data structure
//! to perform rate-based PID (Proportional-Integral-Derivative) control
//! calculations. The derivative term arrives already filtered, see
//! [`DerivativeFilter`](crate::pid::DerivativeFilter).

use crate::Number;
use piddiy::PidController;

/// Control data for rate-based PID stabilization callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateControlData<T> {
    /// The current rate of change, typically reported by a gyro.
    pub rate: T,
    /// The time delta since the last computation.
    pub dt: T,
    /// The maximum allowed value for the integral term, used to prevent integral windup.
    pub integral_limit: T,
    /// Flag to reset the integral term, typically used when the controller is inactive.
    pub reset_integral: bool,
    /// Low pass filtered derivative of the rate error.
    pub derivative: T,
}

/// Raw derivative of the rate error since the previous computation.
pub fn rate_error_derivative<T: Number>(
    pid: &PidController<T, RateControlData<T>>,
    rate: T,
    dt: T,
) -> T {
    (pid.set_point - rate - pid.error) / dt
}

/// Rate-based PID stabilization compute callback.
pub fn compute_rate<T: Number>(
    pid: &mut PidController<T, RateControlData<T>>,
    data: RateControlData<T>,
) -> (T, T, T) {
    let error = pid.set_point - data.rate;
    let integral = if !data.reset_integral {
        (pid.integral + error * data.dt).clamp(-data.integral_limit, data.integral_limit)
    } else {
        T::zero()
    };

    (error, integral, data.derivative)
}
